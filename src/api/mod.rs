mod accounts;
mod items;
mod pages;
mod products;
mod registrations;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use crate::auth::{require_admin_session, require_user_session};
use crate::AppState;

/// `?page=N`; anything unparseable means the first page
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    pub fn number(&self) -> Option<u32> {
        self.page.as_deref().and_then(|p| p.trim().parse().ok())
    }
}

pub fn create_router(state: AppState) -> Router {
    // Anyone
    let public_routes = Router::new()
        .route("/", get(products::index))
        .route("/products/:id", get(products::detail))
        .route("/items", get(items::index))
        .route("/items/:id", get(items::detail))
        .route(
            "/admin/register",
            get(accounts::admin_register_form).post(accounts::admin_register),
        )
        .route(
            "/admin/login",
            get(accounts::admin_login_form).post(accounts::admin_login),
        )
        .route(
            "/user/register",
            get(accounts::user_register_form).post(accounts::user_register),
        )
        .route(
            "/user/login",
            get(accounts::user_login_form).post(accounts::user_login),
        )
        .route("/user/logout", get(accounts::user_logout))
        .route("/about", get(pages::about))
        .route("/estimate", get(pages::estimate))
        .route("/health", get(health_check));

    // Admin session required
    let admin_routes = Router::new()
        .route("/admin/logout", get(accounts::admin_logout))
        .route("/admin/registrations", get(registrations::admin_list))
        .route(
            "/admin/registrations/approve/:id",
            post(registrations::approve),
        )
        .route("/create", get(products::new_form).post(products::create))
        .route("/edit/:id", get(products::edit_form).post(products::update))
        .route("/delete/:id", post(products::delete))
        .route("/items/create", get(items::new_form).post(items::create))
        .route("/items/edit/:id", get(items::edit_form).post(items::update))
        .route("/items/delete/:id", post(items::delete))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_admin_session,
        ));

    // User session required
    let user_routes = Router::new()
        .route("/user/register_products/:id", post(registrations::register))
        .route("/user/dashboard", get(registrations::dashboard))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_user_session,
        ));

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .merge(user_routes)
        .fallback(pages::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
