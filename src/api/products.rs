//! Product pages: public listing and detail, admin-only create/edit/delete.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use tracing::info;

use super::PageQuery;
use crate::auth::{FlashKind, Session};
use crate::db::{Page, Product, ProductDeletion};
use crate::error::AppError;
use crate::ui::{self, Layout, ProductDetailTemplate, ProductFormTemplate, ProductsTemplate};
use crate::validation::ProductForm;
use crate::AppState;

/// GET /
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    mut session: Session,
) -> Result<Response, AppError> {
    let page = Page::<Product>::normalize(query.number());
    let listing = state
        .products
        .list_page(page, state.config.catalog.per_page)
        .await?;
    if listing.is_out_of_range() {
        return Err(AppError::NotFound("Page"));
    }

    let template = ProductsTemplate {
        layout: Layout::from_session(&mut session),
        page: listing,
    };
    Ok((session, ui::render(&template)).into_response())
}

/// GET /products/:id
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    mut session: Session,
) -> Result<Response, AppError> {
    let product = find_product(&state, id).await?;

    let registration = match session.context().user_id {
        Some(user_id) => {
            state
                .registrations
                .find_by_user_and_product(user_id, id)
                .await?
        }
        None => None,
    };

    let template = ProductDetailTemplate {
        layout: Layout::from_session(&mut session),
        product,
        is_registered: registration.is_some(),
        registration_status: registration
            .map(|r| r.status_enum().to_string())
            .unwrap_or_default(),
    };
    Ok((session, ui::render(&template)).into_response())
}

/// GET /create
pub async fn new_form(mut session: Session) -> Response {
    let template = create_form(Layout::from_session(&mut session), ProductForm::default());
    (session, ui::render(&template)).into_response()
}

/// POST /create
pub async fn create(
    State(state): State<AppState>,
    mut session: Session,
    Form(form): Form<ProductForm>,
) -> Result<Response, AppError> {
    let changes = match form.validate() {
        Ok(changes) => changes,
        Err(errors) => {
            let layout = Layout::from_session(&mut session).with_errors(&errors);
            let template = create_form(layout, form.trimmed());
            return Ok((
                session,
                ui::render_with_status(StatusCode::BAD_REQUEST, &template),
            )
                .into_response());
        }
    };

    let product = state.products.insert(&changes).await?;
    info!(product_id = product.id, title = %product.title, "Product created");

    session.flash(FlashKind::Success, "Product created successfully.");
    Ok((session, Redirect::to("/")).into_response())
}

/// GET /edit/:id
pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    mut session: Session,
) -> Result<Response, AppError> {
    let product = find_product(&state, id).await?;
    let form = ProductForm {
        title: product.title.clone(),
        description: product.description_text().to_string(),
        location: product.location.clone(),
        date: product.date.clone(),
    };

    let template = edit_form_template(Layout::from_session(&mut session), id, form);
    Ok((session, ui::render(&template)).into_response())
}

/// POST /edit/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    mut session: Session,
    Form(form): Form<ProductForm>,
) -> Result<Response, AppError> {
    find_product(&state, id).await?;

    let changes = match form.validate() {
        Ok(changes) => changes,
        Err(errors) => {
            let layout = Layout::from_session(&mut session).with_errors(&errors);
            let template = edit_form_template(layout, id, form.trimmed());
            return Ok((
                session,
                ui::render_with_status(StatusCode::BAD_REQUEST, &template),
            )
                .into_response());
        }
    };

    state
        .products
        .update(id, &changes)
        .await?
        .ok_or(AppError::NotFound("Product"))?;
    info!(product_id = id, "Product updated");

    session.flash(FlashKind::Success, "Product updated.");
    Ok((session, Redirect::to(&format!("/products/{id}"))).into_response())
}

/// POST /delete/:id
///
/// Products that still have registrations are kept; the admin is told why.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    mut session: Session,
) -> Result<Response, AppError> {
    match state.products.delete(id).await? {
        ProductDeletion::Deleted => {
            session.flash(FlashKind::Info, "Product deleted.");
            Ok((session, Redirect::to("/")).into_response())
        }
        ProductDeletion::NotFound => Err(AppError::NotFound("Product")),
        ProductDeletion::HasRegistrations(count) => {
            info!(product_id = id, registrations = count, "Refusing to delete product with registrations");
            session.flash(
                FlashKind::Error,
                "This product has registrations and cannot be deleted.",
            );
            Ok((session, Redirect::to(&format!("/products/{id}"))).into_response())
        }
    }
}

async fn find_product(state: &AppState, id: i64) -> Result<Product, AppError> {
    state
        .products
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Product"))
}

fn create_form(layout: Layout, form: ProductForm) -> ProductFormTemplate {
    ProductFormTemplate {
        layout,
        heading: "New product",
        action: "/create".to_string(),
        cancel_url: "/".to_string(),
        form,
    }
}

fn edit_form_template(layout: Layout, id: i64, form: ProductForm) -> ProductFormTemplate {
    ProductFormTemplate {
        layout,
        heading: "Edit product",
        action: format!("/edit/{id}"),
        cancel_url: format!("/products/{id}"),
        form,
    }
}
