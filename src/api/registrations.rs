//! The registration workflow: users register interest in a product, admins
//! approve. `pending -> approved` is the only transition.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Extension,
};
use tracing::{info, warn};

use crate::auth::{CurrentAdmin, CurrentUser, FlashKind, Session};
use crate::db::RegisterOutcome;
use crate::error::AppError;
use crate::ui::{self, AdminRegistrationsTemplate, DashboardTemplate, Layout};
use crate::AppState;

/// POST /user/register_products/:id
pub async fn register(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Path(product_id): Path<i64>,
    mut session: Session,
) -> Result<Response, AppError> {
    match state.registrations.register(user_id, product_id).await? {
        RegisterOutcome::Created(_) => {
            session.flash(
                FlashKind::Success,
                "Registration submitted. An administrator will review it.",
            );
        }
        RegisterOutcome::AlreadyRegistered(_) => {
            session.flash(FlashKind::Info, "You are already registered for this product.");
        }
        RegisterOutcome::ProductMissing => return Err(AppError::NotFound("Product")),
    }
    Ok((session, Redirect::to(&format!("/products/{product_id}"))).into_response())
}

/// GET /user/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    mut session: Session,
) -> Result<Response, AppError> {
    let Some(user) = state.accounts.users().find_by_id(user_id).await? else {
        // Signed cookie for an account that no longer exists
        warn!(user_id, "Session refers to a missing user");
        session.logout_user();
        session.flash(FlashKind::Error, "Please log in to continue.");
        return Ok((session, Redirect::to("/user/login")).into_response());
    };

    let registrations = state.registrations.list_for_user(user_id).await?;
    let template = DashboardTemplate {
        layout: Layout::from_session(&mut session),
        username: user.username,
        registrations,
    };
    Ok((session, ui::render(&template)).into_response())
}

/// GET /admin/registrations
pub async fn admin_list(
    State(state): State<AppState>,
    mut session: Session,
) -> Result<Response, AppError> {
    let registrations = state.registrations.list_all().await?;
    let template = AdminRegistrationsTemplate {
        layout: Layout::from_session(&mut session),
        registrations,
    };
    Ok((session, ui::render(&template)).into_response())
}

/// POST /admin/registrations/approve/:id
pub async fn approve(
    State(state): State<AppState>,
    Extension(CurrentAdmin(admin_id)): Extension<CurrentAdmin>,
    Path(id): Path<i64>,
    mut session: Session,
) -> Result<Response, AppError> {
    let registration = state
        .registrations
        .approve(id)
        .await?
        .ok_or(AppError::NotFound("Registration"))?;
    info!(
        registration_id = registration.id,
        admin_id,
        user_id = registration.user_id,
        "Registration approved"
    );

    session.flash(FlashKind::Success, "Registration approved.");
    Ok((session, Redirect::to("/admin/registrations")).into_response())
}
