//! Account signup, login and logout for both roles.
//!
//! The two roles have independent session slots: logging in or out as an
//! admin never touches the user slot and vice versa.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tracing::info;

use crate::auth::{AccountRole, FlashKind, Session};
use crate::error::AppError;
use crate::ui::{self, Layout, LoginTemplate, RegisterTemplate};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

pub async fn admin_register_form(session: Session) -> Response {
    register_page(session, AccountRole::Admin, None, None)
}

pub async fn admin_register(
    State(state): State<AppState>,
    mut session: Session,
    Form(form): Form<SignupForm>,
) -> Result<Response, AppError> {
    match state
        .accounts
        .register_admin(&form.username, &form.password)
        .await
    {
        Ok(_) => {
            session.flash(FlashKind::Success, "Admin account created. Please log in.");
            Ok((session, Redirect::to(AccountRole::Admin.login_path())).into_response())
        }
        Err(err @ (AppError::Validation(_) | AppError::DuplicateAccount(_))) => Ok(register_page(
            session,
            AccountRole::Admin,
            Some(&form),
            Some(&err),
        )),
        Err(err) => Err(err),
    }
}

pub async fn user_register_form(session: Session) -> Response {
    register_page(session, AccountRole::User, None, None)
}

pub async fn user_register(
    State(state): State<AppState>,
    mut session: Session,
    Form(form): Form<SignupForm>,
) -> Result<Response, AppError> {
    match state
        .accounts
        .register_user(&form.username, &form.email, &form.password)
        .await
    {
        Ok(_) => {
            session.flash(FlashKind::Success, "Registration successful. Please log in.");
            Ok((session, Redirect::to(AccountRole::User.login_path())).into_response())
        }
        Err(err @ (AppError::Validation(_) | AppError::DuplicateAccount(_))) => Ok(register_page(
            session,
            AccountRole::User,
            Some(&form),
            Some(&err),
        )),
        Err(err) => Err(err),
    }
}

pub async fn admin_login_form(session: Session) -> Response {
    login_page(session, AccountRole::Admin, None)
}

pub async fn admin_login(
    State(state): State<AppState>,
    mut session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    match state
        .accounts
        .authenticate_admin(&form.username, &form.password)
        .await
    {
        Ok(admin) => {
            session.login_admin(admin.id);
            session.flash(FlashKind::Success, "Logged in as administrator.");
            info!(admin_id = admin.id, "Admin logged in");
            Ok((session, Redirect::to("/")).into_response())
        }
        Err(err @ AppError::InvalidCredentials) => {
            Ok(login_page(session, AccountRole::Admin, Some(&err)))
        }
        Err(err) => Err(err),
    }
}

pub async fn user_login_form(session: Session) -> Response {
    login_page(session, AccountRole::User, None)
}

pub async fn user_login(
    State(state): State<AppState>,
    mut session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    match state
        .accounts
        .authenticate_user(&form.username, &form.password)
        .await
    {
        Ok(user) => {
            session.login_user(user.id);
            session.flash(FlashKind::Success, "Logged in successfully.");
            info!(user_id = user.id, "User logged in");
            Ok((session, Redirect::to("/user/dashboard")).into_response())
        }
        Err(err @ AppError::InvalidCredentials) => {
            Ok(login_page(session, AccountRole::User, Some(&err)))
        }
        Err(err) => Err(err),
    }
}

/// GET /admin/logout (behind the admin guard)
pub async fn admin_logout(mut session: Session) -> Response {
    session.logout_admin();
    session.flash(FlashKind::Info, "Administrator logged out.");
    (session, Redirect::to("/")).into_response()
}

/// GET /user/logout
pub async fn user_logout(mut session: Session) -> Response {
    session.logout_user();
    session.flash(FlashKind::Info, "You have been logged out.");
    (session, Redirect::to("/")).into_response()
}

fn login_page(mut session: Session, role: AccountRole, error: Option<&AppError>) -> Response {
    let mut layout = Layout::from_session(&mut session);
    let status = match error {
        Some(err) => {
            layout = layout.with_errors(&err.messages());
            err.status_code()
        }
        None => StatusCode::OK,
    };
    let template = LoginTemplate { layout, role };
    (session, ui::render_with_status(status, &template)).into_response()
}

fn register_page(
    mut session: Session,
    role: AccountRole,
    form: Option<&SignupForm>,
    error: Option<&AppError>,
) -> Response {
    let mut layout = Layout::from_session(&mut session);
    let status = match error {
        Some(err) => {
            layout = layout.with_errors(&err.messages());
            err.status_code()
        }
        None => StatusCode::OK,
    };
    let template = RegisterTemplate {
        layout,
        role,
        username: form.map(|f| f.username.trim().to_string()).unwrap_or_default(),
        email: form.map(|f| f.email.trim().to_string()).unwrap_or_default(),
    };
    (session, ui::render_with_status(status, &template)).into_response()
}
