//! Application error type and its HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::ui::{self, ErrorTemplate, Layout, NotFoundTemplate};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Missing or malformed form fields; the form is re-rendered
    #[error("{}", .0.join(" "))]
    Validation(Vec<String>),

    /// Deliberately silent about which half of the credentials was wrong
    #[error("Invalid username or password.")]
    InvalidCredentials,

    #[error("{0}")]
    DuplicateAccount(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("template error: {0}")]
    Template(#[from] askama::Error),

    #[error("password hashing failed: {0}")]
    PasswordHash(String),
}

impl From<argon2::password_hash::Error> for AppError {
    fn from(err: argon2::password_hash::Error) -> Self {
        AppError::PasswordHash(err.to_string())
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::DuplicateAccount(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Template(_) | AppError::PasswordHash(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation_error",
            AppError::InvalidCredentials => "invalid_credentials",
            AppError::DuplicateAccount(_) => "duplicate_account",
            AppError::NotFound(_) => "not_found",
            AppError::Conflict(_) => "conflict",
            AppError::Database(_) => "database_error",
            AppError::Template(_) => "template_error",
            AppError::PasswordHash(_) => "internal_error",
        }
    }

    /// Messages from these variants are safe to show to the caller
    pub fn messages(&self) -> Vec<String> {
        match self {
            AppError::Validation(errors) => errors.clone(),
            other => vec![other.to_string()],
        }
    }

    fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if let AppError::NotFound(what) = &self {
            tracing::debug!(resource = what, "Not found");
            let template = NotFoundTemplate {
                layout: Layout::default(),
            };
            return ui::render_with_status(status, &template);
        }

        let message = if self.is_server_error() {
            tracing::error!(code = self.code(), error = %self, "Request failed");
            "Something went wrong on our side. Please try again.".to_string()
        } else {
            self.to_string()
        };

        let template = ErrorTemplate {
            layout: Layout::default(),
            status: status.as_u16(),
            message,
        };
        ui::render_with_status(status, &template)
    }
}
