// Static informational pages and the not-found fallback

use axum::response::{IntoResponse, Response};

use crate::auth::Session;
use crate::error::AppError;
use crate::ui::{self, AboutTemplate, EstimateTemplate, Layout};

pub async fn about(mut session: Session) -> Response {
    let template = AboutTemplate {
        layout: Layout::from_session(&mut session),
    };
    (session, ui::render(&template)).into_response()
}

pub async fn estimate(mut session: Session) -> Response {
    let template = EstimateTemplate {
        layout: Layout::from_session(&mut session),
    };
    (session, ui::render(&template)).into_response()
}

/// Unmatched paths get the same page as a missing record
pub async fn not_found() -> Response {
    AppError::NotFound("Page").into_response()
}
