//! Route guards.
//!
//! A route group declares the [`Capability`] it needs; the middleware checks
//! it against the caller's [`SessionContext`] before the handler runs and
//! short-circuits with a flash + redirect to the matching login page.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

use super::session::{FlashKind, Session, SessionContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Public,
    AdminSession,
    UserSession,
}

/// Resolved admin identity, inserted into request extensions by the guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentAdmin(pub i64);

/// Resolved user identity, inserted into request extensions by the guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grant {
    Anonymous,
    Admin(CurrentAdmin),
    User(CurrentUser),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Denial {
    pub login_path: &'static str,
    pub message: &'static str,
}

impl Capability {
    pub fn authorize(self, ctx: &SessionContext) -> Result<Grant, Denial> {
        match self {
            Capability::Public => Ok(Grant::Anonymous),
            Capability::AdminSession => ctx
                .admin_id
                .map(|id| Grant::Admin(CurrentAdmin(id)))
                .ok_or(Denial {
                    login_path: "/admin/login",
                    message: "Please log in as an administrator.",
                }),
            Capability::UserSession => ctx
                .user_id
                .map(|id| Grant::User(CurrentUser(id)))
                .ok_or(Denial {
                    login_path: "/user/login",
                    message: "Please log in to continue.",
                }),
        }
    }
}

async fn enforce(capability: Capability, mut session: Session, mut req: Request, next: Next) -> Response {
    match capability.authorize(&session.context()) {
        Ok(Grant::Anonymous) => next.run(req).await,
        Ok(Grant::Admin(admin)) => {
            req.extensions_mut().insert(admin);
            next.run(req).await
        }
        Ok(Grant::User(user)) => {
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        Err(denial) => {
            debug!(path = %req.uri().path(), ?capability, "Guard rejected request");
            session.flash(FlashKind::Error, denial.message);
            (session, Redirect::to(denial.login_path)).into_response()
        }
    }
}

pub async fn require_admin_session(session: Session, req: Request, next: Next) -> Response {
    enforce(Capability::AdminSession, session, req, next).await
}

pub async fn require_user_session(session: Session, req: Request, next: Next) -> Response {
    enforce(Capability::UserSession, session, req, next).await
}
