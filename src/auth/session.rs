//! Cookie-backed sessions.
//!
//! The whole session lives in one HMAC-signed cookie: the admin slot, the
//! user slot and pending flash messages. Handlers receive a [`Session`] as an
//! extractor, read an immutable [`SessionContext`] from it, and hand it back
//! as a response part so any change is written out.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    response::{IntoResponseParts, ResponseParts},
};
use axum_extra::extract::cookie::{Cookie, Key, SameSite, SignedCookieJar};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};

pub const SESSION_COOKIE: &str = "regdesk_session";

/// Derive the cookie signing key from the configured secret
pub fn signing_key(secret: &str) -> Key {
    Key::from(Sha512::digest(secret.as_bytes()).as_slice())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Info,
    Error,
}

impl std::fmt::Display for FlashKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Info => write!(f, "info"),
            Self::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct SessionData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    admin_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    flashes: Vec<Flash>,
}

impl SessionData {
    fn encode(&self) -> Result<String, serde_json::Error> {
        Ok(URL_SAFE_NO_PAD.encode(serde_json::to_vec(self)?))
    }

    fn decode(value: &str) -> Option<Self> {
        let bytes = URL_SAFE_NO_PAD.decode(value).ok()?;
        serde_json::from_slice(&bytes).ok()
    }

    fn is_empty(&self) -> bool {
        self.admin_id.is_none() && self.user_id.is_none() && self.flashes.is_empty()
    }
}

/// Who is calling, resolved once per request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionContext {
    pub admin_id: Option<i64>,
    pub user_id: Option<i64>,
}

impl SessionContext {
    pub fn is_admin(&self) -> bool {
        self.admin_id.is_some()
    }

    pub fn is_user(&self) -> bool {
        self.user_id.is_some()
    }
}

pub struct Session {
    jar: SignedCookieJar,
    data: SessionData,
    dirty: bool,
}

impl Session {
    pub fn from_jar(jar: SignedCookieJar) -> Self {
        // A cookie that fails signature checks never comes back from the jar
        let data = jar
            .get(SESSION_COOKIE)
            .and_then(|c| SessionData::decode(c.value()))
            .unwrap_or_default();
        Self {
            jar,
            data,
            dirty: false,
        }
    }

    pub fn context(&self) -> SessionContext {
        SessionContext {
            admin_id: self.data.admin_id,
            user_id: self.data.user_id,
        }
    }

    /// Start an admin session. The user slot is left alone.
    pub fn login_admin(&mut self, admin_id: i64) {
        self.data.flashes.clear();
        self.data.admin_id = Some(admin_id);
        self.dirty = true;
    }

    /// Start a user session. The admin slot is left alone.
    pub fn login_user(&mut self, user_id: i64) {
        self.data.flashes.clear();
        self.data.user_id = Some(user_id);
        self.dirty = true;
    }

    pub fn logout_admin(&mut self) {
        self.data.admin_id = None;
        self.dirty = true;
    }

    pub fn logout_user(&mut self) {
        self.data.user_id = None;
        self.dirty = true;
    }

    pub fn flash(&mut self, kind: FlashKind, message: impl Into<String>) {
        self.data.flashes.push(Flash {
            kind,
            message: message.into(),
        });
        self.dirty = true;
    }

    /// Drain pending flashes for display
    pub fn take_flashes(&mut self) -> Vec<Flash> {
        if self.data.flashes.is_empty() {
            return Vec::new();
        }
        self.dirty = true;
        std::mem::take(&mut self.data.flashes)
    }

    fn into_jar(self) -> SignedCookieJar {
        if !self.dirty {
            return self.jar;
        }
        if self.data.is_empty() {
            return self
                .jar
                .remove(Cookie::build(SESSION_COOKIE).path("/").build());
        }
        match self.data.encode() {
            Ok(value) => self.jar.add(
                Cookie::build((SESSION_COOKIE, value))
                    .path("/")
                    .http_only(true)
                    .same_site(SameSite::Lax)
                    .build(),
            ),
            Err(e) => {
                tracing::error!(error = %e, "Failed to encode session");
                self.jar
            }
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
    Key: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = SignedCookieJar::from_headers(&parts.headers, Key::from_ref(state));
        Ok(Session::from_jar(jar))
    }
}

impl IntoResponseParts for Session {
    type Error = Infallible;

    fn into_response_parts(self, res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        self.into_jar().into_response_parts(res)
    }
}
