pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod ui;
pub mod validation;

pub use db::DbPool;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use config::Config;
use std::sync::Arc;

use crate::auth::AccountService;
use crate::db::{ItemRepository, ProductRepository, RegistrationRepository};

/// Shared handler state. Cheap to clone: every field is a handle.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: DbPool,
    pub cookie_key: Key,
    pub accounts: AccountService,
    pub products: ProductRepository,
    pub items: ItemRepository,
    pub registrations: RegistrationRepository,
}

impl AppState {
    pub fn new(config: Config, db: DbPool) -> Self {
        let cookie_key = match config.auth.secret_key.as_deref() {
            Some(secret) => auth::session::signing_key(secret),
            None => {
                tracing::warn!(
                    "No secret key configured (set SECRET_KEY); sessions will not survive a restart"
                );
                Key::generate()
            }
        };

        Self {
            accounts: AccountService::new(db.clone()),
            products: ProductRepository::new(db.clone()),
            items: ItemRepository::new(db.clone()),
            registrations: RegistrationRepository::new(db.clone()),
            config: Arc::new(config),
            db,
            cookie_key,
        }
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}
