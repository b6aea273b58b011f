//! Data access, one repository per table.
//!
//! Repositories own a pool handle and return plain model structs. Guarded
//! mutations are single statements, so SQLite serialises them on its write
//! lock rather than failing a read-then-write upgrade.

mod admins;
mod items;
mod products;
mod registrations;
mod users;

pub use admins::AdminRepository;
pub use items::ItemRepository;
pub use products::{ProductDeletion, ProductRepository};
pub use registrations::{RegisterOutcome, RegistrationRepository};
pub use users::UserRepository;

/// True when the error is a UNIQUE constraint violation
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}
