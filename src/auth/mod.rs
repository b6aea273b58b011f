//! Accounts, password hashing, sessions and route guards.

mod accounts;
pub mod guard;
mod password;
pub mod session;

pub use accounts::{AccountRole, AccountService};
pub use guard::{require_admin_session, require_user_session, Capability, CurrentAdmin, CurrentUser};
pub use password::{hash_password, verify_password};
pub use session::{Flash, FlashKind, Session, SessionContext};
