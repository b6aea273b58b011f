//! Database models split into domain-specific modules.

pub mod common;
pub mod item;
pub mod product;
pub mod registration;
pub mod user;

pub use common::*;
pub use item::*;
pub use product::*;
pub use registration::*;
pub use user::*;
