//! Session principal resolution
//!
//! Maps the identifier stored in a session to the account behind it.
//! Transport of the identifier (cookies, tokens) belongs to the caller.

pub mod login_manager;

pub use login_manager::{LoginManager, UserLoader};
