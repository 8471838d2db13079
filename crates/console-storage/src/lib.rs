//! Admin Console Storage Layer
//!
//! SQLite-backed persistence for client-side state that must survive a
//! restart. Today that is the cookie jar holding the session token.

mod cookies;
mod database;
mod error;
mod migrations;

pub use cookies::{Cookie, CookieJar};
pub use database::Database;
pub use error::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;
