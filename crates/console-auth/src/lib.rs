//! Admin Console Authentication
//!
//! The session lifecycle:
//! - `SessionStore` holds the single current `SessionStatus` and replays it
//!   to subscribers
//! - after every transition the store reconciles the status against the
//!   persisted session token
//! - `CredentialExchange` drives LOGIN_ATTEMPT into LOGGED_IN or
//!   INVALID_CREDENTIALS
//! - `SessionGuard` gates protected routes

mod error;
mod exchange;
mod guard;
mod navigator;
mod reconcile;
mod settings;
mod status;
mod store;

pub use error::AuthError;
pub use exchange::CredentialExchange;
pub use guard::SessionGuard;
pub use navigator::{Navigator, RouteRecorder};
pub use reconcile::{reconcile, Destination, Reconciliation};
pub use settings::SessionSettings;
pub use status::SessionStatus;
pub use store::{SessionStore, Subscription};

pub type Result<T> = std::result::Result<T, AuthError>;
