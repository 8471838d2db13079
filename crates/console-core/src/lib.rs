//! Admin Console Core
//!
//! Configuration and the `Console` context that wires the cookie jar,
//! session store, credential exchange, route guard, request gateway and the
//! admin resources together.

mod config;
mod console;
mod error;

pub use config::{Config, ENV_API_HOST, ENV_ROUTER_TRACING, ENV_SESSION_KEY};
pub use console::Console;
pub use error::CoreError;

// Re-export the pieces callers work with
pub use console_admin::{
    AdminError, Country, CountryService, Permission, PermissionsService, User, UsersService,
};
pub use console_auth::{AuthError, SessionStatus, SessionStore, Subscription};
pub use console_http::{GatewayError, RequestGateway};
pub use console_storage::{Database, StorageError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
