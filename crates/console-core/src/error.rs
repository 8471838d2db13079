//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] console_storage::StorageError),

    #[error("Authentication error: {0}")]
    Auth(#[from] console_auth::AuthError),

    #[error("Request error: {0}")]
    Gateway(#[from] console_http::GatewayError),

    #[error("Resource error: {0}")]
    Admin(#[from] console_admin::AdminError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CoreError {
    /// True when the failure ended the session
    pub fn is_unauthorized(&self) -> bool {
        match self {
            CoreError::Gateway(e) => e.is_unauthorized(),
            CoreError::Admin(e) => e.is_unauthorized(),
            _ => false,
        }
    }
}

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::Config(e.to_string())
    }
}
