//! Admin resource error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdminError {
    #[error("Request error: {0}")]
    Gateway(#[from] console_http::GatewayError),

    #[error("Invalid entity: {0}")]
    InvalidEntity(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AdminError {
    /// True when the request ended the session with a 401
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AdminError::Gateway(e) if e.is_unauthorized())
    }
}
