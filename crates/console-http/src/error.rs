//! Gateway error types

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    /// The server answered 401; the session has already been ended
    #[error("Unauthorized")]
    Unauthorized,

    #[error("HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Rejected before dispatch
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl GatewayError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, GatewayError::Unauthorized)
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            GatewayError::Unauthorized => Some(StatusCode::UNAUTHORIZED),
            GatewayError::Status { status, .. } => Some(*status),
            GatewayError::Network(e) => e.status(),
            GatewayError::Decode(_) | GatewayError::Configuration(_) => None,
        }
    }
}
