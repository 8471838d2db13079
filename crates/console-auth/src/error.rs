//! Authentication error types

use thiserror::Error;

use crate::status::SessionStatus;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Failed to persist session token: {0}")]
    Storage(#[from] console_storage::StorageError),
}

impl AuthError {
    /// Status the session ends in after this error
    pub fn status(&self) -> SessionStatus {
        SessionStatus::InvalidCredentials
    }
}
