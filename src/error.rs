use thiserror::Error;

use crate::auth::models::InvalidReason;

/// Application-wide error types.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    /// The admin session failed validation and has been destroyed.
    #[error("Session invalid: {0}")]
    Session(InvalidReason),

    #[error("CSRF validation failed. Please try again.")]
    Csrf,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Helper conversion from anyhow::Error
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<tower_sessions::session::Error> for AppError {
    fn from(err: tower_sessions::session::Error) -> Self {
        AppError::Internal(format!("Session store error: {err}"))
    }
}
