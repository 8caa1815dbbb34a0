//! Client error types

use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Input rejected before or by the server (400)
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Order-number allocation conflict or similar (409) — retry the call
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Non-2xx the server reported without a more specific mapping
    #[error("Server error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Cart / summary file I/O
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Corrupt state file: {0}")]
    CorruptState(#[from] serde_json::Error),
}

impl ClientError {
    /// Whether retrying the same request can reasonably succeed.
    /// Used by the checkout UI to decide between "try again" and "fix your
    /// input".
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Network(_) | ClientError::Conflict(_) => true,
            ClientError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
