//! Client error types
//!
//! Every failed request collapses into one of these variants. Views decide
//! what the user sees from the variant alone, never from response text.

use thiserror::Error;

/// Errors returned by the REST client
#[derive(Error, Debug)]
pub enum ClientError {
    /// The backend answered 401
    #[error("Invalid credentials")]
    Unauthorized,

    /// The backend answered 409
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The backend answered 404
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-success status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Connection refused or host unreachable
    #[error("Backend unavailable")]
    Unavailable,

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl ClientError {
    /// Classify a transport-level reqwest failure
    pub(crate) fn from_send(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_connect() {
            ClientError::Unavailable
        } else {
            ClientError::Request(err)
        }
    }

    /// Whether the backend rejected the credentials
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized)
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;
