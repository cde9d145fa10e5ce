//! Store error types

use thiserror::Error;

use crate::model::PropertyId;

/// Errors from the persistence layer
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Username is taken
    #[error("User already registered: {0}")]
    UserExists(String),

    #[error("Property not found: {0}")]
    PropertyNotFound(PropertyId),

    #[error("Password hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    /// The connection mutex was poisoned by a panicking holder
    #[error("Lock error: {0}")]
    Lock(String),
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
