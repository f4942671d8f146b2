//! Error types for the registration cache.

use thiserror::Error;

/// Errors that can occur during cache operations.
///
/// Callers surface any of these as "storage unavailable" rather than
/// treating them as "not registered".
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store is unreachable (lock poisoned, worker gone).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Entry serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Migration error.
    #[error("migration error: {0}")]
    Migration(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, StoreError>;
