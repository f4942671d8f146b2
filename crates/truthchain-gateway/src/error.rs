//! Error types for the chain gateway.

use thiserror::Error;

/// Errors that can occur during gateway operations.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The external ledger rejected or never acknowledged the submission.
    #[error("chain submission failed: {0}")]
    ChainSubmissionFailed(String),
}

/// Result type for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;
