//! Error types for the TruthChain core.

use thiserror::Error;

/// Core errors that can occur while normalizing and fingerprinting content.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The source context was wholly inaccessible (not a document at all).
    ///
    /// Merely missing fields never produce this error; extraction fills
    /// them with fallback values instead.
    #[error("source unavailable: not a readable document context")]
    SourceUnavailable,

    /// The digest input could not be produced.
    #[error("hashing unavailable: {0}")]
    HashingUnavailable(#[from] serde_json::Error),

    /// A fingerprint string failed to parse as 64 lowercase hex characters.
    #[error("invalid fingerprint: {0}")]
    InvalidFingerprint(String),
}
