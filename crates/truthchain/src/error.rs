//! Error types for the Registry.

use thiserror::Error;

use truthchain_core::CoreError;
use truthchain_gateway::GatewayError;
use truthchain_store::StoreError;

/// Errors that can occur during Registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Content extraction or fingerprinting failed.
    #[error("content error: {0}")]
    Content(#[from] CoreError),

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Gateway error.
    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// The session has no submitter identity.
    #[error("not connected: session has no submitter identity")]
    NotConnected,

    /// The bus dispatcher is no longer running.
    #[error("bus closed")]
    BusClosed,
}

/// Result type for Registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
