//! # TruthChain
//!
//! The unified API for the TruthChain system - content provenance through
//! fingerprints, registration receipts, and a local registration cache.
//!
//! ## Overview
//!
//! TruthChain provides a portable library for:
//!
//! - **Content records**: Canonical title/content/url/timestamp snapshots of a page
//! - **Fingerprints**: Deterministic SHA-256 identifiers over the canonical form
//! - **Registration**: At-most-once association of a fingerprint with a receipt
//! - **Verification**: Hash-keyed lookup answering "was this already registered?"
//!
//! ## Key Concepts
//!
//! - **Fingerprint**: Identical content always yields the identical fingerprint.
//! - **Receipt**: Immutable. Never edited. First registration wins.
//! - **Session**: Submitter identity travels explicitly, never in global state.
//! - **Gateway**: The external ledger is a trait boundary, opaque to the core.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use truthchain::{Registry, RegistryConfig, Session};
//! use truthchain::gateway::MemoryGateway;
//! use truthchain::store::SqliteStore;
//! use serde_json::json;
//!
//! async fn example() {
//!     // Open the local registration cache
//!     let store = SqliteStore::open("registry.db").unwrap();
//!
//!     // Create the registry over a chain gateway
//!     let registry = Registry::new(store, MemoryGateway::new(), RegistryConfig::default());
//!
//!     // Register the content of a page
//!     let session = Session::connected("0xWallet");
//!     let source = json!({
//!         "title": "Hello",
//!         "content": "World",
//!         "url": "https://example.com",
//!     });
//!     let result = registry.register(&source, &session).await.unwrap();
//!     println!("transaction: {}", result.receipt().transaction_id);
//!
//!     // Verify it later
//!     let verification = registry.verify(&source).await.unwrap();
//!     assert!(verification.is_registered());
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `truthchain::core` - Core primitives (ContentRecord, Fingerprint, etc.)
//! - `truthchain::store` - Registration cache abstraction and SQLite
//! - `truthchain::gateway` - Chain gateway boundary

pub mod bus;
pub mod error;
pub mod registry;
pub mod session;

// Re-export component crates
pub use truthchain_core as core;
pub use truthchain_gateway as gateway;
pub use truthchain_store as store;

// Re-export main types for convenience
pub use error::{RegistryError, Result};
pub use registry::{RegisterResult, Registry, RegistryConfig, Verification};
pub use session::Session;

// Re-export commonly used core types
pub use truthchain_core::{
    compute_fingerprint, extract, ContentRecord, Fingerprint, RegistrationReceipt,
};
