//! # TruthChain Gateway
//!
//! The seam between the registry and the external ledger.
//!
//! ## Overview
//!
//! Durable, cross-user provenance lives on an external ledger reached
//! through a smart contract; this crate only defines that boundary. The
//! [`ChainGateway`] trait turns "submit this fingerprint" into an opaque
//! transaction id, and [`MemoryGateway`] stands in for the external
//! service in tests and local development.
//!
//! ## Key Types
//!
//! - [`ChainGateway`] - The async trait for ledger submission
//! - [`MemoryGateway`] - In-memory gateway for tests
//! - [`GatewayError`] - Submission failures
//!
//! ## Usage
//!
//! ```rust,no_run
//! use truthchain_gateway::{ChainGateway, MemoryGateway};
//! use truthchain_core::Fingerprint;
//!
//! async fn example() {
//!     let gateway = MemoryGateway::new();
//!     let tx = gateway.submit(&Fingerprint::ZERO, "0xWallet").await.unwrap();
//!     assert!(tx.starts_with("0x"));
//! }
//! ```

pub mod error;
pub mod gateway;

pub use error::{GatewayError, Result};
pub use gateway::{memory::MemoryGateway, memory::Submission, ChainGateway};
