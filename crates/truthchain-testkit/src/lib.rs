//! # TruthChain Testkit
//!
//! Testing utilities for TruthChain.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Pinned canonical forms and fingerprints for cross-implementation verification
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Helper structs wiring a registry over in-memory backends
//!
//! ## Golden Vectors
//!
//! Golden vectors ensure deterministic fingerprinting across implementations:
//!
//! ```rust
//! use truthchain_testkit::vectors::verify_all_vectors;
//!
//! for (name, matches, actual) in verify_all_vectors() {
//!     assert!(matches, "{} produced {}", name, actual);
//! }
//! ```
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use truthchain_testkit::generators::{record_from_params, RecordParams};
//! use truthchain_core::compute_fingerprint;
//!
//! proptest! {
//!     #[test]
//!     fn fingerprint_is_deterministic(params: RecordParams) {
//!         let r1 = record_from_params(&params);
//!         let r2 = record_from_params(&params);
//!         prop_assert_eq!(
//!             compute_fingerprint(&r1).unwrap(),
//!             compute_fingerprint(&r2).unwrap()
//!         );
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! Quickly set up test scenarios:
//!
//! ```rust
//! use truthchain_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let source = TestFixture::source("My Article", "Body text");
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::TestFixture;
pub use generators::{record_from_params, RecordParams};
pub use vectors::{all_vectors, verify_all_vectors, GoldenVector};

/// Install a tracing subscriber reading `RUST_LOG`, once per process.
///
/// Safe to call from every test; repeat calls are no-ops.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}
