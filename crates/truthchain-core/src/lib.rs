//! # TruthChain Core
//!
//! Pure primitives for TruthChain: content records, fingerprints, and
//! registration receipts.
//!
//! This crate contains no I/O, no storage, no networking. It is pure
//! computation over content data.
//!
//! ## Key Types
//!
//! - [`ContentRecord`] - Normalized content ready for fingerprinting
//! - [`Fingerprint`] - Content-addressed identifier (SHA-256, 64 hex chars)
//! - [`RegistrationReceipt`] - Immutable proof of a registration
//!
//! ## Canonicalization
//!
//! Fingerprints are computed over a deterministic compact JSON form with
//! lexicographic key order. See the [`canonical`] module.

pub mod canonical;
pub mod error;
pub mod fingerprint;
pub mod record;
pub mod receipt;

pub use canonical::canonical_bytes;
pub use error::CoreError;
pub use fingerprint::{compute_fingerprint, Fingerprint, FINGERPRINT_LEN};
pub use record::{extract, now_iso8601, ContentRecord, DEFAULT_TITLE};
pub use receipt::RegistrationReceipt;
