//! # TruthChain Store
//!
//! Storage abstraction for the TruthChain registry. Provides a trait-based
//! interface for the local registration cache with SQLite and in-memory
//! implementations.
//!
//! ## Overview
//!
//! The store module abstracts the registration cache behind the
//! [`RegistrationStore`] trait, allowing the registry to be storage-agnostic.
//! The primary implementation is [`SqliteStore`], with [`MemoryStore`] for
//! testing.
//!
//! ## Key Types
//!
//! - [`RegistrationStore`] - The async trait for all cache operations
//! - [`SqliteStore`] - SQLite-based persistent cache
//! - [`MemoryStore`] - In-memory cache for tests
//! - [`StoredEntry`] - A persisted receipt, optionally with its record
//! - [`RegisterOutcome`] - Result of a conditional registration
//!
//! ## Usage
//!
//! ```rust,no_run
//! use truthchain_store::{RegistrationStore, SqliteStore, StoredEntry};
//! use truthchain_core::{Fingerprint, RegistrationReceipt};
//!
//! async fn example() {
//!     // Open a SQLite database
//!     let store = SqliteStore::open("registry.db").unwrap();
//!
//!     // Or use an in-memory database for testing
//!     let store = SqliteStore::open_memory().unwrap();
//!
//!     // Register a receipt for a fingerprint
//!     let fingerprint = Fingerprint::ZERO;
//!     let receipt = RegistrationReceipt::new(
//!         fingerprint,
//!         "2024-01-01T00:00:00.000Z",
//!         "0xabc123",
//!         "0xWallet",
//!     );
//!     let outcome = store.try_register(StoredEntry::new(receipt)).await.unwrap();
//!     assert!(outcome.is_new());
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **First write wins**: Registering an already-cached fingerprint returns
//!   the existing receipt unchanged
//! - **Atomic registration**: Check-and-insert happens in one step, so
//!   concurrent registrations of the same fingerprint produce one winner
//! - **Absence is a value**: Lookups return `Option`, never an error, for
//!   fingerprints that were simply never registered

pub mod entry;
pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use entry::{storage_key, StoredEntry, KEY_PREFIX};
pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{RegisterOutcome, RegistrationStore};
