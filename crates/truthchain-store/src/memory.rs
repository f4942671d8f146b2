//! In-memory implementation of the RegistrationStore trait.
//!
//! This is primarily for testing. It has the same semantics as SQLite
//! but keeps everything in memory with no persistence.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use truthchain_core::Fingerprint;

use crate::entry::StoredEntry;
use crate::error::Result;
use crate::traits::{RegisterOutcome, RegistrationStore};

/// In-memory cache implementation.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock.
pub struct MemoryStore {
    inner: RwLock<MemoryStoreInner>,
}

struct MemoryStoreInner {
    /// Entries indexed by fingerprint.
    entries: HashMap<Fingerprint, StoredEntry>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryStoreInner {
                entries: HashMap::new(),
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RegistrationStore for MemoryStore {
    async fn try_register(&self, entry: StoredEntry) -> Result<RegisterOutcome> {
        // Check and insert under a single write-lock acquisition, so the
        // conditional write is atomic with respect to other tasks.
        let mut inner = self.inner.write().unwrap();

        let fingerprint = *entry.fingerprint();
        if let Some(existing) = inner.entries.get(&fingerprint) {
            return Ok(RegisterOutcome::Existing(existing.receipt.clone()));
        }

        let receipt = entry.receipt.clone();
        inner.entries.insert(fingerprint, entry);

        Ok(RegisterOutcome::Registered(receipt))
    }

    async fn lookup_entry(&self, fingerprint: &Fingerprint) -> Result<Option<StoredEntry>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.entries.get(fingerprint).cloned())
    }
}
