//! RegistrationStore trait: the abstract interface for the registration cache.
//!
//! This trait keeps the registry storage-agnostic. Implementations
//! include SQLite (persistent) and in-memory (reference semantics, tests).

use std::collections::HashMap;

use async_trait::async_trait;

use truthchain_core::{Fingerprint, RegistrationReceipt};

use crate::entry::StoredEntry;
use crate::error::Result;

/// Result of a registration attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// No entry existed; this caller's receipt was stored.
    Registered(RegistrationReceipt),
    /// An entry already existed; carries the original receipt unchanged
    /// (idempotent re-registration is not an error).
    Existing(RegistrationReceipt),
}

impl RegisterOutcome {
    /// The authoritative receipt for the fingerprint, whoever wrote it.
    pub fn receipt(&self) -> &RegistrationReceipt {
        match self {
            Self::Registered(r) | Self::Existing(r) => r,
        }
    }

    /// Consume the outcome, yielding the authoritative receipt.
    pub fn into_receipt(self) -> RegistrationReceipt {
        match self {
            Self::Registered(r) | Self::Existing(r) => r,
        }
    }

    /// True when this call performed the write.
    pub fn is_new(&self) -> bool {
        matches!(self, Self::Registered(_))
    }
}

/// The RegistrationStore trait: async interface for the registration cache.
///
/// All methods are async to support both sync (SQLite) and async backends.
/// For SQLite, `spawn_blocking` is used internally to avoid blocking the
/// runtime.
///
/// # Design Notes
///
/// - **Atomic conditional write**: `try_register` is one operation against
///   the backend, never a separate read followed by a write, so at most
///   one receipt ever exists per fingerprint.
/// - **First write wins**: a second registration returns the existing
///   receipt untouched via `Existing`.
/// - **Absence is a value**: lookups return `None` for unknown
///   fingerprints; errors mean the store itself failed.
/// - **No partial entries**: a failed `try_register` writes nothing.
#[async_trait]
pub trait RegistrationStore: Send + Sync {
    // ─────────────────────────────────────────────────────────────────────────
    // Registration
    // ─────────────────────────────────────────────────────────────────────────

    /// Insert an entry unless its fingerprint is already present.
    ///
    /// # Returns
    /// - `Registered` carrying the stored receipt if the entry was new.
    /// - `Existing` carrying the prior receipt if one was already present;
    ///   the store is left unchanged.
    async fn try_register(&self, entry: StoredEntry) -> Result<RegisterOutcome>;

    // ─────────────────────────────────────────────────────────────────────────
    // Lookup
    // ─────────────────────────────────────────────────────────────────────────

    /// Get the full stored entry for a fingerprint, if registered.
    async fn lookup_entry(&self, fingerprint: &Fingerprint) -> Result<Option<StoredEntry>>;

    /// Get the receipt for a fingerprint, if registered.
    async fn lookup(&self, fingerprint: &Fingerprint) -> Result<Option<RegistrationReceipt>> {
        Ok(self.lookup_entry(fingerprint).await?.map(|e| e.receipt))
    }

    /// Look up many fingerprints independently.
    ///
    /// Every requested fingerprint appears in the result; unregistered
    /// ones map to `None`. No ordering guarantee across entries. Backends
    /// with a cheaper bulk path may override this.
    async fn batch_lookup(
        &self,
        fingerprints: &[Fingerprint],
    ) -> Result<HashMap<Fingerprint, Option<RegistrationReceipt>>> {
        let mut results = HashMap::with_capacity(fingerprints.len());
        for fingerprint in fingerprints {
            results.insert(*fingerprint, self.lookup(fingerprint).await?);
        }
        Ok(results)
    }
}
