//! The Registry: unified API for the TruthChain system.
//!
//! The Registry brings together content extraction, fingerprinting, the
//! registration cache, and the chain gateway into a cohesive interface
//! for building applications.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use truthchain_core::{
    compute_fingerprint, extract, now_iso8601, ContentRecord, Fingerprint, RegistrationReceipt,
};
use truthchain_gateway::ChainGateway;
use truthchain_store::{RegisterOutcome, RegistrationStore, StoredEntry};

use crate::error::{RegistryError, Result};
use crate::session::Session;

/// Configuration for the Registry.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Whether to retain the original content record alongside receipts.
    pub retain_records: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            retain_records: true,
        }
    }
}

/// The main Registry struct.
///
/// Provides a unified API for:
/// - Extracting content records from page payloads
/// - Computing content fingerprints
/// - Registering fingerprints on the chain and in the local cache
/// - Verifying and looking up registrations
pub struct Registry<S: RegistrationStore, G: ChainGateway> {
    /// The registration cache backend.
    store: Arc<S>,
    /// The chain gateway.
    gateway: Arc<G>,
    /// Configuration.
    config: RegistryConfig,
}

impl<S: RegistrationStore, G: ChainGateway> Registry<S, G> {
    /// Create a new registry instance.
    pub fn new(store: S, gateway: G, config: RegistryConfig) -> Self {
        Self {
            store: Arc::new(store),
            gateway: Arc::new(gateway),
            config,
        }
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get the gateway reference.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Registration Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Register the content in a page payload.
    ///
    /// Extracts a content record from the source, fingerprints it, and
    /// registers the fingerprint. An already-registered fingerprint returns
    /// its existing receipt without touching the gateway.
    pub async fn register(&self, source: &Value, session: &Session) -> Result<RegisterResult> {
        let record = extract(source)?;
        self.register_record(record, session).await
    }

    /// Register a content record the caller already holds.
    pub async fn register_record(
        &self,
        record: ContentRecord,
        session: &Session,
    ) -> Result<RegisterResult> {
        let fingerprint = compute_fingerprint(&record)?;

        // Fast path: already registered, no gateway call needed.
        if let Some(receipt) = self.store.lookup(&fingerprint).await? {
            return Ok(RegisterResult::AlreadyRegistered(receipt));
        }

        let submitter = session.submitter().ok_or(RegistryError::NotConnected)?;

        // Chain first: a gateway failure must leave the cache untouched.
        let transaction_id = self.gateway.submit(&fingerprint, submitter).await?;

        let receipt = RegistrationReceipt::new(
            fingerprint,
            now_iso8601(),
            transaction_id.clone(),
            submitter,
        );
        let entry = if self.config.retain_records {
            StoredEntry::with_record(receipt, record)
        } else {
            StoredEntry::new(receipt)
        };

        match self.store.try_register(entry).await? {
            RegisterOutcome::Registered(receipt) => Ok(RegisterResult::Registered(receipt)),
            RegisterOutcome::Existing(receipt) => {
                // A concurrent caller won the race after our fast-path check.
                // The cache keeps its first receipt; ours is dropped.
                tracing::warn!(
                    "Registration race lost for {}: discarding transaction id {}",
                    fingerprint,
                    transaction_id
                );
                Ok(RegisterResult::AlreadyRegistered(receipt))
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Verification Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Verify whether the content in a page payload is registered.
    ///
    /// Works on any session; no submitter identity is required.
    pub async fn verify(&self, source: &Value) -> Result<Verification> {
        let record = extract(source)?;
        let fingerprint = compute_fingerprint(&record)?;
        let receipt = self.store.lookup(&fingerprint).await?;
        Ok(Verification {
            fingerprint,
            receipt,
        })
    }

    /// Look up the receipt for a fingerprint.
    pub async fn lookup(&self, fingerprint: &Fingerprint) -> Result<Option<RegistrationReceipt>> {
        Ok(self.store.lookup(fingerprint).await?)
    }

    /// Look up receipts for many fingerprints at once.
    ///
    /// Every requested fingerprint appears in the result; unregistered
    /// ones map to `None`.
    pub async fn batch_lookup(
        &self,
        fingerprints: &[Fingerprint],
    ) -> Result<HashMap<Fingerprint, Option<RegistrationReceipt>>> {
        Ok(self.store.batch_lookup(fingerprints).await?)
    }
}

/// Result of a registration.
#[derive(Debug, Clone)]
pub enum RegisterResult {
    /// The fingerprint was newly registered.
    Registered(RegistrationReceipt),
    /// The fingerprint was already registered (idempotent).
    AlreadyRegistered(RegistrationReceipt),
}

impl RegisterResult {
    /// The authoritative receipt, new or existing.
    pub fn receipt(&self) -> &RegistrationReceipt {
        match self {
            RegisterResult::Registered(receipt) => receipt,
            RegisterResult::AlreadyRegistered(receipt) => receipt,
        }
    }

    /// Consume the result, returning the receipt.
    pub fn into_receipt(self) -> RegistrationReceipt {
        match self {
            RegisterResult::Registered(receipt) => receipt,
            RegisterResult::AlreadyRegistered(receipt) => receipt,
        }
    }

    /// Whether this call created the registration.
    pub fn is_new(&self) -> bool {
        matches!(self, RegisterResult::Registered(_))
    }
}

/// Result of a verification.
#[derive(Debug, Clone)]
pub struct Verification {
    /// The fingerprint computed from the source.
    pub fingerprint: Fingerprint,
    /// The receipt, if the fingerprint is registered.
    pub receipt: Option<RegistrationReceipt>,
}

impl Verification {
    /// Whether the content is registered.
    pub fn is_registered(&self) -> bool {
        self.receipt.is_some()
    }
}
