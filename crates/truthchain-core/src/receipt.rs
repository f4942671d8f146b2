//! Registration receipts.
//!
//! A receipt is the proof that a fingerprint was registered: who
//! submitted it, when, and the transaction the external ledger issued for
//! it. Receipts are append-only; once created they are never mutated, and
//! the registration cache keeps at most one per fingerprint.

use serde::{Deserialize, Serialize};

use crate::fingerprint::Fingerprint;

/// Proof of a completed registration, keyed by fingerprint in the cache.
///
/// Serializes with the field names `fingerprint`, `timestamp`,
/// `transactionId`, `submitterIdentity`, the layout existing stored
/// entries use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationReceipt {
    /// The registered content fingerprint.
    pub fingerprint: Fingerprint,

    /// Registration time as an ISO-8601 string.
    pub timestamp: String,

    /// Opaque transaction identifier issued by the ledger.
    pub transaction_id: String,

    /// Identity that submitted the registration (e.g. a wallet address).
    pub submitter_identity: String,
}

impl RegistrationReceipt {
    /// Create a receipt from its parts.
    pub fn new(
        fingerprint: Fingerprint,
        timestamp: impl Into<String>,
        transaction_id: impl Into<String>,
        submitter_identity: impl Into<String>,
    ) -> Self {
        Self {
            fingerprint,
            timestamp: timestamp.into(),
            transaction_id: transaction_id.into(),
            submitter_identity: submitter_identity.into(),
        }
    }
}
