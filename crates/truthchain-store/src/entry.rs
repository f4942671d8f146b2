//! Persisted entry layout.
//!
//! Cache entries live in a key/value shape shared with earlier deployments
//! of this system: the key is the literal string `registration_<fingerprint>`
//! and the value is the JSON-serialized receipt, optionally carrying the
//! original content record under a `record` key. Both sides must keep this
//! layout or existing stored entries become unreadable.

use serde::{Deserialize, Serialize};

use truthchain_core::{ContentRecord, Fingerprint, RegistrationReceipt};

/// Prefix of every cache entry key.
pub const KEY_PREFIX: &str = "registration_";

/// Build the storage key for a fingerprint: `registration_<64 hex chars>`.
pub fn storage_key(fingerprint: &Fingerprint) -> String {
    format!("{}{}", KEY_PREFIX, fingerprint.to_hex())
}

/// A cache entry as persisted: the receipt plus optional retained context.
///
/// The receipt fields are flattened into the entry object, so a value
/// holding only receipt fields parses as an entry with no retained record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEntry {
    /// The registration receipt.
    #[serde(flatten)]
    pub receipt: RegistrationReceipt,

    /// The original content record, when the caller chose to retain it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<ContentRecord>,
}

impl StoredEntry {
    /// Entry carrying only a receipt.
    pub fn new(receipt: RegistrationReceipt) -> Self {
        Self {
            receipt,
            record: None,
        }
    }

    /// Entry carrying a receipt and the record it was derived from.
    pub fn with_record(receipt: RegistrationReceipt, record: ContentRecord) -> Self {
        Self {
            receipt,
            record: Some(record),
        }
    }

    /// The fingerprint this entry is keyed by.
    pub fn fingerprint(&self) -> &Fingerprint {
        &self.receipt.fingerprint
    }

    /// The storage key for this entry.
    pub fn storage_key(&self) -> String {
        storage_key(self.fingerprint())
    }
}
