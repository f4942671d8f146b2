//! Content fingerprints.
//!
//! A fingerprint is the SHA-256 digest of a record's canonical bytes,
//! carried as a 32-byte newtype and rendered as 64 lowercase hex
//! characters everywhere it crosses a boundary (JSON, storage keys,
//! display).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::canonical::canonical_bytes;
use crate::error::CoreError;
use crate::record::ContentRecord;

/// Length of a fingerprint in bytes. The hex rendering is twice this.
pub const FINGERPRINT_LEN: usize = 32;

/// A 32-byte content-addressed identifier.
///
/// Two records with identical canonical fields have the same fingerprint;
/// any field change produces a different one.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(pub [u8; 32]);

impl Fingerprint {
    /// Create a fingerprint from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to a 64-character lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from a hex string. Accepts mixed case; 64 hex digits required.
    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        let bytes =
            hex::decode(s).map_err(|e| CoreError::InvalidFingerprint(e.to_string()))?;
        if bytes.len() != FINGERPRINT_LEN {
            return Err(CoreError::InvalidFingerprint(format!(
                "expected {} bytes, got {}",
                FINGERPRINT_LEN,
                bytes.len()
            )));
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    /// The zero fingerprint (used as a sentinel in tests).
    pub const ZERO: Self = Self([0u8; 32]);
}

/// Compute the fingerprint of a content record.
///
/// Pure: serializes the canonical field subset (stable key order, see
/// [`crate::canonical`]), digests the UTF-8 bytes with SHA-256, and wraps
/// the result. Missing record fields are empty strings by construction,
/// so every record is hashable. Fails with
/// [`CoreError::HashingUnavailable`] only when the canonical bytes cannot
/// be produced.
pub fn compute_fingerprint(record: &ContentRecord) -> Result<Fingerprint, CoreError> {
    let bytes = canonical_bytes(record)?;
    let digest = Sha256::digest(&bytes);
    Ok(Fingerprint(digest.into()))
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl AsRef<[u8]> for Fingerprint {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for Fingerprint {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl FromStr for Fingerprint {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

// Fingerprints cross JSON boundaries as hex strings, never byte arrays.

impl Serialize for Fingerprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Fingerprint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
