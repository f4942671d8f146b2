//! Canonical JSON encoding for deterministic fingerprinting.
//!
//! The fingerprint input is a compact JSON object over a fixed field
//! subset of a [`ContentRecord`]:
//! - Keys are exactly `content`, `timestamp`, `title`, `url`, emitted in
//!   lexicographic order
//! - No whitespace between tokens
//! - Strings escaped as serde_json escapes them: raw UTF-8 for non-ASCII,
//!   `\"` for quotes, `\n` for newlines
//!
//! The canonical encoding is critical: producers and consumers must derive
//! identical bytes from identical field values or fingerprints silently
//! diverge. Any change to the field subset or ordering is a breaking change
//! with no migration path.

use std::collections::BTreeMap;

use crate::error::CoreError;
use crate::record::ContentRecord;

/// Canonical field keys, in the order they are emitted.
mod keys {
    pub const CONTENT: &str = "content";
    pub const TIMESTAMP: &str = "timestamp";
    pub const TITLE: &str = "title";
    pub const URL: &str = "url";
}

/// Encode a content record to its canonical fingerprint input bytes.
///
/// The output is the UTF-8 bytes of the compact JSON object described in
/// the module docs. A `BTreeMap` carries the fields so key ordering is a
/// property of the container, not of struct declaration order.
pub fn canonical_bytes(record: &ContentRecord) -> Result<Vec<u8>, CoreError> {
    let mut fields: BTreeMap<&str, &str> = BTreeMap::new();
    fields.insert(keys::CONTENT, &record.content);
    fields.insert(keys::TIMESTAMP, &record.timestamp);
    fields.insert(keys::TITLE, &record.title);
    fields.insert(keys::URL, &record.url);

    Ok(serde_json::to_vec(&fields)?)
}
