//! Content records and best-effort extraction from source contexts.
//!
//! A [`ContentRecord`] is the normalized view of whatever document or page
//! a caller wants to register: title, body text, url, and a capture
//! timestamp. Records are built fresh per attempt and never persisted on
//! their own (though the store may retain one beside a receipt).
//!
//! [`extract`] is the normalizer: it accepts the opaque JSON payload a
//! presentation layer hands over and produces a record using fallback
//! values for anything missing. Only a source that is not a document at
//! all is an error.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;

/// Extraction limits.
pub mod limits {
    /// Maximum number of characters of body text kept by [`extract`](super::extract).
    ///
    /// Both sides of a fingerprint comparison must truncate identically,
    /// so this budget is part of the normalization contract.
    pub const MAX_CONTENT_CHARS: usize = 10_000;
}

/// Title used when a source has no usable title of its own.
pub const DEFAULT_TITLE: &str = "Untitled";

/// A normalized unit of content, ready for fingerprinting.
///
/// All fields are plain strings; "missing" is represented by the empty
/// string rather than an option, so a record is always hashable as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Document title, `"Untitled"` when the source had none.
    pub title: String,

    /// Body text, truncated to [`limits::MAX_CONTENT_CHARS`].
    pub content: String,

    /// Source location, empty when unknown.
    pub url: String,

    /// Capture time as an ISO-8601 string (millisecond precision, UTC).
    pub timestamp: String,
}

impl ContentRecord {
    /// Create a record from explicit field values.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        url: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            url: url.into(),
            timestamp: timestamp.into(),
        }
    }
}

/// Extract a content record from an opaque source context.
///
/// The source is whatever JSON object the presentation layer delivered
/// (a page snapshot, a request body). Extraction is best-effort:
///
/// - title: `title` field, falling back to [`DEFAULT_TITLE`]
/// - content: first of `content`, `body`, `text`, truncated to the
///   character budget; empty when absent
/// - url: `url` or `href`; empty when absent
/// - timestamp: `timestamp`, or the current UTC time when absent
///
/// Values that are not strings count as absent. Fails with
/// [`CoreError::SourceUnavailable`] only when `source` is not a JSON
/// object at all.
pub fn extract(source: &Value) -> Result<ContentRecord, CoreError> {
    let obj = source.as_object().ok_or(CoreError::SourceUnavailable)?;

    let title = string_field(obj, &["title"])
        .unwrap_or(DEFAULT_TITLE)
        .to_string();

    let content = string_field(obj, &["content", "body", "text"])
        .map(|s| truncate_chars(s, limits::MAX_CONTENT_CHARS))
        .unwrap_or_default();

    let url = string_field(obj, &["url", "href"])
        .unwrap_or_default()
        .to_string();

    let timestamp = string_field(obj, &["timestamp"])
        .map(str::to_string)
        .unwrap_or_else(now_iso8601);

    Ok(ContentRecord {
        title,
        content,
        url,
        timestamp,
    })
}

/// First non-empty string value among the given keys.
fn string_field<'a>(
    obj: &'a serde_json::Map<String, Value>,
    keys: &[&str],
) -> Option<&'a str> {
    keys.iter()
        .filter_map(|k| obj.get(*k).and_then(Value::as_str))
        .find(|s| !s.is_empty())
}

/// Truncate a string to at most `max` characters, on a char boundary.
fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

/// Current UTC time in ISO-8601 millisecond form, e.g. `2024-01-01T00:00:00.000Z`.
pub fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
