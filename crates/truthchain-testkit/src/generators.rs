//! Proptest generators for property-based testing.

use proptest::prelude::*;

use truthchain_core::{ContentRecord, Fingerprint};

/// Generate a random fingerprint.
pub fn fingerprint() -> impl Strategy<Value = Fingerprint> {
    any::<[u8; 32]>().prop_map(Fingerprint::from_bytes)
}

/// Generate a title, possibly empty.
pub fn title() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[A-Za-z0-9 ]{1,64}".prop_map(String::from),
    ]
}

/// Generate body text, including whitespace, quotes, and non-ASCII.
pub fn content() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,!?\"\\n€äöü漢字]{0,200}".prop_map(String::from)
}

/// Generate a url or the empty string.
pub fn url() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "https://[a-z]{3,10}\\.example/[a-z0-9/]{0,20}".prop_map(String::from),
    ]
}

/// Generate an ISO-8601 millisecond timestamp.
pub fn timestamp() -> impl Strategy<Value = String> {
    (
        1970i32..=2100,
        1u32..=12,
        1u32..=28,
        0u32..24,
        0u32..60,
        0u32..60,
        0u32..1000,
    )
        .prop_map(|(y, mo, d, h, mi, s, ms)| {
            format!(
                "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
                y, mo, d, h, mi, s, ms
            )
        })
}

/// Parameters for generating a content record.
#[derive(Debug, Clone)]
pub struct RecordParams {
    pub title: String,
    pub content: String,
    pub url: String,
    pub timestamp: String,
}

impl Arbitrary for RecordParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (title(), content(), url(), timestamp())
            .prop_map(|(title, content, url, timestamp)| RecordParams {
                title,
                content,
                url,
                timestamp,
            })
            .boxed()
    }
}

/// Build a record from parameters.
pub fn record_from_params(params: &RecordParams) -> ContentRecord {
    ContentRecord::new(
        params.title.clone(),
        params.content.clone(),
        params.url.clone(),
        params.timestamp.clone(),
    )
}
