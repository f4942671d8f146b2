//! Golden test vectors for deterministic verification.
//!
//! These vectors pin the canonical form and fingerprint so every
//! implementation (and every release of this one) produces identical
//! results.

use truthchain_core::{compute_fingerprint, ContentRecord};

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Record title.
    pub title: &'static str,
    /// Record content body.
    pub content: &'static str,
    /// Record url.
    pub url: &'static str,
    /// Record timestamp.
    pub timestamp: &'static str,
    /// Expected fingerprint (64 lowercase hex chars).
    pub expected_fingerprint: &'static str,
}

impl GoldenVector {
    /// Build the content record for this vector.
    pub fn record(&self) -> ContentRecord {
        ContentRecord::new(self.title, self.content, self.url, self.timestamp)
    }
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "hello world anchor",
            title: "Hello",
            content: "World",
            url: "",
            timestamp: "2024-01-01T00:00:00.000Z",
            expected_fingerprint:
                "bc7066b3239900f4deff2959bbdb72baa45309b0755a593051d3ee78633daafa",
        },
        GoldenVector {
            name: "all fields empty",
            title: "",
            content: "",
            url: "",
            timestamp: "",
            expected_fingerprint:
                "cb719167407ff3dc1c0c7ca1632d4be3c8b999f54112fe286a59e84d057ec716",
        },
        GoldenVector {
            name: "untitled fallback only",
            title: "Untitled",
            content: "",
            url: "",
            timestamp: "",
            expected_fingerprint:
                "e6cf0ab7335eba306ef3c294e0981208e5b5990cb947c545d68db266ab08029f",
        },
        GoldenVector {
            name: "plain article",
            title: "Fox News",
            content: "The quick brown fox jumps over the lazy dog",
            url: "https://example.com/fox",
            timestamp: "2024-06-15T12:30:45.000Z",
            expected_fingerprint:
                "21e7dca448ac19fcc8b8579d9efb7c6a9ff43301472ae02973ddd52747a3682f",
        },
        GoldenVector {
            name: "multiline content",
            title: "Multiline",
            content: "line one\nline two",
            url: "https://example.org/a?b=c",
            timestamp: "2023-11-05T08:00:00.000Z",
            expected_fingerprint:
                "0895d61b9781e050a1c6080e69dfa0a69c47fbae364942da6105a48ce505ee03",
        },
        GoldenVector {
            name: "non-ascii text stays unescaped",
            title: "Über 漢字",
            content: "Naïve café résumé",
            url: "https://example.com/café",
            timestamp: "2025-02-28T23:59:59.999Z",
            expected_fingerprint:
                "17f4fc925ac09f82f56aadaa1ccafc65a98000485c6e73a4eeb7a70ee6980fcf",
        },
        GoldenVector {
            name: "embedded quotes",
            title: "Quoted",
            content: "He said \"hello\" and left.",
            url: "",
            timestamp: "2024-03-10T10:10:10.000Z",
            expected_fingerprint:
                "1719b67dd44587651aba95156bdcfe16207d6cb8a1af33bf5a7b26ed1c6837c7",
        },
    ]
}

/// Verify all golden vectors produce their expected fingerprints.
///
/// Returns (name, matches, actual hex) per vector. Call this to check an
/// implementation against the pinned values.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| {
            let actual = match compute_fingerprint(&v.record()) {
                Ok(fingerprint) => fingerprint.to_hex(),
                Err(e) => format!("error: {}", e),
            };
            let matches = actual == v.expected_fingerprint;
            (v.name.to_string(), matches, actual)
        })
        .collect()
}
