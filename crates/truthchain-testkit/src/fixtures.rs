//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use serde_json::{json, Value};

use truthchain::{Registry, RegistryConfig, Session};
use truthchain_core::{ContentRecord, RegistrationReceipt};
use truthchain_gateway::MemoryGateway;
use truthchain_store::MemoryStore;

/// A test fixture with a memory-backed registry and a connected session.
pub struct TestFixture {
    pub registry: Registry<MemoryStore, MemoryGateway>,
    pub session: Session,
}

impl TestFixture {
    /// Create a fixture connected as a default test wallet.
    pub fn new() -> Self {
        Self::with_submitter("0xTestWallet")
    }

    /// Create a fixture connected as the given submitter.
    pub fn with_submitter(submitter: &str) -> Self {
        Self {
            registry: Registry::new(
                MemoryStore::new(),
                MemoryGateway::new(),
                RegistryConfig::default(),
            ),
            session: Session::connected(submitter),
        }
    }

    /// A page payload with the given title and body.
    pub fn source(title: &str, content: &str) -> Value {
        json!({
            "title": title,
            "content": content,
            "url": "https://example.com/article",
            "timestamp": "2024-01-01T00:00:00.000Z",
        })
    }

    /// A content record with the fixture's fixed url and timestamp.
    pub fn record(title: &str, content: &str) -> ContentRecord {
        ContentRecord::new(
            title,
            content,
            "https://example.com/article",
            "2024-01-01T00:00:00.000Z",
        )
    }

    /// Register a record through the fixture's session, returning its receipt.
    pub async fn register(&self, title: &str, content: &str) -> RegistrationReceipt {
        self.registry
            .register_record(Self::record(title, content), &self.session)
            .await
            .expect("registration failed")
            .into_receipt()
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
