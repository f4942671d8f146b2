//! Gateway abstraction for ledger submission.
//!
//! The gateway is the seam between the registry and the external ledger.
//! Implementations may talk to an RPC node, a relay service, or any other
//! backend that can anchor a fingerprint durably.

use async_trait::async_trait;

use truthchain_core::Fingerprint;

use crate::error::Result;

/// Gateway trait for submitting fingerprints to the external ledger.
///
/// Implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait ChainGateway: Send + Sync {
    /// Submit a fingerprint on behalf of a submitter identity.
    ///
    /// Returns the transaction id issued by the ledger. The id is opaque
    /// here; it is embedded in the registration receipt as-is.
    async fn submit(&self, fingerprint: &Fingerprint, submitter: &str) -> Result<String>;
}

/// A simple in-memory gateway for testing and local development.
///
/// Issues deterministic transaction ids and records every submission.
pub mod memory {
    use super::*;
    use std::sync::Mutex;

    use crate::error::GatewayError;

    /// A single recorded submission.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Submission {
        /// The fingerprint that was submitted.
        pub fingerprint: Fingerprint,
        /// The identity it was submitted for.
        pub submitter: String,
        /// The transaction id that was issued.
        pub transaction_id: String,
    }

    /// In-memory gateway implementation.
    ///
    /// Thread-safe via internal Mutex.
    pub struct MemoryGateway {
        inner: Mutex<MemoryGatewayInner>,
    }

    struct MemoryGatewayInner {
        /// Next sequence number, embedded in issued transaction ids.
        seq: u64,
        /// When set, submissions fail with this message instead.
        fail: Option<String>,
        /// Every successful submission, in order.
        submissions: Vec<Submission>,
    }

    impl MemoryGateway {
        /// Create a new gateway with no recorded submissions.
        pub fn new() -> Self {
            Self {
                inner: Mutex::new(MemoryGatewayInner {
                    seq: 0,
                    fail: None,
                    submissions: Vec::new(),
                }),
            }
        }

        /// Make subsequent submissions fail with the given message.
        pub fn fail_with(&self, message: impl Into<String>) {
            self.inner.lock().unwrap().fail = Some(message.into());
        }

        /// Clear a scripted failure, restoring normal operation.
        pub fn clear_failure(&self) {
            self.inner.lock().unwrap().fail = None;
        }

        /// Snapshot of all successful submissions so far.
        pub fn submissions(&self) -> Vec<Submission> {
            self.inner.lock().unwrap().submissions.clone()
        }
    }

    impl Default for MemoryGateway {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl ChainGateway for MemoryGateway {
        async fn submit(&self, fingerprint: &Fingerprint, submitter: &str) -> Result<String> {
            let mut inner = self.inner.lock().unwrap();

            if let Some(message) = &inner.fail {
                return Err(GatewayError::ChainSubmissionFailed(message.clone()));
            }

            inner.seq += 1;
            // 0x + 64 hex chars: 16 from the sequence number, 48 from the fingerprint.
            let transaction_id = format!("0x{:016x}{}", inner.seq, &fingerprint.to_hex()[..48]);

            inner.submissions.push(Submission {
                fingerprint: *fingerprint,
                submitter: submitter.to_string(),
                transaction_id: transaction_id.clone(),
            });

            Ok(transaction_id)
        }
    }
}
