//! Request/response message bus.
//!
//! Cross-context callers (an extension page, a websocket bridge, a local
//! HTTP handler) talk to the registry through explicit envelopes instead
//! of callbacks: every request gets a correlation id, every response
//! carries that id plus a typed success-or-failure result, and each
//! request runs as its own async task so a slow registration never blocks
//! a lookup behind it.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value};
use tokio::sync::{mpsc, oneshot};

use truthchain_core::{CoreError, Fingerprint};
use truthchain_gateway::ChainGateway;
use truthchain_store::RegistrationStore;

use crate::error::{RegistryError, Result};
use crate::registry::Registry;
use crate::session::Session;

/// Correlation id pairing a response with its request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationId(pub u64);

impl CorrelationId {
    /// Generate a fresh random correlation id.
    pub fn generate() -> Self {
        Self(rand::random())
    }
}

impl std::fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// A typed request to the registry.
///
/// On the wire the variant travels under an `action` tag:
/// `{"action": "registerContent", "source": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum BusRequest {
    /// Register the content in a page payload.
    RegisterContent { source: Value },
    /// Verify whether the content in a page payload is registered.
    VerifyContent { source: Value },
    /// Look up the receipt for a fingerprint.
    LookupFingerprint { fingerprint: Fingerprint },
    /// Look up receipts for many fingerprints.
    BatchLookup { fingerprints: Vec<Fingerprint> },
}

/// Machine-readable error kinds on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    HashingUnavailable,
    StorageUnavailable,
    SourceUnavailable,
    ChainSubmissionFailed,
    NotConnected,
}

impl From<&RegistryError> for ErrorKind {
    fn from(err: &RegistryError) -> Self {
        match err {
            RegistryError::Content(CoreError::SourceUnavailable) => ErrorKind::SourceUnavailable,
            RegistryError::Content(CoreError::HashingUnavailable(_)) => {
                ErrorKind::HashingUnavailable
            }
            // Malformed fingerprints only arrive in caller input.
            RegistryError::Content(CoreError::InvalidFingerprint(_)) => {
                ErrorKind::SourceUnavailable
            }
            RegistryError::Store(_) => ErrorKind::StorageUnavailable,
            RegistryError::Gateway(_) => ErrorKind::ChainSubmissionFailed,
            RegistryError::NotConnected => ErrorKind::NotConnected,
            // A closed bus never crosses the wire; requesters observe the
            // error directly from the handle.
            RegistryError::BusClosed => ErrorKind::StorageUnavailable,
        }
    }
}

/// A wire-level failure: machine-readable kind plus human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusError {
    /// The error kind.
    pub kind: ErrorKind,
    /// Human-readable description.
    pub message: String,
}

impl BusError {
    fn from_registry(err: &RegistryError) -> Self {
        Self {
            kind: ErrorKind::from(err),
            message: err.to_string(),
        }
    }
}

/// The typed result union carried by every response.
///
/// Serializes flat as `{"success": true, "data": ...}` or
/// `{"success": false, "error": {"kind": ..., "message": ...}}`.
#[derive(Debug, Clone, PartialEq)]
pub enum BusResult {
    /// The operation succeeded; `data` holds its payload.
    Success(Value),
    /// The operation failed.
    Failure(BusError),
}

impl Serialize for BusResult {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;

        match self {
            BusResult::Success(data) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("success", &true)?;
                map.serialize_entry("data", data)?;
                map.end()
            }
            BusResult::Failure(error) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("success", &false)?;
                map.serialize_entry("error", error)?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for BusResult {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RawResult {
            success: bool,
            #[serde(default)]
            data: Option<Value>,
            #[serde(default)]
            error: Option<BusError>,
        }

        let raw = RawResult::deserialize(deserializer)?;
        if raw.success {
            Ok(BusResult::Success(raw.data.unwrap_or(Value::Null)))
        } else {
            let error = raw
                .error
                .ok_or_else(|| serde::de::Error::missing_field("error"))?;
            Ok(BusResult::Failure(error))
        }
    }
}

/// A correlated response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusResponse {
    /// The correlation id of the request this answers.
    pub correlation: CorrelationId,
    /// The outcome, flattened into the envelope on the wire.
    #[serde(flatten)]
    pub result: BusResult,
}

impl BusResponse {
    /// Whether the request succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self.result, BusResult::Success(_))
    }

    /// The success payload, if any.
    pub fn data(&self) -> Option<&Value> {
        match &self.result {
            BusResult::Success(data) => Some(data),
            BusResult::Failure(_) => None,
        }
    }

    /// The failure, if any.
    pub fn error(&self) -> Option<&BusError> {
        match &self.result {
            BusResult::Success(_) => None,
            BusResult::Failure(error) => Some(error),
        }
    }
}

/// Envelope traveling from a handle to the dispatcher.
struct BusEnvelope {
    correlation: CorrelationId,
    request: BusRequest,
    reply: oneshot::Sender<BusResponse>,
}

/// Handle for issuing requests to a running bus.
///
/// Cloneable; all clones feed the same dispatcher.
#[derive(Clone)]
pub struct BusHandle {
    tx: mpsc::Sender<BusEnvelope>,
}

impl BusHandle {
    /// Issue a request and await its correlated response.
    pub async fn request(&self, request: BusRequest) -> Result<BusResponse> {
        let correlation = CorrelationId::generate();
        let (reply_tx, reply_rx) = oneshot::channel();

        self.tx
            .send(BusEnvelope {
                correlation,
                request,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RegistryError::BusClosed)?;

        reply_rx.await.map_err(|_| RegistryError::BusClosed)
    }

    /// Issue a request with a timeout on the full round-trip.
    ///
    /// Returns None if the timeout expires before the response arrives.
    pub async fn request_timeout(
        &self,
        request: BusRequest,
        timeout: std::time::Duration,
    ) -> Result<Option<BusResponse>> {
        match tokio::time::timeout(timeout, self.request(request)).await {
            Ok(response) => response.map(Some),
            Err(_) => Ok(None), // Timeout
        }
    }
}

/// The message bus dispatcher.
pub struct Bus;

impl Bus {
    /// Spawn a dispatcher over the given registry and session.
    ///
    /// Incoming requests each run as their own async task. The dispatcher
    /// stops once every handle is dropped and queued requests drain.
    pub fn spawn<S, G>(registry: Registry<S, G>, session: Session, capacity: usize) -> BusHandle
    where
        S: RegistrationStore + 'static,
        G: ChainGateway + 'static,
    {
        let (tx, mut rx) = mpsc::channel::<BusEnvelope>(capacity);
        let registry = std::sync::Arc::new(registry);

        tokio::spawn(async move {
            while let Some(envelope) = rx.recv().await {
                let registry = std::sync::Arc::clone(&registry);
                let session = session.clone();

                tokio::spawn(async move {
                    let correlation = envelope.correlation;
                    let result = dispatch(&registry, &session, envelope.request).await;
                    let response = BusResponse {
                        correlation,
                        result,
                    };

                    if envelope.reply.send(response).is_err() {
                        tracing::warn!(
                            "Bus reply dropped for correlation {}: requester gone",
                            correlation
                        );
                    }
                });
            }
        });

        BusHandle { tx }
    }
}

/// Run one request against the registry and shape the outcome for the wire.
async fn dispatch<S, G>(
    registry: &Registry<S, G>,
    session: &Session,
    request: BusRequest,
) -> BusResult
where
    S: RegistrationStore,
    G: ChainGateway,
{
    let outcome = match request {
        BusRequest::RegisterContent { source } => {
            registry.register(&source, session).await.map(|result| {
                let already_registered = !result.is_new();
                json!({
                    "alreadyRegistered": already_registered,
                    "receipt": result.into_receipt(),
                })
            })
        }
        BusRequest::VerifyContent { source } => registry.verify(&source).await.map(|v| {
            json!({
                "fingerprint": v.fingerprint,
                "registered": v.is_registered(),
                "receipt": v.receipt,
            })
        }),
        BusRequest::LookupFingerprint { fingerprint } => {
            registry.lookup(&fingerprint).await.map(|receipt| {
                json!({
                    "registered": receipt.is_some(),
                    "receipt": receipt,
                })
            })
        }
        BusRequest::BatchLookup { fingerprints } => registry
            .batch_lookup(&fingerprints)
            .await
            .map(|results| json!({ "results": results })),
    };

    match outcome {
        Ok(data) => BusResult::Success(data),
        Err(err) => BusResult::Failure(BusError::from_registry(&err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::RegistryConfig;
    use truthchain_gateway::MemoryGateway;
    use truthchain_store::MemoryStore;

    const GOLDEN_SOURCE_FINGERPRINT: &str =
        "bc7066b3239900f4deff2959bbdb72baa45309b0755a593051d3ee78633daafa";

    fn golden_source() -> Value {
        json!({
            "title": "Hello",
            "content": "World",
            "url": "",
            "timestamp": "2024-01-01T00:00:00.000Z",
        })
    }

    fn spawn_bus(session: Session) -> BusHandle {
        let registry = Registry::new(
            MemoryStore::new(),
            MemoryGateway::new(),
            RegistryConfig::default(),
        );
        Bus::spawn(registry, session, 16)
    }

    #[tokio::test]
    async fn test_bus_register_then_verify() {
        let handle = spawn_bus(Session::connected("0xWallet"));

        let response = handle
            .request(BusRequest::RegisterContent {
                source: golden_source(),
            })
            .await
            .unwrap();

        assert!(response.is_success());
        let data = response.data().unwrap();
        assert_eq!(data["alreadyRegistered"], false);
        assert_eq!(data["receipt"]["fingerprint"], GOLDEN_SOURCE_FINGERPRINT);
        assert_eq!(data["receipt"]["submitterIdentity"], "0xWallet");
        let tx = data["receipt"]["transactionId"].as_str().unwrap();
        assert!(tx.starts_with("0x"));

        let response = handle
            .request(BusRequest::VerifyContent {
                source: golden_source(),
            })
            .await
            .unwrap();

        assert!(response.is_success());
        let data = response.data().unwrap();
        assert_eq!(data["fingerprint"], GOLDEN_SOURCE_FINGERPRINT);
        assert_eq!(data["registered"], true);
        assert_eq!(data["receipt"]["transactionId"], tx);
    }

    #[tokio::test]
    async fn test_bus_register_is_idempotent() {
        let handle = spawn_bus(Session::connected("0xWallet"));

        let first = handle
            .request(BusRequest::RegisterContent {
                source: golden_source(),
            })
            .await
            .unwrap();
        let second = handle
            .request(BusRequest::RegisterContent {
                source: golden_source(),
            })
            .await
            .unwrap();

        let first_data = first.data().unwrap();
        let second_data = second.data().unwrap();
        assert_eq!(first_data["alreadyRegistered"], false);
        assert_eq!(second_data["alreadyRegistered"], true);
        assert_eq!(
            first_data["receipt"]["transactionId"],
            second_data["receipt"]["transactionId"]
        );
    }

    #[tokio::test]
    async fn test_bus_verify_unregistered() {
        let handle = spawn_bus(Session::anonymous());

        let response = handle
            .request(BusRequest::VerifyContent {
                source: golden_source(),
            })
            .await
            .unwrap();

        assert!(response.is_success());
        let data = response.data().unwrap();
        assert_eq!(data["registered"], false);
        assert_eq!(data["receipt"], Value::Null);
    }

    #[tokio::test]
    async fn test_bus_not_connected_error() {
        let handle = spawn_bus(Session::anonymous());

        let response = handle
            .request(BusRequest::RegisterContent {
                source: golden_source(),
            })
            .await
            .unwrap();

        assert!(!response.is_success());
        let error = response.error().unwrap();
        assert_eq!(error.kind, ErrorKind::NotConnected);

        // The wire form carries the flat envelope with a snake_case kind
        let wire = serde_json::to_value(&response).unwrap();
        assert_eq!(wire["success"], false);
        assert_eq!(wire["error"]["kind"], "not_connected");
        assert!(wire["correlation"].is_u64());
    }

    #[tokio::test]
    async fn test_bus_source_unavailable_error() {
        let handle = spawn_bus(Session::connected("0xWallet"));

        let response = handle
            .request(BusRequest::RegisterContent {
                source: json!("not an object"),
            })
            .await
            .unwrap();

        let error = response.error().unwrap();
        assert_eq!(error.kind, ErrorKind::SourceUnavailable);
    }

    #[tokio::test]
    async fn test_bus_chain_submission_failed_error() {
        let gateway = MemoryGateway::new();
        gateway.fail_with("rpc node unreachable");
        let registry = Registry::new(MemoryStore::new(), gateway, RegistryConfig::default());
        let handle = Bus::spawn(registry, Session::connected("0xWallet"), 16);

        let response = handle
            .request(BusRequest::RegisterContent {
                source: golden_source(),
            })
            .await
            .unwrap();

        let error = response.error().unwrap();
        assert_eq!(error.kind, ErrorKind::ChainSubmissionFailed);
        assert!(error.message.contains("rpc node unreachable"));
    }

    #[tokio::test]
    async fn test_bus_batch_lookup() {
        let handle = spawn_bus(Session::connected("0xWallet"));

        let register = handle
            .request(BusRequest::RegisterContent {
                source: golden_source(),
            })
            .await
            .unwrap();
        let registered_fp = register.data().unwrap()["receipt"]["fingerprint"]
            .as_str()
            .unwrap()
            .to_string();

        let absent = Fingerprint::from_bytes([0x99; 32]);
        let response = handle
            .request(BusRequest::BatchLookup {
                fingerprints: vec![
                    registered_fp.parse().unwrap(),
                    absent,
                ],
            })
            .await
            .unwrap();

        let results = &response.data().unwrap()["results"];
        assert_eq!(
            results[&registered_fp]["submitterIdentity"],
            "0xWallet"
        );
        assert_eq!(results[&absent.to_hex()], Value::Null);
    }

    #[tokio::test]
    async fn test_bus_concurrent_requests() {
        let handle = spawn_bus(Session::anonymous());

        let mut tasks = Vec::new();
        for i in 0..8u8 {
            let handle = handle.clone();
            tasks.push(tokio::spawn(async move {
                handle
                    .request(BusRequest::LookupFingerprint {
                        fingerprint: Fingerprint::from_bytes([i; 32]),
                    })
                    .await
            }));
        }

        for task in tasks {
            let response = task.await.unwrap().unwrap();
            assert!(response.is_success());
            assert_eq!(response.data().unwrap()["registered"], false);
        }
    }

    #[tokio::test]
    async fn test_bus_request_timeout_happy_path() {
        let handle = spawn_bus(Session::anonymous());

        let response = handle
            .request_timeout(
                BusRequest::LookupFingerprint {
                    fingerprint: Fingerprint::ZERO,
                },
                std::time::Duration::from_secs(5),
            )
            .await
            .unwrap();

        assert!(response.is_some());
    }

    #[tokio::test]
    async fn test_bus_closed() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let handle = BusHandle { tx };

        let err = handle
            .request(BusRequest::LookupFingerprint {
                fingerprint: Fingerprint::ZERO,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, RegistryError::BusClosed));
    }

    #[test]
    fn test_request_wire_shape() {
        let request = BusRequest::LookupFingerprint {
            fingerprint: Fingerprint::from_bytes([0xAB; 32]),
        };
        let wire = serde_json::to_value(&request).unwrap();

        assert_eq!(wire["action"], "lookupFingerprint");
        assert_eq!(wire["fingerprint"], "ab".repeat(32));

        let parsed: BusRequest = serde_json::from_str(
            r#"{"action": "registerContent", "source": {"title": "T"}}"#,
        )
        .unwrap();
        assert_eq!(
            parsed,
            BusRequest::RegisterContent {
                source: json!({"title": "T"}),
            }
        );
    }

    #[test]
    fn test_response_wire_shape_roundtrip() {
        let success = BusResponse {
            correlation: CorrelationId(7),
            result: BusResult::Success(json!({"registered": true})),
        };
        let wire = serde_json::to_value(&success).unwrap();
        assert_eq!(wire["correlation"], 7);
        assert_eq!(wire["success"], true);
        assert_eq!(wire["data"]["registered"], true);
        let back: BusResponse = serde_json::from_value(wire).unwrap();
        assert_eq!(back, success);

        let failure = BusResponse {
            correlation: CorrelationId(8),
            result: BusResult::Failure(BusError {
                kind: ErrorKind::StorageUnavailable,
                message: "cache offline".into(),
            }),
        };
        let wire = serde_json::to_value(&failure).unwrap();
        assert_eq!(wire["success"], false);
        assert_eq!(wire["error"]["kind"], "storage_unavailable");
        assert_eq!(wire["error"]["message"], "cache offline");
        let back: BusResponse = serde_json::from_value(wire).unwrap();
        assert_eq!(back, failure);
    }
}
