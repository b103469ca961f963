//! Transport layer for the node's HTTP API
//!
//! The AgeFix node exposes a small set of routes (`deploy`, `query`,
//! `execute`, `estimateGas`, `tx/{hash}`, `balance/{address}`). The
//! transport only moves JSON to and from those routes; request shaping and
//! response interpretation live in the client.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use crate::SdkError;

/// Transport trait for node communication (object-safe)
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST a JSON body to a route and return the JSON response
    async fn post_json(&self, route: &str, body: Value) -> Result<Value, SdkError>;

    /// GET a route and return the JSON response
    async fn get_json(&self, route: &str) -> Result<Value, SdkError>;
}

// Shared handles stay usable as transports, so a test can keep a counting
// reference to a mock it handed to a client
#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn post_json(&self, route: &str, body: Value) -> Result<Value, SdkError> {
        (**self).post_json(route, body).await
    }

    async fn get_json(&self, route: &str) -> Result<Value, SdkError> {
        (**self).get_json(route).await
    }
}

/// Helper to deserialize a response value
pub(crate) fn deserialize_response<T: serde::de::DeserializeOwned>(
    value: Value,
) -> Result<T, SdkError> {
    serde_json::from_value(value).map_err(|e| SdkError::Serialization(e.to_string()))
}

/// Extract an `error` envelope from a response body, if present
fn check_error_envelope(body: &Value) -> Result<(), SdkError> {
    if let Some(err) = body.get("error") {
        let code = err.get("code").and_then(Value::as_i64).unwrap_or(-32000);
        let message = err
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error")
            .to_string();
        return Err(SdkError::Rpc { code, message });
    }
    Ok(())
}

/// Mock transport for testing
///
/// Responses are keyed by the first route segment, so a response registered
/// for `tx` answers `tx/0xabc…` as well. Besides the sticky per-route
/// responses the mock supports queued one-shot responses (for polling
/// sequences), scripted transport failures (for retry paths), and request
/// counters (for "never reached the network" assertions).
pub struct MockTransport {
    state: Mutex<MockState>,
}

struct MockState {
    sticky: HashMap<String, Value>,
    queued: HashMap<String, VecDeque<Value>>,
    failures: HashMap<String, u32>,
    hits: HashMap<String, u64>,
    defaults: HashMap<String, Value>,
}

impl MockTransport {
    /// Create a new mock transport with default responses
    pub fn new() -> Self {
        let mut defaults = HashMap::new();

        defaults.insert(
            "deploy".to_string(),
            serde_json::json!({
                "contractAddress": "0x5fbdb2315678afecb367f032d93f642f64180aa3",
                "txHash": "0x88df016429689c079f3b2f6ad39fa052532c56795b733da78a91ebe6a713944b",
                "blockNumber": 1,
            }),
        );
        defaults.insert("query".to_string(), serde_json::json!({ "result": "0x" }));
        defaults.insert(
            "execute".to_string(),
            serde_json::json!({
                "txHash": "0x88df016429689c079f3b2f6ad39fa052532c56795b733da78a91ebe6a713944b",
            }),
        );
        defaults.insert(
            "estimateGas".to_string(),
            serde_json::json!({ "gasEstimate": 21000 }),
        );
        defaults.insert(
            "balance".to_string(),
            serde_json::json!({ "balance": "1000000000000000000" }),
        );
        defaults.insert(
            "tx".to_string(),
            serde_json::json!({
                "status": "confirmed",
                "receipt": {
                    "txHash": "0x88df016429689c079f3b2f6ad39fa052532c56795b733da78a91ebe6a713944b",
                    "status": "success",
                    "blockNumber": 256,
                    "gasUsed": 21000,
                },
            }),
        );

        Self {
            state: Mutex::new(MockState {
                sticky: HashMap::new(),
                queued: HashMap::new(),
                failures: HashMap::new(),
                hits: HashMap::new(),
                defaults,
            }),
        }
    }

    /// Set a sticky response for a route
    pub fn set_response(&self, route: &str, response: Value) {
        self.lock().sticky.insert(route.to_string(), response);
    }

    /// Queue a one-shot response for a route
    ///
    /// Queued responses are returned in FIFO order before the sticky
    /// response or default is consulted.
    pub fn queue_response(&self, route: &str, response: Value) {
        self.lock()
            .queued
            .entry(route.to_string())
            .or_default()
            .push_back(response);
    }

    /// Make the next `n` requests to a route fail at the transport level
    pub fn fail_times(&self, route: &str, n: u32) {
        self.lock().failures.insert(route.to_string(), n);
    }

    /// Number of requests a route has received
    pub fn requests(&self, route: &str) -> u64 {
        self.lock().hits.get(route).copied().unwrap_or(0)
    }

    /// Total number of requests across all routes
    pub fn total_requests(&self) -> u64 {
        self.lock().hits.values().sum()
    }

    /// Clear custom responses and counters
    pub fn reset(&self) {
        let mut state = self.lock();
        state.sticky.clear();
        state.queued.clear();
        state.failures.clear();
        state.hits.clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        // A poisoned mutex means a test already panicked while holding it
        self.state.lock().expect("MockTransport mutex poisoned")
    }

    fn respond(&self, route: &str) -> Result<Value, SdkError> {
        let key = route.split('/').next().unwrap_or(route).to_string();
        let mut state = self.lock();

        *state.hits.entry(key.clone()).or_insert(0) += 1;

        if let Some(remaining) = state.failures.get_mut(&key) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(SdkError::Transport(format!(
                    "simulated connection error on /{}",
                    key
                )));
            }
        }

        if let Some(queue) = state.queued.get_mut(&key) {
            if let Some(response) = queue.pop_front() {
                return Ok(response);
            }
        }

        if let Some(response) = state.sticky.get(&key) {
            return Ok(response.clone());
        }

        if let Some(response) = state.defaults.get(&key) {
            return Ok(response.clone());
        }

        Err(SdkError::Rpc {
            code: -32601,
            message: format!("unknown route: /{}", route),
        })
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post_json(&self, route: &str, _body: Value) -> Result<Value, SdkError> {
        let body = self.respond(route)?;
        check_error_envelope(&body)?;
        Ok(body)
    }

    async fn get_json(&self, route: &str) -> Result<Value, SdkError> {
        let body = self.respond(route)?;
        check_error_envelope(&body)?;
        Ok(body)
    }
}

/// HTTP transport backed by reqwest
#[cfg(feature = "http")]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

#[cfg(feature = "http")]
impl HttpTransport {
    /// Create a new HTTP transport for the given base URL
    pub fn new(base_url: &str, request_timeout: std::time::Duration) -> Result<Self, SdkError> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| SdkError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn dispatch(&self, request: reqwest::RequestBuilder) -> Result<Value, SdkError> {
        let response = request
            .send()
            .await
            .map_err(|e| SdkError::Transport(e.to_string()))?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| SdkError::Transport(e.to_string()))?;

        check_error_envelope(&body)?;

        if !status.is_success() {
            return Err(SdkError::Rpc {
                code: status.as_u16() as i64,
                message: format!("unexpected http status {}", status),
            });
        }

        Ok(body)
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(&self, route: &str, body: Value) -> Result<Value, SdkError> {
        let url = format!("{}/{}", self.base_url, route);
        tracing::trace!(%url, "post");
        self.dispatch(self.client.post(&url).json(&body)).await
    }

    async fn get_json(&self, route: &str) -> Result<Value, SdkError> {
        let url = format!("{}/{}", self.base_url, route);
        tracing::trace!(%url, "get");
        self.dispatch(self.client.get(&url)).await
    }
}
