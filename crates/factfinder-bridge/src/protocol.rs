//! JSON-RPC 2.0 framing for the backend bridge.
//!
//! The backend speaks JSON-RPC 2.0 over one WebSocket. Push events are
//! notifications whose `method` is the channel name and whose `params` is the
//! payload; pull calls are ordinary requests correlated by string `id`.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::oneshot;

// ---------------------------------------------------------------------------
// Request / Response types
// ---------------------------------------------------------------------------

/// JSON-RPC 2.0 request to the backend.
#[derive(Debug, Serialize)]
pub struct BridgeRequest {
    /// Always `"2.0"`.
    pub jsonrpc: &'static str,
    pub id: String,
    /// Backend call name, e.g. `"GetFactProviders"`.
    pub method: String,
    /// Positional arguments.
    pub params: Value,
}

impl BridgeRequest {
    pub fn new(id: String, method: impl Into<String>, params: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method: method.into(),
            params,
        }
    }
}

/// JSON-RPC 2.0 response from the backend.
#[derive(Debug, Deserialize)]
pub struct BridgeResponse {
    pub id: Option<String>,
    pub result: Option<Value>,
    pub error: Option<BridgeError>,
}

/// JSON-RPC 2.0 error object.
#[derive(Debug, Deserialize)]
pub struct BridgeError {
    pub code: i64,
    pub message: String,
}

/// A push notification: `method` is the channel name.
#[derive(Debug, Deserialize)]
pub struct BridgeEvent {
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

/// Classified incoming frame.
#[derive(Debug)]
pub enum BridgeMessage {
    /// Reply to one of our requests
    Response(BridgeResponse),
    /// Unsolicited push event
    Event(BridgeEvent),
    /// Anything else (kept raw for logging)
    Unknown(String),
}

/// Classify one text frame.
///
/// Never fails: anything that is not a recognisable response or notification
/// comes back as [`BridgeMessage::Unknown`].
pub fn parse_bridge_message(text: &str) -> BridgeMessage {
    let value: Value = match serde_json::from_str(text) {
        Ok(v) => v,
        Err(_) => return BridgeMessage::Unknown(text.to_string()),
    };

    let has_id = value.get("id").is_some_and(|v| !v.is_null());
    let has_method = value.get("method").is_some_and(Value::is_string);

    if has_id {
        match serde_json::from_value::<BridgeResponse>(value) {
            Ok(response) => BridgeMessage::Response(response),
            Err(_) => BridgeMessage::Unknown(text.to_string()),
        }
    } else if has_method {
        match serde_json::from_value::<BridgeEvent>(value) {
            Ok(event) => BridgeMessage::Event(event),
            Err(_) => BridgeMessage::Unknown(text.to_string()),
        }
    } else {
        BridgeMessage::Unknown(text.to_string())
    }
}

// ---------------------------------------------------------------------------
// Request tracker
// ---------------------------------------------------------------------------

struct PendingRequest {
    response_tx: oneshot::Sender<BridgeResponse>,
    created_at: Instant,
}

/// Tracks in-flight requests and matches them to responses.
pub struct RequestTracker {
    next_id: u64,
    pending: HashMap<String, PendingRequest>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            pending: HashMap::new(),
        }
    }

    /// Generate a fresh request ID and register a pending slot for it.
    ///
    /// Returns `(id, receiver)` where `id` must be sent in the request and
    /// `receiver` yields the response when it arrives.
    pub fn register(&mut self) -> (String, oneshot::Receiver<BridgeResponse>) {
        let id = self.next_id.to_string();
        self.next_id += 1;

        let (tx, rx) = oneshot::channel();
        self.pending.insert(
            id.clone(),
            PendingRequest {
                response_tx: tx,
                created_at: Instant::now(),
            },
        );
        (id, rx)
    }

    /// Deliver a response to its waiting caller.
    ///
    /// Returns `false` if no request with `id` is pending.
    pub fn complete(&mut self, id: &str, response: BridgeResponse) -> bool {
        if let Some(pending) = self.pending.remove(id) {
            // The caller may have timed out and dropped the receiver.
            let _ = pending.response_tx.send(response);
            true
        } else {
            false
        }
    }

    /// Drop requests pending longer than `timeout`; returns their IDs.
    pub fn cleanup_stale(&mut self, timeout: Duration) -> Vec<String> {
        let now = Instant::now();
        let stale: Vec<String> = self
            .pending
            .iter()
            .filter(|(_, req)| now.duration_since(req.created_at) > timeout)
            .map(|(id, _)| id.clone())
            .collect();

        for id in &stale {
            self.pending.remove(id);
        }
        stale
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

impl Default for RequestTracker {
    fn default() -> Self {
        Self::new()
    }
}
