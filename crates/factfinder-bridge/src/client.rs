//! Async WebSocket client for the FactFinder backend.
//!
//! The [`BridgeClient`] connects to the backend over WebSocket, sends
//! JSON-RPC 2.0 requests, routes responses back to callers via oneshot
//! channels, and hands push notifications to an [`EventBus`].
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        BridgeClient                           │
//! │                                                               │
//! │  ┌──────────────┐         ┌───────────────────────────────┐   │
//! │  │ BridgeHandle │         │   Background Task              │   │
//! │  │              │         │                                │   │
//! │  │  request() ──┼──cmd───▶│  WebSocket read/write loop     │   │
//! │  │              │  chan   │                                │   │
//! │  └──────────────┘         │  Route: response → tracker     │   │
//! │                           │         event → EventBus       │   │
//! │                           └───────────────────────────────┘   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no reconnection: the backend lives on the same machine as the
//! panel, and losing it ends the session.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::protocol::Message as WsMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};

use factfinder_core::prelude::*;

use crate::bus::EventBus;
use crate::protocol::{
    parse_bridge_message, BridgeError, BridgeMessage, BridgeRequest, BridgeResponse,
    RequestTracker,
};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Capacity of the command channel between handles and the background task.
const CMD_CHANNEL_CAPACITY: usize = 64;

/// How often the background task sweeps abandoned request slots.
const STALE_REQUEST_CLEANUP_INTERVAL: Duration = Duration::from_secs(10);

/// Default wait for a backend reply.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

// ---------------------------------------------------------------------------
// Internal command type
// ---------------------------------------------------------------------------

/// Internal messages sent from the public API to the background task.
enum ClientCommand {
    /// Send a JSON-RPC request and deliver the response to `response_tx`.
    SendRequest {
        method: String,
        params: Value,
        response_tx: oneshot::Sender<Result<Value>>,
    },
    /// Gracefully close the WebSocket connection and stop the background task.
    Disconnect,
}

type WsStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

// ---------------------------------------------------------------------------
// BridgeHandle
// ---------------------------------------------------------------------------

/// A clonable handle for making backend calls.
///
/// Shares the WebSocket connection with the [`BridgeClient`] that created it.
/// Once the background task exits, requests fail with [`Error::Bridge`].
#[derive(Clone)]
pub struct BridgeHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
    connected: Arc<AtomicBool>,
    request_timeout: Duration,
}

impl std::fmt::Debug for BridgeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeHandle")
            .field("connected", &self.is_connected())
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl BridgeHandle {
    /// Call `method` with positional `params` and wait for its result.
    ///
    /// # Errors
    ///
    /// - [`Error::RequestTimeout`] if no reply arrives within the configured timeout.
    /// - [`Error::Protocol`] if the backend answered with a JSON-RPC error.
    /// - [`Error::Bridge`] if the connection is gone.
    pub async fn request(&self, method: &str, params: Value) -> Result<Value> {
        let (response_tx, response_rx) = oneshot::channel();

        self.cmd_tx
            .send(ClientCommand::SendRequest {
                method: method.to_string(),
                params,
                response_tx,
            })
            .await
            .map_err(|_| Error::bridge("connection to backend is closed"))?;

        match tokio::time::timeout(self.request_timeout, response_rx).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(Error::bridge("connection to backend is closed")),
            Err(_) => Err(Error::request_timeout(method)),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// A handle whose background task never existed.
    ///
    /// Every request fails with [`Error::Bridge`].
    #[cfg(test)]
    pub(crate) fn disconnected_for_test() -> Self {
        let (cmd_tx, _cmd_rx) = mpsc::channel(1);
        Self {
            cmd_tx,
            connected: Arc::new(AtomicBool::new(false)),
            request_timeout: Duration::from_millis(50),
        }
    }
}

// ---------------------------------------------------------------------------
// BridgeClient
// ---------------------------------------------------------------------------

/// WebSocket client owning the connection to the backend.
///
/// Dropping the client (and every [`BridgeHandle`] cloned from it) closes
/// the command channel, which makes the background task send a Close frame
/// and exit.
pub struct BridgeClient {
    handle: BridgeHandle,
    bus: EventBus,
}

impl BridgeClient {
    /// Connect to the backend at `url`.
    ///
    /// Push notifications are dispatched on `bus` by channel name as they
    /// arrive.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BridgeConnect`] if `url` is not a `ws://`/`wss://` URL
    /// or the initial handshake fails.
    pub async fn connect(url: &str, bus: EventBus, request_timeout: Duration) -> Result<Self> {
        validate_url(url)?;

        info!("Connecting to backend at {}", url);
        let ws_stream = connect_ws(url).await?;
        info!("Connected to backend");

        let (cmd_tx, cmd_rx) = mpsc::channel::<ClientCommand>(CMD_CHANNEL_CAPACITY);
        let connected = Arc::new(AtomicBool::new(true));

        tokio::spawn(run_client_task(
            ws_stream,
            cmd_rx,
            bus.clone(),
            Arc::clone(&connected),
            request_timeout,
        ));

        Ok(Self {
            handle: BridgeHandle {
                cmd_tx,
                connected,
                request_timeout,
            },
            bus,
        })
    }

    /// Clonable handle sharing this client's connection.
    pub fn request_handle(&self) -> BridgeHandle {
        self.handle.clone()
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub async fn request(&self, method: &str, params: Value) -> Result<Value> {
        self.handle.request(method, params).await
    }

    pub fn is_connected(&self) -> bool {
        self.handle.is_connected()
    }

    /// Ask the background task to close the socket.
    ///
    /// Returns immediately; the task sends a Close frame and terminates.
    pub async fn disconnect(&self) {
        // Already closed if the send fails.
        let _ = self.handle.cmd_tx.send(ClientCommand::Disconnect).await;
    }
}

// ---------------------------------------------------------------------------
// Background task
// ---------------------------------------------------------------------------

async fn run_client_task(
    ws_stream: WsStream,
    mut cmd_rx: mpsc::Receiver<ClientCommand>,
    bus: EventBus,
    connected: Arc<AtomicBool>,
    request_timeout: Duration,
) {
    let mut tracker = RequestTracker::new();

    let lost = run_io_loop(ws_stream, &mut cmd_rx, &bus, &mut tracker, request_timeout).await;
    connected.store(false, Ordering::Release);

    if lost {
        warn!("Backend connection lost");
    }
    debug!("Bridge background task exiting");
}

/// Run the read/write select loop until the socket ends or a close is requested.
///
/// Returns `true` if the connection was lost, `false` on a requested shutdown.
async fn run_io_loop(
    ws_stream: WsStream,
    cmd_rx: &mut mpsc::Receiver<ClientCommand>,
    bus: &EventBus,
    tracker: &mut RequestTracker,
    request_timeout: Duration,
) -> bool {
    let (mut ws_sink, mut ws_stream) = ws_stream.split();

    let mut cleanup_interval = tokio::time::interval(STALE_REQUEST_CLEANUP_INTERVAL);
    cleanup_interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            // ── Incoming WebSocket message ───────────────────────────────
            frame = ws_stream.next() => {
                match frame {
                    Some(Ok(WsMessage::Text(text))) => {
                        handle_ws_text(text.as_str(), tracker, bus);
                    }
                    Some(Ok(WsMessage::Close(_))) => {
                        debug!("Bridge: received Close frame");
                        return true;
                    }
                    Some(Ok(_)) => {
                        // Ping/Pong/Binary
                    }
                    Some(Err(err)) => {
                        warn!("Bridge: WebSocket read error: {}", err);
                        return true;
                    }
                    None => {
                        debug!("Bridge: WebSocket stream ended");
                        return true;
                    }
                }
            }

            // ── Outgoing command from the public API ─────────────────────
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(ClientCommand::SendRequest { method, params, response_tx }) => {
                        handle_send_request(&method, params, response_tx, tracker, &mut ws_sink).await;
                    }
                    Some(ClientCommand::Disconnect) => {
                        send_close(&mut ws_sink).await;
                        return false;
                    }
                    None => {
                        debug!("Bridge: command channel closed, shutting down");
                        send_close(&mut ws_sink).await;
                        return false;
                    }
                }
            }

            // ── Periodic stale request cleanup ──────────────────────────
            _ = cleanup_interval.tick() => {
                // Callers give up after `request_timeout`; slots older than
                // twice that can never be answered usefully.
                let stale = tracker.cleanup_stale(request_timeout * 2);
                if !stale.is_empty() {
                    debug!("Bridge: cleaned up {} stale request(s): {:?}", stale.len(), stale);
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

/// Reject anything that is not an absolute `ws://` or `wss://` URL.
pub fn validate_url(raw: &str) -> Result<url::Url> {
    let parsed = url::Url::parse(raw).map_err(|e| Error::bridge_connect(raw, e.to_string()))?;
    match parsed.scheme() {
        "ws" | "wss" => Ok(parsed),
        other => Err(Error::bridge_connect(
            raw,
            format!("unsupported scheme '{other}', expected ws or wss"),
        )),
    }
}

async fn connect_ws(url: &str) -> Result<WsStream> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|err| Error::bridge_connect(url, err.to_string()))?;
    Ok(ws_stream)
}

/// Route an incoming text frame to the tracker or the event bus.
fn handle_ws_text(text: &str, tracker: &mut RequestTracker, bus: &EventBus) {
    match parse_bridge_message(text) {
        BridgeMessage::Response(mut response) => {
            if let Some(id) = response.id.take() {
                if !tracker.complete(&id, response) {
                    debug!("Bridge: received response for unknown request id {}", id);
                }
            }
        }
        BridgeMessage::Event(event) => {
            let delivered = bus.dispatch(&event.method, event.params);
            trace!("Bridge: '{}' delivered to {} handler(s)", event.method, delivered);
        }
        BridgeMessage::Unknown(raw) => {
            debug!(
                "Bridge: ignoring unknown message: {}",
                raw.chars().take(120).collect::<String>()
            );
        }
    }
}

/// Register the request, write it to the socket and forward its reply.
async fn handle_send_request(
    method: &str,
    params: Value,
    response_tx: oneshot::Sender<Result<Value>>,
    tracker: &mut RequestTracker,
    ws_sink: &mut SplitSink<WsStream, WsMessage>,
) {
    // Register before touching the wire so the slot exists if the reply races the send.
    let (id, response_rx) = tracker.register();
    let request = BridgeRequest::new(id, method, params);

    let json = match serde_json::to_string(&request) {
        Ok(j) => j,
        Err(err) => {
            let _ = response_tx.send(Err(Error::protocol(format!(
                "Failed to serialize request '{method}': {err}"
            ))));
            return;
        }
    };

    if let Err(err) = ws_sink.send(WsMessage::Text(json.into())).await {
        let _ = response_tx.send(Err(Error::bridge(format!(
            "Failed to send request '{method}': {err}"
        ))));
        return;
    }

    tokio::spawn(async move {
        let result = match response_rx.await {
            Ok(response) => response_to_result(response),
            // Slot dropped by stale cleanup or task shutdown.
            Err(_) => Err(Error::bridge("request abandoned")),
        };
        let _ = response_tx.send(result);
    });
}

/// A reply without `error` is a success; a missing or null `result` reads as `null`.
fn response_to_result(response: BridgeResponse) -> Result<Value> {
    match response.error {
        Some(error) => Err(bridge_error_to_error(error)),
        None => Ok(response.result.unwrap_or(Value::Null)),
    }
}

fn bridge_error_to_error(err: BridgeError) -> Error {
    Error::protocol(format!("backend error {}: {}", err.code, err.message))
}

async fn send_close(ws_sink: &mut SplitSink<WsStream, WsMessage>) {
    let _ = ws_sink.send(WsMessage::Close(None)).await;
    let _ = ws_sink.close().await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_url_accepts_ws_schemes() {
        assert!(validate_url("ws://127.0.0.1:34115/bridge").is_ok());
        assert!(validate_url("wss://example.com/bridge").is_ok());
    }

    #[test]
    fn test_validate_url_rejects_other_schemes() {
        let err = validate_url("http://127.0.0.1:34115").unwrap_err();
        assert!(matches!(err, Error::BridgeConnect { .. }));
        assert!(err.to_string().contains("unsupported scheme 'http'"));

        assert!(validate_url("not a url").is_err());
    }

    #[test]
    fn test_response_to_result_success() {
        let response = BridgeResponse {
            id: Some("1".into()),
            result: Some(json!([1, 2])),
            error: None,
        };
        assert_eq!(response_to_result(response).unwrap(), json!([1, 2]));
    }

    #[test]
    fn test_response_to_result_null_result_is_ok() {
        let response = BridgeResponse {
            id: Some("1".into()),
            result: None,
            error: None,
        };
        assert_eq!(response_to_result(response).unwrap(), Value::Null);
    }

    #[test]
    fn test_response_to_result_error() {
        let response = BridgeResponse {
            id: Some("1".into()),
            result: None,
            error: Some(BridgeError {
                code: -32601,
                message: "Method not found".into(),
            }),
        };
        let err = response_to_result(response).unwrap_err();
        assert!(matches!(err, Error::Protocol { .. }));
        assert!(err.to_string().contains("-32601"));
    }

    #[test]
    fn test_handle_ws_text_dispatches_events() {
        let bus = EventBus::new();
        let hits = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let _sub = bus.subscribe("emulator:values", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let mut tracker = RequestTracker::new();
        handle_ws_text(
            r#"{"jsonrpc":"2.0","method":"emulator:values","params":[]}"#,
            &mut tracker,
            &bus,
        );
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_handle_ws_text_completes_pending_request() {
        let bus = EventBus::new();
        let mut tracker = RequestTracker::new();
        let (id, rx) = tracker.register();

        let frame = format!(r#"{{"jsonrpc":"2.0","id":"{id}","result":"ok"}}"#);
        handle_ws_text(&frame, &mut tracker, &bus);

        assert_eq!(tracker.pending_count(), 0);
        let response = rx.await.unwrap();
        assert_eq!(response.result, Some(json!("ok")));
    }

    #[tokio::test]
    async fn test_request_on_closed_handle_fails() {
        let handle = BridgeHandle::disconnected_for_test();
        let err = handle.request("GetFactProviders", json!([])).await.unwrap_err();
        assert!(matches!(err, Error::Bridge { .. }));
        assert!(!handle.is_connected());
    }

    #[test]
    fn test_handle_is_clone_send_sync() {
        fn assert_traits<T: Clone + Send + Sync + std::fmt::Debug>() {}
        assert_traits::<BridgeHandle>();
    }
}
