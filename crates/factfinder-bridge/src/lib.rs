//! # factfinder-bridge - Backend Bridge
//!
//! Connects the panel to the FactFinder backend over a single WebSocket
//! speaking JSON-RPC 2.0.
//!
//! ## Public API
//!
//! ### Client (`client`)
//! - [`BridgeClient`] - Owns the connection and its background IO task
//! - [`BridgeHandle`] - Clonable handle for request/response calls
//!
//! ### Push events (`bus`)
//! - [`EventBus`] - Channel-keyed handler registry fed by the client
//! - [`Subscription`] - Unsubscribe token; dropping it removes the handler
//!
//! ### Protocol (`protocol`)
//! - [`RequestTracker`] - Correlates request IDs with waiting callers
//! - [`parse_bridge_message`] - Classifies an incoming text frame

pub mod bus;
pub mod client;
pub mod protocol;

pub use bus::{EventBus, Subscription};
pub use client::{validate_url, BridgeClient, BridgeHandle, DEFAULT_REQUEST_TIMEOUT};
pub use protocol::{
    parse_bridge_message, BridgeError, BridgeEvent, BridgeMessage, BridgeRequest, BridgeResponse,
    RequestTracker,
};
