//! factfinder-app - Application state and orchestration for the FactFinder panel
//!
//! This crate implements the TEA (The Elm Architecture) pattern for state
//! management: panel models, messages, update handlers, the Engine that owns
//! the panel lifecycle, the provider registry service and configuration
//! loading.

pub mod actions;
pub mod config;
pub mod engine;
pub mod handler;
pub mod inbox;
pub mod input_key;
pub mod message;
pub mod panel;
pub mod process;
pub mod services;
pub mod signals;
pub mod state;

// Re-export primary types
pub use engine::Engine;
pub use handler::{UpdateAction, UpdateResult};
pub use inbox::PushInbox;
pub use input_key::InputKey;
pub use message::Message;
pub use panel::{PanelId, PanelState};
pub use services::{BridgeProviderRegistry, ProviderRegistry};
pub use state::{AppPhase, AppState};
