//! Configuration types

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default backend bridge endpoint.
pub const DEFAULT_BRIDGE_URL: &str = "ws://127.0.0.1:34115/bridge";

/// Settings from `config.toml`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub bridge: BridgeSettings,

    #[serde(default)]
    pub ui: UiSettings,
}

/// Backend connection settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BridgeSettings {
    /// WebSocket endpoint of the backend (`ws://` or `wss://`)
    #[serde(default = "default_bridge_url")]
    pub url: String,

    /// How long to wait for a reply to a pull call
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl BridgeSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            url: default_bridge_url(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

fn default_bridge_url() -> String {
    DEFAULT_BRIDGE_URL.to_string()
}

fn default_request_timeout_ms() -> u64 {
    5000
}

/// Icon set used by the TUI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IconMode {
    /// Plain Unicode characters that work in all terminals
    #[default]
    Unicode,
    /// Nerd Font glyphs; requires a Nerd Font in the terminal
    NerdFonts,
}

impl std::fmt::Display for IconMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IconMode::Unicode => write!(f, "unicode"),
            IconMode::NerdFonts => write!(f, "nerd_fonts"),
        }
    }
}

/// UI settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiSettings {
    #[serde(default)]
    pub icons: IconMode,

    /// Show when each table last received a snapshot
    #[serde(default = "default_true")]
    pub show_updated_at: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            icons: IconMode::default(),
            show_updated_at: true,
        }
    }
}

fn default_true() -> bool {
    true
}
