//! Application error types with rich context

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ─────────────────────────────────────────────────────────────
    // Terminal/TUI Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Terminal error: {message}")]
    Terminal { message: String },

    #[error("Failed to initialize terminal: {0}")]
    TerminalInit(String),

    // ─────────────────────────────────────────────────────────────
    // Bridge Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Backend bridge error: {message}")]
    Bridge { message: String },

    #[error("Failed to connect to backend at {url}: {reason}")]
    BridgeConnect { url: String, reason: String },

    #[error("Bridge protocol error: {message}")]
    Protocol { message: String },

    #[error("Backend request '{method}' timed out")]
    RequestTimeout { method: String },

    // ─────────────────────────────────────────────────────────────
    // Panel Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Provider registry unavailable: {reason}")]
    RegistryUnavailable { reason: String },

    #[error("Malformed '{channel}' event: {reason}")]
    MalformedEvent { channel: String, reason: String },

    #[error("Result arrived after its panel was torn down")]
    StaleAsyncResult,

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }

    pub fn bridge(message: impl Into<String>) -> Self {
        Self::Bridge {
            message: message.into(),
        }
    }

    pub fn bridge_connect(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::BridgeConnect {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    pub fn request_timeout(method: impl Into<String>) -> Self {
        Self::RequestTimeout {
            method: method.into(),
        }
    }

    pub fn registry_unavailable(reason: impl Into<String>) -> Self {
        Self::RegistryUnavailable {
            reason: reason.into(),
        }
    }

    pub fn malformed_event(channel: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedEvent {
            channel: channel.into(),
            reason: reason.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Check if this error should trigger application exit
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::TerminalInit(_) | Error::BridgeConnect { .. }
        )
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions (for use with color-eyre)
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Log `f()` alongside the error, then convert it (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}
