//! Message types for the application (TEA pattern)

use factfinder_core::{Channel, PanelEvent, Provider};

use crate::input_key::InputKey;
use crate::panel::PanelId;

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Tick event for periodic updates
    Tick,

    /// Quit (keyboard, signal handler)
    Quit,

    // ─────────────────────────────────────────────────────────
    // Panel Lifecycle
    // ─────────────────────────────────────────────────────────
    /// A panel was mounted and its subscriptions are live
    PanelMounted { panel_id: PanelId },

    // ─────────────────────────────────────────────────────────
    // Push Events
    // ─────────────────────────────────────────────────────────
    /// A well-formed push payload for the panel that subscribed
    ChannelEvent {
        panel_id: PanelId,
        event: PanelEvent,
    },

    /// A push payload that did not match its channel's shape
    MalformedEvent {
        panel_id: PanelId,
        channel: Channel,
        reason: String,
    },

    // ─────────────────────────────────────────────────────────
    // Provider Registry
    // ─────────────────────────────────────────────────────────
    /// `fetch_providers` completed for `panel_id`
    ProvidersFetched {
        panel_id: PanelId,
        result: Result<Vec<Provider>, String>,
    },

    /// Re-fetch the provider list
    RefreshProviders,

    /// Move the selector cursor up one entry
    SelectorUp,

    /// Move the selector cursor down one entry
    SelectorDown,

    /// Jump to the first entry
    SelectorFirst,

    /// Jump to the last entry
    SelectorLast,

    /// Choose the highlighted provider
    ChooseProvider,

    /// Ask the backend to open the provider folder
    OpenProviderFolder,
}
