//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `panel`: Push event ingestion and provider fetch results
//! - `keys`: Key event mapping

pub(crate) mod keys;
pub(crate) mod panel;
pub(crate) mod update;


use crate::message::Message;
use crate::panel::PanelId;

// Re-export main entry point
pub use update::update;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateAction {
    /// Fetch the provider list on behalf of `panel_id`
    FetchProviders { panel_id: PanelId },

    /// Tell the backend which provider to read with (fire-and-forget)
    SelectProvider { file_path: String },

    /// Ask the backend to open the provider folder (fire-and-forget)
    OpenProviderFolder,
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}
