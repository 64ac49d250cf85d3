//! Action handlers: spawn background tasks for UpdateActions
//!
//! Each task talks to the backend through a [`ProviderRegistry`] and reports
//! back by sending a [`Message`]; nothing here touches [`AppState`] directly.
//!
//! [`AppState`]: crate::state::AppState

use tokio::sync::mpsc;

use factfinder_core::prelude::*;

use crate::handler::UpdateAction;
use crate::message::Message;
use crate::panel::PanelId;
use crate::services::ProviderRegistry;

/// Execute an action by spawning its background task
pub fn handle_action<R>(action: UpdateAction, msg_tx: mpsc::Sender<Message>, registry: R)
where
    R: ProviderRegistry + Clone + Sync + 'static,
{
    match action {
        UpdateAction::FetchProviders { panel_id } => {
            spawn_fetch_providers(panel_id, msg_tx, registry);
        }

        UpdateAction::SelectProvider { file_path } => {
            tokio::spawn(async move {
                match registry.select_provider(&file_path).await {
                    Ok(()) => debug!("Provider '{}' selected", file_path),
                    Err(e) => warn!("Failed to select provider '{}': {}", file_path, e),
                }
            });
        }

        UpdateAction::OpenProviderFolder => {
            tokio::spawn(async move {
                if let Err(e) = registry.request_open_provider_folder().await {
                    warn!("Failed to open provider folder: {}", e);
                }
            });
        }
    }
}

/// Fetch the provider list and report it as [`Message::ProvidersFetched`].
fn spawn_fetch_providers<R>(panel_id: PanelId, msg_tx: mpsc::Sender<Message>, registry: R)
where
    R: ProviderRegistry + Clone + Sync + 'static,
{
    tokio::spawn(async move {
        let result = registry.fetch_providers().await.map_err(|e| match e {
            Error::RegistryUnavailable { reason } => reason,
            other => other.to_string(),
        });

        if msg_tx
            .send(Message::ProvidersFetched { panel_id, result })
            .await
            .is_err()
        {
            trace!("Engine gone before provider list for {} arrived", panel_id);
        }
    });
}
