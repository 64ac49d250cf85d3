//! Main update function - handles state transitions (TEA pattern)

use factfinder_core::prelude::*;

use super::{keys, panel, UpdateResult};
use crate::message::Message;
use crate::state::AppState;

/// Process a message and update state
/// Returns an UpdateResult with optional follow-up message and action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Key(key) => match keys::handle_key(state, key) {
            Some(msg) => UpdateResult::message(msg),
            None => UpdateResult::none(),
        },

        Message::Tick => UpdateResult::none(),

        Message::Quit => {
            info!("Quit requested");
            state.request_quit();
            UpdateResult::none()
        }

        Message::PanelMounted { panel_id } => panel::handle_panel_mounted(state, panel_id),

        Message::ChannelEvent { panel_id, event } => {
            panel::handle_channel_event(state, panel_id, event)
        }

        Message::MalformedEvent {
            panel_id,
            channel,
            reason,
        } => panel::handle_malformed_event(state, panel_id, channel, reason),

        Message::ProvidersFetched { panel_id, result } => {
            panel::handle_providers_fetched(state, panel_id, result)
        }

        Message::RefreshProviders => panel::handle_refresh_providers(state),

        Message::SelectorUp => {
            if let Some(p) = state.panel.as_mut() {
                p.providers.move_up();
            }
            UpdateResult::none()
        }

        Message::SelectorDown => {
            if let Some(p) = state.panel.as_mut() {
                p.providers.move_down();
            }
            UpdateResult::none()
        }

        Message::SelectorFirst => {
            if let Some(p) = state.panel.as_mut() {
                p.providers.move_first();
            }
            UpdateResult::none()
        }

        Message::SelectorLast => {
            if let Some(p) = state.panel.as_mut() {
                p.providers.move_last();
            }
            UpdateResult::none()
        }

        Message::ChooseProvider => panel::handle_choose_provider(state),

        Message::OpenProviderFolder => panel::handle_open_provider_folder(state),
    }
}
