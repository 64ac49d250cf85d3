//! Panel handlers: push event ingestion, provider fetches and the selector

use factfinder_core::prelude::*;
use factfinder_core::{Channel, PanelEvent, Provider};

use super::{UpdateAction, UpdateResult};
use crate::panel::PanelId;
use crate::state::AppState;

/// Issue the mount-time provider fetch.
///
/// Only the first `PanelMounted` for a panel fetches; later fetches come from
/// an explicit refresh.
pub fn handle_panel_mounted(state: &mut AppState, panel_id: PanelId) -> UpdateResult {
    let Some(panel) = state.panel_for(panel_id) else {
        trace!("PanelMounted for {} which is not mounted", panel_id);
        return UpdateResult::none();
    };

    if *panel.providers.status() != crate::panel::FetchStatus::NotRequested {
        debug!("{} already fetched providers, ignoring mount", panel_id);
        return UpdateResult::none();
    }

    info!("{} mounted, fetching providers", panel_id);
    panel.providers.begin_fetch();
    UpdateResult::action(UpdateAction::FetchProviders { panel_id })
}

pub fn handle_channel_event(
    state: &mut AppState,
    panel_id: PanelId,
    event: PanelEvent,
) -> UpdateResult {
    let channel = event.channel();
    let Some(panel) = state.panel_for(panel_id) else {
        trace!("Dropping '{}' event for unmounted {}", channel, panel_id);
        return UpdateResult::none();
    };

    if panel.apply_event(event) {
        trace!("{}: '{}' updated", panel_id, channel);
    }
    UpdateResult::none()
}

pub fn handle_malformed_event(
    state: &mut AppState,
    panel_id: PanelId,
    channel: Channel,
    reason: String,
) -> UpdateResult {
    warn!("{}", Error::malformed_event(channel.name(), reason.as_str()));

    if let Some(panel) = state.panel_for(panel_id) {
        panel.record_fault(channel, reason);
    }
    UpdateResult::none()
}

pub fn handle_providers_fetched(
    state: &mut AppState,
    panel_id: PanelId,
    result: std::result::Result<Vec<Provider>, String>,
) -> UpdateResult {
    let Some(panel) = state.panel_for(panel_id) else {
        trace!("Discarding provider list for {}: {}", panel_id, Error::StaleAsyncResult);
        return UpdateResult::none();
    };

    match &result {
        Ok(providers) => debug!("{}: {} provider(s) loaded", panel_id, providers.len()),
        Err(reason) => warn!("{}: {}", panel_id, Error::registry_unavailable(reason.as_str())),
    }
    panel.providers.apply_fetch_result(result);
    UpdateResult::none()
}

pub fn handle_refresh_providers(state: &mut AppState) -> UpdateResult {
    let Some(panel) = state.panel.as_mut() else {
        return UpdateResult::none();
    };

    if panel.providers.is_loading() {
        debug!("Provider fetch already in flight");
        return UpdateResult::none();
    }

    panel.providers.begin_fetch();
    UpdateResult::action(UpdateAction::FetchProviders {
        panel_id: panel.id(),
    })
}

pub fn handle_choose_provider(state: &mut AppState) -> UpdateResult {
    let Some(panel) = state.panel.as_mut() else {
        return UpdateResult::none();
    };

    match panel.providers.choose_highlighted() {
        Some(provider) => {
            info!("Selecting provider '{}' ({})", provider.name, provider.file_path);
            UpdateResult::action(UpdateAction::SelectProvider {
                file_path: provider.file_path.clone(),
            })
        }
        None => UpdateResult::none(),
    }
}

pub fn handle_open_provider_folder(state: &AppState) -> UpdateResult {
    if state.panel.is_none() {
        return UpdateResult::none();
    }
    UpdateResult::action(UpdateAction::OpenProviderFolder)
}
