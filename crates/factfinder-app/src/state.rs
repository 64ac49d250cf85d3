//! Application state (Model in TEA pattern)

use crate::config::Settings;
use crate::panel::{PanelId, PanelState};

/// Lifecycle phase of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    #[default]
    Running,
    Quitting,
}

/// Complete application state (the Model in TEA)
#[derive(Debug, Default)]
pub struct AppState {
    pub phase: AppPhase,

    /// The mounted panel, if any
    pub panel: Option<PanelState>,

    /// Loaded settings
    pub settings: Settings,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }

    pub fn request_quit(&mut self) {
        self.phase = AppPhase::Quitting;
    }

    pub fn mounted_panel_id(&self) -> Option<PanelId> {
        self.panel.as_ref().map(PanelState::id)
    }

    /// The mounted panel, but only if it is the one `id` names.
    pub fn panel_for(&mut self, id: PanelId) -> Option<&mut PanelState> {
        self.panel.as_mut().filter(|panel| panel.id() == id)
    }
}
