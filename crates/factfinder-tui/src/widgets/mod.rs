//! Panel widgets

mod footer;
mod header;
mod provider_selector;
mod snapshot_table;
mod status_panel;

pub use footer::Footer;
pub use header::PanelHeader;
pub use provider_selector::{ProviderSelector, PLACEHOLDER};
pub use snapshot_table::SnapshotTable;
pub use status_panel::StatusPanel;
