//! Snapshot table model for one tracked stream

use chrono::{DateTime, Local};
use factfinder_core::Snapshot;
use tracing::warn;

/// Latest rows of one stream plus when they arrived.
#[derive(Debug, Clone, Default)]
pub struct SnapshotModel {
    rows: Snapshot,
    last_updated: Option<DateTime<Local>>,
}

impl SnapshotModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every row with `rows`, keeping the delivered order.
    ///
    /// Returns `true` if the visible rows changed. The update timestamp is
    /// refreshed either way.
    pub fn apply_snapshot_event(&mut self, rows: Snapshot) -> bool {
        let dupes = rows.duplicate_keys();
        if !dupes.is_empty() {
            warn!("Snapshot contains duplicate keys {:?}; rendering every row", dupes);
        }

        self.last_updated = Some(Local::now());
        if self.rows == rows {
            return false;
        }
        self.rows = rows;
        true
    }

    pub fn current_rows(&self) -> &Snapshot {
        &self.rows
    }

    /// Local time of the most recent event, if any arrived.
    pub fn last_updated(&self) -> Option<DateTime<Local>> {
        self.last_updated
    }
}
