//! Panel state - everything one mounted panel owns
//!
//! Submodules:
//! - `connection`: per-link status model
//! - `snapshot`: per-stream key/value rows
//! - `providers`: provider list and selector cursor

mod connection;
mod providers;
mod snapshot;

pub use connection::ConnectionModel;
pub use providers::{FetchStatus, ProviderList};
pub use snapshot::SnapshotModel;

use factfinder_bridge::Subscription;
use factfinder_core::{Channel, PanelEvent};

/// Identity of one mount of the panel.
///
/// Async results carry the id of the panel that asked for them; a result whose
/// id no longer matches the mounted panel is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanelId(u64);

impl PanelId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PanelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "panel-{}", self.0)
    }
}

/// A push payload that failed to decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    pub channel: Channel,
    pub reason: String,
}

/// State of one mounted panel.
///
/// Created on mount and dropped on unmount. Dropping it drops the push
/// subscriptions it holds, which unregisters every handler.
#[derive(Debug)]
pub struct PanelState {
    id: PanelId,

    /// Emulator link health
    pub emulator: ConnectionModel,

    /// Split-tracker link health
    pub split_tracker: ConnectionModel,

    /// Raw tracked values
    pub state_rows: SnapshotModel,

    /// Derived watch values
    pub watches: SnapshotModel,

    /// Provider selector
    pub providers: ProviderList,

    /// Most recent undecodable payload, cleared by that channel's next good one
    fault: Option<Fault>,

    subscriptions: Vec<Subscription>,
}

impl PanelState {
    pub fn new(id: PanelId) -> Self {
        Self {
            id,
            emulator: ConnectionModel::emulator(),
            split_tracker: ConnectionModel::split_tracker(),
            state_rows: SnapshotModel::new(),
            watches: SnapshotModel::new(),
            providers: ProviderList::new(),
            fault: None,
            subscriptions: Vec::new(),
        }
    }

    pub fn id(&self) -> PanelId {
        self.id
    }

    /// Hand the panel the subscriptions it should keep alive.
    pub fn attach_subscriptions(&mut self, subscriptions: Vec<Subscription>) {
        self.subscriptions.extend(subscriptions);
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Route a decoded push event to its model.
    ///
    /// Returns `true` if anything visible changed.
    pub fn apply_event(&mut self, event: PanelEvent) -> bool {
        let channel = event.channel();
        let fault_cleared = self.clear_fault(channel);

        let changed = match event {
            PanelEvent::EmulatorConnection(state) => self.emulator.apply_status_event(state),
            PanelEvent::SplitTrackerConnection(state) => {
                self.split_tracker.apply_status_event(state)
            }
            PanelEvent::EmulatorState(rows) => self.state_rows.apply_snapshot_event(rows),
            PanelEvent::EmulatorWatches(rows) => self.watches.apply_snapshot_event(rows),
        };

        changed || fault_cleared
    }

    pub fn record_fault(&mut self, channel: Channel, reason: impl Into<String>) {
        self.fault = Some(Fault {
            channel,
            reason: reason.into(),
        });
    }

    pub fn fault(&self) -> Option<&Fault> {
        self.fault.as_ref()
    }

    fn clear_fault(&mut self, channel: Channel) -> bool {
        if self.fault.as_ref().is_some_and(|f| f.channel == channel) {
            self.fault = None;
            return true;
        }
        false
    }
}
