//! Connection status model for one backend-monitored link

use factfinder_core::ConnectionState;

/// Last announced [`ConnectionState`] of one link.
///
/// Every event overwrites the stored value; there is no transition table and
/// no terminal state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionModel {
    state: ConnectionState,
}

impl ConnectionModel {
    /// Model that reports `initial` until the first event arrives.
    pub fn new(initial: ConnectionState) -> Self {
        Self { state: initial }
    }

    pub fn emulator() -> Self {
        Self::new(ConnectionState::emulator_default())
    }

    pub fn split_tracker() -> Self {
        Self::new(ConnectionState::split_tracker_default())
    }

    /// Replace the stored state. Returns `true` if the visible value changed.
    pub fn apply_status_event(&mut self, state: ConnectionState) -> bool {
        if self.state == state {
            return false;
        }
        self.state = state;
        true
    }

    pub fn current_state(&self) -> &ConnectionState {
        &self.state
    }
}
