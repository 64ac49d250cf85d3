//! Push channels emitted by the backend and their decoded payloads

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::types::{ConnectionState, Snapshot};

/// The four push channels the backend emits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Emulator link health (`ConnectionState`)
    EmulatorConnection,
    /// Split-tracker link health (`ConnectionState`)
    SplitTrackerConnection,
    /// Raw tracked values (`Snapshot`)
    EmulatorState,
    /// Derived watch values (`Snapshot`)
    EmulatorWatches,
}

impl Channel {
    /// Every channel a panel subscribes to.
    pub const ALL: [Channel; 4] = [
        Channel::EmulatorConnection,
        Channel::SplitTrackerConnection,
        Channel::EmulatorState,
        Channel::EmulatorWatches,
    ];

    /// Event name used on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            Channel::EmulatorConnection => "emulator:connection",
            Channel::SplitTrackerConnection => "opensplit:connection",
            Channel::EmulatorState => "emulator:state",
            Channel::EmulatorWatches => "emulator:values",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Channel::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Decode a raw payload delivered on this channel.
    ///
    /// Shape mismatches become [`Error::MalformedEvent`] naming the channel.
    pub fn decode(self, payload: Value) -> Result<PanelEvent> {
        match self {
            Channel::EmulatorConnection => {
                decode_as(self, payload).map(PanelEvent::EmulatorConnection)
            }
            Channel::SplitTrackerConnection => {
                decode_as(self, payload).map(PanelEvent::SplitTrackerConnection)
            }
            Channel::EmulatorState => decode_as(self, payload).map(PanelEvent::EmulatorState),
            Channel::EmulatorWatches => decode_as(self, payload).map(PanelEvent::EmulatorWatches),
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn decode_as<T: DeserializeOwned>(channel: Channel, payload: Value) -> Result<T> {
    serde_json::from_value(payload).map_err(|e| Error::malformed_event(channel.name(), e.to_string()))
}

/// A well-formed push payload, tagged by the channel it arrived on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEvent {
    EmulatorConnection(ConnectionState),
    SplitTrackerConnection(ConnectionState),
    EmulatorState(Snapshot),
    EmulatorWatches(Snapshot),
}

impl PanelEvent {
    pub fn channel(&self) -> Channel {
        match self {
            PanelEvent::EmulatorConnection(_) => Channel::EmulatorConnection,
            PanelEvent::SplitTrackerConnection(_) => Channel::SplitTrackerConnection,
            PanelEvent::EmulatorState(_) => Channel::EmulatorState,
            PanelEvent::EmulatorWatches(_) => Channel::EmulatorWatches,
        }
    }
}
