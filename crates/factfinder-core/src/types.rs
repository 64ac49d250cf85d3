//! Domain types shared by the bridge, the app state and the TUI

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Message shown for the emulator link before the backend reports anything.
pub const EMULATOR_NOT_FOUND: &str = "Emulator Not Found";

/// Message shown for the split-tracker link before the backend reports anything.
pub const SPLIT_TRACKER_NOT_FOUND: &str = "Opensplit Not Found";

/// Health of one backend-monitored link.
///
/// Each value is a display label reported by the backend, not a progress step:
/// any status may follow any other. Serialized as its integer discriminant
/// (`0..=3`) to match the backend's `connection_status` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connected,
    Reconnecting,
    WaitingForGame,
}

impl ConnectionStatus {
    /// Every status, in wire order.
    pub const ALL: [ConnectionStatus; 4] = [
        ConnectionStatus::Disconnected,
        ConnectionStatus::Connected,
        ConnectionStatus::Reconnecting,
        ConnectionStatus::WaitingForGame,
    ];

    /// Short label for logs and accessibility text.
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionStatus::Disconnected => "Disconnected",
            ConnectionStatus::Connected => "Connected",
            ConnectionStatus::Reconnecting => "Reconnecting",
            ConnectionStatus::WaitingForGame => "Waiting for Game",
        }
    }
}

impl TryFrom<u8> for ConnectionStatus {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(ConnectionStatus::Disconnected),
            1 => Ok(ConnectionStatus::Connected),
            2 => Ok(ConnectionStatus::Reconnecting),
            3 => Ok(ConnectionStatus::WaitingForGame),
            other => Err(format!("unknown connection status {other}")),
        }
    }
}

impl From<ConnectionStatus> for u8 {
    fn from(status: ConnectionStatus) -> Self {
        match status {
            ConnectionStatus::Disconnected => 0,
            ConnectionStatus::Connected => 1,
            ConnectionStatus::Reconnecting => 2,
            ConnectionStatus::WaitingForGame => 3,
        }
    }
}

/// Last announced health of a link plus the backend's message for it.
///
/// Always replaced as a whole; never patched field by field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionState {
    #[serde(rename = "connection_status")]
    pub status: ConnectionStatus,
    pub message: String,
}

impl ConnectionState {
    pub fn new(status: ConnectionStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Initial state of the emulator link.
    pub fn emulator_default() -> Self {
        Self::new(ConnectionStatus::Disconnected, EMULATOR_NOT_FOUND)
    }

    /// Initial state of the split-tracker link.
    pub fn split_tracker_default() -> Self {
        Self::new(ConnectionStatus::Disconnected, SPLIT_TRACKER_NOT_FOUND)
    }
}

/// One key/value row of a snapshot. On the wire: `["key", "value"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct SnapshotRow {
    pub key: String,
    pub value: String,
}

impl SnapshotRow {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl From<(String, String)> for SnapshotRow {
    fn from((key, value): (String, String)) -> Self {
        Self { key, value }
    }
}

impl From<SnapshotRow> for (String, String) {
    fn from(row: SnapshotRow) -> Self {
        (row.key, row.value)
    }
}

/// Full, ordered replacement set of rows for one tracked stream.
///
/// Row order is the order the backend tracks values in and is preserved as
/// delivered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(Vec<SnapshotRow>);

impl Snapshot {
    pub fn new(rows: Vec<SnapshotRow>) -> Self {
        Self(rows)
    }

    /// Build a snapshot from `(key, value)` pairs, keeping their order.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        pairs
            .into_iter()
            .map(|(k, v)| SnapshotRow::new(k, v))
            .collect()
    }

    pub fn rows(&self) -> &[SnapshotRow] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SnapshotRow> {
        self.0.iter()
    }

    /// Value of the first row with `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|row| row.key == key)
            .map(|row| row.value.as_str())
    }

    /// Keys that occur more than once, each reported once in first-seen order.
    pub fn duplicate_keys(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut dupes = Vec::new();
        for row in &self.0 {
            if !seen.insert(row.key.as_str()) && reported.insert(row.key.as_str()) {
                dupes.push(row.key.as_str());
            }
        }
        dupes
    }
}

impl FromIterator<SnapshotRow> for Snapshot {
    fn from_iter<I: IntoIterator<Item = SnapshotRow>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a SnapshotRow;
    type IntoIter = std::slice::Iter<'a, SnapshotRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A selectable fact provider.
///
/// `file_path` is opaque to the panel: it is both the identity and the value
/// sent back when the provider is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    #[serde(rename = "FilePath")]
    pub file_path: String,
    #[serde(rename = "Name")]
    pub name: String,
}

impl Provider {
    pub fn new(file_path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            name: name.into(),
        }
    }
}
