//! Latest-value mailbox for push events
//!
//! Push handlers run on the bridge task and must neither block nor lose the
//! newest payload. Each channel keeps one slot: the most recent well-formed
//! event, plus the most recent decode failure that arrived after it. The
//! engine takes every slot on its next drain.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use factfinder_core::{Channel, PanelEvent};

use crate::message::Message;
use crate::panel::PanelId;

#[derive(Debug)]
struct Pending {
    panel_id: PanelId,
    event: Option<PanelEvent>,
    fault: Option<String>,
}

impl Pending {
    fn new(panel_id: PanelId) -> Self {
        Self {
            panel_id,
            event: None,
            fault: None,
        }
    }
}

/// Per-channel coalescing slots shared between push handlers and the engine.
#[derive(Debug, Clone, Default)]
pub struct PushInbox {
    slots: Arc<Mutex<HashMap<Channel, Pending>>>,
}

impl PushInbox {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Channel, Pending>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store a decoded event, replacing anything pending on its channel.
    ///
    /// Returns `true` if an undrained value was overwritten.
    pub fn push_event(&self, panel_id: PanelId, event: PanelEvent) -> bool {
        let channel = event.channel();
        let mut pending = Pending::new(panel_id);
        pending.event = Some(event);
        self.lock().insert(channel, pending).is_some()
    }

    /// Record a decode failure on `channel`.
    ///
    /// A pending good event from the same panel is kept so it is still
    /// applied before the fault.
    pub fn push_fault(&self, panel_id: PanelId, channel: Channel, reason: String) {
        let mut slots = self.lock();
        let pending = slots
            .entry(channel)
            .or_insert_with(|| Pending::new(panel_id));
        if pending.panel_id != panel_id {
            *pending = Pending::new(panel_id);
        }
        pending.fault = Some(reason);
    }

    /// Take every pending value as messages, in channel order.
    pub fn take_messages(&self) -> Vec<Message> {
        let mut slots = self.lock();
        let mut messages = Vec::new();
        for channel in Channel::ALL {
            let Some(pending) = slots.remove(&channel) else {
                continue;
            };
            let panel_id = pending.panel_id;
            if let Some(event) = pending.event {
                messages.push(Message::ChannelEvent { panel_id, event });
            }
            if let Some(reason) = pending.fault {
                messages.push(Message::MalformedEvent {
                    panel_id,
                    channel,
                    reason,
                });
            }
        }
        messages
    }

    /// Drop everything pending. Returns how many channels had values.
    pub fn clear(&self) -> usize {
        let mut slots = self.lock();
        let count = slots.len();
        slots.clear();
        count
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use factfinder_core::{ConnectionState, ConnectionStatus, Snapshot};

    const PANEL: PanelId = PanelId::new(1);

    fn state_event(hp: usize) -> PanelEvent {
        PanelEvent::EmulatorState(Snapshot::from_pairs([("HP", hp.to_string())]))
    }

    #[test]
    fn test_latest_event_per_channel_wins() {
        let inbox = PushInbox::new();
        assert!(!inbox.push_event(PANEL, state_event(1)));
        assert!(inbox.push_event(PANEL, state_event(2)));

        let messages = inbox.take_messages();
        assert_eq!(messages.len(), 1);
        match &messages[0] {
            Message::ChannelEvent {
                event: PanelEvent::EmulatorState(rows),
                ..
            } => assert_eq!(rows.get("HP"), Some("2")),
            other => panic!("unexpected message {other:?}"),
        }
        assert!(inbox.is_empty());
    }

    #[test]
    fn test_channels_do_not_overwrite_each_other() {
        let inbox = PushInbox::new();
        inbox.push_event(PANEL, state_event(1));
        inbox.push_event(
            PANEL,
            PanelEvent::SplitTrackerConnection(ConnectionState::new(
                ConnectionStatus::Connected,
                "Linked",
            )),
        );
        assert_eq!(inbox.take_messages().len(), 2);
    }

    #[test]
    fn test_fault_after_event_keeps_both_in_order() {
        let inbox = PushInbox::new();
        inbox.push_event(PANEL, state_event(7));
        inbox.push_fault(PANEL, Channel::EmulatorState, "bad row".into());

        let messages = inbox.take_messages();
        assert!(matches!(messages[0], Message::ChannelEvent { .. }));
        assert!(matches!(
            &messages[1],
            Message::MalformedEvent { channel: Channel::EmulatorState, reason, .. } if reason == "bad row"
        ));
    }

    #[test]
    fn test_event_after_fault_supersedes_it() {
        let inbox = PushInbox::new();
        inbox.push_fault(PANEL, Channel::EmulatorState, "bad row".into());
        inbox.push_event(PANEL, state_event(8));

        let messages = inbox.take_messages();
        assert_eq!(messages.len(), 1);
        assert!(matches!(messages[0], Message::ChannelEvent { .. }));
    }

    #[test]
    fn test_fault_from_new_panel_drops_old_panel_event() {
        let inbox = PushInbox::new();
        inbox.push_event(PANEL, state_event(1));
        inbox.push_fault(PanelId::new(2), Channel::EmulatorState, "bad".into());

        let messages = inbox.take_messages();
        assert_eq!(messages.len(), 1);
        assert!(matches!(
            messages[0],
            Message::MalformedEvent { panel_id, .. } if panel_id == PanelId::new(2)
        ));
    }

    #[test]
    fn test_clear_reports_pending_channels() {
        let inbox = PushInbox::new();
        inbox.push_event(PANEL, state_event(1));
        inbox.push_fault(PANEL, Channel::EmulatorWatches, "bad".into());
        assert_eq!(inbox.clear(), 2);
        assert!(inbox.take_messages().is_empty());
    }
}
