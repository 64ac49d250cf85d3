//! Engine - owns the TEA state, the message channel and the panel lifecycle
//!
//! The Engine is the single place state is mutated. Spawned registry tasks
//! enqueue [`Message`]s on the channel; push handlers registered on the
//! [`EventBus`] write into a [`PushInbox`] that keeps only the newest payload
//! per channel. The frontend drains both through
//! [`Engine::drain_pending_messages`].

use serde_json::Value;
use tokio::sync::mpsc;

use factfinder_bridge::{EventBus, Subscription};
use factfinder_core::prelude::*;
use factfinder_core::Channel;

use crate::config::Settings;
use crate::inbox::PushInbox;
use crate::message::Message;
use crate::panel::{PanelId, PanelState};
use crate::process;
use crate::services::ProviderRegistry;
use crate::signals;
use crate::state::AppState;

/// Capacity of the unified message channel.
const MESSAGE_CHANNEL_CAPACITY: usize = 256;

/// Orchestration engine for the FactFinder panel.
pub struct Engine<R> {
    /// TEA application state (the Model)
    pub state: AppState,

    /// Sender half of the unified message channel.
    /// Clone this to give to input sources (signal handler, registry tasks).
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the unified message channel.
    pub msg_rx: mpsc::Receiver<Message>,

    /// Push event registry the panel subscribes on
    bus: EventBus,

    /// Newest undrained push payload per channel
    inbox: PushInbox,

    /// Pull-side backend operations
    registry: R,

    next_panel_id: u64,
}

impl<R> Engine<R>
where
    R: ProviderRegistry + Clone + Sync + 'static,
{
    pub fn new(settings: Settings, bus: EventBus, registry: R) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel::<Message>(MESSAGE_CHANNEL_CAPACITY);

        Self {
            state: AppState::with_settings(settings),
            msg_tx,
            msg_rx,
            bus,
            inbox: PushInbox::new(),
            registry,
            next_panel_id: 1,
        }
    }

    /// Route SIGINT/SIGTERM to [`Message::Quit`].
    pub fn spawn_signal_handler(&self) {
        signals::spawn_signal_handler(self.msg_tx.clone());
    }

    /// Mount a fresh panel, replacing any mounted one.
    ///
    /// Subscribes the four push channels and issues the initial provider
    /// fetch.
    pub fn mount_panel(&mut self) -> PanelId {
        self.unmount_panel();

        let panel_id = PanelId::new(self.next_panel_id);
        self.next_panel_id += 1;

        let mut panel = PanelState::new(panel_id);
        panel.attach_subscriptions(subscribe_panel(&self.bus, panel_id, &self.inbox));
        self.state.panel = Some(panel);

        self.process_message(Message::PanelMounted { panel_id });
        panel_id
    }

    /// Drop the mounted panel and its subscriptions.
    ///
    /// Returns `false` if nothing was mounted.
    pub fn unmount_panel(&mut self) -> bool {
        match self.state.panel.take() {
            Some(panel) => {
                info!("Unmounting {}", panel.id());
                drop(panel);
                let dropped = self.inbox.clear();
                if dropped > 0 {
                    trace!("Dropped {} undrained push event(s) on unmount", dropped);
                }
                true
            }
            None => false,
        }
    }

    /// Process a single message through the TEA update cycle.
    pub fn process_message(&mut self, msg: Message) {
        process::process_message(&mut self.state, msg, &self.msg_tx, &self.registry);
    }

    /// Drain and process all pending messages and push events.
    ///
    /// Returns the number of messages processed.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        for msg in self.inbox.take_messages() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    /// Get a clone of the message sender for spawning input sources.
    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    pub fn settings(&self) -> &Settings {
        &self.state.settings
    }

    /// Tear down the panel. Pending messages are discarded.
    pub fn shutdown(&mut self) {
        self.unmount_panel();
        let discarded = std::iter::from_fn(|| self.msg_rx.try_recv().ok()).count();
        if discarded > 0 {
            debug!("Discarded {} pending message(s) at shutdown", discarded);
        }
        info!("Engine shut down");
    }
}

/// Subscribe every push channel for `panel_id`.
///
/// Handlers decode on the delivering task and overwrite the channel's inbox
/// slot without awaiting, so the newest payload always survives a slow drain.
fn subscribe_panel(bus: &EventBus, panel_id: PanelId, inbox: &PushInbox) -> Vec<Subscription> {
    Channel::ALL
        .iter()
        .map(|&channel| {
            let inbox = inbox.clone();
            bus.subscribe(channel.name(), move |payload: Value| {
                match channel.decode(payload) {
                    Ok(event) => {
                        if inbox.push_event(panel_id, event) {
                            trace!("Coalesced undrained '{}' event", channel);
                        }
                    }
                    Err(Error::MalformedEvent { reason, .. }) => {
                        inbox.push_fault(panel_id, channel, reason);
                    }
                    Err(other) => inbox.push_fault(panel_id, channel, other.to_string()),
                }
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::panel::FetchStatus;
    use crate::services::registry::testing::{FakeRegistry, RegistryCall};
    use factfinder_core::{ConnectionStatus, Provider};

    fn providers() -> Vec<Provider> {
        vec![
            Provider::new("plans/game1.csv", "Game One"),
            Provider::new("plans/game2.csv", "Game Two"),
        ]
    }

    async fn recv_message(engine: &mut Engine<FakeRegistry>) -> Message {
        tokio::time::timeout(Duration::from_secs(1), engine.msg_rx.recv())
            .await
            .expect("message should arrive")
            .expect("channel open")
    }

    #[tokio::test]
    async fn test_mount_subscribes_all_channels_once() {
        let (registry, _calls) = FakeRegistry::new(providers());
        let bus = EventBus::new();
        let mut engine = Engine::new(Settings::default(), bus.clone(), registry);

        engine.mount_panel();
        for channel in Channel::ALL {
            assert_eq!(bus.subscribers_for(channel.name()), 1);
        }
        assert_eq!(bus.subscriber_count(), 4);
    }

    #[tokio::test]
    async fn test_mount_issues_exactly_one_fetch() {
        let (registry, mut calls) = FakeRegistry::new(providers());
        let mut engine = Engine::new(Settings::default(), EventBus::new(), registry);

        let id = engine.mount_panel();
        assert_eq!(
            engine.state.panel.as_ref().unwrap().providers.status(),
            &FetchStatus::Loading
        );

        let msg = recv_message(&mut engine).await;
        assert!(matches!(msg, Message::ProvidersFetched { panel_id, .. } if panel_id == id));
        engine.process_message(msg);

        let panel = engine.state.panel.as_ref().unwrap();
        assert_eq!(panel.providers.providers(), providers().as_slice());
        assert_eq!(calls.try_recv().unwrap(), RegistryCall::Fetch);
        assert!(calls.try_recv().is_err());

        // A repeated mount notification does not fetch again
        engine.process_message(Message::PanelMounted { panel_id: id });
        tokio::task::yield_now().await;
        assert!(calls.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_unmount_releases_subscriptions() {
        let (registry, _calls) = FakeRegistry::new(vec![]);
        let bus = EventBus::new();
        let mut engine = Engine::new(Settings::default(), bus.clone(), registry);

        engine.mount_panel();
        assert!(engine.unmount_panel());
        assert_eq!(bus.subscriber_count(), 0);
        assert!(!engine.unmount_panel());
    }

    #[tokio::test]
    async fn test_remount_replaces_subscriptions() {
        let (registry, _calls) = FakeRegistry::new(vec![]);
        let bus = EventBus::new();
        let mut engine = Engine::new(Settings::default(), bus.clone(), registry);

        let first = engine.mount_panel();
        let second = engine.mount_panel();
        assert_ne!(first, second);
        assert_eq!(bus.subscriber_count(), 4);
    }

    #[tokio::test]
    async fn test_engine_drop_releases_subscriptions() {
        let (registry, _calls) = FakeRegistry::new(vec![]);
        let bus = EventBus::new();
        {
            let mut engine = Engine::new(Settings::default(), bus.clone(), registry);
            engine.mount_panel();
        }
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_pushed_status_reaches_model() {
        let (registry, _calls) = FakeRegistry::new(vec![]);
        let bus = EventBus::new();
        let mut engine = Engine::new(Settings::default(), bus.clone(), registry);
        engine.mount_panel();

        bus.dispatch(
            "emulator:connection",
            json!({"connection_status": 1, "message": "Linked"}),
        );
        bus.dispatch(
            "emulator:connection",
            json!({"connection_status": 2, "message": "Lost signal"}),
        );
        engine.drain_pending_messages();

        let state = engine.state.panel.as_ref().unwrap().emulator.current_state();
        assert_eq!(state.status, ConnectionStatus::Reconnecting);
        assert_eq!(state.message, "Lost signal");
    }

    #[tokio::test]
    async fn test_pushed_snapshot_replaces_rows() {
        let (registry, _calls) = FakeRegistry::new(vec![]);
        let bus = EventBus::new();
        let mut engine = Engine::new(Settings::default(), bus.clone(), registry);
        engine.mount_panel();

        bus.dispatch("emulator:state", json!([["HP", "100"], ["MP", "50"]]));
        bus.dispatch(
            "emulator:state",
            json!([["HP", "80"], ["MP", "50"], ["Level", "5"]]),
        );
        engine.drain_pending_messages();

        let rows = engine.state.panel.as_ref().unwrap().state_rows.current_rows();
        let keys: Vec<&str> = rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["HP", "MP", "Level"]);
        assert_eq!(rows.get("HP"), Some("80"));
    }

    #[tokio::test]
    async fn test_burst_of_pushes_keeps_newest_per_channel() {
        let (registry, _calls) = FakeRegistry::new(vec![]);
        let bus = EventBus::new();
        let mut engine = Engine::new(Settings::default(), bus.clone(), registry);
        engine.mount_panel();

        // More events than the message channel could ever hold
        for i in 0..(MESSAGE_CHANNEL_CAPACITY + 44) {
            bus.dispatch("emulator:state", json!([["HP", i.to_string()]]));
        }
        bus.dispatch(
            "opensplit:connection",
            json!({"connection_status": 0, "message": "OpenSplit Not Found"}),
        );
        engine.drain_pending_messages();

        let panel = engine.state.panel.as_ref().unwrap();
        assert_eq!(panel.state_rows.current_rows().get("HP"), Some("299"));
        assert_eq!(
            panel.split_tracker.current_state().message,
            "OpenSplit Not Found"
        );
    }

    #[tokio::test]
    async fn test_status_sent_once_survives_snapshot_flood() {
        let (registry, _calls) = FakeRegistry::new(vec![]);
        let bus = EventBus::new();
        let mut engine = Engine::new(Settings::default(), bus.clone(), registry);
        engine.mount_panel();

        bus.dispatch(
            "emulator:connection",
            json!({"connection_status": 3, "message": "Waiting for game"}),
        );
        for i in 0..1000 {
            bus.dispatch("emulator:values", json!([["Deaths", i.to_string()]]));
        }
        engine.drain_pending_messages();

        let panel = engine.state.panel.as_ref().unwrap();
        assert_eq!(
            panel.emulator.current_state().status,
            ConnectionStatus::WaitingForGame
        );
        assert_eq!(panel.watches.current_rows().get("Deaths"), Some("999"));
    }

    #[tokio::test]
    async fn test_undrained_pushes_dropped_on_unmount() {
        let (registry, _calls) = FakeRegistry::new(vec![]);
        let bus = EventBus::new();
        let mut engine = Engine::new(Settings::default(), bus.clone(), registry);
        engine.mount_panel();

        bus.dispatch("emulator:state", json!([["HP", "1"]]));
        engine.mount_panel();
        engine.drain_pending_messages();

        let panel = engine.state.panel.as_ref().unwrap();
        assert!(panel.state_rows.current_rows().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_push_keeps_previous_rows() {
        let (registry, _calls) = FakeRegistry::new(vec![]);
        let bus = EventBus::new();
        let mut engine = Engine::new(Settings::default(), bus.clone(), registry);
        engine.mount_panel();

        bus.dispatch("emulator:values", json!([["Deaths", "3"]]));
        bus.dispatch("emulator:values", json!([["Deaths"]]));
        bus.dispatch("emulator:state", json!([["HP", "1"]]));
        engine.drain_pending_messages();

        let panel = engine.state.panel.as_ref().unwrap();
        assert_eq!(panel.watches.current_rows().get("Deaths"), Some("3"));
        assert_eq!(panel.state_rows.current_rows().get("HP"), Some("1"));
        let fault = panel.fault().expect("fault recorded");
        assert_eq!(fault.channel, Channel::EmulatorWatches);
    }

    #[tokio::test]
    async fn test_events_after_unmount_are_not_delivered() {
        let (registry, _calls) = FakeRegistry::new(vec![]);
        let bus = EventBus::new();
        let mut engine = Engine::new(Settings::default(), bus.clone(), registry);
        engine.mount_panel();
        engine.unmount_panel();

        assert_eq!(bus.dispatch("emulator:state", json!([])), 0);
    }

    #[tokio::test]
    async fn test_fetch_resolving_after_teardown_is_discarded() {
        let (registry, _calls) = FakeRegistry::new(providers());
        let mut engine = Engine::new(Settings::default(), EventBus::new(), registry);

        engine.mount_panel();
        let late = recv_message(&mut engine).await;
        engine.unmount_panel();

        engine.process_message(late);
        assert!(engine.state.panel.is_none());
        assert!(!engine.should_quit());
    }

    #[tokio::test]
    async fn test_fetch_for_previous_panel_does_not_touch_new_panel() {
        let (registry, _calls) = FakeRegistry::new(providers());
        let mut engine = Engine::new(Settings::default(), EventBus::new(), registry);

        engine.mount_panel();
        let late = recv_message(&mut engine).await;
        engine.mount_panel();

        engine.process_message(late);
        let panel = engine.state.panel.as_ref().unwrap();
        assert!(panel.providers.providers().is_empty());
        assert_eq!(panel.providers.status(), &FetchStatus::Loading);
    }

    #[tokio::test]
    async fn test_select_provider_leaves_list_unchanged() {
        let (registry, mut calls) = FakeRegistry::unavailable("offline");
        let mut engine = Engine::new(Settings::default(), EventBus::new(), registry);
        let id = engine.mount_panel();

        // Load a list directly so selection has something to choose from
        engine.process_message(Message::ProvidersFetched {
            panel_id: id,
            result: Ok(providers()),
        });
        assert_eq!(calls.recv().await, Some(RegistryCall::Fetch));

        engine.process_message(Message::ChooseProvider);
        let call = tokio::time::timeout(Duration::from_secs(1), calls.recv())
            .await
            .unwrap();
        assert_eq!(call, Some(RegistryCall::Select("plans/game1.csv".into())));

        // Let the failing select task finish; it only logs
        tokio::task::yield_now().await;
        engine.drain_pending_messages();

        let panel = engine.state.panel.as_ref().unwrap();
        assert_eq!(panel.providers.providers(), providers().as_slice());
        assert_eq!(
            panel.providers.chosen().map(|p| p.file_path.as_str()),
            Some("plans/game1.csv")
        );
    }

    #[tokio::test]
    async fn test_refresh_after_failure_recovers() {
        let (registry, mut calls) = FakeRegistry::unavailable("backend offline");
        let mut engine = Engine::new(Settings::default(), EventBus::new(), registry.clone());
        engine.mount_panel();

        let failed = recv_message(&mut engine).await;
        engine.process_message(failed);
        assert_eq!(
            engine.state.panel.as_ref().unwrap().providers.status(),
            &FetchStatus::Unavailable("backend offline".into())
        );

        registry.set_fetch_result(Ok(providers()));
        engine.process_message(Message::RefreshProviders);
        let loaded = recv_message(&mut engine).await;
        engine.process_message(loaded);

        let panel = engine.state.panel.as_ref().unwrap();
        assert_eq!(panel.providers.status(), &FetchStatus::Loaded);
        assert_eq!(panel.providers.providers().len(), 2);

        assert_eq!(calls.recv().await, Some(RegistryCall::Fetch));
        assert_eq!(calls.recv().await, Some(RegistryCall::Fetch));
    }

    #[tokio::test]
    async fn test_open_folder_issues_call() {
        let (registry, mut calls) = FakeRegistry::new(vec![]);
        let mut engine = Engine::new(Settings::default(), EventBus::new(), registry);
        engine.mount_panel();
        assert_eq!(calls.recv().await, Some(RegistryCall::Fetch));

        engine.process_message(Message::OpenProviderFolder);
        let call = tokio::time::timeout(Duration::from_secs(1), calls.recv())
            .await
            .unwrap();
        assert_eq!(call, Some(RegistryCall::OpenFolder));
    }

    #[tokio::test]
    async fn test_shutdown_unmounts() {
        let (registry, _calls) = FakeRegistry::new(vec![]);
        let bus = EventBus::new();
        let mut engine = Engine::new(Settings::default(), bus.clone(), registry);
        engine.mount_panel();

        engine.shutdown();
        assert!(engine.state.panel.is_none());
        assert_eq!(bus.subscriber_count(), 0);
    }
}
