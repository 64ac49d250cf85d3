//! Channel-keyed handler registry for push events.
//!
//! `subscribe(channel, handler)` returns a [`Subscription`] token. Dropping the
//! token (or calling [`Subscription::unsubscribe`]) removes the handler, so a
//! set of tokens owned by a panel is released on every exit path.
//!
//! The bus does not know about sockets: the bridge client feeds it decoded
//! frames, and tests feed it synthetic payloads with [`EventBus::dispatch`].

use std::collections::HashMap;
use std::sync::{Arc, RwLock, Weak};

use serde_json::Value;
use tracing::trace;

type Handler = Arc<dyn Fn(Value) + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    handlers: HashMap<u64, (String, Handler)>,
}

/// Shared registry of push-event handlers. Cheap to clone.
#[derive(Clone, Default)]
pub struct EventBus {
    registry: Arc<RwLock<Registry>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for events named `channel`.
    ///
    /// Handlers run on the delivering task and must not block.
    pub fn subscribe<F>(&self, channel: &str, handler: F) -> Subscription
    where
        F: Fn(Value) + Send + Sync + 'static,
    {
        let mut registry = self.registry.write().unwrap_or_else(|e| e.into_inner());
        let id = registry.next_id;
        registry.next_id += 1;
        registry
            .handlers
            .insert(id, (channel.to_string(), Arc::new(handler)));
        trace!("EventBus: subscribed #{} to {}", id, channel);

        Subscription {
            id,
            channel: channel.to_string(),
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Deliver `payload` to every handler subscribed to `channel`.
    ///
    /// Returns the number of handlers invoked. Handlers are called outside
    /// the registry lock, so a handler may subscribe or unsubscribe.
    pub fn dispatch(&self, channel: &str, payload: Value) -> usize {
        let targets: Vec<Handler> = {
            let registry = self.registry.read().unwrap_or_else(|e| e.into_inner());
            registry
                .handlers
                .values()
                .filter(|(name, _)| name == channel)
                .map(|(_, handler)| Arc::clone(handler))
                .collect()
        };

        if targets.is_empty() {
            trace!("EventBus: no subscribers for {}", channel);
            return 0;
        }

        let count = targets.len();
        for handler in targets {
            handler(payload.clone());
        }
        count
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .handlers
            .len()
    }

    pub fn subscribers_for(&self, channel: &str) -> usize {
        self.registry
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .handlers
            .values()
            .filter(|(name, _)| name == channel)
            .count()
    }
}

/// Unsubscribe token returned by [`EventBus::subscribe`].
///
/// The handler stays registered exactly as long as this value lives.
#[must_use = "dropping a Subscription immediately unsubscribes its handler"]
pub struct Subscription {
    id: u64,
    channel: String,
    registry: Weak<RwLock<Registry>>,
}

impl Subscription {
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Remove the handler now. Equivalent to dropping the token.
    pub fn unsubscribe(self) {}
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("channel", &self.channel)
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        // Bus already gone: nothing left to unregister from.
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let mut registry = registry.write().unwrap_or_else(|e| e.into_inner());
        if registry.handlers.remove(&self.id).is_some() {
            trace!("EventBus: unsubscribed #{} from {}", self.id, self.channel);
        }
    }
}
