//! Event Bus implementation.
//!
//! Observers either register a handler that runs on the publishing thread,
//! or take a broadcast receiver and poll it from a tokio task.

use parking_lot::RwLock;
use tokio::sync::broadcast;
use uuid::Uuid;

use super::events::{AppEvent, EventCategory};

/// Events buffered per async receiver before the slowest one lags.
pub const RECEIVER_CAPACITY: usize = 256;

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// Which events a handler wants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EventFilter {
    #[default]
    All,
    /// Only events in one of these categories.
    Categories(Vec<EventCategory>),
}

impl EventFilter {
    pub fn matches(&self, event: &AppEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Categories(categories) => categories.contains(&event.category()),
        }
    }
}

type Handler = Box<dyn Fn(AppEvent) + Send + Sync>;

struct Subscription {
    id: SubscriptionId,
    filter: EventFilter,
    handler: Handler,
}

/// State and storage notifications for one session.
pub struct EventBus {
    /// Handlers in subscription order.
    subscriptions: RwLock<Vec<Subscription>>,
    sender: broadcast::Sender<AppEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(RECEIVER_CAPACITY);
        Self {
            subscriptions: RwLock::new(Vec::new()),
            sender,
        }
    }

    /// Delivers `event` to matching handlers, in subscription order, and
    /// then to every async receiver. Returns how many observers got it.
    ///
    /// Handlers must not subscribe or unsubscribe from inside the callback.
    pub fn publish(&self, event: AppEvent) -> usize {
        let mut delivered = 0;
        for sub in self.subscriptions.read().iter() {
            if sub.filter.matches(&event) {
                (sub.handler)(event.clone());
                delivered += 1;
            }
        }
        // No receivers is not an error; the event is simply dropped.
        delivered + self.sender.send(event).unwrap_or(0)
    }

    pub fn subscribe<F>(&self, filter: EventFilter, handler: F) -> SubscriptionId
    where
        F: Fn(AppEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(Uuid::new_v4());
        self.subscriptions.write().push(Subscription {
            id,
            filter,
            handler: Box::new(handler),
        });
        tracing::debug!("Subscription {} added", id);
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscriptions = self.subscriptions.write();
        let before = subscriptions.len();
        subscriptions.retain(|sub| sub.id != id);
        let removed = subscriptions.len() < before;
        if removed {
            tracing::debug!("Subscription {} removed", id);
        }
        removed
    }

    /// Receiver for polling events from a tokio task. Sees only events
    /// published after this call.
    pub fn receiver(&self) -> broadcast::Receiver<AppEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &self.subscriptions.read().len())
            .field("receivers", &self.sender.receiver_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_bus::events::{StateEvent, StorageEvent};
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn saved(id: &str) -> AppEvent {
        AppEvent::Storage(StorageEvent::Saved {
            pattern_id: id.to_string(),
        })
    }

    fn restored(id: &str) -> AppEvent {
        AppEvent::State(StateEvent::Restored {
            pattern_id: id.to_string(),
        })
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(0));
        let sink = Arc::clone(&seen);
        let id = bus.subscribe(EventFilter::All, move |_| *sink.lock() += 1);

        assert_eq!(bus.publish(saved("a")), 1);
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        assert_eq!(bus.publish(saved("b")), 0);
        assert_eq!(*seen.lock(), 1);
    }

    #[test]
    fn test_handlers_run_in_subscription_order() {
        let bus = EventBus::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        for name in ["first", "second", "third"] {
            let sink = Arc::clone(&order);
            bus.subscribe(EventFilter::All, move |_| sink.lock().push(name));
        }

        bus.publish(saved("p"));
        assert_eq!(*order.lock(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_category_filter() {
        let bus = EventBus::new();
        let storage = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&storage);
        bus.subscribe(
            EventFilter::Categories(vec![EventCategory::Storage]),
            move |event| sink.lock().push(event),
        );

        assert_eq!(bus.publish(restored("p1")), 0);
        assert_eq!(bus.publish(saved("p1")), 1);
        assert_eq!(*storage.lock(), vec![saved("p1")]);
    }

    #[tokio::test]
    async fn test_async_receiver() {
        let bus = EventBus::new();
        bus.publish(saved("before"));

        let mut rx = bus.receiver();
        assert_eq!(bus.publish(saved("after")), 1);
        assert_eq!(rx.recv().await.unwrap(), saved("after"));
    }
}
