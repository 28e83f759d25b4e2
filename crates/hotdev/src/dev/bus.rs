//! In-process publish/subscribe register for change notifications.
//!
//! Callbacks run synchronously inside [`EventBus::publish`], in subscription
//! order. `publish` works on a snapshot of the subscriber list: a callback
//! removed while a publish is running still receives that notification, but
//! none after it.

use crate::dev::ChangeNotification;
use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Callback invoked for every published notification.
pub type Callback = Arc<dyn Fn(&ChangeNotification) + Send + Sync>;

/// Handle identifying one subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Typed subscription registry shared by the watcher and the SSE endpoint.
pub struct EventBus {
    subscribers: Mutex<Vec<(SubscriptionId, Callback)>>,
    next_id: AtomicU64,
}

impl EventBus {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Register `callback`; it sees every notification published from now on.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&ChangeNotification) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscribers.lock().push((id, Arc::new(callback)));
        id
    }

    /// Register `callback` and tie the subscription to the returned guard.
    pub fn subscribe_guarded<F>(self: &Arc<Self>, callback: F) -> Subscription
    where
        F: Fn(&ChangeNotification) + Send + Sync + 'static,
    {
        Subscription {
            id: self.subscribe(callback),
            bus: Arc::clone(self),
        }
    }

    /// Remove a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.lock();
        let before = subscribers.len();
        subscribers.retain(|(sub_id, _)| *sub_id != id);
        subscribers.len() != before
    }

    /// Deliver `notification` to every current subscriber.
    ///
    /// Returns the number of callbacks invoked.
    pub fn publish(&self, notification: &ChangeNotification) -> usize {
        let snapshot: Vec<Callback> = self
            .subscribers
            .lock()
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();

        for callback in &snapshot {
            callback(notification);
        }

        snapshot.len()
    }

    /// Number of active subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Subscription that unsubscribes itself when dropped.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriptionId,
    bus: Arc<EventBus>,
}

impl Subscription {
    /// Id of the underlying subscription.
    pub fn id(&self) -> SubscriptionId {
        self.id
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.bus.unsubscribe(self.id);
    }
}
