//! In-process fan-out broadcaster.
//!
//! Every subscriber owns an unbounded queue. `publish` enqueues a clone of
//! the event into each queue registered at that moment, so delivery is FIFO
//! per subscriber and late subscribers never see earlier events.
//!
//! Unlike a `broadcast` channel there is no shared ring buffer: a stalled
//! subscriber never loses events, it accumulates them.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::mpsc;

use super::WorkbenchEvent;

/// Handle used to deregister a subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Receiving side of a subscription.
#[derive(Debug)]
pub struct Subscription<E = WorkbenchEvent> {
    id: SubscriptionId,
    receiver: mpsc::UnboundedReceiver<E>,
}

impl<E> Subscription<E> {
    pub const fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Wait for the next event. Returns `None` once the subscription has
    /// been removed from the bus and its queue is drained.
    pub async fn recv(&mut self) -> Option<E> {
        self.receiver.recv().await
    }

    /// Take the next queued event without waiting.
    pub fn try_recv(&mut self) -> Option<E> {
        self.receiver.try_recv().ok()
    }
}

/// Publish/subscribe broadcaster with one queue per subscriber.
#[derive(Debug)]
pub struct EventBus<E = WorkbenchEvent> {
    subscribers: Mutex<HashMap<SubscriptionId, mpsc::UnboundedSender<E>>>,
    next_id: AtomicU64,
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self {
            subscribers: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl<E: Clone + Send + 'static> EventBus<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a shared bus.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    fn registry(&self) -> MutexGuard<'_, HashMap<SubscriptionId, mpsc::UnboundedSender<E>>> {
        // A poisoned map is still structurally valid; keep serving.
        self.subscribers
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Register a new subscriber queue.
    pub fn subscribe(&self) -> Subscription<E> {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let (sender, receiver) = mpsc::unbounded_channel();
        self.registry().insert(id, sender);
        tracing::debug!(subscription = id.0, "Event subscriber registered");
        Subscription { id, receiver }
    }

    /// Deregister a subscriber. Unknown or already-removed ids are ignored.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        if self.registry().remove(&id).is_some() {
            tracing::debug!(subscription = id.0, "Event subscriber removed");
        }
    }

    /// Deliver `event` to every currently registered subscriber.
    ///
    /// Never blocks on a slow subscriber.
    pub fn publish(&self, event: E) {
        // Iterate a snapshot so subscribe/unsubscribe never contend with
        // delivery.
        let targets: Vec<_> = self
            .registry()
            .iter()
            .map(|(id, sender)| (*id, sender.clone()))
            .collect();

        for (id, sender) in targets {
            if sender.send(event.clone()).is_err() {
                tracing::debug!(subscription = id.0, "Dropping event for closed subscriber");
            }
        }
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.registry().len()
    }
}
