//! View name notifications
//!
//! The rendering layer subscribes here to learn which views must stay
//! mounted. Every change to the page stack publishes the full, ordered list.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(Uuid);

type Listener = Arc<dyn Fn(&[String]) + 'static>;

#[derive(Clone, Default)]
pub struct ViewNameObserver {
    listeners: Arc<RwLock<Vec<(SubscriptionId, Listener)>>>,
}

impl ViewNameObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: impl Fn(&[String]) + 'static) -> SubscriptionId {
        let id = SubscriptionId(Uuid::new_v4());
        let listener: Listener = Arc::new(listener);
        self.listeners.write().push((id, listener));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    pub fn publish(&self, names: &[String]) {
        // Listeners run without the lock held so they may (un)subscribe
        let listeners: Vec<Listener> = self
            .listeners
            .read()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in listeners {
            listener(names);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }

    pub fn clear(&self) {
        self.listeners.write().clear();
    }
}
