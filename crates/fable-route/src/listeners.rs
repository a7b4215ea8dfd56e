//! Listener registry shared by the route bridge and the state store
//!
//! Delivery takes a snapshot of the registered callbacks before invoking
//! any of them, so callbacks may subscribe, unsubscribe or trigger further
//! events without affecting the round in flight.

use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

type Callback<E> = Arc<dyn Fn(&E) + Send + Sync>;

struct Entry<E> {
    id: u64,
    callback: Callback<E>,
}

type Entries<E> = Mutex<Vec<Entry<E>>>;

/// Ordered set of event callbacks
pub struct ListenerSet<E> {
    entries: Arc<Entries<E>>,
    next_id: AtomicU64,
}

impl<E: 'static> ListenerSet<E> {
    /// Create an empty set
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
            next_id: AtomicU64::new(0),
        }
    }

    /// Register a callback at the end of the delivery order
    pub fn subscribe(&self, callback: impl Fn(&E) + Send + Sync + 'static) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.entries.lock().push(Entry {
            id,
            callback: Arc::new(callback),
        });

        let entries: Weak<Entries<E>> = Arc::downgrade(&self.entries);
        Subscription {
            id,
            cancel: Some(Box::new(move |id| {
                if let Some(entries) = entries.upgrade() {
                    entries.lock().retain(|entry| entry.id != id);
                }
            })),
        }
    }

    /// Deliver `event` to a snapshot of the current callbacks, in
    /// registration order
    pub fn emit(&self, event: &E) {
        let snapshot: Vec<Callback<E>> = self
            .entries
            .lock()
            .iter()
            .map(|entry| Arc::clone(&entry.callback))
            .collect();

        for callback in snapshot {
            callback(event);
        }
    }

    /// Number of live callbacks
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// True when nobody is listening
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl<E: 'static> Default for ListenerSet<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for ListenerSet<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerSet")
            .field("listeners", &self.entries.lock().len())
            .finish()
    }
}

/// Handle for a registered callback
///
/// Dropping the handle unsubscribes. Unsubscribing never affects a delivery
/// round that is already in progress.
#[must_use = "dropping a Subscription unsubscribes its callback"]
pub struct Subscription {
    id: u64,
    cancel: Option<Box<dyn FnOnce(u64) + Send + Sync>>,
}

impl Subscription {
    /// Unsubscribe now
    pub fn unsubscribe(mut self) {
        self.cancel_now();
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel(self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
