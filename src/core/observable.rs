//! Replay-latest subjects for publishing state changes
//!
//! A [`Subject`] holds the latest value plus the registered listeners:
//! - New listeners are called immediately with the current value
//! - Every `next` stores the value and calls all listeners synchronously,
//!   in registration order, on the publishing task
//! - Dropping the returned [`Subscription`] removes the listener
//!
//! Listeners run outside the internal lock, so they may subscribe,
//! unsubscribe or publish again without deadlocking.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use uuid::Uuid;

/// Unique identifier for a subscription
pub type SubscriptionId = String;

/// Listener callback type
pub type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Inner<T> {
    value: T,
    listeners: Vec<(SubscriptionId, Listener<T>)>,
}

fn lock<T>(inner: &Mutex<Inner<T>>) -> MutexGuard<'_, Inner<T>> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Replay-latest publish/subscribe container
pub struct Subject<T> {
    inner: Arc<Mutex<Inner<T>>>,
}

impl<T> Clone for Subject<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Subject<T>
where
    T: Clone + Send + 'static,
{
    /// Create a subject seeded with an initial value
    pub fn new(initial: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                value: initial,
                listeners: Vec::new(),
            })),
        }
    }

    /// Snapshot of the latest value
    pub fn value(&self) -> T {
        lock(&self.inner).value.clone()
    }

    /// Store a new value and deliver it to every listener
    pub fn next(&self, value: T) {
        let listeners: Vec<Listener<T>> = {
            let mut inner = lock(&self.inner);
            inner.value = value.clone();
            inner.listeners.iter().map(|(_, l)| l.clone()).collect()
        };

        for listener in listeners {
            listener(&value);
        }
    }

    /// Register a listener; it is called right away with the current value
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = Uuid::new_v4().to_string();
        let listener: Listener<T> = Arc::new(listener);

        let current = {
            let mut inner = lock(&self.inner);
            inner.listeners.push((id.clone(), listener.clone()));
            inner.value.clone()
        };
        listener(&current);

        let weak: Weak<Mutex<Inner<T>>> = Arc::downgrade(&self.inner);
        let remove_id = id.clone();
        Subscription {
            id,
            teardown: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    lock(&inner).listeners.retain(|(sid, _)| *sid != remove_id);
                }
            })),
        }
    }

    /// Number of live listeners
    pub fn subscriber_count(&self) -> usize {
        lock(&self.inner).listeners.len()
    }

    /// Read-only view that can subscribe but not publish
    pub fn as_observable(&self) -> Observable<T> {
        Observable {
            subject: self.clone(),
        }
    }
}

/// Read-only handle onto a [`Subject`]
pub struct Observable<T> {
    subject: Subject<T>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            subject: self.subject.clone(),
        }
    }
}

impl<T> Observable<T>
where
    T: Clone + Send + 'static,
{
    pub fn value(&self) -> T {
        self.subject.value()
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.subject.subscribe(listener)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subject.subscriber_count()
    }
}

/// Handle for a registered listener; dropping it unsubscribes
pub struct Subscription {
    id: SubscriptionId,
    teardown: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Stop receiving values
    pub fn unsubscribe(mut self) {
        self.teardown_now();
    }

    fn teardown_now(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.teardown_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
