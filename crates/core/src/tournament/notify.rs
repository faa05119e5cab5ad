//! Synchronous fan-out of "entity created" notifications.
//!
//! Observers run inline, in registration order, on the caller's task. A slow
//! observer therefore delays the response of the request that created the
//! entity.

use std::sync::Arc;

/// Receives a callback after an entity was successfully created.
pub trait CreationObserver<E>: Send + Sync {
    fn on_created(&self, entity: &E);
}

/// Ordered list of creation observers.
pub struct Notifier<E> {
    observers: Vec<Arc<dyn CreationObserver<E>>>,
}

impl<E> Notifier<E> {
    /// Creates a notifier with no observers.
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    /// Registers an observer. Observers are invoked in registration order.
    pub fn with_observer(mut self, observer: Arc<dyn CreationObserver<E>>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Returns the number of registered observers.
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Returns true if no observer is registered.
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Invokes every observer with the created entity.
    pub fn notify(&self, entity: &E) {
        for observer in &self.observers {
            observer.on_created(entity);
        }
        tracing::trace!(observers = self.observers.len(), "Creation observers notified");
    }
}

impl<E> Default for Notifier<E> {
    fn default() -> Self {
        Self::new()
    }
}
