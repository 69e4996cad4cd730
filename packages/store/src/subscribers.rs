//! Callback registry used by [`crate::SessionStore`] to push session changes.
//!
//! Single-threaded by construction (`Rc`), matching the event-loop model of
//! the client: notifications run synchronously on the caller's stack.

use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe};
use std::rc::{Rc, Weak};

type Callback<T> = Rc<dyn Fn(&T)>;

struct Registry<T> {
    next_id: Cell<u64>,
    entries: RefCell<Vec<(u64, Callback<T>)>>,
}

/// A set of callbacks invoked with every published value.
pub struct Subscribers<T> {
    registry: Rc<Registry<T>>,
}

impl<T: 'static> Default for Subscribers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Subscribers<T> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(Registry {
                next_id: Cell::new(0),
                entries: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Register `callback`. It stays registered until the returned
    /// [`Subscription`] is dropped or unsubscribed.
    #[must_use = "dropping the Subscription unsubscribes immediately"]
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let id = self.registry.next_id.get();
        self.registry.next_id.set(id + 1);
        self.registry
            .entries
            .borrow_mut()
            .push((id, Rc::new(callback)));

        let weak: Weak<Registry<T>> = Rc::downgrade(&self.registry);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(registry) = weak.upgrade() {
                    registry.entries.borrow_mut().retain(|(entry, _)| *entry != id);
                }
            })),
        }
    }

    /// Invoke every callback with `value`. A panicking callback is logged and
    /// skipped; the remaining callbacks still run.
    pub fn publish(&self, value: &T) {
        // Snapshot so callbacks may subscribe, unsubscribe or publish again.
        let snapshot: Vec<(u64, Callback<T>)> = self.registry.entries.borrow().clone();
        for (id, callback) in snapshot {
            // wasm32-unknown-unknown builds abort on panic, so there a panicking
            // callback still takes the whole client down. Isolation holds on
            // native targets only.
            let result = panic::catch_unwind(AssertUnwindSafe(|| callback(value)));
            if result.is_err() {
                tracing::error!(subscriber = id, "session subscriber panicked");
            }
        }
    }

    pub fn len(&self) -> usize {
        self.registry.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle returned by [`Subscribers::subscribe`].
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
