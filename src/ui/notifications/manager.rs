// SPDX-License-Identifier: MPL-2.0
//! Notification lifecycle management.
//!
//! The `Manager` owns the ordered list of live notifications, hands out ids,
//! schedules automatic expiry and pushes a full snapshot to every observer
//! after each change.

use super::notification::{Notification, NotificationId, Severity};
use crate::config::Config;
use crate::diagnostics::DiagnosticsHandle;
use crate::error::{Error, Result};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::runtime::Handle;

type Observer = Arc<dyn Fn(&[Notification]) + Send + Sync>;

/// Messages for notification state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// The user dismissed a notification.
    Dismiss(NotificationId),
    /// The expiry timer of a notification fired.
    Expired(NotificationId),
}

#[derive(Debug)]
struct State {
    next_id: u64,
    /// Bumped by every change to `items`.
    generation: u64,
    items: Vec<Notification>,
}

impl State {
    fn changed(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}

struct Entry {
    key: u64,
    observer: Observer,
    /// Generation of the last list handed to this observer.
    delivered: Option<u64>,
}

#[derive(Default)]
struct Observers {
    next_key: u64,
    entries: Vec<Entry>,
}

#[derive(Debug, Default)]
struct Delivery {
    running: bool,
    dirty: bool,
}

struct Shared {
    state: Mutex<State>,
    observers: Mutex<Observers>,
    delivery: Mutex<Delivery>,
    diagnostics: Mutex<Option<DiagnosticsHandle>>,
    ttl: Duration,
    runtime: Handle,
}

// Queue operations are total: a poisoned lock still holds a consistent list.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Shared {
    fn diagnostics(&self) -> Option<DiagnosticsHandle> {
        lock(&self.diagnostics).clone()
    }

    fn view(&self) -> (u64, Vec<Notification>) {
        let state = lock(&self.state);
        (state.generation, state.items.clone())
    }

    /// Claims the first registered observer that has not seen `generation`.
    fn next_stale(&self, generation: u64) -> Option<Observer> {
        let mut observers = lock(&self.observers);
        let entry = observers
            .entries
            .iter_mut()
            .find(|entry| entry.delivered != Some(generation))?;
        entry.delivered = Some(generation);
        Some(Arc::clone(&entry.observer))
    }

    /// Brings every observer up to date with the current list.
    ///
    /// One caller delivers at a time. A change made while a pass is running,
    /// from inside an observer or from another thread, only marks the pass
    /// dirty; the running caller then hands the newer list to every observer
    /// before it returns. Observers are called in registration order, at most
    /// once per generation and with no lock held, so the last list each one
    /// receives is always the live one.
    fn notify(&self) {
        {
            let mut delivery = lock(&self.delivery);
            delivery.dirty = true;
            if delivery.running {
                return;
            }
            delivery.running = true;
        }
        let _release = ReleaseOnUnwind(self);

        loop {
            {
                let mut delivery = lock(&self.delivery);
                if !delivery.dirty {
                    delivery.running = false;
                    return;
                }
                delivery.dirty = false;
            }

            let (mut generation, mut items) = self.view();
            while let Some(observer) = self.next_stale(generation) {
                observer(&items);
                if lock(&self.state).generation != generation {
                    (generation, items) = self.view();
                }
            }
        }
    }
}

/// Frees the delivery slot when an observer panics mid-pass.
struct ReleaseOnUnwind<'a>(&'a Shared);

impl Drop for ReleaseOnUnwind<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            lock(&self.0.delivery).running = false;
        }
    }
}

/// Queue of transient notifications.
///
/// Cloning a `Manager` yields another handle to the same queue. Each
/// notification stays visible until it is removed explicitly or its
/// lifetime (5 seconds by default) elapses, whichever comes first.
#[derive(Clone)]
pub struct Manager {
    shared: Arc<Shared>,
}

impl fmt::Debug for Manager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Manager")
            .field("state", &*lock(&self.shared.state))
            .field("observers", &lock(&self.shared.observers).entries.len())
            .field("ttl", &self.shared.ttl)
            .finish_non_exhaustive()
    }
}

impl Manager {
    /// Creates an empty queue whose expiry timers run on `runtime`.
    #[must_use]
    pub fn new(runtime: Handle) -> Self {
        Self::with_config(runtime, &Config::default())
    }

    /// Creates an empty queue using the lifetime from `config`.
    #[must_use]
    pub fn with_config(runtime: Handle, config: &Config) -> Self {
        Self::with_ttl(runtime, config.notification_ttl())
    }

    /// Creates an empty queue with an explicit notification lifetime.
    #[must_use]
    pub fn with_ttl(runtime: Handle, ttl: Duration) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(State {
                    next_id: 1,
                    generation: 0,
                    items: Vec::new(),
                }),
                observers: Mutex::new(Observers::default()),
                delivery: Mutex::new(Delivery::default()),
                diagnostics: Mutex::new(None),
                ttl,
                runtime,
            }),
        }
    }

    /// Creates an empty queue bound to the runtime of the calling task.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoRuntime`] when called outside a tokio runtime.
    pub fn current() -> Result<Self> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|_| Error::NoRuntime)
    }

    /// Sets the diagnostics handle for recording queue activity.
    pub fn set_diagnostics(&self, handle: DiagnosticsHandle) {
        *lock(&self.shared.diagnostics) = Some(handle);
    }

    /// Lifetime applied to every new notification.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.shared.ttl
    }

    /// Appends a notification and schedules its removal.
    ///
    /// Returns the id assigned to the new notification. Observers receive the
    /// updated list before this returns, unless a delivery is already under
    /// way; that delivery then picks the change up before it finishes.
    pub fn show(&self, message: impl Into<String>, severity: Severity) -> NotificationId {
        let message = message.into();
        let id = {
            let mut state = lock(&self.shared.state);
            let id = NotificationId::new(state.next_id);
            state.next_id = state.next_id.wrapping_add(1);
            state
                .items
                .push(Notification::new(id, message.clone(), severity));
            state.changed();
            id
        };
        log::debug!("notification {id} shown ({severity}): {message}");

        if let Some(handle) = self.shared.diagnostics() {
            handle.log_notification_shown(id.value(), severity);
            if severity == Severity::Error {
                handle.log_error("notifications", message);
            }
        }

        self.schedule_expiry(id);
        self.shared.notify();
        id
    }

    /// Shows a success notification.
    pub fn success(&self, message: impl Into<String>) -> NotificationId {
        self.show(message, Severity::Success)
    }

    /// Shows an error notification.
    pub fn error(&self, message: impl Into<String>) -> NotificationId {
        self.show(message, Severity::Error)
    }

    /// Shows an info notification.
    pub fn info(&self, message: impl Into<String>) -> NotificationId {
        self.show(message, Severity::Info)
    }

    /// Removes a notification by its ID.
    ///
    /// Returns `true` if the notification was found and removed. Unknown ids
    /// are ignored and observers are not called.
    pub fn remove(&self, id: NotificationId) -> bool {
        {
            let mut state = lock(&self.shared.state);
            let Some(pos) = state.items.iter().position(|n| n.id() == id) else {
                return false;
            };
            state.items.remove(pos);
            state.changed();
        }
        log::debug!("notification {id} removed");

        if let Some(handle) = self.shared.diagnostics() {
            handle.log_notification_removed(id.value());
        }

        self.shared.notify();
        true
    }

    /// Removes every live notification.
    pub fn clear(&self) {
        let removed = {
            let mut state = lock(&self.shared.state);
            if state.items.is_empty() {
                return;
            }
            state.changed();
            std::mem::take(&mut state.items)
        };

        if let Some(handle) = self.shared.diagnostics() {
            for notification in &removed {
                handle.log_notification_removed(notification.id().value());
            }
        }

        self.shared.notify();
    }

    /// Handles a notification message.
    pub fn handle_message(&self, message: &Message) {
        match message {
            Message::Dismiss(id) | Message::Expired(id) => {
                self.remove(*id);
            }
        }
    }

    /// Registers an observer of the notification list.
    ///
    /// The observer is called right away with the current list, then again
    /// after every change, always with the full list in display order. When
    /// subscribing from inside an observer the first call is made by the
    /// delivery already in progress. Dropping the returned [`Subscription`]
    /// keeps the observer registered; call [`Subscription::unsubscribe`] to
    /// stop receiving updates.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&[Notification]) + Send + Sync + 'static,
    {
        let key = {
            let mut observers = lock(&self.shared.observers);
            let key = observers.next_key;
            observers.next_key += 1;
            observers.entries.push(Entry {
                key,
                observer: Arc::new(observer),
                delivered: None,
            });
            key
        };

        self.shared.notify();

        Subscription {
            key,
            shared: Arc::downgrade(&self.shared),
        }
    }

    /// Returns a copy of the live notifications in display order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Notification> {
        lock(&self.shared.state).items.clone()
    }

    /// Number of live notifications.
    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.shared.state).items.len()
    }

    /// Returns `true` if no notification is visible.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        lock(&self.shared.state).items.is_empty()
    }

    /// Spawns the timer that expires `id`.
    ///
    /// The task only holds a weak reference, so a dropped queue lets pending
    /// timers finish without effect.
    fn schedule_expiry(&self, id: NotificationId) {
        let queue = Arc::downgrade(&self.shared);
        let ttl = self.shared.ttl;
        self.shared.runtime.spawn(async move {
            tokio::time::sleep(ttl).await;
            if let Some(shared) = queue.upgrade() {
                Manager { shared }.handle_message(&Message::Expired(id));
            }
        });
    }
}

/// Registration handle returned by [`Manager::subscribe`].
#[derive(Debug)]
#[must_use = "keep the subscription to be able to unsubscribe"]
pub struct Subscription {
    key: u64,
    shared: Weak<Shared>,
}

impl Subscription {
    /// Stops delivering updates to the observer.
    ///
    /// Takes effect immediately, including for a delivery pass that is
    /// already running.
    pub fn unsubscribe(self) {
        if let Some(shared) = self.shared.upgrade() {
            lock(&shared.observers)
                .entries
                .retain(|entry| entry.key != self.key);
        }
    }
}
