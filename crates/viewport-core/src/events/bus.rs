//! Named-event publish/subscribe registry.
//!
//! [`EventBus`] decouples the code that changes state from the code that
//! reacts to it.  Observers register a callback under an event name; the
//! producer later calls [`EventBus::publish`] with that name and a payload,
//! and every callback registered under the name runs synchronously, in
//! registration order, before `publish` returns.
//!
//! # Single-threaded by construction
//!
//! Callbacks are stored as `Rc<dyn Fn(&P)>` and the registry lives in a
//! `RefCell`, so an `EventBus` is neither `Send` nor `Sync`.  Code that needs
//! to share a bus across threads must put its owner behind one `Mutex`.
//!
//! # Re-entrancy
//!
//! `publish` copies the subscriber list for the event before invoking any
//! callback and releases its borrow of the registry.  A callback may
//! therefore subscribe, unsubscribe, or publish again without a `RefCell`
//! borrow panic:
//!
//! - subscriptions added during dispatch are not invoked by the current
//!   `publish` call;
//! - subscriptions removed during dispatch are skipped if they have not run
//!   yet.
//!
//! # Failure isolation
//!
//! Each callback runs under [`std::panic::catch_unwind`].  A panicking
//! subscriber is logged and counted in the returned [`Delivery`], and the
//! remaining subscribers still run.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

use thiserror::Error;
use tracing::{debug, warn};

/// A subscriber callback.  Identity (for [`EventBus::unsubscribe`]) is the
/// address of the `Rc` allocation.
pub type Callback<P> = Rc<dyn Fn(&P)>;

/// Wraps a closure as a [`Callback`].
pub fn callback<P, F>(f: F) -> Callback<P>
where
    F: Fn(&P) + 'static,
{
    Rc::new(f)
}

/// Identifier of one subscription, unique for the lifetime of its bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub{}", self.0)
    }
}

/// Errors raised at the bus boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventBusError {
    /// The caller passed an argument the bus cannot register.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

/// Outcome of one [`EventBus::publish`] call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Delivery {
    /// Callbacks that were invoked.
    pub invoked: usize,
    /// Invoked callbacks that panicked.
    pub panicked: usize,
}

impl Delivery {
    pub fn is_clean(&self) -> bool {
        self.panicked == 0
    }
}

struct Subscription<P> {
    id: SubscriptionId,
    callback: Callback<P>,
}

/// Publish/subscribe registry keyed by event name, carrying payloads of
/// type `P`.
pub struct EventBus<P> {
    subscriptions: RefCell<HashMap<String, Vec<Subscription<P>>>>,
    next_id: Cell<u64>,
}

impl<P> Default for EventBus<P> {
    fn default() -> Self {
        Self {
            subscriptions: RefCell::new(HashMap::new()),
            next_id: Cell::new(0),
        }
    }
}

impl<P> fmt::Debug for EventBus<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriptions", &self.total_subscriptions())
            .field("next_id", &self.next_id.get())
            .finish()
    }
}

impl<P> EventBus<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` under `event_name`.
    ///
    /// Registering the same callback twice creates two independent
    /// subscriptions, and both fire.
    ///
    /// # Errors
    ///
    /// Returns [`EventBusError::InvalidArgument`] if `event_name` is empty or
    /// whitespace.
    pub fn subscribe(
        &self,
        event_name: &str,
        callback: Callback<P>,
    ) -> Result<SubscriptionId, EventBusError> {
        if event_name.trim().is_empty() {
            return Err(EventBusError::InvalidArgument("event name must not be empty"));
        }

        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.subscriptions
            .borrow_mut()
            .entry(event_name.to_string())
            .or_default()
            .push(Subscription { id, callback });
        Ok(id)
    }

    /// Removes subscriptions under `event_name`.
    ///
    /// With `callback = None` every subscription for the name is removed.
    /// Otherwise only subscriptions whose callback is the same `Rc`
    /// allocation are removed.  Unknown names and unmatched callbacks are a
    /// no-op.  Returns the number of subscriptions removed.
    pub fn unsubscribe(&self, event_name: &str, callback: Option<&Callback<P>>) -> usize {
        let mut subscriptions = self.subscriptions.borrow_mut();
        let Some(list) = subscriptions.get_mut(event_name) else {
            return 0;
        };
        let before = list.len();
        match callback {
            None => list.clear(),
            Some(target) => list.retain(|sub| !Rc::ptr_eq(&sub.callback, target)),
        }
        let removed = before - list.len();
        if list.is_empty() {
            subscriptions.remove(event_name);
        }
        removed
    }

    /// Removes a single subscription by id.  Returns `true` if it existed.
    pub fn unsubscribe_id(&self, id: SubscriptionId) -> bool {
        let mut subscriptions = self.subscriptions.borrow_mut();
        let mut found = false;
        subscriptions.retain(|_, list| {
            let before = list.len();
            list.retain(|sub| sub.id != id);
            found |= list.len() != before;
            !list.is_empty()
        });
        found
    }

    /// Clears every subscription for every event name.
    pub fn unsubscribe_from_all(&self) {
        let removed = {
            let mut subscriptions = self.subscriptions.borrow_mut();
            let removed: usize = subscriptions.values().map(Vec::len).sum();
            subscriptions.clear();
            removed
        };
        debug!(removed, "event bus cleared");
    }

    /// Invokes every callback registered under `event_name` with `payload`.
    pub fn publish(&self, event_name: &str, payload: &P) -> Delivery {
        let snapshot: Vec<(SubscriptionId, Callback<P>)> = match self
            .subscriptions
            .borrow()
            .get(event_name)
        {
            Some(list) => list
                .iter()
                .map(|sub| (sub.id, Rc::clone(&sub.callback)))
                .collect(),
            None => return Delivery::default(),
        };

        let mut delivery = Delivery::default();
        for (id, callback) in snapshot {
            if !self.is_live(event_name, id) {
                continue;
            }
            delivery.invoked += 1;
            if let Err(panic) = catch_unwind(AssertUnwindSafe(|| callback(payload))) {
                delivery.panicked += 1;
                warn!(
                    event = event_name,
                    subscription = %id,
                    "subscriber panicked: {}",
                    panic_message(panic.as_ref())
                );
            }
        }
        delivery
    }

    /// Number of live subscriptions for `event_name`.
    pub fn subscription_count(&self, event_name: &str) -> usize {
        self.subscriptions
            .borrow()
            .get(event_name)
            .map_or(0, Vec::len)
    }

    /// Number of live subscriptions across all event names.
    pub fn total_subscriptions(&self) -> usize {
        self.subscriptions.borrow().values().map(Vec::len).sum()
    }

    fn is_live(&self, event_name: &str, id: SubscriptionId) -> bool {
        self.subscriptions
            .borrow()
            .get(event_name)
            .is_some_and(|list| list.iter().any(|sub| sub.id == id))
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        *msg
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "non-string panic payload"
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
