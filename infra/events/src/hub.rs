use crate::error::HubError;
use crate::handler::Handler;
use crate::names::{expand_namespaces, split_event_list};
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::fmt;
use tracing::{debug, trace};

type Registry<P> = FxHashMap<String, Vec<Handler<P>>>;

/// A synchronous event hub with namespaced event names.
///
/// Maps exact event names to ordered handler lists. Handlers are invoked
/// inline by [`EventHub::trigger`], in registration order, most specific
/// namespace first. Every operation takes `&self`, so handlers may bind,
/// unbind and trigger on the hub that is currently dispatching to them.
///
/// The registry lock only guards memory; it is released while handlers run
/// and gives no ordering guarantees between threads.
pub struct EventHub<P = ()> {
    registry: RwLock<Registry<P>>,
}

impl<P> Default for EventHub<P> {
    fn default() -> Self {
        Self { registry: RwLock::new(FxHashMap::default()) }
    }
}

impl<P> EventHub<P> {
    /// Creates a new, empty `EventHub`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty hub with room for `capacity` event names.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let registry = FxHashMap::with_capacity_and_hasher(capacity, Default::default());
        Self { registry: RwLock::new(registry) }
    }

    /// Appends `handler` to every event named in the compound string `events`.
    ///
    /// Names are stored literally: binding `"order:paid"` does not bind
    /// `"order"`. Binding the same handler twice stores two entries.
    ///
    /// # Examples
    /// ```rust
    /// use herald_events::{EventHub, Handler};
    ///
    /// let hub = EventHub::<()>::new();
    /// let handler = Handler::new(|_, _| Ok(()));
    /// hub.bind("created, paid", &handler);
    /// assert!(hub.is_bound("created", &handler));
    /// assert!(hub.is_bound("paid", &handler));
    /// ```
    pub fn bind(&self, events: &str, handler: &Handler<P>) {
        let mut registry = self.registry.write();
        for event in split_event_list(events) {
            trace!(event, "Binding handler");
            registry.entry(event.to_owned()).or_default().push(handler.clone());
        }
    }

    /// Removes the first entry of `handler` from every event named in `events`.
    ///
    /// Events are visited left to right and processing stops at the first
    /// name that has no registry entry: `unbind("a, b", h)` leaves `h` bound
    /// to `"b"` when nothing is bound to `"a"`. A name whose list becomes
    /// empty is removed from the registry.
    pub fn unbind(&self, events: &str, handler: &Handler<P>) {
        let mut removed = Vec::new();
        let mut registry = self.registry.write();

        for event in split_event_list(events) {
            let Some(handlers) = registry.get_mut(event) else {
                trace!(event, "Unbind stopped at unregistered event");
                break;
            };
            if let Some(position) = handlers.iter().position(|bound| bound == handler) {
                removed.push(handlers.remove(position));
                trace!(event, position, "Unbound handler");
            }
            if handlers.is_empty() {
                registry.remove(event);
            }
        }

        // Handlers are dropped after the lock: their captures may call back into the hub.
        drop(registry);
        drop(removed);
    }

    /// Binds `handler` so that it runs at most once.
    ///
    /// An auto-unbind companion is bound right after it to the same `events`.
    /// The first time the companion runs, it unbinds both itself and `handler`
    /// from every event named in `events`.
    ///
    /// # Examples
    /// ```rust
    /// use herald_events::{EventHub, Handler};
    ///
    /// let hub = EventHub::<()>::new();
    /// let handler = Handler::new(|_, _| Ok(()));
    /// hub.once("ready", &handler);
    /// assert_eq!(hub.trigger("ready", None).unwrap(), 1);
    /// assert_eq!(hub.trigger("ready", None).unwrap(), 0);
    /// assert!(hub.is_empty());
    /// ```
    pub fn once(&self, events: &str, handler: &Handler<P>)
    where
        P: 'static,
    {
        let guard = Handler::once_guard(events, handler.clone());
        self.bind(events, handler);
        self.bind(events, &guard);
        debug!(events, "Bound one-shot handler");
    }

    /// Triggers every event named in `events`, passing `payload` to each handler.
    ///
    /// For each name, handlers bound to the name itself run first, then those
    /// bound to each parent namespace (`a:b:c`, then `a:b`, then `a`). Within
    /// one name, handlers run in registration order.
    ///
    /// Dispatch walks the live handler list by position. Entries added to the
    /// current list by a handler are reached in the same dispatch; removing
    /// entries at or before the current position shifts the next handler
    /// under the cursor, so it is skipped.
    ///
    /// Returns the number of handler invocations. The companions bound by
    /// [`EventHub::once`] run like any other entry but are not counted.
    ///
    /// # Errors
    /// Returns the first error raised by a handler, unchanged. Handlers not
    /// yet reached are not invoked.
    ///
    /// # Examples
    /// ```rust
    /// use herald_events::{EventHub, Handler};
    ///
    /// let hub = EventHub::<u64>::new();
    /// let audit = Handler::new(|_, _| Ok(()));
    /// hub.bind("order", &audit);
    ///
    /// assert_eq!(hub.trigger("order:created", Some(&1)).unwrap(), 1);
    /// assert_eq!(hub.trigger("invoice:created", Some(&1)).unwrap(), 0);
    /// ```
    pub fn trigger(&self, events: &str, payload: Option<&P>) -> Result<usize, HubError>
    where
        P: 'static,
    {
        let mut invoked = 0;

        for event in split_event_list(events) {
            for namespace in expand_namespaces(event) {
                let mut position = 0;
                while let Some(handler) = self.handler_at(&namespace, position) {
                    handler.call(self, payload).inspect_err(|err| {
                        debug!(event, %namespace, position, %err, "Dispatch aborted");
                    })?;
                    position += 1;
                    if !handler.is_companion() {
                        invoked += 1;
                    }
                }
            }
        }

        trace!(events, invoked, "Event dispatched");
        Ok(invoked)
    }

    /// Number of handler entries bound to exactly `event`, including the
    /// companion of each pending [`EventHub::once`] binding.
    #[must_use]
    pub fn handler_count(&self, event: &str) -> usize {
        self.registry.read().get(event).map_or(0, Vec::len)
    }

    /// Returns `true` if `handler` is bound to exactly `event`.
    #[must_use]
    pub fn is_bound(&self, event: &str, handler: &Handler<P>) -> bool {
        self.registry.read().get(event).is_some_and(|handlers| handlers.contains(handler))
    }

    /// Names that currently have handlers, sorted.
    #[must_use]
    pub fn event_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.registry.read().keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Number of names that currently have handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registry.read().len()
    }

    /// Returns `true` if no handler is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registry.read().is_empty()
    }

    /// Drops every registration.
    ///
    /// Returns the number of event names that were cleared.
    pub fn clear(&self) -> usize {
        let drained = std::mem::take(&mut *self.registry.write());
        let count = drained.len();
        drop(drained);
        debug!(count, "Event hub cleared");
        count
    }

    fn handler_at(&self, event: &str, position: usize) -> Option<Handler<P>> {
        self.registry.read().get(event)?.get(position).cloned()
    }
}

impl<P> fmt::Debug for EventHub<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry.read();
        let mut events: Vec<(&str, usize)> =
            registry.iter().map(|(event, handlers)| (event.as_str(), handlers.len())).collect();
        events.sort_unstable();
        f.debug_struct("EventHub").field("events", &events).finish()
    }
}
