use crate::error::HubError;
use crate::hub::EventHub;
use std::fmt;
use std::sync::{Arc, Weak};
use tracing::debug;

/// Behavior run when an event a [`Handler`] is bound to fires.
///
/// Closures are the usual way in via [`Handler::new`]; implement this trait
/// directly for handlers that carry their own state.
pub trait EventHandler<P>: Send + Sync + 'static {
    /// Handles one delivery. `hub` is the hub that dispatched the event and
    /// may be used re-entrantly.
    ///
    /// # Errors
    /// Any error stops the current dispatch and is returned by
    /// [`EventHub::trigger`] as is.
    fn handle(&self, hub: &EventHub<P>, payload: Option<&P>) -> Result<(), HubError>;
}

/// A shareable handle to an event handler.
///
/// Equality is identity: clones of one `Handler` compare equal, two handlers
/// built from identical closures do not. Keep a clone around to unbind later.
pub struct Handler<P> {
    inner: Arc<dyn EventHandler<P>>,
    companion: bool,
}

impl<P> Handler<P> {
    /// Wraps a closure as a handler.
    ///
    /// # Examples
    /// ```rust
    /// use herald_events::{EventHub, Handler};
    ///
    /// let hub = EventHub::<u32>::new();
    /// let log = Handler::new(|_hub: &EventHub<u32>, payload: Option<&u32>| {
    ///     assert_eq!(payload, Some(&7));
    ///     Ok(())
    /// });
    /// hub.bind("tick", &log);
    /// assert_eq!(hub.trigger("tick", Some(&7)).unwrap(), 1);
    /// ```
    #[must_use]
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&EventHub<P>, Option<&P>) -> Result<(), HubError> + Send + Sync + 'static,
        P: 'static,
    {
        Self { inner: Arc::new(FnHandler(f)), companion: false }
    }

    /// Wraps a value implementing [`EventHandler`].
    #[must_use]
    pub fn from_handler<H: EventHandler<P>>(handler: H) -> Self {
        Self { inner: Arc::new(handler), companion: false }
    }

    /// Returns `true` if both handles point to the same handler.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.inner), Arc::as_ptr(&other.inner))
    }

    /// `true` for the auto-unbind companion bound by [`EventHub::once`].
    pub(crate) const fn is_companion(&self) -> bool {
        self.companion
    }
}

impl<P: 'static> Handler<P> {
    /// Builds the companion that unbinds `handler` and itself from `events`
    /// the first time it runs.
    pub(crate) fn once_guard(events: &str, handler: Self) -> Self {
        let inner = Arc::new_cyclic(|this| OnceGuard {
            events: events.to_owned(),
            handler,
            this: this.clone(),
        });
        Self { inner, companion: true }
    }

    pub(crate) fn call(&self, hub: &EventHub<P>, payload: Option<&P>) -> Result<(), HubError> {
        self.inner.handle(hub, payload)
    }
}

impl<P> Clone for Handler<P> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner), companion: self.companion }
    }
}

impl<P> PartialEq for Handler<P> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<P> Eq for Handler<P> {}

impl<P> fmt::Debug for Handler<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handler").field(&Arc::as_ptr(&self.inner).cast::<()>()).finish()
    }
}

struct FnHandler<F>(F);

impl<P, F> EventHandler<P> for FnHandler<F>
where
    F: Fn(&EventHub<P>, Option<&P>) -> Result<(), HubError> + Send + Sync + 'static,
{
    #[inline]
    fn handle(&self, hub: &EventHub<P>, payload: Option<&P>) -> Result<(), HubError> {
        (self.0)(hub, payload)
    }
}

/// Auto-unbind companion registered next to a one-shot handler.
///
/// Holds the compound name exactly as given to `once`, so the unbind walks
/// the same tokens the bind did. The self reference is weak: once both
/// entries leave the registry, the guard and its handler are dropped.
struct OnceGuard<P> {
    events: String,
    handler: Handler<P>,
    this: Weak<Self>,
}

impl<P: 'static> EventHandler<P> for OnceGuard<P> {
    fn handle(&self, hub: &EventHub<P>, _payload: Option<&P>) -> Result<(), HubError> {
        hub.unbind(&self.events, &self.handler);
        if let Some(this) = self.this.upgrade() {
            hub.unbind(&self.events, &Handler { inner: this, companion: true });
        }
        debug!(events = %self.events, "One-shot handler expired");
        Ok(())
    }
}
