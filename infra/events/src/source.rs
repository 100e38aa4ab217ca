use crate::error::HubError;
use crate::handler::Handler;
use crate::hub::EventHub;

/// Gives a type event semantics by delegating to an [`EventHub`] it owns.
///
/// Implementors only provide [`EventSource::event_hub`]; the control
/// methods come for free.
///
/// # Examples
/// ```rust
/// use herald_events::{EventHub, EventSource, Handler};
///
/// #[derive(Debug, Default)]
/// struct Cart {
///     events: EventHub<u32>,
/// }
///
/// impl EventSource<u32> for Cart {
///     fn event_hub(&self) -> &EventHub<u32> {
///         &self.events
///     }
/// }
///
/// let cart = Cart::default();
/// let on_add = Handler::new(|_, qty: Option<&u32>| {
///     assert_eq!(qty, Some(&2));
///     Ok(())
/// });
/// cart.bind("cart:item", &on_add);
/// assert_eq!(cart.trigger("cart:item:added", Some(&2)).unwrap(), 1);
/// ```
pub trait EventSource<P: 'static = ()> {
    /// The hub owned by this value.
    fn event_hub(&self) -> &EventHub<P>;

    /// See [`EventHub::bind`].
    fn bind(&self, events: &str, handler: &Handler<P>) {
        self.event_hub().bind(events, handler);
    }

    /// See [`EventHub::unbind`].
    fn unbind(&self, events: &str, handler: &Handler<P>) {
        self.event_hub().unbind(events, handler);
    }

    /// See [`EventHub::once`].
    fn once(&self, events: &str, handler: &Handler<P>) {
        self.event_hub().once(events, handler);
    }

    /// See [`EventHub::trigger`].
    ///
    /// # Errors
    /// Returns the first error raised by a handler, unchanged.
    fn trigger(&self, events: &str, payload: Option<&P>) -> Result<usize, HubError> {
        self.event_hub().trigger(events, payload)
    }
}

impl<P: 'static> EventSource<P> for EventHub<P> {
    fn event_hub(&self) -> &Self {
        self
    }
}
