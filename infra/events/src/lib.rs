//! # Event Hub
//!
//! A synchronous, in-process event hub with hierarchical event names.
//!
//! ## Overview
//!
//! [`EventHub`] maps event names to ordered lists of [`Handler`]s. Any type
//! can expose the hub's operations by implementing [`EventSource`].
//!
//! ## Features
//!
//! * **Namespaces**: triggering `order:item:added` also notifies handlers bound
//!   to `order:item` and `order`, most specific first.
//! * **Compound names**: `"created, paid shipped"` binds, unbinds or triggers
//!   several events in one call.
//! * **One-shot handlers**: [`EventHub::once`] removes the handler after its
//!   first delivery.
//! * **Re-entrant**: handlers receive the hub and may bind, unbind or trigger
//!   while a dispatch is in progress.
//! * **Fail loud**: the first handler error stops delivery and is returned by
//!   [`EventHub::trigger`] unchanged.
//!
//! # Example
//!
//! ```rust
//! use herald_events::{EventHub, Handler, HubError};
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicU64, Ordering};
//!
//! #[derive(Debug)]
//! struct Order {
//!     id: u64,
//! }
//!
//! fn main() -> Result<(), HubError> {
//!     let hub = EventHub::<Order>::new();
//!     let last_seen = Arc::new(AtomicU64::new(0));
//!
//!     let seen = Arc::clone(&last_seen);
//!     let audit = Handler::new(move |_, order: Option<&Order>| {
//!         let order = order.ok_or_else(|| HubError::rejected("missing order"))?;
//!         seen.store(order.id, Ordering::SeqCst);
//!         Ok(())
//!     });
//!
//!     // Bound to the parent namespace: sees every `order:*` event.
//!     hub.bind("order", &audit);
//!     hub.trigger("order:created", Some(&Order { id: 42 }))?;
//!     assert_eq!(last_seen.load(Ordering::SeqCst), 42);
//!
//!     hub.unbind("order", &audit);
//!     assert_eq!(hub.trigger("order:created", Some(&Order { id: 43 }))?, 0);
//!     Ok(())
//! }
//! ```

mod error;
mod handler;
mod hub;
mod names;
mod source;

pub use error::{BoxError, HubError, HubErrorExt};
pub use handler::{EventHandler, Handler};
pub use hub::EventHub;
pub use names::{expand_namespaces, split_event_list};
pub use source::EventSource;
