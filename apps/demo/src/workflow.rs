//! Order workflow wired through an embedded [`EventHub`].
//!
//! Every order is announced as `<ns>:created` and then `<ns>:paid`; paying
//! fulfils the order by triggering `<ns>:shipped` from inside the handler.
//! Listeners:
//!
//! | binding                 | kind     | effect                                  |
//! |-------------------------|----------|-----------------------------------------|
//! | `<ns>`                  | bind     | audits every workflow event             |
//! | `<ns>:created`          | bind     | rejects orders below the minimum amount |
//! | `<ns>:created`          | once     | welcomes the first accepted order       |
//! | `<ns>:paid <ns>:shipped`| bind     | sends a customer notification           |
//! | `<ns>:paid`             | bind     | ships the order (nested trigger)        |
//! | `<ns>:shipped`          | bind     | counts shipments                        |

use crate::config::WorkflowConfig;
use herald_events::{EventHub, EventSource, Handler, HubError, HubErrorExt};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, warn};

/// A purchase moving through the desk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order {
    pub id: u64,
    pub amount: u64,
}

impl Order {
    /// Deterministic sample order: amounts cycle through 40, 80 and 0.
    #[must_use]
    pub const fn sample(id: u64) -> Self {
        Self { id, amount: (id % 3) * 40 }
    }
}

/// Counters collected over a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkflowReport {
    pub processed: u64,
    pub rejected: u64,
    pub audited: u64,
    pub welcomed: u64,
    pub notified: u64,
    pub shipped: u64,
}

#[derive(Debug, Default)]
struct Stats {
    audited: AtomicU64,
    welcomed: AtomicU64,
    notified: AtomicU64,
    shipped: AtomicU64,
}

/// Domain object carrying its own event hub.
#[derive(Debug)]
pub struct OrderDesk {
    events: EventHub<Order>,
    namespace: String,
    stats: Arc<Stats>,
}

impl EventSource<Order> for OrderDesk {
    fn event_hub(&self) -> &EventHub<Order> {
        &self.events
    }
}

impl OrderDesk {
    /// Creates a desk with the standard listeners bound under `config.namespace`.
    #[must_use]
    pub fn new(config: &WorkflowConfig) -> Self {
        let desk = Self {
            events: EventHub::new(),
            namespace: config.namespace.clone(),
            stats: Arc::new(Stats::default()),
        };
        desk.wire(config.min_amount);
        desk
    }

    /// Full name of `stage` under the desk namespace.
    #[must_use]
    pub fn event(&self, stage: &str) -> String {
        format!("{}:{stage}", self.namespace)
    }

    fn wire(&self, min_amount: u64) {
        let stats = Arc::clone(&self.stats);
        self.bind(
            &self.namespace,
            &Handler::new(move |_, order: Option<&Order>| {
                stats.audited.fetch_add(1, Ordering::Relaxed);
                debug!(order = ?order.map(|o| o.id), "Audit entry");
                Ok(())
            }),
        );

        self.bind(
            &self.event("created"),
            &Handler::new(move |_, order: Option<&Order>| match order {
                Some(order) if order.amount < min_amount => Err(HubError::rejected(format!(
                    "order {} amount {} is below the minimum of {min_amount}",
                    order.id, order.amount
                ))),
                Some(_) => Ok(()),
                None => Err(HubError::rejected("order payload is missing")),
            }),
        );

        let stats = Arc::clone(&self.stats);
        self.once(
            &self.event("created"),
            &Handler::new(move |_, order: Option<&Order>| {
                stats.welcomed.fetch_add(1, Ordering::Relaxed);
                info!(order = ?order.map(|o| o.id), "First order accepted");
                Ok(())
            }),
        );

        let stats = Arc::clone(&self.stats);
        let notify = format!("{} {}", self.event("paid"), self.event("shipped"));
        self.bind(
            &notify,
            &Handler::new(move |_, order: Option<&Order>| {
                stats.notified.fetch_add(1, Ordering::Relaxed);
                debug!(order = ?order.map(|o| o.id), "Customer notified");
                Ok(())
            }),
        );

        let shipped = self.event("shipped");
        self.bind(
            &self.event("paid"),
            &Handler::new(move |hub: &EventHub<Order>, order| {
                hub.trigger(&shipped, order).context("fulfilment")?;
                Ok(())
            }),
        );

        let stats = Arc::clone(&self.stats);
        self.bind(
            &self.event("shipped"),
            &Handler::new(move |_, _| {
                stats.shipped.fetch_add(1, Ordering::Relaxed);
                Ok(())
            }),
        );
    }

    /// Runs one order through creation and payment.
    ///
    /// # Errors
    /// Returns the first [`HubError`] raised by a listener; later stages of
    /// that order are not announced.
    pub fn place(&self, order: &Order) -> Result<(), HubError> {
        self.trigger(&self.event("created"), Some(order))?;
        self.trigger(&self.event("paid"), Some(order))?;
        Ok(())
    }

    /// Snapshot of the listener counters. `processed` and `rejected` are
    /// tracked by [`run`].
    #[must_use]
    pub fn report(&self) -> WorkflowReport {
        WorkflowReport {
            audited: self.stats.audited.load(Ordering::Relaxed),
            welcomed: self.stats.welcomed.load(Ordering::Relaxed),
            notified: self.stats.notified.load(Ordering::Relaxed),
            shipped: self.stats.shipped.load(Ordering::Relaxed),
            ..WorkflowReport::default()
        }
    }
}

/// Places `config.orders` sample orders on a fresh desk.
///
/// Rejected orders are logged and counted; they do not abort the run.
#[must_use]
pub fn run(config: &WorkflowConfig) -> WorkflowReport {
    let desk = OrderDesk::new(config);
    let mut processed = 0;
    let mut rejected = 0;

    for id in 1..=config.orders {
        let order = Order::sample(id);
        match desk.place(&order) {
            Ok(()) => processed += 1,
            Err(err) => {
                warn!(order = order.id, %err, "Order rejected");
                rejected += 1;
            },
        }
    }

    WorkflowReport { processed, rejected, ..desk.report() }
}
