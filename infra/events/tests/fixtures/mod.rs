use herald_events::{EventHub, Handler, HubError};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestEvent(pub u64);

/// Records handler invocations in the order they happen.
#[derive(Clone, Debug, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A handler that records `label` on every call.
    #[must_use]
    pub fn handler(&self, label: &str) -> Handler<TestEvent> {
        let journal = self.clone();
        let label = label.to_owned();
        Handler::new(move |_, _| {
            journal.record(&label);
            Ok(())
        })
    }

    /// A handler that records the payload it receives (`id=<n>` or `none`).
    #[must_use]
    pub fn payload_handler(&self) -> Handler<TestEvent> {
        let journal = self.clone();
        Handler::new(move |_, event: Option<&TestEvent>| {
            journal.record(&event.map_or_else(|| "none".to_owned(), |e| format!("id={}", e.0)));
            Ok(())
        })
    }

    /// A handler that records `label`, then fails with [`HubError::Rejected`].
    #[must_use]
    pub fn failing_handler(&self, label: &str) -> Handler<TestEvent> {
        let journal = self.clone();
        let label = label.to_owned();
        Handler::new(move |_, _| {
            journal.record(&label);
            Err(HubError::rejected(format!("{label} refused the event")))
        })
    }

    pub fn record(&self, label: &str) {
        self.0.lock().push(label.to_owned());
    }

    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.0.lock().clone()
    }
}

#[must_use]
pub fn hub() -> EventHub<TestEvent> {
    EventHub::new()
}
