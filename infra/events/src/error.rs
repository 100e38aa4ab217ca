use std::borrow::Cow;
use std::error::Error as StdError;

/// A foreign error raised inside a handler.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Errors that can occur while dispatching an event.
///
/// The hub itself never fails: binding, unbinding and triggering unknown
/// events are all no-ops. Every value of this type originates in a handler
/// and reaches the caller of [`EventHub::trigger`](crate::EventHub::trigger)
/// unchanged.
#[derive(Debug, thiserror::Error)]
pub enum HubError {
    /// A handler refused the event it was given.
    #[error("Event rejected{}: {message}", format_context(.context))]
    Rejected { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A handler failed with an error from another layer.
    #[error("Handler failure{}: {source}", format_context(.context))]
    Handler { source: BoxError, context: Option<Cow<'static, str>> },

    /// Internal logic errors.
    #[error("Internal hub error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl HubError {
    /// Builds a [`HubError::Rejected`] without context.
    #[must_use]
    pub fn rejected(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Rejected { message: message.into(), context: None }
    }

    /// Wraps any error raised inside a handler as [`HubError::Handler`].
    #[must_use]
    pub fn handler(source: impl Into<BoxError>) -> Self {
        Self::Handler { source: source.into(), context: None }
    }
}

impl From<&'static str> for HubError {
    #[inline]
    fn from(s: &'static str) -> Self {
        Self::Internal { message: Cow::Borrowed(s), context: None }
    }
}

impl From<String> for HubError {
    #[inline]
    fn from(s: String) -> Self {
        Self::Internal { message: Cow::Owned(s), context: None }
    }
}

/// Adds `.context(...)` to results carrying a [`HubError`].
pub trait HubErrorExt<T> {
    /// Attaches a human-readable context to the error, replacing any previous one.
    ///
    /// # Errors
    /// Returns the original error with its `context` field set.
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, HubError>;
}

impl<T> HubErrorExt<T> for Result<T, HubError> {
    #[inline]
    fn context(self, context: impl Into<Cow<'static, str>>) -> Self {
        self.map_err(|mut e| {
            match &mut e {
                HubError::Rejected { context: c, .. }
                | HubError::Handler { context: c, .. }
                | HubError::Internal { context: c, .. } => *c = Some(context.into()),
            }
            e
        })
    }
}

#[allow(clippy::ref_option)]
fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}
