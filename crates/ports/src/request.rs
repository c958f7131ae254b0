//! Request framework middleware protocol.
//!
//! The operation wrapper adapts to a host framework through these three
//! traits: the request carries request-scoped metadata, the response reports
//! whether it was already sent, and `next` continues (or fails) the chain.

use autolog_shared::Fields;

/// Request side of the middleware protocol.
pub trait OperationRequest {
    /// Request-scoped metadata set by upstream middleware, if any.
    fn meta(&self) -> Option<&Fields>;

    /// Replace the request-scoped metadata.
    fn set_meta(&mut self, meta: Fields);

    /// Header lookup; hosts without header access keep the default.
    fn header(&self, _name: &str) -> Option<&str> {
        None
    }
}

/// Response side of the middleware protocol.
pub trait OperationResponse {
    /// Whether the handler already sent the response.
    fn is_sent(&self) -> bool;
}

/// Continuation of the middleware chain.
///
/// `None` continues normally; `Some(error)` hands the error to the host's
/// error-handling chain.
pub trait Next<E> {
    /// Continue the chain.
    fn proceed(self, error: Option<E>);
}

impl<E, F> Next<E> for F
where
    F: FnOnce(Option<E>),
{
    fn proceed(self, error: Option<E>) {
        self(error);
    }
}
