//! Dispatcher port — forwards a notification to a downstream service.

use std::future::Future;
use std::sync::Arc;

use notigate_domain::error::NotigateError;
use notigate_domain::id::ServiceId;
use notigate_domain::notification::Notification;

/// Delivers a notification payload to a named downstream service.
///
/// Implementations forward the payload verbatim; they own transport details
/// (URLs, connections) but no routing decisions. Retry, timeout, and queuing
/// policies belong to implementations, not callers — the dispatch layer only
/// awaits the call.
pub trait Dispatcher {
    /// Forward `notification` to `service`.
    fn dispatch(
        &self,
        service: &ServiceId,
        notification: &Notification,
    ) -> impl Future<Output = Result<(), NotigateError>> + Send;
}

impl<T: Dispatcher + Send + Sync> Dispatcher for Arc<T> {
    fn dispatch(
        &self,
        service: &ServiceId,
        notification: &Notification,
    ) -> impl Future<Output = Result<(), NotigateError>> + Send {
        (**self).dispatch(service, notification)
    }
}
