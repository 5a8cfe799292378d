//! Event bus port — publish/subscribe for domain events.

use std::future::Future;

use notigate_domain::error::NotigateError;
use notigate_domain::event::Event;

/// Publishes domain events to interested subscribers.
pub trait EventPublisher {
    /// Publish an event to all current subscribers.
    fn publish(&self, event: Event) -> impl Future<Output = Result<(), NotigateError>> + Send;
}

impl<T: EventPublisher + Send + Sync> EventPublisher for std::sync::Arc<T> {
    fn publish(&self, event: Event) -> impl Future<Output = Result<(), NotigateError>> + Send {
        (**self).publish(event)
    }
}
