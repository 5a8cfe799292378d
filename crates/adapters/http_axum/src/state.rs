//! Shared application state for axum handlers.

use std::sync::Arc;

use tokio::sync::watch;

use notigate_app::ports::{Dispatcher, EventPublisher, StateStore};
use notigate_app::services::notify_service::NotifyService;
use notigate_domain::id::ServiceId;

/// Application state shared across all axum handlers.
///
/// Generic over the state store, dispatcher, and event publisher to avoid
/// dynamic dispatch. `Clone` is implemented manually so the underlying types
/// themselves do not need to be `Clone` — only the `Arc` wrappers (and the
/// watch receiver) are cloned.
pub struct AppState<S, D, P> {
    /// Live state readings (read and written by the API).
    pub store: Arc<S>,
    /// Selection + dispatch service.
    pub notify_service: Arc<NotifyService<Arc<S>, D, P>>,
    /// Current selection maintained by the route tracker.
    pub route_rx: watch::Receiver<Option<ServiceId>>,
}

impl<S, D, P> Clone for AppState<S, D, P> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            notify_service: Arc::clone(&self.notify_service),
            route_rx: self.route_rx.clone(),
        }
    }
}

impl<S, D, P> AppState<S, D, P>
where
    S: StateStore + Send + Sync + 'static,
    D: Dispatcher + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    /// Create a new application state from pre-wrapped `Arc`s.
    ///
    /// The store and notify service are shared with background tasks (route
    /// tracker), so callers wrap them before constructing the HTTP state.
    pub fn new(
        store: Arc<S>,
        notify_service: Arc<NotifyService<Arc<S>, D, P>>,
        route_rx: watch::Receiver<Option<ServiceId>>,
    ) -> Self {
        Self {
            store,
            notify_service,
            route_rx,
        }
    }
}
