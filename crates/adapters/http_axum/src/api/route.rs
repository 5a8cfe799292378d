//! JSON REST handler for inspecting the current route.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use notigate_app::ports::{Dispatcher, EventPublisher, StateStore};
use notigate_domain::id::ServiceId;

use crate::state::AppState;

/// Response body of the route endpoint.
#[derive(Serialize)]
pub struct RouteResponse {
    /// Target the configured selection currently picks, if any.
    pub service: Option<ServiceId>,
}

/// `GET /api/route`
///
/// Reads the route tracker's cached selection; it is refreshed on every
/// state change, so this never re-runs the engines on the request path.
pub async fn current<S, D, P>(State(state): State<AppState<S, D, P>>) -> Json<RouteResponse>
where
    S: StateStore + Send + Sync + 'static,
    D: Dispatcher + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let service = state.route_rx.borrow().clone();
    Json(RouteResponse { service })
}
