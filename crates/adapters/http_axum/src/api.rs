//! JSON REST API route assembly.

use axum::Router;
use axum::routing::{get, post};

use notigate_app::ports::{Dispatcher, EventPublisher, StateStore};

use crate::state::AppState;

pub mod notify;
pub mod route;
pub mod states;

/// Build the `/api` subtree.
pub fn routes<S, D, P>() -> Router<AppState<S, D, P>>
where
    S: StateStore + Send + Sync + 'static,
    D: Dispatcher + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    Router::new()
        .route("/states", get(states::list))
        .route("/states/{entity}", get(states::get).put(states::set))
        .route("/notify", post(notify::send))
        .route("/route", get(route::current))
}
