//! JSON REST handlers for state readings.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use notigate_app::ports::{Dispatcher, EventPublisher, StateLookup, StateStore};
use notigate_domain::id::EntityId;
use notigate_domain::state::StateReading;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for updating a state reading.
#[derive(Deserialize)]
pub struct SetStateRequest {
    pub value: String,
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<StateReading>),
    NotFound,
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
            Self::NotFound => StatusCode::NOT_FOUND.into_response(),
        }
    }
}

/// `GET /api/states`
pub async fn list<S, D, P>(State(state): State<AppState<S, D, P>>) -> Json<Vec<StateReading>>
where
    S: StateStore + Send + Sync + 'static,
    D: Dispatcher + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    Json(state.store.all())
}

/// `GET /api/states/{entity}`
pub async fn get<S, D, P>(
    State(state): State<AppState<S, D, P>>,
    Path(entity): Path<String>,
) -> GetResponse
where
    S: StateStore + Send + Sync + 'static,
    D: Dispatcher + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    match state.store.get(&EntityId::new(entity)) {
        Some(reading) => GetResponse::Ok(Json(reading)),
        None => GetResponse::NotFound,
    }
}

/// `PUT /api/states/{entity}`
pub async fn set<S, D, P>(
    State(state): State<AppState<S, D, P>>,
    Path(entity): Path<String>,
    Json(body): Json<SetStateRequest>,
) -> Result<Json<StateReading>, ApiError>
where
    S: StateStore + Send + Sync + 'static,
    D: Dispatcher + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let reading = state.store.set(EntityId::new(entity), body.value).await?;
    Ok(Json(reading))
}
