//! JSON REST handler for sending notifications.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use notigate_app::ports::{Dispatcher, EventPublisher, StateStore};
use notigate_app::services::notify_service::DeliveryOutcome;
use notigate_domain::id::ServiceId;
use notigate_domain::notification::Notification;

use crate::error::ApiError;
use crate::state::AppState;

/// Response body of the notify endpoint.
#[derive(Serialize)]
pub struct NotifyResponse {
    /// Whether the payload was forwarded anywhere.
    pub delivered: bool,
    /// The service that received it, when delivered.
    pub service: Option<ServiceId>,
}

/// `POST /api/notify`
///
/// Runs the configured selection and forwards the payload. A selection that
/// ends in "no delivery" is a `200` with `delivered: false` — the caller
/// decides whether that is a problem.
pub async fn send<S, D, P>(
    State(state): State<AppState<S, D, P>>,
    Json(notification): Json<Notification>,
) -> Result<Json<NotifyResponse>, ApiError>
where
    S: StateStore + Send + Sync + 'static,
    D: Dispatcher + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let outcome = state.notify_service.send(notification).await?;
    let response = match outcome {
        DeliveryOutcome::Delivered(service) => NotifyResponse {
            delivered: true,
            service: Some(service),
        },
        DeliveryOutcome::NoDelivery => NotifyResponse {
            delivered: false,
            service: None,
        },
    };
    Ok(Json(response))
}
