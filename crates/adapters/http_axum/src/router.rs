//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use notigate_app::ports::{Dispatcher, EventPublisher, StateStore};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests the API routes under `/api` and includes a [`TraceLayer`] that logs
/// each HTTP request/response at the `DEBUG` level using the `tracing`
/// ecosystem.
pub fn build<S, D, P>(state: AppState<S, D, P>) -> Router
where
    S: StateStore + Send + Sync + 'static,
    D: Dispatcher + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tokio::sync::watch;
    use tower::ServiceExt;

    use notigate_app::ports::StateLookup;
    use notigate_app::services::notify_service::NotifyService;
    use notigate_domain::error::NotigateError;
    use notigate_domain::event::Event;
    use notigate_domain::id::{EntityId, ServiceId};
    use notigate_domain::notification::Notification;
    use notigate_domain::routing::{RoutingConfig, RoutingMode};
    use notigate_domain::state::StateReading;
    use notigate_domain::target::Target;
    use notigate_domain::time::now;

    struct StubStore {
        states: Mutex<HashMap<EntityId, StateReading>>,
    }

    impl StateLookup for StubStore {
        fn get(&self, entity: &EntityId) -> Option<StateReading> {
            self.states.lock().unwrap().get(entity).cloned()
        }
    }

    impl StateStore for StubStore {
        async fn set(
            &self,
            entity: EntityId,
            value: String,
        ) -> Result<StateReading, NotigateError> {
            let reading = StateReading::new(entity.clone(), value, now());
            self.states.lock().unwrap().insert(entity, reading.clone());
            Ok(reading)
        }

        fn all(&self) -> Vec<StateReading> {
            self.states.lock().unwrap().values().cloned().collect()
        }
    }

    struct StubDispatcher;

    impl Dispatcher for StubDispatcher {
        async fn dispatch(
            &self,
            _service: &ServiceId,
            _notification: &Notification,
        ) -> Result<(), NotigateError> {
            Ok(())
        }
    }

    struct StubPublisher;

    impl EventPublisher for StubPublisher {
        async fn publish(&self, _event: Event) -> Result<(), NotigateError> {
            Ok(())
        }
    }

    fn test_state() -> AppState<StubStore, StubDispatcher, StubPublisher> {
        let store = Arc::new(StubStore {
            states: Mutex::new(HashMap::new()),
        });
        let mode = RoutingMode::Conditional(RoutingConfig {
            targets: vec![Target::unconditional(ServiceId::new("notify.desktop"))],
            priority: vec![ServiceId::new("notify.desktop")],
            fallback: None,
        });
        let notify_service = Arc::new(NotifyService::new(
            mode,
            Arc::clone(&store),
            StubDispatcher,
            StubPublisher,
        ));
        let (_tx, route_rx) = watch::channel(Some(ServiceId::new("notify.desktop")));
        AppState::new(store, notify_service, route_rx)
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let app = build(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_state() {
        let app = build(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/states/sensor.ghost")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_set_and_get_state_reading() {
        let app = build(test_state());

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/api/states/sensor.battery")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"value": "42"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/states/sensor.battery")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let reading: StateReading = serde_json::from_slice(&body).unwrap();
        assert_eq!(reading.value, "42");
    }

    #[tokio::test]
    async fn should_report_delivery_through_notify_endpoint() {
        let app = build(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/notify")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"message": "doorbell"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["delivered"], true);
        assert_eq!(json["service"], "notify.desktop");
    }

    #[tokio::test]
    async fn should_reject_empty_message_with_bad_request() {
        let app = build(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/notify")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"message": ""}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_expose_current_route() {
        let app = build(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/route")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["service"], "notify.desktop");
    }
}
