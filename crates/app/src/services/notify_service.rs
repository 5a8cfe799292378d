//! Notify service — the dispatch layer above the selection engines.
//!
//! Runs whichever engine the routing mode configures, forwards the payload
//! verbatim to the selected service, and publishes a `notification_routed`
//! event. Selection never fails; only downstream delivery can.

use notigate_domain::error::NotigateError;
use notigate_domain::event::{Event, EventType};
use notigate_domain::id::ServiceId;
use notigate_domain::notification::Notification;
use notigate_domain::routing::RoutingMode;
use notigate_domain::time::now;

use crate::engine::{select_target, select_target_smart};
use crate::ports::{Dispatcher, EventPublisher, StateLookup};

/// What happened to a submitted notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The payload was forwarded to this service.
    Delivered(ServiceId),
    /// No target matched and no fallback was configured. Not an error:
    /// the caller decides whether to surface or drop it.
    NoDelivery,
}

/// Application service routing notifications to delivery targets.
pub struct NotifyService<S, D, P> {
    mode: RoutingMode,
    lookup: S,
    dispatcher: D,
    publisher: P,
}

impl<S, D, P> NotifyService<S, D, P>
where
    S: StateLookup,
    D: Dispatcher,
    P: EventPublisher,
{
    /// Create a new service for an immutable routing mode.
    pub fn new(mode: RoutingMode, lookup: S, dispatcher: D, publisher: P) -> Self {
        Self {
            mode,
            lookup,
            dispatcher,
            publisher,
        }
    }

    /// The routing mode this service was configured with.
    #[must_use]
    pub fn mode(&self) -> &RoutingMode {
        &self.mode
    }

    /// Run the configured engine against the current state.
    #[must_use]
    pub fn select(&self) -> Option<ServiceId> {
        match &self.mode {
            RoutingMode::Conditional(config) => select_target(config, &self.lookup),
            RoutingMode::Smart(params) => select_target_smart(params, &self.lookup, now()),
        }
    }

    /// Select a target and forward `notification` to it.
    ///
    /// The downstream call is awaited before the send is considered
    /// complete. When nothing is selected the notification is dropped with
    /// a warning and [`DeliveryOutcome::NoDelivery`] is returned.
    ///
    /// # Errors
    ///
    /// Returns [`NotigateError::Validation`] for an empty message and
    /// [`NotigateError::Dispatch`] when the downstream delivery fails.
    pub async fn send(&self, notification: Notification) -> Result<DeliveryOutcome, NotigateError> {
        notification.validate()?;

        let Some(service) = self.select() else {
            tracing::warn!("no target matched and no fallback configured, dropping notification");
            return Ok(DeliveryOutcome::NoDelivery);
        };

        self.dispatcher.dispatch(&service, &notification).await?;
        tracing::info!(%service, "notification delivered");

        // Publish NotificationRouted event (fire-and-forget)
        let routed = Event::new(
            EventType::NotificationRouted,
            None,
            serde_json::json!({
                "service": service,
                "title": notification.title,
            }),
        );
        let _ = self.publisher.publish(routed).await;

        Ok(DeliveryOutcome::Delivered(service))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::future::Future;
    use std::sync::Mutex;

    use notigate_domain::condition::{CompareOp, Condition, ConditionValue};
    use notigate_domain::error::{DispatchError, ValidationError};
    use notigate_domain::id::EntityId;
    use notigate_domain::routing::RoutingConfig;
    use notigate_domain::state::StateReading;
    use notigate_domain::target::{MatchMode, Target};

    // ── Spy dispatcher ─────────────────────────────────────────────

    #[derive(Default)]
    struct SpyDispatcher {
        calls: Mutex<Vec<(ServiceId, Notification)>>,
        fail: bool,
    }

    impl Dispatcher for SpyDispatcher {
        fn dispatch(
            &self,
            service: &ServiceId,
            notification: &Notification,
        ) -> impl Future<Output = Result<(), NotigateError>> + Send {
            let result = if self.fail {
                Err(NotigateError::Dispatch(DispatchError {
                    service: service.to_string(),
                    reason: "boom".to_string(),
                }))
            } else {
                self.calls
                    .lock()
                    .unwrap()
                    .push((service.clone(), notification.clone()));
                Ok(())
            };
            async { result }
        }
    }

    // ── Spy publisher ──────────────────────────────────────────────

    #[derive(Default)]
    struct SpyPublisher {
        events: Mutex<Vec<Event>>,
    }

    impl EventPublisher for SpyPublisher {
        fn publish(&self, event: Event) -> impl Future<Output = Result<(), NotigateError>> + Send {
            self.events.lock().unwrap().push(event);
            async { Ok(()) }
        }
    }

    // ── Helpers ────────────────────────────────────────────────────

    fn states(pairs: &[(&str, &str)]) -> HashMap<EntityId, StateReading> {
        pairs
            .iter()
            .map(|(entity, value)| {
                let id = EntityId::new(*entity);
                (id.clone(), StateReading::new(id, *value, notigate_domain::time::now()))
            })
            .collect()
    }

    fn conditional_mode(fallback: Option<&str>) -> RoutingMode {
        RoutingMode::Conditional(RoutingConfig {
            targets: vec![Target {
                service: ServiceId::new("notify.pixel"),
                conditions: vec![Condition {
                    entity: EntityId::new("sensor.battery"),
                    operator: CompareOp::Gt,
                    value: ConditionValue::Number(20.0),
                }],
                match_mode: MatchMode::All,
            }],
            priority: vec![ServiceId::new("notify.pixel")],
            fallback: fallback.map(ServiceId::new),
        })
    }

    fn service(
        mode: RoutingMode,
        states: HashMap<EntityId, StateReading>,
        fail: bool,
    ) -> NotifyService<HashMap<EntityId, StateReading>, SpyDispatcher, SpyPublisher> {
        NotifyService::new(
            mode,
            states,
            SpyDispatcher {
                fail,
                ..SpyDispatcher::default()
            },
            SpyPublisher::default(),
        )
    }

    // ── Tests ──────────────────────────────────────────────────────

    #[tokio::test]
    async fn should_deliver_to_matching_target() {
        let svc = service(
            conditional_mode(Some("notify.default")),
            states(&[("sensor.battery", "42")]),
            false,
        );

        let outcome = svc.send(Notification::new("doorbell")).await.unwrap();
        assert_eq!(outcome, DeliveryOutcome::Delivered(ServiceId::new("notify.pixel")));

        let calls = svc.dispatcher.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, ServiceId::new("notify.pixel"));
    }

    #[tokio::test]
    async fn should_deliver_to_fallback_when_no_target_matches() {
        let svc = service(
            conditional_mode(Some("notify.default")),
            states(&[("sensor.battery", "10")]),
            false,
        );

        let outcome = svc.send(Notification::new("doorbell")).await.unwrap();
        assert_eq!(outcome, DeliveryOutcome::Delivered(ServiceId::new("notify.default")));
    }

    #[tokio::test]
    async fn should_report_no_delivery_when_no_fallback_configured() {
        let svc = service(conditional_mode(None), states(&[("sensor.battery", "10")]), false);

        let outcome = svc.send(Notification::new("doorbell")).await.unwrap();
        assert_eq!(outcome, DeliveryOutcome::NoDelivery);
        assert!(svc.dispatcher.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_reject_empty_message_before_selecting() {
        let svc = service(conditional_mode(None), states(&[]), false);

        let result = svc.send(Notification::new("")).await;
        assert!(matches!(
            result,
            Err(NotigateError::Validation(ValidationError::EmptyMessage))
        ));
    }

    #[tokio::test]
    async fn should_propagate_dispatch_failure() {
        let svc = service(
            conditional_mode(Some("notify.default")),
            states(&[("sensor.battery", "42")]),
            true,
        );

        let result = svc.send(Notification::new("doorbell")).await;
        assert!(matches!(result, Err(NotigateError::Dispatch(_))));
    }

    #[tokio::test]
    async fn should_pass_nested_data_through_unmodified() {
        let svc = service(
            conditional_mode(Some("notify.default")),
            states(&[("sensor.battery", "42")]),
            false,
        );

        let notification = Notification {
            message: "doorbell".to_string(),
            title: Some("Front door".to_string()),
            data: Some(serde_json::json!({"actions": [{"action": "open"}]})),
        };
        svc.send(notification.clone()).await.unwrap();

        let calls = svc.dispatcher.calls.lock().unwrap();
        assert_eq!(calls[0].1, notification);
    }

    #[tokio::test]
    async fn should_publish_routed_event_after_delivery() {
        let svc = service(
            conditional_mode(Some("notify.default")),
            states(&[("sensor.battery", "42")]),
            false,
        );

        svc.send(Notification::new("doorbell")).await.unwrap();

        let events = svc.publisher.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, EventType::NotificationRouted);
        assert_eq!(events[0].data["service"], "notify.pixel");
    }

    #[tokio::test]
    async fn should_not_publish_event_when_nothing_delivered() {
        let svc = service(conditional_mode(None), states(&[]), false);

        svc.send(Notification::new("doorbell")).await.unwrap();
        assert!(svc.publisher.events.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_select_through_smart_mode() {
        let mode = RoutingMode::Smart(notigate_domain::smart::SmartParams {
            pc_notify_target: Some(ServiceId::new("notify.desktop")),
            pc_session_sensor: Some(EntityId::new("sensor.workstation_session")),
            ..notigate_domain::smart::SmartParams::default()
        });
        let svc = service(mode, states(&[("sensor.workstation_session", "Unlocked")]), false);

        assert_eq!(svc.select(), Some(ServiceId::new("notify.desktop")));
    }
}
