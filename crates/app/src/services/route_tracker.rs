//! Route tracker — a read model of the currently-selected target.
//!
//! The selection engines are pure, so "the current route" is not state the
//! core holds; this tracker is the external read-only consumer that re-runs
//! the same evaluation whenever a state reading changes and caches the
//! result in a watch channel for display surfaces (API, sensors).

use tokio::sync::{broadcast, watch};

use notigate_domain::event::{Event, EventType};
use notigate_domain::id::ServiceId;
use notigate_domain::routing::RoutingMode;
use notigate_domain::time::now;

use crate::engine::{select_target, select_target_smart};
use crate::ports::StateLookup;

/// Re-evaluates the configured selection on every state change.
pub struct RouteTracker<S> {
    mode: RoutingMode,
    lookup: S,
    tx: watch::Sender<Option<ServiceId>>,
}

impl<S: StateLookup> RouteTracker<S> {
    /// Create a tracker and compute the initial selection.
    #[must_use]
    pub fn new(mode: RoutingMode, lookup: S) -> Self {
        let initial = evaluate(&mode, &lookup);
        let (tx, _) = watch::channel(initial);
        Self { mode, lookup, tx }
    }

    /// Subscribe to the current selection.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<ServiceId>> {
        self.tx.subscribe()
    }

    /// Re-run the selection and update subscribers if it changed.
    pub fn refresh(&self) {
        let selected = evaluate(&self.mode, &self.lookup);
        self.tx.send_if_modified(|current| {
            if *current == selected {
                false
            } else {
                tracing::debug!(route = ?selected, "current route changed");
                *current = selected;
                true
            }
        });
    }

    /// Consume bus events until the bus closes, refreshing on each state
    /// change. A lagged receiver only means missed intermediate values;
    /// the next refresh reads live state, so no staleness accumulates.
    pub async fn run(&self, mut events: broadcast::Receiver<Event>) {
        loop {
            match events.recv().await {
                Ok(event) => {
                    if event.event_type == EventType::StateChanged {
                        self.refresh();
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "route tracker lagged behind the event bus");
                    self.refresh();
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    }
}

fn evaluate(mode: &RoutingMode, lookup: &impl StateLookup) -> Option<ServiceId> {
    match mode {
        RoutingMode::Conditional(config) => select_target(config, lookup),
        RoutingMode::Smart(params) => select_target_smart(params, lookup, now()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, RwLock};

    use notigate_domain::condition::{CompareOp, Condition, ConditionValue};
    use notigate_domain::id::EntityId;
    use notigate_domain::routing::RoutingConfig;
    use notigate_domain::state::StateReading;
    use notigate_domain::target::{MatchMode, Target};
    use notigate_domain::time::now as ts_now;

    /// Mutable lookup so tests can flip state between refreshes.
    #[derive(Clone, Default)]
    struct SharedStates(Arc<RwLock<HashMap<EntityId, StateReading>>>);

    impl SharedStates {
        fn set(&self, entity: &str, value: &str) {
            let id = EntityId::new(entity);
            self.0
                .write()
                .unwrap()
                .insert(id.clone(), StateReading::new(id, value, ts_now()));
        }
    }

    impl StateLookup for SharedStates {
        fn get(&self, entity: &EntityId) -> Option<StateReading> {
            self.0.read().unwrap().get(entity).cloned()
        }
    }

    fn mode() -> RoutingMode {
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
            fallback: Some(ServiceId::new("notify.default")),
        })
    }

    #[test]
    fn should_compute_initial_selection_on_construction() {
        let states = SharedStates::default();
        states.set("sensor.battery", "42");

        let tracker = RouteTracker::new(mode(), states);
        assert_eq!(*tracker.subscribe().borrow(), Some(ServiceId::new("notify.pixel")));
    }

    #[test]
    fn should_update_selection_on_refresh_when_state_flips() {
        let states = SharedStates::default();
        states.set("sensor.battery", "42");
        let tracker = RouteTracker::new(mode(), states.clone());
        let rx = tracker.subscribe();

        states.set("sensor.battery", "10");
        tracker.refresh();

        assert_eq!(*rx.borrow(), Some(ServiceId::new("notify.default")));
    }

    #[test]
    fn should_not_notify_subscribers_when_selection_unchanged() {
        let states = SharedStates::default();
        states.set("sensor.battery", "42");
        let tracker = RouteTracker::new(mode(), states.clone());
        let mut rx = tracker.subscribe();
        rx.mark_unchanged();

        states.set("sensor.battery", "43");
        tracker.refresh();

        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn should_refresh_on_state_changed_event() {
        use crate::event_bus::InProcessEventBus;
        use crate::ports::EventPublisher;

        let states = SharedStates::default();
        states.set("sensor.battery", "42");
        let tracker = Arc::new(RouteTracker::new(mode(), states.clone()));
        let mut rx = tracker.subscribe();

        let bus = InProcessEventBus::new(16);
        let events = bus.subscribe();
        let worker = {
            let tracker = Arc::clone(&tracker);
            tokio::spawn(async move { tracker.run(events).await })
        };

        states.set("sensor.battery", "10");
        bus.publish(Event::new(
            EventType::StateChanged,
            Some(EntityId::new("sensor.battery")),
            serde_json::json!({"from": "42", "to": "10"}),
        ))
        .await
        .unwrap();

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), Some(ServiceId::new("notify.default")));

        drop(bus);
        worker.await.unwrap();
    }
}
