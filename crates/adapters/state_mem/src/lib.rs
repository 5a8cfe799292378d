//! # notigate-adapter-state-mem
//!
//! In-memory state store. The host (HTTP API, companion pollers, tests)
//! feeds readings in; the selection engines read them through the
//! [`StateLookup`] port.
//!
//! Readings keep host-store semantics: `last_changed` moves only when the
//! value actually changes, so freshness windows measure real activity and
//! not write traffic.

use std::collections::HashMap;
use std::sync::RwLock;

use notigate_app::ports::{EventPublisher, StateLookup, StateStore};
use notigate_domain::error::NotigateError;
use notigate_domain::event::{Event, EventType};
use notigate_domain::id::EntityId;
use notigate_domain::state::StateReading;
use notigate_domain::time::now;

/// Thread-safe in-memory store of the latest reading per entity.
pub struct InMemoryStateStore<P> {
    states: RwLock<HashMap<EntityId, StateReading>>,
    publisher: P,
}

impl<P: EventPublisher + Send + Sync> InMemoryStateStore<P> {
    /// Create an empty store.
    pub fn new(publisher: P) -> Self {
        Self {
            states: RwLock::new(HashMap::new()),
            publisher,
        }
    }

    /// Create a store pre-populated with readings (tests, demos).
    pub fn seeded(publisher: P, readings: impl IntoIterator<Item = StateReading>) -> Self {
        let map = readings
            .into_iter()
            .map(|reading| (reading.entity.clone(), reading))
            .collect();
        Self {
            states: RwLock::new(map),
            publisher,
        }
    }
}

impl<P> StateLookup for InMemoryStateStore<P> {
    fn get(&self, entity: &EntityId) -> Option<StateReading> {
        self.states.read().expect("state lock poisoned").get(entity).cloned()
    }
}

impl<P: EventPublisher + Send + Sync> StateStore for InMemoryStateStore<P> {
    async fn set(&self, entity: EntityId, value: String) -> Result<StateReading, NotigateError> {
        let (stored, previous) = {
            let mut states = self.states.write().expect("state lock poisoned");
            let previous = states.get(&entity).map(|r| r.value.clone());
            let changed = previous.as_deref() != Some(value.as_str());
            let last_changed = if changed {
                Some(now())
            } else {
                states.get(&entity).and_then(|r| r.last_changed)
            };
            let reading = StateReading {
                entity: entity.clone(),
                value,
                last_changed,
            };
            states.insert(entity.clone(), reading.clone());
            (reading, previous)
        };

        if previous.as_deref() != Some(stored.value.as_str()) {
            let event = Event::new(
                EventType::StateChanged,
                Some(entity),
                serde_json::json!({
                    "from": previous,
                    "to": stored.value,
                }),
            );
            self.publisher.publish(event).await?;
        }

        Ok(stored)
    }

    fn all(&self) -> Vec<StateReading> {
        let mut readings: Vec<_> = self
            .states
            .read()
            .expect("state lock poisoned")
            .values()
            .cloned()
            .collect();
        readings.sort_by(|a, b| a.entity.cmp(&b.entity));
        readings
    }
}
