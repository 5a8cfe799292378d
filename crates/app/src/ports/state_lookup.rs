//! State ports — read access to live readings, and the writable store.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use notigate_domain::error::NotigateError;
use notigate_domain::id::EntityId;
use notigate_domain::state::StateReading;

/// Read-only access to the host's live state.
///
/// The lookup is synchronous and must never block on network IO: the engines
/// perform point-in-time reads from inside an otherwise pure evaluation.
/// Unknown entities return `None`.
pub trait StateLookup {
    /// Current reading for `entity`, if the host knows it.
    fn get(&self, entity: &EntityId) -> Option<StateReading>;
}

impl<T: StateLookup> StateLookup for Arc<T> {
    fn get(&self, entity: &EntityId) -> Option<StateReading> {
        (**self).get(entity)
    }
}

impl<T: StateLookup> StateLookup for &T {
    fn get(&self, entity: &EntityId) -> Option<StateReading> {
        (**self).get(entity)
    }
}

/// A plain map works as a lookup, for tests and embedded callers.
impl StateLookup for HashMap<EntityId, StateReading> {
    fn get(&self, entity: &EntityId) -> Option<StateReading> {
        HashMap::get(self, entity).cloned()
    }
}

/// A state store that can also be written to.
///
/// Writes are async because implementations publish a `state_changed` event
/// after updating.
pub trait StateStore: StateLookup {
    /// Upsert the reading for `entity`, returning what was stored.
    fn set(
        &self,
        entity: EntityId,
        value: String,
    ) -> impl Future<Output = Result<StateReading, NotigateError>> + Send;

    /// Snapshot of all current readings.
    fn all(&self) -> Vec<StateReading>;
}

impl<T: StateStore + Send + Sync> StateStore for Arc<T> {
    fn set(
        &self,
        entity: EntityId,
        value: String,
    ) -> impl Future<Output = Result<StateReading, NotigateError>> + Send {
        (**self).set(entity, value)
    }

    fn all(&self) -> Vec<StateReading> {
        (**self).all()
    }
}
