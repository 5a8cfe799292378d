//! Event — an immutable record of something that happened.
//!
//! Events are produced when a state reading changes or a notification is
//! routed, and carried by the in-process event bus.

use serde::{Deserialize, Serialize};

use crate::id::{EntityId, EventId};
use crate::time::{Timestamp, now};

/// Kind of a domain event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// A state reading's value changed.
    StateChanged,
    /// A notification was forwarded to a selected target.
    NotificationRouted,
}

/// A domain event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub event_type: EventType,
    /// Entity the event concerns, if any.
    pub entity: Option<EntityId>,
    /// Free-form event payload.
    pub data: serde_json::Value,
    pub timestamp: Timestamp,
}

impl Event {
    /// Create an event stamped with the current time.
    #[must_use]
    pub fn new(event_type: EventType, entity: Option<EntityId>, data: serde_json::Value) -> Self {
        Self {
            id: EventId::new(),
            event_type,
            entity,
            data,
            timestamp: now(),
        }
    }
}
