//! State reading — a point-in-time value of a host entity.
//!
//! Readings are supplied by the surrounding host through the `StateLookup`
//! port; the core never owns or mutates them.

use serde::{Deserialize, Serialize};

use crate::id::EntityId;
use crate::time::Timestamp;

/// Sentinel value a host reports for an entity it cannot read.
pub const STATE_UNKNOWN: &str = "unknown";
/// Sentinel value a host reports for an entity that went away.
pub const STATE_UNAVAILABLE: &str = "unavailable";

/// A live value of one entity, with the time it last changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateReading {
    pub entity: EntityId,
    /// Raw state value as reported by the host (always a string).
    pub value: String,
    /// When the value last changed. `None` means the entity has never
    /// reported, which also means the reading is never considered fresh.
    pub last_changed: Option<Timestamp>,
}

impl StateReading {
    /// Create a reading with a known change time.
    #[must_use]
    pub fn new(entity: EntityId, value: impl Into<String>, last_changed: Timestamp) -> Self {
        Self {
            entity,
            value: value.into(),
            last_changed: Some(last_changed),
        }
    }

    /// Whether this reading carries usable data.
    ///
    /// `"unknown"` and `"unavailable"` are host sentinels, not values;
    /// conditions evaluated against them are false.
    #[must_use]
    pub fn has_data(&self) -> bool {
        self.value != STATE_UNKNOWN && self.value != STATE_UNAVAILABLE
    }

    /// Whether the reading changed within `window_s` seconds of `now`.
    ///
    /// The boundary is inclusive: a reading exactly `window_s` seconds old
    /// is still fresh. A reading with no change time never is.
    #[must_use]
    pub fn is_fresh(&self, now: Timestamp, window_s: u32) -> bool {
        self.last_changed
            .is_some_and(|changed| (now - changed).num_seconds() <= i64::from(window_s))
    }
}
