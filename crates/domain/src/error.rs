//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts via `#[from]`.
//! Selection itself never errors (every failure inside the engines degrades
//! to a non-match); the variants here cover configuration validation and
//! downstream delivery.

/// Top-level error for the notigate core.
#[derive(Debug, thiserror::Error)]
pub enum NotigateError {
    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// Forwarding a notification to its target failed.
    #[error("dispatch error")]
    Dispatch(#[from] DispatchError),
}

/// Violations of domain invariants, raised at configuration time.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A notification was submitted with an empty message.
    #[error("notification message must not be empty")]
    EmptyMessage,

    /// Two targets in one configuration share a service identifier.
    #[error("duplicate target service `{service}`")]
    DuplicateTarget { service: String },

    /// A priority entry references a service with no configured target.
    #[error("priority entry `{service}` does not reference a configured target")]
    DanglingPriorityEntry { service: String },

    /// A configured target never appears in the priority list.
    #[error("target `{service}` is missing from the priority list")]
    TargetNotPrioritized { service: String },

    /// An ordering operator was paired with a string comparison value.
    #[error("operator `{operator}` is not valid for string values")]
    OrderedStringComparison { operator: String },

    /// A freshness window must be a positive number of seconds.
    #[error("freshness window `{field}` must be positive")]
    NonPositiveWindow { field: &'static str },

    /// The battery threshold is a percentage.
    #[error("min_battery must be within 0..=100, got {value}")]
    BatteryOutOfRange { value: u16 },
}

/// Failure to deliver a notification to a downstream service.
#[derive(Debug, thiserror::Error)]
#[error("failed to deliver to `{service}`: {reason}")]
pub struct DispatchError {
    /// The service the delivery was addressed to.
    pub service: String,
    /// Human-readable transport failure description.
    pub reason: String,
}
