//! Conditional router — priority walk, first match wins, else fallback.

use notigate_domain::id::ServiceId;
use notigate_domain::routing::RoutingConfig;

use crate::engine::matcher::target_matches;
use crate::ports::StateLookup;

/// Select the delivery service for the current state.
///
/// Walks `config.priority` in order and returns the first service whose
/// target matches — a strict short-circuit, later candidates are never
/// evaluated. A priority entry with no configured target is skipped. When
/// nothing matches the fallback is returned; `None` means no delivery.
///
/// Total: for any configuration and any state snapshot this terminates with
/// a service or `None`, never an error.
#[must_use]
pub fn select_target(config: &RoutingConfig, lookup: &impl StateLookup) -> Option<ServiceId> {
    for service in &config.priority {
        let Some(target) = config.target(service) else {
            tracing::debug!(%service, "priority entry has no configured target, skipping");
            continue;
        };
        if target_matches(target, lookup) {
            tracing::debug!(%service, "target matched");
            return Some(target.service.clone());
        }
    }
    config.fallback.clone()
}
