//! Routing configuration — the static input of the conditional router.
//!
//! Constructed once at setup from persisted configuration, immutable for the
//! lifetime of the routing instance, replaced wholesale on reconfiguration.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::ServiceId;
use crate::smart::SmartParams;
use crate::target::Target;

/// Candidate targets, the order to try them in, and the fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingConfig {
    pub targets: Vec<Target>,
    /// Order in which targets are tried; first match wins.
    pub priority: Vec<ServiceId>,
    /// Service used when no target matches. `None` means no delivery.
    /// Need not reference a configured target.
    #[serde(default)]
    pub fallback: Option<ServiceId>,
}

impl RoutingConfig {
    /// Find the target registered for `service`, if any.
    #[must_use]
    pub fn target(&self, service: &ServiceId) -> Option<&Target> {
        self.targets.iter().find(|t| &t.service == service)
    }

    /// Check domain invariants.
    ///
    /// The router itself tolerates a priority entry without a target (it is
    /// skipped at evaluation time); this check still rejects such configs at
    /// setup so misspellings surface early instead of silently never
    /// matching.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when a target service is duplicated,
    /// when a priority entry references no configured target, when a target
    /// never appears in the priority list, or when any condition is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut seen = HashSet::new();
        for target in &self.targets {
            if !seen.insert(&target.service) {
                return Err(ValidationError::DuplicateTarget {
                    service: target.service.to_string(),
                });
            }
            target.validate()?;
        }
        for service in &self.priority {
            if self.target(service).is_none() {
                return Err(ValidationError::DanglingPriorityEntry {
                    service: service.to_string(),
                });
            }
        }
        for target in &self.targets {
            if !self.priority.contains(&target.service) {
                return Err(ValidationError::TargetNotPrioritized {
                    service: target.service.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Which selection engine a routing instance runs.
#[derive(Debug, Clone, PartialEq)]
pub enum RoutingMode {
    /// User-authored condition sets walked in priority order.
    Conditional(RoutingConfig),
    /// Fixed PC/phone topology under a selection policy.
    Smart(SmartParams),
}

impl RoutingMode {
    /// Check the invariants of whichever configuration is carried.
    ///
    /// # Errors
    ///
    /// Propagates [`ValidationError`] from the inner configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::Conditional(config) => config.validate(),
            Self::Smart(params) => params.validate(),
        }
    }
}
