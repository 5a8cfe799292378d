//! Target — a downstream delivery service guarded by a condition set.

use serde::{Deserialize, Serialize};

use crate::condition::Condition;
use crate::error::ValidationError;
use crate::id::ServiceId;

/// How a target's conditions combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Every condition must hold (vacuously true for an empty list).
    #[default]
    All,
    /// At least one condition must hold (vacuously false for an empty list).
    Any,
}

impl std::fmt::Display for MatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Any => f.write_str("any"),
        }
    }
}

/// A candidate delivery target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub service: ServiceId,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub match_mode: MatchMode,
}

impl Target {
    /// Create an unconditional target (matches whenever it is reached).
    #[must_use]
    pub fn unconditional(service: ServiceId) -> Self {
        Self {
            service,
            conditions: Vec::new(),
            match_mode: MatchMode::All,
        }
    }

    /// Check domain invariants of every condition.
    ///
    /// # Errors
    ///
    /// Propagates the first [`ValidationError`] from
    /// [`Condition::validate`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        for condition in &self.conditions {
            condition.validate()?;
        }
        Ok(())
    }
}
