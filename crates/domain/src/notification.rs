//! Notification — the payload forwarded verbatim to the chosen target.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// An outgoing notification.
///
/// `data` is an opaque nested object owned by the caller. It passes through
/// to the dispatcher unmodified and is never merged into the top-level
/// payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl Notification {
    /// Create a bare notification with only a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            title: None,
            data: None,
        }
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyMessage`] when the message is empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.message.is_empty() {
            return Err(ValidationError::EmptyMessage);
        }
        Ok(())
    }
}
