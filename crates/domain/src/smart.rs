//! Smart-selection topology — one PC, an ordered list of phones, and the
//! parameters gating which of them is currently usable.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::{EntityId, ServiceId};

/// Prefix a phone notify target must carry for companion-sensor derivation.
pub const MOBILE_NOTIFY_PREFIX: &str = "notify.mobile_app_";

/// Session-sensor value meaning the PC is unlocked (case-sensitive).
pub const PC_UNLOCKED_VALUE: &str = "Unlocked";

/// Lock-sensor value meaning the phone is unlocked (off = unlocked).
pub const PHONE_UNLOCKED_VALUE: &str = "off";

/// Trigger-sensor value reported when the phone shut down.
pub const SHUTDOWN_EVENT: &str = "android.intent.action.ACTION_SHUTDOWN";

/// Trigger-sensor value reported when the phone's screen turned off.
pub const SCREEN_OFF_EVENT: &str = "android.intent.action.SCREEN_OFF";

/// Companion entities of one phone, derived from its notify target.
///
/// The derivation is a fixed naming convention: `notify.mobile_app_<base>`
/// maps to
///
/// - `sensor.<base>_last_notification` (trigger sensor)
/// - `binary_sensor.<base>_device_locked` (lock sensor)
/// - `sensor.<base>_battery_level` (battery sensor)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceSpec {
    pub notify_target: ServiceId,
    pub last_trigger: EntityId,
    pub locked_binary: EntityId,
    pub battery_sensor: EntityId,
}

impl DeviceSpec {
    /// Derive the companion entities for `notify_target`.
    ///
    /// Returns `None` when the target does not follow the
    /// [`MOBILE_NOTIFY_PREFIX`] convention; such candidates are skipped by
    /// the selector.
    #[must_use]
    pub fn from_notify_target(notify_target: &ServiceId) -> Option<Self> {
        let base = notify_target.as_str().strip_prefix(MOBILE_NOTIFY_PREFIX)?;
        if base.is_empty() {
            return None;
        }
        Some(Self {
            notify_target: notify_target.clone(),
            last_trigger: EntityId::new(format!("sensor.{base}_last_notification")),
            locked_binary: EntityId::new(format!("binary_sensor.{base}_device_locked")),
            battery_sensor: EntityId::new(format!("sensor.{base}_battery_level")),
        })
    }
}

/// Rule for preferring PC vs. phone targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectPolicy {
    /// PC when usable, otherwise the first usable phone.
    #[default]
    PcFirst,
    /// An unlocked PC means the user is at the desk and the phone is the
    /// quieter target; a locked PC falls back to the phone as well.
    PhoneIfPcUnlocked,
    /// First usable phone, PC only as a fallback.
    PhoneFirst,
}

/// Immutable per-evaluation input of the smart selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmartParams {
    pub pc_notify_target: Option<ServiceId>,
    pub pc_session_sensor: Option<EntityId>,
    /// Phone notify targets, tried in this order.
    pub phones_in_priority: Vec<ServiceId>,
    /// Minimum battery percentage for a phone to be usable.
    pub min_battery: u8,
    /// Maximum age of a phone's trigger sensor, in seconds.
    pub phone_fresh_s: u32,
    /// Maximum age of the PC session sensor, in seconds.
    pub pc_fresh_s: u32,
    /// Require the phone's trigger sensor to show a wake-state value.
    pub require_awake: bool,
    /// Require the phone's lock sensor to report unlocked.
    pub require_unlocked: bool,
    pub policy: SelectPolicy,
}

impl Default for SmartParams {
    fn default() -> Self {
        Self {
            pc_notify_target: None,
            pc_session_sensor: None,
            phones_in_priority: Vec::new(),
            min_battery: 20,
            phone_fresh_s: 900,
            pc_fresh_s: 300,
            require_awake: true,
            require_unlocked: false,
            policy: SelectPolicy::PcFirst,
        }
    }
}

impl SmartParams {
    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when a freshness window is zero or the
    /// battery threshold exceeds 100.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.phone_fresh_s == 0 {
            return Err(ValidationError::NonPositiveWindow {
                field: "phone_fresh_s",
            });
        }
        if self.pc_fresh_s == 0 {
            return Err(ValidationError::NonPositiveWindow { field: "pc_fresh_s" });
        }
        if self.min_battery > 100 {
            return Err(ValidationError::BatteryOutOfRange {
                value: u16::from(self.min_battery),
            });
        }
        Ok(())
    }
}
