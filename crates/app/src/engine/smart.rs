//! Smart selector — fixed PC/phone topology under a selection policy.
//!
//! Unlike the conditional router, the candidate set here is not
//! user-authored: one optional PC target plus an ordered list of phone
//! targets, each gated by freshness, battery, and lock/awake state. The
//! configured policy decides how PC and phone preferences combine.

use notigate_domain::id::ServiceId;
use notigate_domain::smart::{
    DeviceSpec, PC_UNLOCKED_VALUE, PHONE_UNLOCKED_VALUE, SCREEN_OFF_EVENT, SHUTDOWN_EVENT,
    SelectPolicy, SmartParams,
};
use notigate_domain::state::StateReading;
use notigate_domain::time::Timestamp;

use crate::ports::StateLookup;

/// Select at most one target under `params.policy`.
///
/// `now` is taken as a parameter so the evaluation stays a pure function of
/// its inputs and the freshness boundary is testable.
#[must_use]
pub fn select_target_smart(
    params: &SmartParams,
    lookup: &impl StateLookup,
    now: Timestamp,
) -> Option<ServiceId> {
    match params.policy {
        SelectPolicy::PcFirst => {
            if pc_usable(params, lookup, now) {
                params.pc_notify_target.clone()
            } else {
                first_usable_phone(params, lookup, now)
            }
        }
        SelectPolicy::PhoneIfPcUnlocked => {
            let phone = first_usable_phone(params, lookup, now);
            if pc_usable(params, lookup, now) {
                phone.or_else(|| params.pc_notify_target.clone())
            } else {
                phone
            }
        }
        SelectPolicy::PhoneFirst => first_usable_phone(params, lookup, now).or_else(|| {
            if pc_usable(params, lookup, now) {
                params.pc_notify_target.clone()
            } else {
                None
            }
        }),
    }
}

/// The PC qualifies when both its target and session sensor are configured,
/// the session reports `"Unlocked"` (case-sensitive), and the reading is
/// fresh within `pc_fresh_s`.
fn pc_usable(params: &SmartParams, lookup: &impl StateLookup, now: Timestamp) -> bool {
    if params.pc_notify_target.is_none() {
        return false;
    }
    let Some(sensor) = &params.pc_session_sensor else {
        return false;
    };
    let Some(reading) = lookup.get(sensor) else {
        return false;
    };
    reading.value == PC_UNLOCKED_VALUE && reading.is_fresh(now, params.pc_fresh_s)
}

/// First phone in priority order that passes every gate, if any.
fn first_usable_phone(
    params: &SmartParams,
    lookup: &impl StateLookup,
    now: Timestamp,
) -> Option<ServiceId> {
    params
        .phones_in_priority
        .iter()
        .find(|target| phone_usable(params, lookup, now, target))
        .cloned()
}

/// All gates for one phone candidate. Any missing companion sensor, stale
/// trigger, failed lock/awake gate, or unparsable battery value renders the
/// candidate unusable without error.
fn phone_usable(
    params: &SmartParams,
    lookup: &impl StateLookup,
    now: Timestamp,
    target: &ServiceId,
) -> bool {
    let Some(spec) = DeviceSpec::from_notify_target(target) else {
        tracing::debug!(%target, "notify target does not follow the mobile_app convention, skipping");
        return false;
    };

    let Some(trigger) = lookup.get(&spec.last_trigger) else {
        return false;
    };
    let Some(lock) = lookup.get(&spec.locked_binary) else {
        return false;
    };
    let Some(battery) = lookup.get(&spec.battery_sensor) else {
        return false;
    };

    if !trigger.is_fresh(now, params.phone_fresh_s) {
        return false;
    }
    if params.require_awake && !is_awake(&trigger) {
        return false;
    }
    if params.require_unlocked && lock.value != PHONE_UNLOCKED_VALUE {
        return false;
    }

    let Ok(level) = battery.value.trim().parse::<f64>() else {
        tracing::warn!(
            entity = %spec.battery_sensor,
            value = %battery.value,
            "battery value is not numeric, phone unusable"
        );
        return false;
    };
    level >= f64::from(params.min_battery)
}

/// The trigger sensor reports the phone's last lifecycle event; an empty
/// value or a shutdown/screen-off event means the device is not awake.
fn is_awake(trigger: &StateReading) -> bool {
    !trigger.value.is_empty()
        && trigger.value != SHUTDOWN_EVENT
        && trigger.value != SCREEN_OFF_EVENT
}
