//! Condition evaluator — one condition against one state reading.

use notigate_domain::condition::{CompareOp, Condition, ConditionValue};
use notigate_domain::state::StateReading;

/// Evaluate `condition` against `reading`.
///
/// Total and infallible: a missing reading, a host sentinel value, an
/// unparsable number, or an ordering operator on a string value all degrade
/// to `false`. Unexpected shapes are logged at `warn` so misconfigurations
/// surface without aborting a selection.
#[must_use]
pub fn evaluate(condition: &Condition, reading: Option<&StateReading>) -> bool {
    let Some(reading) = reading else {
        return false;
    };
    if !reading.has_data() {
        return false;
    }

    match &condition.value {
        ConditionValue::Number(expected) => {
            let Ok(actual) = reading.value.trim().parse::<f64>() else {
                tracing::warn!(
                    entity = %condition.entity,
                    value = %reading.value,
                    "state value is not numeric, condition evaluates to false"
                );
                return false;
            };
            condition.operator.compare_f64(actual, *expected)
        }
        ConditionValue::Text(expected) => match condition.operator {
            CompareOp::Eq => reading.value == *expected,
            CompareOp::Ne => reading.value != *expected,
            op => {
                tracing::warn!(
                    entity = %condition.entity,
                    operator = %op,
                    "ordering operator on string value, condition evaluates to false"
                );
                false
            }
        },
    }
}
