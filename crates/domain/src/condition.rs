//! Condition — one predicate over one entity's live state.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::EntityId;

/// Closed comparison operator set.
///
/// Dispatching over this enum (rather than interpreting operator text from
/// configuration) keeps configuration data and code strictly separated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<=")]
    Le,
}

impl CompareOp {
    /// Whether this operator orders its operands (anything but `==`/`!=`).
    ///
    /// Ordering operators require numeric operands.
    #[must_use]
    pub fn is_ordering(self) -> bool {
        !matches!(self, Self::Eq | Self::Ne)
    }

    /// Apply the operator to two floats.
    #[must_use]
    pub fn compare_f64(self, lhs: f64, rhs: f64) -> bool {
        match self {
            Self::Eq => (lhs - rhs).abs() < f64::EPSILON,
            Self::Ne => (lhs - rhs).abs() >= f64::EPSILON,
            Self::Gt => lhs > rhs,
            Self::Lt => lhs < rhs,
            Self::Ge => lhs >= rhs,
            Self::Le => lhs <= rhs,
        }
    }
}

impl std::fmt::Display for CompareOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let glyph = match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Ge => ">=",
            Self::Le => "<=",
        };
        f.write_str(glyph)
    }
}

/// The value a condition compares against: a number or a plain string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionValue {
    Number(f64),
    Text(String),
}

impl std::fmt::Display for ConditionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => n.fmt(f),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A predicate evaluated against exactly one state reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub entity: EntityId,
    pub operator: CompareOp,
    pub value: ConditionValue,
}

impl Condition {
    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OrderedStringComparison`] when an ordering
    /// operator (`>`, `<`, `>=`, `<=`) is paired with a string value; string
    /// comparisons only support equality and inequality.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.operator.is_ordering() && matches!(self.value, ConditionValue::Text(_)) {
            return Err(ValidationError::OrderedStringComparison {
                operator: self.operator.to_string(),
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.entity, self.operator, self.value)
    }
}
