//! Target matcher — applies the match mode across a target's condition set.

use notigate_domain::target::{MatchMode, Target};

use crate::engine::evaluator::evaluate;
use crate::ports::StateLookup;

/// Whether `target` qualifies under the current state.
///
/// `all` is a conjunction, vacuously true for an empty condition list (an
/// unconditional target). `any` is a disjunction, vacuously false for an
/// empty list — a target that should always match must use `all`.
#[must_use]
pub fn target_matches(target: &Target, lookup: &impl StateLookup) -> bool {
    let mut results = target
        .conditions
        .iter()
        .map(|condition| evaluate(condition, lookup.get(&condition.entity).as_ref()));
    match target.match_mode {
        MatchMode::All => results.all(|matched| matched),
        MatchMode::Any => results.any(|matched| matched),
    }
}
