//! Control aggregator - combines level and property matching
//!
//! Runs the level match, then review, then immutable tags. The first
//! failure stops the evaluation; no partial result is returned.

use super::matcher::{match_immutable_tags, match_level, match_review};
use crate::core::error::{Check, EvaluationError};
use crate::core::models::{BranchPolicy, ControlSet, VerifiedLevels, VerifiedProperty};

/// Evaluate controls against a branch policy
///
/// # Returns
///
/// The verified level followed by `REVIEW_ENFORCED` and `IMMUTABLE_TAGS`
/// when the policy requires them and the controls satisfy it.
pub fn evaluate(
    policy: &BranchPolicy,
    controls: &ControlSet,
) -> Result<VerifiedLevels, EvaluationError> {
    let level = match_level(policy, controls).map_err(|e| e.in_check(Check::SlsaLevel))?;
    let mut verified = VerifiedLevels::from_level(level);

    if match_review(policy, controls).map_err(|e| e.in_check(Check::ReviewEnforced))? {
        verified.push(VerifiedProperty::ReviewEnforced);
    }

    if match_immutable_tags(policy, controls).map_err(|e| e.in_check(Check::ImmutableTags))? {
        verified.push(VerifiedProperty::ImmutableTags);
    }

    Ok(verified)
}
