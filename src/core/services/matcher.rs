//! Policy matcher - checks controls against one branch policy
//!
//! `policy.since` is the latest acceptable activation instant: a level or
//! property that only became true after it does not satisfy the policy.

use log::debug;

use super::eligibility::{eligible_level, eligible_since};
use crate::core::error::EvaluationError;
use crate::core::models::{BranchPolicy, ControlName, ControlSet, Level, timestamp};

/// Verify the controls reach the policy's target level in time
pub fn match_level(policy: &BranchPolicy, controls: &ControlSet) -> Result<Level, EvaluationError> {
    let target = policy.target_level;
    let (eligible, reason) = eligible_level(controls);
    debug!("branch {} eligible for {eligible}: {reason}", policy.name);

    if eligible < target {
        return Err(EvaluationError::PolicyNotMet(format!(
            "policy sets target level {target}, but branch is only eligible for {eligible}"
        )));
    }

    let Some(since) = eligible_since(controls, target) else {
        return Err(EvaluationError::PolicyNotMet(format!(
            "policy sets target level {target}, but branch is only eligible for {eligible}"
        )));
    };

    if policy.since < since {
        return Err(EvaluationError::PolicyNotMet(format!(
            "policy sets target level {target} since {}, but it has only been eligible for that level since {}",
            timestamp::format(&policy.since),
            timestamp::format(&since)
        )));
    }

    Ok(target)
}

/// Verify review enforcement when the policy requires it
pub fn match_review(policy: &BranchPolicy, controls: &ControlSet) -> Result<bool, EvaluationError> {
    match_property(
        policy.require_review,
        policy,
        controls,
        &ControlName::ReviewEnforced,
        "review",
    )
}

/// Verify tag immutability when the policy requires it
pub fn match_immutable_tags(
    policy: &BranchPolicy,
    controls: &ControlSet,
) -> Result<bool, EvaluationError> {
    match_property(
        policy.immutable_tags,
        policy,
        controls,
        &ControlName::ImmutableTags,
        "immutable tags",
    )
}

fn match_property(
    required: bool,
    policy: &BranchPolicy,
    controls: &ControlSet,
    name: &ControlName,
    what: &str,
) -> Result<bool, EvaluationError> {
    if !required {
        return Ok(false);
    }

    let Some(control) = controls.get(name) else {
        return Err(EvaluationError::PolicyNotMet(format!(
            "policy requires {what}, but that control is not enabled"
        )));
    };

    if policy.since < control.since {
        return Err(EvaluationError::PolicyNotMet(format!(
            "policy requires {what} since {}, but that control has only been enabled since {}",
            timestamp::format(&policy.since),
            timestamp::format(&control.since)
        )));
    }

    Ok(true)
}
