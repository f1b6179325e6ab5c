//! Policy drafting - propose a policy a branch already satisfies

use chrono::{DateTime, Utc};
use log::debug;

use super::eligibility::eligible_level;
use crate::core::models::{BranchPolicy, ControlName, ControlSet, RepoPolicy};

/// Draft a repository policy protecting `branch` at its current eligibility
///
/// The draft takes effect at `now`, requires the level the controls make
/// possible, and requires review and immutable tags when those controls
/// are already enabled.
#[must_use]
pub fn draft_policy(branch: &str, controls: &ControlSet, now: DateTime<Utc>) -> RepoPolicy {
    let (level, reason) = eligible_level(controls);
    debug!("drafting {level} policy for {branch}: {reason}");

    RepoPolicy {
        protected_branches: vec![BranchPolicy {
            name: branch.to_string(),
            since: now,
            target_level: level,
            require_review: controls.get(&ControlName::ReviewEnforced).is_some(),
            immutable_tags: controls.get(&ControlName::ImmutableTags).is_some(),
        }],
    }
}
