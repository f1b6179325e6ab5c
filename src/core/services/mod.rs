//! Business logic services
//!
//! Pure orchestration logic that operates on domain models. Only the
//! resolver and engine touch a port; everything else works on data passed in.
//!
//! - [`eligibility`] - What levels the controls make possible, and since when
//! - [`matcher`] - Match controls against one branch policy
//! - [`evaluator`] - Aggregate level and property matching
//! - [`resolver`] - Locate the applicable branch policy
//! - [`engine`] - Entry points for commits and attested controls
//! - [`draft`] - Propose a policy from current controls

pub mod draft;
pub mod eligibility;
pub mod engine;
pub mod evaluator;
pub mod matcher;
pub mod resolver;

pub use draft::draft_policy;
pub use eligibility::{eligible_level, eligible_since};
pub use engine::{Engine, Evaluation};
pub use evaluator::evaluate;
pub use matcher::{match_immutable_tags, match_level, match_review};
pub use resolver::PolicyResolver;
