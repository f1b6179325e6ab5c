//! Domain models for sourcelevel
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`Level`] - Ordered SLSA Source levels
//! - [`Control`] / [`ControlSet`] - Time-stamped branch properties
//! - [`BranchPolicy`] / [`RepoPolicy`] - What a branch must satisfy, and since when
//! - [`VerifiedLevels`] - The result of an evaluation
//! - [`RepoConnection`] - Which branch is being evaluated
//! - [`Statement`] - Provenance attestations carrying controls

mod attestation;
mod control;
mod level;
mod policy;
mod repo;
pub mod timestamp;
mod verified;

pub use attestation::{
    ResourceDescriptor, SOURCE_PROVENANCE_PREDICATE_TYPE, STATEMENT_TYPE, SourceProvenance,
    Statement,
};
pub use control::{Control, ControlName, ControlSet, ControlStatus};
pub use level::Level;
pub use policy::{BranchPolicy, DEFAULT_POLICY_MARKER, PolicySourcePath, RepoPolicy, default_policy};
pub use repo::{Locator, LocatorError, RepoConnection, is_commit_digest};
pub use timestamp::ZERO_TIME;
pub use verified::{IMMUTABLE_TAGS_TAG, REVIEW_ENFORCED_TAG, VerifiedLevels, VerifiedProperty};
