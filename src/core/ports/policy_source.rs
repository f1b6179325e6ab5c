//! Policy source port
//!
//! Defines where raw policy documents come from.

use std::future::Future;

use crate::core::error::EvaluationError;
use crate::core::models::{PolicySourcePath, RepoConnection};

/// A raw policy document and where it was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyDocument {
    /// Undecoded JSON bytes of a repository policy
    pub bytes: Vec<u8>,
    /// Location reported as the policy source when a branch entry matches
    pub location: PolicySourcePath,
}

/// Supplier of repository policy documents
///
/// Implementations return `Ok(None)` only for an explicit "no policy exists"
/// answer. Transport failures must be errors so they are never mistaken for
/// the default policy.
pub trait PolicySource: Send + Sync {
    /// Fetch the policy document governing `repo`
    fn fetch(
        &self,
        repo: &RepoConnection,
    ) -> impl Future<Output = Result<Option<PolicyDocument>, EvaluationError>> + Send;
}

impl<T: PolicySource> PolicySource for &T {
    fn fetch(
        &self,
        repo: &RepoConnection,
    ) -> impl Future<Output = Result<Option<PolicyDocument>, EvaluationError>> + Send {
        (**self).fetch(repo)
    }
}
