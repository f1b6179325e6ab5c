//! Policy resolver - finds the branch policy that applies
//!
//! The resolver turns whatever a [`PolicySource`] returns into exactly one
//! [`BranchPolicy`]. A missing document or a document without the branch
//! yields the implicit default policy; any failure is surfaced as is.

use log::{debug, info};

use crate::core::context::Context;
use crate::core::error::EvaluationError;
use crate::core::models::{
    BranchPolicy, PolicySourcePath, RepoConnection, RepoPolicy, default_policy,
};
use crate::core::ports::PolicySource;

/// Resolves branch policies from a single source
#[derive(Debug, Clone)]
pub struct PolicyResolver<S> {
    source: S,
}

impl<S: PolicySource> PolicyResolver<S> {
    /// Create a resolver reading from `source`
    #[must_use]
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    /// Resolve the policy for `repo.branch`
    ///
    /// # Returns
    ///
    /// The policy and where it came from ([`PolicySourcePath::Default`] when
    /// the implicit default applies).
    pub async fn resolve(
        &self,
        ctx: &Context,
        repo: &RepoConnection,
    ) -> Result<(BranchPolicy, PolicySourcePath), EvaluationError> {
        let Some(document) = ctx.run(self.source.fetch(repo)).await? else {
            info!("no policy found for {}, using default policy", repo.slug());
            return Ok((default_policy(&repo.branch), PolicySourcePath::Default));
        };

        let policy = RepoPolicy::from_json(&document.bytes)?;
        match policy.branch(&repo.branch) {
            Some(branch) => {
                debug!("using policy for branch {} from {}", repo.branch, document.location);
                Ok((branch.clone(), document.location))
            },
            None => {
                info!(
                    "policy at {} has no entry for branch {}, using default policy",
                    document.location, repo.branch
                );
                Ok((default_policy(&repo.branch), PolicySourcePath::Default))
            },
        }
    }
}
