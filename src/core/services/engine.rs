//! Evaluation engine - entry points tying resolution to evaluation
//!
//! Each call resolves the branch policy once and evaluates against it.
//! There is no caching and no shared mutable state between calls.

use log::info;
use serde::Serialize;

use super::evaluator::evaluate;
use super::resolver::PolicyResolver;
use crate::core::context::Context;
use crate::core::error::EvaluationError;
use crate::core::models::{
    BranchPolicy, ControlSet, ControlStatus, Level, PolicySourcePath, RepoConnection, Statement,
    VerifiedLevels,
};
use crate::core::ports::{ControlExtractor, PolicySource};

/// Result of an evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    /// Verified level and properties
    pub verified_levels: VerifiedLevels,
    /// Where the applied policy came from
    pub policy_path: PolicySourcePath,
}

/// Evaluates commits and attested controls against resolved policies
#[derive(Debug, Clone)]
pub struct Engine<S, E> {
    resolver: PolicyResolver<S>,
    extractor: E,
}

impl<S: PolicySource, E: ControlExtractor> Engine<S, E> {
    /// Create an engine from a policy source and an attestation extractor
    #[must_use]
    pub const fn new(source: S, extractor: E) -> Self {
        Self {
            resolver: PolicyResolver::new(source),
            extractor,
        }
    }

    /// Resolve the policy applying to `repo`
    pub async fn resolve_policy(
        &self,
        ctx: &Context,
        repo: &RepoConnection,
    ) -> Result<(BranchPolicy, PolicySourcePath), EvaluationError> {
        self.resolver.resolve(ctx, repo).await
    }

    /// Evaluate the control status of a pushed commit
    ///
    /// Commits pushed before the policy took effect are graded at level 1
    /// whatever their controls.
    pub async fn evaluate_commit_status(
        &self,
        ctx: &Context,
        repo: &RepoConnection,
        status: &ControlStatus,
    ) -> Result<Evaluation, EvaluationError> {
        let (policy, policy_path) = self.resolver.resolve(ctx, repo).await?;

        if status.commit_push_time < policy.since {
            info!(
                "commit pushed before policy for {} took effect, grading at {}",
                repo.branch,
                Level::Level1
            );
            return Ok(Evaluation {
                verified_levels: VerifiedLevels::from_level(Level::Level1),
                policy_path,
            });
        }

        let verified_levels = evaluate(&policy, &status.controls)?;
        Ok(Evaluation {
            verified_levels,
            policy_path,
        })
    }

    /// Evaluate controls already recovered from a provenance attestation
    pub async fn evaluate_attested_controls(
        &self,
        ctx: &Context,
        repo: &RepoConnection,
        controls: &ControlSet,
    ) -> Result<Evaluation, EvaluationError> {
        let (policy, policy_path) = self.resolver.resolve(ctx, repo).await?;
        let verified_levels = evaluate(&policy, controls)?;
        Ok(Evaluation {
            verified_levels,
            policy_path,
        })
    }

    /// Extract controls from a provenance statement and evaluate them
    pub async fn evaluate_statement(
        &self,
        ctx: &Context,
        repo: &RepoConnection,
        statement: Option<&Statement>,
    ) -> Result<Evaluation, EvaluationError> {
        let controls = self.extractor.extract(statement)?;
        self.evaluate_attested_controls(ctx, repo, &controls).await
    }
}
