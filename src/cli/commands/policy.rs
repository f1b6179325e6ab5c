//! Show and draft branch policies

use std::path::Path;

use chrono::Utc;
use sourcelevel::adapters::write_policy;
use sourcelevel::core::services::draft_policy;
use sourcelevel::output::{DraftResult, OutputMode, PolicyReport};

use super::support;
use crate::cli::app::{PolicyArgs, RepoArgs};

/// Print the policy applying to a branch
pub async fn policy_show(repo: &RepoArgs, policy: &PolicyArgs, mode: OutputMode) -> anyhow::Result<()> {
    let connection = repo.connection(None)?;

    let config = support::load_config(policy)?;
    let engine = support::engine(&config)?;
    let ctx = support::context(&config);

    let (policy, policy_path) = engine.resolve_policy(&ctx, &connection).await?;
    PolicyReport {
        repository: connection,
        policy,
        policy_path,
    }
    .render(mode);
    Ok(())
}

/// Draft a policy from a branch's current controls
pub fn policy_draft(
    repo: &RepoArgs,
    controls: &Path,
    output: Option<&Path>,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let connection = repo.connection(None)?;
    let status = support::read_control_status(controls)?;

    let policy = draft_policy(&connection.branch, &status.controls, Utc::now());
    let written_to = output
        .map(|root| write_policy(root, &connection, &policy))
        .transpose()?;

    DraftResult { policy, written_to }.render(mode);
    Ok(())
}
