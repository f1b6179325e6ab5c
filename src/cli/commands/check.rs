//! Evaluate a commit's control status

use std::path::Path;

use sourcelevel::output::OutputMode;

use super::support;
use crate::cli::app::{PolicyArgs, RepoArgs};

/// Evaluate the control status in `controls` against the branch policy
pub async fn check(
    repo: &RepoArgs,
    policy: &PolicyArgs,
    controls: &Path,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let connection = repo.connection(None)?;
    let status = support::read_control_status(controls)?;

    let config = support::load_config(policy)?;
    let engine = support::engine(&config)?;
    let ctx = support::context(&config);

    let result = engine.evaluate_commit_status(&ctx, &connection, &status).await;
    support::report(connection, result, mode)
}
