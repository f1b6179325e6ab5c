//! Evaluate controls recorded in a provenance attestation

use std::path::Path;

use sourcelevel::adapters::{ProvenanceExtractor, read_statement};
use sourcelevel::output::OutputMode;

use super::support;
use crate::cli::app::{PolicyArgs, RepoArgs};

/// Evaluate the statement in `statement` against the branch policy
///
/// When no branch is given the one recorded in the provenance is used.
pub async fn verify_prov(
    repo: &RepoArgs,
    policy: &PolicyArgs,
    statement: &Path,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let statement = read_statement(statement)?;
    let recorded_branch = ProvenanceExtractor::provenance(Some(&statement))
        .ok()
        .map(|p| p.branch.trim_start_matches("refs/heads/").to_string());
    let connection = repo.connection(recorded_branch.as_deref())?;

    let config = support::load_config(policy)?;
    let engine = support::engine(&config)?;
    let ctx = support::context(&config);

    let result = engine.evaluate_statement(&ctx, &connection, Some(&statement)).await;
    support::report(connection, result, mode)
}
