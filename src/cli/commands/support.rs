//! Helpers shared by the evaluation commands

use std::path::Path;

use anyhow::{Context as _, bail};
use log::warn;
use sourcelevel::adapters::{PolicySelector, ProvenanceExtractor};
use sourcelevel::config::Config;
use sourcelevel::core::Context;
use sourcelevel::core::error::EvaluationError;
use sourcelevel::core::models::{ControlStatus, Locator, RepoConnection};
use sourcelevel::core::services::{Engine, Evaluation};
use sourcelevel::output::{EvaluationReport, OutputMode};

use crate::cli::app::{PolicyArgs, RepoArgs};

/// The engine the CLI evaluates with
pub type CliEngine = Engine<PolicySelector, ProvenanceExtractor>;

impl RepoArgs {
    /// Resolve the branch to evaluate
    ///
    /// The locator and the flags may both be given as long as they agree.
    /// `fallback_branch` is used when neither names a branch.
    pub fn connection(&self, fallback_branch: Option<&str>) -> anyhow::Result<RepoConnection> {
        let locator = self
            .locator
            .as_deref()
            .map(Locator::parse)
            .transpose()
            .context("Invalid repository locator")?
            .unwrap_or_default();

        if let Some(commit) = &locator.commit {
            bail!(
                "Commit locators are not supported ({commit}): controls are read from a file, \
                 pass owner/repo@branch instead"
            );
        }

        let owner = merge(self.owner.as_deref(), Some(locator.owner), "owner")?;
        let repo = merge(self.repo.as_deref(), Some(locator.repo), "repository name")?;
        let branch = merge(self.branch.as_deref(), locator.branch, "branch")?
            .or_else(|| fallback_branch.map(str::to_string));

        let (Some(owner), Some(repo)) = (owner, repo) else {
            bail!("Repository required: pass owner/repo or --owner and --repo");
        };
        let Some(branch) = branch.filter(|b| !b.is_empty()) else {
            bail!("Branch required: pass owner/repo@branch or --branch");
        };

        Ok(RepoConnection::new(owner, repo, branch))
    }
}

/// Combine a flag with the locator's value for the same field
///
/// Empty values count as absent. Two different non-empty values are an error.
fn merge(flag: Option<&str>, located: Option<String>, what: &str) -> anyhow::Result<Option<String>> {
    let flag = flag.filter(|v| !v.is_empty());
    let located = located.filter(|v| !v.is_empty());
    match (flag, located) {
        (Some(flag), Some(located)) if flag != located => {
            bail!("duplicate {what} specified: {flag:?} and {located:?}")
        },
        (Some(flag), _) => Ok(Some(flag.to_string())),
        (None, located) => Ok(located),
    }
}

/// Load configuration and apply per-command policy flags
pub fn load_config(policy: &PolicyArgs) -> anyhow::Result<Config> {
    let mut config = Config::load()?;
    if let Some(path) = &policy.use_local_policy {
        config.policy.local_override = Some(path.clone());
    }
    Ok(config)
}

/// Build the engine described by `config`
pub fn engine(config: &Config) -> anyhow::Result<CliEngine> {
    let client = reqwest::Client::builder()
        .build()
        .context("Failed to build HTTP client")?;
    Ok(Engine::new(PolicySelector::from_config(config, client), ProvenanceExtractor))
}

/// A context with the configured deadline, cancelled on Ctrl-C
pub fn context(config: &Config) -> Context {
    let ctx = match config.timeout() {
        Some(timeout) => Context::new().with_timeout(timeout),
        None => Context::new(),
    };
    let token = ctx.token().clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, cancelling");
            token.cancel();
        }
    });
    ctx
}

/// Read a control status file
pub fn read_control_status(path: &Path) -> anyhow::Result<ControlStatus> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Render an evaluation outcome
///
/// A branch that does not meet its policy is reported and exits non-zero.
/// Any other failure is returned.
pub fn report(
    repo: RepoConnection,
    result: Result<Evaluation, EvaluationError>,
    mode: OutputMode,
) -> anyhow::Result<()> {
    match result {
        Ok(evaluation) => {
            EvaluationReport::compliant(repo, &evaluation).render(mode);
            Ok(())
        },
        Err(err) if err.is_policy_not_met() => {
            EvaluationReport::not_compliant(repo, &err).render(mode);
            std::process::exit(1);
        },
        Err(err) => Err(err.into()),
    }
}
