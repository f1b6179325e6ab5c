//! Output formatting for human and JSON modes
//!
//! This module provides structured output that can be rendered either as
//! human-readable text or machine-parseable JSON.

use std::path::PathBuf;

use colored::Colorize;
use serde::Serialize;

use crate::core::error::EvaluationError;
use crate::core::models::{BranchPolicy, PolicySourcePath, RepoConnection, RepoPolicy, timestamp};
use crate::core::services::Evaluation;

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Result of evaluating a branch
#[derive(Debug, Serialize)]
pub struct EvaluationReport {
    /// Branch evaluated
    pub repository: RepoConnection,
    /// Whether the branch meets its policy
    pub compliant: bool,
    /// Verified level and properties, empty when not compliant
    pub verified_levels: Vec<&'static str>,
    /// Where the applied policy came from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_path: Option<PolicySourcePath>,
    /// Why the branch is not compliant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl EvaluationReport {
    /// Report a successful evaluation
    #[must_use]
    pub fn compliant(repository: RepoConnection, evaluation: &Evaluation) -> Self {
        Self {
            repository,
            compliant: true,
            verified_levels: evaluation.verified_levels.as_strings(),
            policy_path: Some(evaluation.policy_path.clone()),
            reason: None,
        }
    }

    /// Report a branch that does not meet its policy
    #[must_use]
    pub fn not_compliant(repository: RepoConnection, error: &EvaluationError) -> Self {
        Self {
            repository,
            compliant: false,
            verified_levels: Vec::new(),
            policy_path: None,
            reason: Some(error.to_string()),
        }
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => self.render_json(),
        }
    }

    fn render_human(&self) {
        println!(
            "{}@{}",
            self.repository.slug().bold(),
            self.repository.branch
        );

        if self.compliant {
            println!("  {} {}", "Verified:".green(), self.verified_levels.join(", "));
            if let Some(path) = &self.policy_path {
                println!("  Policy:   {path}");
            }
        } else {
            println!("  {}", "NOT COMPLIANT".red().bold());
            if let Some(reason) = &self.reason {
                println!("  {reason}");
            }
        }
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}

/// The policy applying to a branch
#[derive(Debug, Serialize)]
pub struct PolicyReport {
    /// Branch the policy applies to
    pub repository: RepoConnection,
    /// The policy
    pub policy: BranchPolicy,
    /// Where it came from
    pub policy_path: PolicySourcePath,
}

impl PolicyReport {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => self.render_json(),
        }
    }

    fn render_human(&self) {
        println!(
            "{}@{}",
            self.repository.slug().bold(),
            self.repository.branch
        );
        println!("  Source:          {}", self.policy_path);
        println!("  Target level:    {}", self.policy.target_level);
        println!("  Since:           {}", timestamp::format(&self.policy.since));
        println!("  Require review:  {}", self.policy.require_review);
        println!("  Immutable tags:  {}", self.policy.immutable_tags);
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}

/// Result of drafting a policy
#[derive(Debug, Serialize)]
pub struct DraftResult {
    /// The drafted policy
    pub policy: RepoPolicy,
    /// File the draft was written to, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub written_to: Option<PathBuf>,
}

impl DraftResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => {
                println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
            },
        }
    }

    fn render_human(&self) {
        match &self.written_to {
            Some(path) => println!("{} {}", "Wrote".green(), path.display()),
            None => println!("{}", self.policy.to_json_pretty().unwrap_or_default()),
        }
    }
}
