//! Local policy file adapter
//!
//! Reads a repository policy from disk, typically a draft that has not been
//! merged into the policy repository yet.

use std::io;
use std::path::{Path, PathBuf};

use log::debug;

use crate::core::error::EvaluationError;
use crate::core::models::{PolicySourcePath, RepoConnection, RepoPolicy};
use crate::core::ports::{PolicyDocument, PolicySource};

/// Policy source reading a single file
///
/// The same file is used whatever repository is asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalPolicyFile {
    path: PathBuf,
}

impl LocalPolicyFile {
    /// Read policies from `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the policy file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PolicySource for LocalPolicyFile {
    async fn fetch(
        &self,
        repo: &RepoConnection,
    ) -> Result<Option<PolicyDocument>, EvaluationError> {
        debug!("reading policy for {} from {}", repo.slug(), self.path.display());

        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| EvaluationError::PolicyUnreadable {
                path: self.path.clone(),
                message: e.to_string(),
            })?;

        Ok(Some(PolicyDocument {
            bytes,
            location: PolicySourcePath::Local(self.path.clone()),
        }))
    }
}

/// Write `policy` under `root` at the path the policy repository expects
///
/// Missing directories are created. Returns the path written.
pub fn write_policy(root: &Path, repo: &RepoConnection, policy: &RepoPolicy) -> io::Result<PathBuf> {
    let path = root.join(repo.policy_path());
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut json = policy.to_json_pretty().map_err(io::Error::other)?;
    json.push('\n');
    std::fs::write(&path, json)?;

    debug!("wrote policy for {} to {}", repo.slug(), path.display());
    Ok(path)
}
