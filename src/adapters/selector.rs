//! Choose between the local override and the policy repository

use log::debug;

use super::github::GitHubPolicyRepository;
use super::local::LocalPolicyFile;
use crate::config::Config;
use crate::core::error::EvaluationError;
use crate::core::models::RepoConnection;
use crate::core::ports::{PolicyDocument, PolicySource};

/// The policy source a run uses
#[derive(Debug, Clone)]
pub enum PolicySelector {
    /// A file on disk
    Local(LocalPolicyFile),
    /// The GitHub policy repository
    Remote(GitHubPolicyRepository),
}

impl PolicySelector {
    /// Build the source described by `config`
    ///
    /// A local override wins over the policy repository.
    #[must_use]
    pub fn from_config(config: &Config, client: reqwest::Client) -> Self {
        if let Some(path) = &config.policy.local_override {
            debug!("using local policy override {}", path.display());
            return Self::Local(LocalPolicyFile::new(path));
        }
        Self::Remote(
            GitHubPolicyRepository::new(client, &config.policy.api_base_url)
                .with_policy_repo(&config.policy.repo_owner, &config.policy.repo_name)
                .with_token(config.token()),
        )
    }
}

impl PolicySource for PolicySelector {
    async fn fetch(
        &self,
        repo: &RepoConnection,
    ) -> Result<Option<PolicyDocument>, EvaluationError> {
        match self {
            Self::Local(source) => source.fetch(repo).await,
            Self::Remote(source) => source.fetch(repo).await,
        }
    }
}
