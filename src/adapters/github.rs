//! GitHub policy repository adapter
//!
//! Fetches `source-policy.json` files from a policy repository through the
//! GitHub contents API.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use log::debug;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::core::error::EvaluationError;
use crate::core::models::{PolicySourcePath, RepoConnection};
use crate::core::ports::{PolicyDocument, PolicySource};

/// Public GitHub API endpoint
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// Owner of the canonical policy repository
pub const POLICY_REPO_OWNER: &str = "slsa-framework";

/// Name of the canonical policy repository
pub const POLICY_REPO_NAME: &str = "slsa-source-poc";

const USER_AGENT: &str = concat!("sourcelevel/", env!("CARGO_PKG_VERSION"));

/// Response of `GET /repos/{owner}/{repo}/contents/{path}` for a file
#[derive(Debug, Deserialize)]
struct ContentsEnvelope {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    encoding: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    html_url: Option<String>,
}

/// Policy source backed by a GitHub repository
#[derive(Debug, Clone)]
pub struct GitHubPolicyRepository {
    client: reqwest::Client,
    api_base_url: String,
    owner: String,
    repo: String,
    token: Option<String>,
}

impl Default for GitHubPolicyRepository {
    fn default() -> Self {
        Self::new(reqwest::Client::new(), DEFAULT_API_BASE_URL)
    }
}

impl GitHubPolicyRepository {
    /// Policy source reading the canonical policy repository from `api_base_url`
    #[must_use]
    pub fn new(client: reqwest::Client, api_base_url: impl Into<String>) -> Self {
        Self {
            client,
            api_base_url: api_base_url.into(),
            owner: POLICY_REPO_OWNER.to_string(),
            repo: POLICY_REPO_NAME.to_string(),
            token: None,
        }
    }

    /// Read policies from `owner/repo` instead of the canonical repository
    #[must_use]
    pub fn with_policy_repo(mut self, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        self.owner = owner.into();
        self.repo = repo.into();
        self
    }

    /// Authenticate requests with a bearer token
    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    /// Contents API URL of the policy governing `repo`
    #[must_use]
    pub fn contents_url(&self, repo: &RepoConnection) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base_url.trim_end_matches('/'),
            self.owner,
            self.repo,
            repo.policy_path()
        )
    }

    async fn fetch_document(
        &self,
        repo: &RepoConnection,
    ) -> Result<Option<PolicyDocument>, EvaluationError> {
        let url = self.contents_url(repo);
        debug!("fetching policy from {url}");

        let mut request = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", USER_AGENT)
            .header("X-GitHub-Api-Version", "2022-11-28");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| EvaluationError::PolicyFetchFailed(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!("no policy at {url}");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(EvaluationError::PolicyFetchFailed(format!(
                "GET {url} returned {status}"
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| EvaluationError::PolicyFetchFailed(e.to_string()))?;
        let (bytes, html_url) = decode_envelope(&body)?;
        let location = PolicySourcePath::Remote(html_url.unwrap_or(url));

        Ok(Some(PolicyDocument { bytes, location }))
    }
}

/// Decode the file content carried by a contents API response
///
/// Returns the file bytes and the browsable URL of the file, if reported.
fn decode_envelope(body: &[u8]) -> Result<(Vec<u8>, Option<String>), EvaluationError> {
    let envelope: ContentsEnvelope = serde_json::from_slice(body)
        .map_err(|e| EvaluationError::PolicyMalformed(format!("contents envelope: {e}")))?;

    if !envelope.kind.is_empty() && envelope.kind != "file" {
        return Err(EvaluationError::PolicyMalformed(format!(
            "expected a file, got {}",
            envelope.kind
        )));
    }
    if !envelope.encoding.is_empty() && envelope.encoding != "base64" {
        return Err(EvaluationError::PolicyMalformed(format!(
            "unsupported content encoding {}",
            envelope.encoding
        )));
    }

    // GitHub wraps the base64 payload at 60 columns
    let compact: String = envelope.content.split_whitespace().collect();
    let bytes = STANDARD
        .decode(compact)
        .map_err(|e| EvaluationError::PolicyMalformed(format!("policy content: {e}")))?;
    Ok((bytes, envelope.html_url))
}

impl PolicySource for GitHubPolicyRepository {
    async fn fetch(
        &self,
        repo: &RepoConnection,
    ) -> Result<Option<PolicyDocument>, EvaluationError> {
        self.fetch_document(repo).await
    }
}
