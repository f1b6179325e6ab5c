//! Repository coordinates and locator parsing

use serde::Serialize;
use thiserror::Error;

/// Host the policy path scheme is keyed on
const GITHUB_HOST: &str = "github.com";

/// Identifies the branch being evaluated
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoConnection {
    /// Organization or user owning the repository
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Branch name
    pub branch: String,
}

impl RepoConnection {
    /// Create a connection for `owner/repo` at `branch`
    #[must_use]
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            branch: branch.into(),
        }
    }

    /// Path of this repository's policy file inside the policy repository
    #[must_use]
    pub fn policy_path(&self) -> String {
        format!("policy/{GITHUB_HOST}/{}/{}/source-policy.json", self.owner, self.repo)
    }

    /// `owner/repo` slug
    #[must_use]
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

/// Errors from [`Locator::parse`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocatorError {
    /// Nothing to parse
    #[error("empty repository locator")]
    Empty,

    /// Locator points somewhere other than github.com
    #[error("unsupported host {0:?}, expecting github.com")]
    UnsupportedHost(String),

    /// Path does not name exactly one owner and repository
    #[error("malformed repository locator {0:?}, expecting github.com/org/repo")]
    Malformed(String),
}

/// A parsed repository locator
///
/// Accepted forms:
/// - `owner/repo`
/// - `github.com/owner/repo`
/// - `git+https://github.com/owner/repo@ref`
///
/// A 40 character hex reference is a commit, anything else is a branch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Locator {
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Branch, when the reference was not a commit
    pub branch: Option<String>,
    /// Commit digest, when the reference was one
    pub commit: Option<String>,
}

impl Locator {
    /// Parse a locator string
    pub fn parse(input: &str) -> Result<Self, LocatorError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(LocatorError::Empty);
        }

        let rest = trimmed.strip_prefix("git+").unwrap_or(trimmed);
        let rest = rest
            .strip_prefix("https://")
            .or_else(|| rest.strip_prefix("http://"))
            .unwrap_or(rest);

        let (path, reference) = match rest.split_once('@') {
            Some((path, reference)) => (path, Some(reference)),
            None => (rest, None),
        };
        let path = path.trim_end_matches('/');
        let path = path.strip_suffix(".git").unwrap_or(path);
        let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();

        let (owner, repo) = match parts.as_slice() {
            [GITHUB_HOST, owner, repo] | [owner, repo] => (*owner, *repo),
            [host, ..] if host.contains('.') && *host != GITHUB_HOST => {
                return Err(LocatorError::UnsupportedHost((*host).to_string()));
            },
            _ => return Err(LocatorError::Malformed(input.to_string())),
        };

        let mut locator = Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            ..Self::default()
        };

        match reference.filter(|r| !r.is_empty()) {
            Some(r) if is_commit_digest(r) => locator.commit = Some(r.to_string()),
            Some(r) => locator.branch = Some(r.strip_prefix("refs/heads/").unwrap_or(r).to_string()),
            None => {},
        }

        Ok(locator)
    }
}

/// Whether `s` looks like a full sha1 commit digest
#[must_use]
pub fn is_commit_digest(s: &str) -> bool {
    s.len() == 40 && s.chars().all(|c| c.is_ascii_hexdigit())
}
