//! Branch and repository policies
//!
//! A policy declares the level a branch must reach, which extra properties
//! it must enforce, and the instant from which all of this is required.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{Level, timestamp};
use crate::core::error::EvaluationError;

/// Marker reported as the policy source when the implicit default applies
pub const DEFAULT_POLICY_MARKER: &str = "DEFAULT";

/// Requirements declared for one protected branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchPolicy {
    /// Branch name
    pub name: String,

    /// Latest acceptable activation instant for every requirement below
    #[serde(default = "timestamp::zero_time", with = "timestamp")]
    pub since: DateTime<Utc>,

    /// Level the branch must reach
    #[serde(default)]
    pub target_level: Level,

    /// Whether the review control is required
    #[serde(default)]
    pub require_review: bool,

    /// Whether the immutable tags control is required
    #[serde(default)]
    pub immutable_tags: bool,
}

/// The least restrictive policy, applied to branches nobody declared
#[must_use]
pub fn default_policy(branch: &str) -> BranchPolicy {
    BranchPolicy {
        name: branch.to_string(),
        since: timestamp::ZERO_TIME,
        target_level: Level::Level1,
        require_review: false,
        immutable_tags: false,
    }
}

/// Policy document for a repository, one entry per protected branch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoPolicy {
    /// Protected branches; `null` and a missing field both mean none
    #[serde(default, deserialize_with = "null_as_empty")]
    pub protected_branches: Vec<BranchPolicy>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<BranchPolicy>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<BranchPolicy>>::deserialize(deserializer)?.unwrap_or_default())
}

impl RepoPolicy {
    /// Parse a policy document, keeping the decoder message on failure
    pub fn from_json(bytes: &[u8]) -> Result<Self, EvaluationError> {
        serde_json::from_slice(bytes).map_err(|e| EvaluationError::PolicyMalformed(e.to_string()))
    }

    /// Render as indented JSON
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// First protected branch entry with the given name
    #[must_use]
    pub fn branch(&self, name: &str) -> Option<&BranchPolicy> {
        self.protected_branches.iter().find(|b| b.name == name)
    }
}

/// Where the applied branch policy came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicySourcePath {
    /// A local override file
    Local(PathBuf),
    /// The canonical URL of a remote policy file
    Remote(String),
    /// No pertinent policy; the implicit default was used
    Default,
}

impl PolicySourcePath {
    /// Whether the implicit default policy was applied
    #[must_use]
    pub const fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }
}

impl fmt::Display for PolicySourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(path) => write!(f, "{}", path.display()),
            Self::Remote(url) => f.write_str(url),
            Self::Default => f.write_str(DEFAULT_POLICY_MARKER),
        }
    }
}

impl Serialize for PolicySourcePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
