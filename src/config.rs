//! Global configuration management
//!
//! Config is stored at `~/.config/sourcelevel/config.toml` (XDG standard).
//! Every field is optional; environment variables override the file and
//! command line flags override both.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::adapters::github::{DEFAULT_API_BASE_URL, POLICY_REPO_NAME, POLICY_REPO_OWNER};
use crate::paths;

/// Overrides `policy.api_base_url`
pub const ENV_POLICY_API_URL: &str = "SOURCELEVEL_POLICY_API_URL";

/// Overrides `policy.local_override`
pub const ENV_LOCAL_POLICY: &str = "SOURCELEVEL_LOCAL_POLICY";

/// Errors loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read
    #[error("reading config {}: {source}", path.display())]
    Read {
        /// Config file path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The config file is not valid TOML for this schema
    #[error("parsing config {}: {source}", path.display())]
    Parse {
        /// Config file path
        path: PathBuf,
        /// Underlying error
        source: toml::de::Error,
    },
}

/// Global sourcelevel configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Where policies come from
    #[serde(default)]
    pub policy: PolicyConfig,
    /// GitHub access
    #[serde(default)]
    pub github: GitHubConfig,
}

/// Policy source settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Owner of the policy repository
    #[serde(default = "default_repo_owner")]
    pub repo_owner: String,
    /// Name of the policy repository
    #[serde(default = "default_repo_name")]
    pub repo_name: String,
    /// GitHub API endpoint
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Deadline for policy resolution, 0 for none
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Read every policy from this file instead of the policy repository
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_override: Option<PathBuf>,
}

fn default_repo_owner() -> String {
    POLICY_REPO_OWNER.to_string()
}

fn default_repo_name() -> String {
    POLICY_REPO_NAME.to_string()
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            repo_owner: default_repo_owner(),
            repo_name: default_repo_name(),
            api_base_url: default_api_base_url(),
            timeout_secs: default_timeout_secs(),
            local_override: None,
        }
    }
}

/// GitHub credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// Environment variable holding the API token
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

fn default_token_env() -> String {
    "GITHUB_TOKEN".to_string()
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token_env: default_token_env(),
        }
    }
}

impl Config {
    /// Get the config file path
    #[must_use]
    pub fn config_path() -> PathBuf {
        paths::global_config()
    }

    /// Load the global config, with environment overrides applied
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::load_from(&Self::config_path())?;
        config.apply_env();
        Ok(config)
    }

    /// Load config from `path`, or the defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply environment variable overrides
    pub fn apply_env(&mut self) {
        if let Some(url) = non_empty_env(ENV_POLICY_API_URL) {
            self.policy.api_base_url = url;
        }
        if let Some(path) = non_empty_env(ENV_LOCAL_POLICY) {
            self.policy.local_override = Some(PathBuf::from(path));
        }
    }

    /// The GitHub token, if the configured variable is set
    #[must_use]
    pub fn token(&self) -> Option<String> {
        non_empty_env(&self.github.token_env)
    }

    /// Deadline for policy resolution, `None` when `timeout_secs` is 0
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        match self.policy.timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
