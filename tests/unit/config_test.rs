//! Tests for global configuration management

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serial_test::serial;
use sourcelevel::config::{Config, ConfigError, ENV_LOCAL_POLICY, ENV_POLICY_API_URL};
use tempfile::TempDir;

// =============================================================================
// FILE LOADING
// =============================================================================

#[test]
fn test_missing_file_yields_defaults() {
    let temp = TempDir::new().unwrap();
    let config = Config::load_from(&temp.path().join("config.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_load_full_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(
        &path,
        r#"
[policy]
repo_owner = "acme"
repo_name = "source-policies"
api_base_url = "https://github.example.com/api/v3"
timeout_secs = 5
local_override = "/srv/policies/source-policy.json"

[github]
token_env = "ACME_TOKEN"
"#,
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.policy.repo_owner, "acme");
    assert_eq!(config.policy.repo_name, "source-policies");
    assert_eq!(config.policy.api_base_url, "https://github.example.com/api/v3");
    assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
    assert_eq!(
        config.policy.local_override,
        Some(PathBuf::from("/srv/policies/source-policy.json"))
    );
    assert_eq!(config.github.token_env, "ACME_TOKEN");
}

#[test]
fn test_invalid_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(&path, "[policy]\ntimeout_secs = \"soon\"\n").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().starts_with("parsing config "));
}

#[test]
fn test_config_round_trips_through_toml() {
    let mut config = Config::default();
    config.policy.timeout_secs = 12;
    let text = toml::to_string_pretty(&config).unwrap();
    let parsed: Config = toml::from_str(&text).unwrap();
    assert_eq!(parsed, config);
}

// =============================================================================
// ENVIRONMENT OVERRIDES
// =============================================================================

#[test]
#[serial]
fn test_env_overrides_file() {
    // SAFETY: serialized with every other test touching the environment
    unsafe {
        std::env::set_var(ENV_POLICY_API_URL, "http://127.0.0.1:9999");
        std::env::set_var(ENV_LOCAL_POLICY, "/tmp/override.json");
    }

    let mut config = Config::default();
    config.apply_env();

    unsafe {
        std::env::remove_var(ENV_POLICY_API_URL);
        std::env::remove_var(ENV_LOCAL_POLICY);
    }

    assert_eq!(config.policy.api_base_url, "http://127.0.0.1:9999");
    assert_eq!(config.policy.local_override, Some(PathBuf::from("/tmp/override.json")));
}

#[test]
#[serial]
fn test_empty_env_is_ignored() {
    unsafe {
        std::env::set_var(ENV_POLICY_API_URL, "");
    }

    let mut config = Config::default();
    config.apply_env();

    unsafe {
        std::env::remove_var(ENV_POLICY_API_URL);
    }

    assert_eq!(config.policy.api_base_url, "https://api.github.com");
}

#[test]
#[serial]
fn test_token_read_from_configured_variable() {
    let mut config = Config::default();
    config.github.token_env = "SOURCELEVEL_TEST_TOKEN".to_string();

    unsafe {
        std::env::set_var("SOURCELEVEL_TEST_TOKEN", "ghp_example");
    }
    let token = config.token();
    unsafe {
        std::env::remove_var("SOURCELEVEL_TEST_TOKEN");
    }

    assert_eq!(token.as_deref(), Some("ghp_example"));
    assert!(config.token().is_none());
}
