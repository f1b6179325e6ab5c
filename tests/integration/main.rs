//! Integration tests for the sourcelevel CLI
//!
//! Every test runs the binary against files in a temporary directory with
//! a local policy, so no network access is needed.

use assert_cmd::cargo;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A scratch directory doubling as HOME and XDG config root
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// A sourcelevel command isolated from the user's config and environment
    fn cmd(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::Command::new(cargo::cargo_bin!("sourcelevel"));
        cmd.current_dir(self.path())
            .env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join(".config"))
            .env_remove("SOURCELEVEL_POLICY_API_URL")
            .env_remove("SOURCELEVEL_LOCAL_POLICY")
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }
}

const L3_REVIEW_POLICY: &str = r#"{
  "protected_branches": [
    {
      "name": "main",
      "since": "2024-01-10T00:00:00Z",
      "target_level": "SLSA_SOURCE_LEVEL_3",
      "require_review": true
    }
  ]
}"#;

const L3_REVIEW_CONTROLS: &str = r#"{
  "commit_push_time": "2024-02-01T00:00:00Z",
  "controls": [
    {"name": "CONTINUITY_ENFORCED", "since": "2024-01-01T00:00:00Z"},
    {"name": "PROVENANCE_AVAILABLE", "since": "2024-01-02T00:00:00Z"},
    {"name": "REVIEW_ENFORCED", "since": "2024-01-03T00:00:00Z"}
  ]
}"#;

const CONTINUITY_ONLY_CONTROLS: &str = r#"{
  "commit_push_time": "2024-02-01T00:00:00Z",
  "controls": [
    {"name": "CONTINUITY_ENFORCED", "since": "2024-01-01T00:00:00Z"}
  ]
}"#;

// =============================================================================
// VERSION
// =============================================================================

#[test]
fn test_version() {
    let ws = Workspace::new();
    ws.cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sourcelevel v"));
}

#[test]
fn test_version_json() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["--json", "version"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"version\""));
}

// =============================================================================
// CHECK
// =============================================================================

#[test]
fn test_check_meets_local_policy() {
    let ws = Workspace::new();
    let policy = ws.write("source-policy.json", L3_REVIEW_POLICY);
    let controls = ws.write("status.json", L3_REVIEW_CONTROLS);

    ws.cmd()
        .arg("check")
        .arg("octo-org/widgets@main")
        .arg("--controls")
        .arg(&controls)
        .arg("--use-local-policy")
        .arg(&policy)
        .assert()
        .success()
        .stdout(predicate::str::contains("SLSA_SOURCE_LEVEL_3, REVIEW_ENFORCED"))
        .stdout(predicate::str::contains("source-policy.json"));
}

#[test]
fn test_check_json_output() {
    let ws = Workspace::new();
    let policy = ws.write("source-policy.json", L3_REVIEW_POLICY);
    let controls = ws.write("status.json", L3_REVIEW_CONTROLS);

    let output = ws
        .cmd()
        .args(["--json", "check", "--owner", "octo-org", "--repo", "widgets", "--branch", "main"])
        .arg("--controls")
        .arg(&controls)
        .arg("--use-local-policy")
        .arg(&policy)
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["compliant"], true);
    assert_eq!(
        json["verified_levels"],
        serde_json::json!(["SLSA_SOURCE_LEVEL_3", "REVIEW_ENFORCED"])
    );
    assert_eq!(json["repository"]["branch"], "main");
}

#[test]
fn test_check_policy_not_met_exits_nonzero() {
    let ws = Workspace::new();
    let policy = ws.write("source-policy.json", L3_REVIEW_POLICY);
    let controls = ws.write("status.json", CONTINUITY_ONLY_CONTROLS);

    ws.cmd()
        .arg("check")
        .arg("octo-org/widgets@main")
        .arg("--controls")
        .arg(&controls)
        .arg("--use-local-policy")
        .arg(&policy)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("NOT COMPLIANT"))
        .stdout(predicate::str::contains(
            "error computing slsa level: policy sets target level SLSA_SOURCE_LEVEL_3, but branch is only eligible for SLSA_SOURCE_LEVEL_2",
        ));
}

#[test]
fn test_check_unlisted_branch_uses_default() {
    let ws = Workspace::new();
    let policy = ws.write("source-policy.json", L3_REVIEW_POLICY);
    let controls = ws.write("status.json", CONTINUITY_ONLY_CONTROLS);

    ws.cmd()
        .arg("check")
        .arg("octo-org/widgets@develop")
        .arg("--controls")
        .arg(&controls)
        .arg("--use-local-policy")
        .arg(&policy)
        .assert()
        .success()
        .stdout(predicate::str::contains("SLSA_SOURCE_LEVEL_1"))
        .stdout(predicate::str::contains("DEFAULT"));
}

#[test]
fn test_check_missing_local_policy_fails() {
    let ws = Workspace::new();
    let controls = ws.write("status.json", L3_REVIEW_CONTROLS);

    ws.cmd()
        .arg("check")
        .arg("octo-org/widgets@main")
        .arg("--controls")
        .arg(&controls)
        .arg("--use-local-policy")
        .arg(ws.path().join("absent.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("reading policy file"));
}

#[test]
fn test_check_requires_branch() {
    let ws = Workspace::new();
    let controls = ws.write("status.json", L3_REVIEW_CONTROLS);

    ws.cmd()
        .arg("check")
        .arg("octo-org/widgets")
        .arg("--controls")
        .arg(&controls)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Branch required"));
}

#[test]
fn test_check_rejects_locator_flag_conflicts() {
    let ws = Workspace::new();
    let controls = ws.write("status.json", L3_REVIEW_CONTROLS);
    let policy = ws.write("policy.json", L3_REVIEW_POLICY);

    for (flag, value, message) in [
        ("--owner", "someone-else", "duplicate owner specified"),
        ("--repo", "gadgets", "duplicate repository name specified"),
        ("--branch", "release", "duplicate branch specified"),
    ] {
        ws.cmd()
            .arg("check")
            .arg("octo-org/widgets@main")
            .args([flag, value])
            .arg("--controls")
            .arg(&controls)
            .arg("--use-local-policy")
            .arg(&policy)
            .assert()
            .failure()
            .stdout(predicate::str::contains("Verified").not())
            .stderr(predicate::str::contains(message));
    }
}

#[test]
fn test_check_accepts_matching_locator_and_flags() {
    let ws = Workspace::new();
    let controls = ws.write("status.json", L3_REVIEW_CONTROLS);
    let policy = ws.write("policy.json", L3_REVIEW_POLICY);

    ws.cmd()
        .arg("check")
        .arg("octo-org/widgets@main")
        .args(["--owner", "octo-org", "--branch", "main"])
        .arg("--controls")
        .arg(&controls)
        .arg("--use-local-policy")
        .arg(&policy)
        .assert()
        .success()
        .stdout(predicate::str::contains("SLSA_SOURCE_LEVEL_3"));
}

#[test]
fn test_check_rejects_commit_locator() {
    let ws = Workspace::new();
    let controls = ws.write("status.json", L3_REVIEW_CONTROLS);
    let policy = ws.write("policy.json", L3_REVIEW_POLICY);

    ws.cmd()
        .arg("check")
        .arg("git+https://github.com/octo-org/widgets@0123456789abcdef0123456789abcdef01234567")
        .args(["--branch", "main"])
        .arg("--controls")
        .arg(&controls)
        .arg("--use-local-policy")
        .arg(&policy)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Commit locators are not supported"));
}

#[test]
fn test_check_missing_controls_file() {
    let ws = Workspace::new();

    ws.cmd()
        .args(["check", "octo-org/widgets@main", "--controls", "nope.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn test_local_policy_from_environment() {
    let ws = Workspace::new();
    let policy = ws.write("source-policy.json", L3_REVIEW_POLICY);
    let controls = ws.write("status.json", L3_REVIEW_CONTROLS);

    ws.cmd()
        .env("SOURCELEVEL_LOCAL_POLICY", &policy)
        .arg("check")
        .arg("octo-org/widgets@main")
        .arg("--controls")
        .arg(&controls)
        .assert()
        .success()
        .stdout(predicate::str::contains("REVIEW_ENFORCED"));
}

#[cfg(target_os = "linux")]
#[test]
fn test_local_policy_from_config_file() {
    let ws = Workspace::new();
    let policy = ws.write("source-policy.json", L3_REVIEW_POLICY);
    let controls = ws.write("status.json", L3_REVIEW_CONTROLS);
    ws.write(
        ".config/sourcelevel/config.toml",
        &format!("[policy]\nlocal_override = {:?}\n", policy.display().to_string()),
    );

    ws.cmd()
        .arg("check")
        .arg("octo-org/widgets@main")
        .arg("--controls")
        .arg(&controls)
        .assert()
        .success()
        .stdout(predicate::str::contains("REVIEW_ENFORCED"));
}

// =============================================================================
// VERIFY-PROV
// =============================================================================

#[test]
fn test_verify_prov_uses_recorded_branch() {
    let ws = Workspace::new();
    let policy = ws.write("source-policy.json", L3_REVIEW_POLICY);
    let statement = ws.write(
        "statement.json",
        r#"{
  "_type": "https://in-toto.io/Statement/v1",
  "subject": [{"digest": {"gitCommit": "0123456789abcdef0123456789abcdef01234567"}}],
  "predicateType": "https://github.com/slsa-framework/slsa-source-poc/source-provenance/v1-draft",
  "predicate": {
    "repo_uri": "https://github.com/octo-org/widgets",
    "branch": "refs/heads/main",
    "controls": [
      {"name": "CONTINUITY_ENFORCED", "since": "2024-01-01T00:00:00Z"},
      {"name": "PROVENANCE_AVAILABLE", "since": "2024-01-02T00:00:00Z"},
      {"name": "REVIEW_ENFORCED", "since": "2024-01-03T00:00:00Z"}
    ]
  }
}"#,
    );

    ws.cmd()
        .arg("verify-prov")
        .arg("octo-org/widgets")
        .arg("--statement")
        .arg(&statement)
        .arg("--use-local-policy")
        .arg(&policy)
        .assert()
        .success()
        .stdout(predicate::str::contains("octo-org/widgets@main"))
        .stdout(predicate::str::contains("SLSA_SOURCE_LEVEL_3, REVIEW_ENFORCED"));
}

#[test]
fn test_verify_prov_rejects_foreign_predicate() {
    let ws = Workspace::new();
    let policy = ws.write("source-policy.json", L3_REVIEW_POLICY);
    let statement = ws.write(
        "statement.json",
        r#"{"_type": "https://in-toto.io/Statement/v1", "predicateType": "https://slsa.dev/provenance/v1", "predicate": {}}"#,
    );

    ws.cmd()
        .arg("verify-prov")
        .arg("octo-org/widgets@main")
        .arg("--statement")
        .arg(&statement)
        .arg("--use-local-policy")
        .arg(&policy)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "unsupported predicate type: https://slsa.dev/provenance/v1",
        ));
}

// =============================================================================
// POLICY
// =============================================================================

#[test]
fn test_policy_show() {
    let ws = Workspace::new();
    let policy = ws.write("source-policy.json", L3_REVIEW_POLICY);

    ws.cmd()
        .args(["policy", "show", "octo-org/widgets@main", "--use-local-policy"])
        .arg(&policy)
        .assert()
        .success()
        .stdout(predicate::str::contains("SLSA_SOURCE_LEVEL_3"))
        .stdout(predicate::str::contains("2024-01-10T00:00:00.000Z"));
}

#[test]
fn test_policy_draft_writes_repository_layout() {
    let ws = Workspace::new();
    let controls = ws.write("status.json", L3_REVIEW_CONTROLS);
    let out = ws.path().join("policies");

    ws.cmd()
        .args(["policy", "draft", "octo-org/widgets@main", "--controls"])
        .arg(&controls)
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    let written = out.join("policy/github.com/octo-org/widgets/source-policy.json");
    let content = fs::read_to_string(written).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    let branch = &json["protected_branches"][0];
    assert_eq!(branch["name"], "main");
    assert_eq!(branch["target_level"], "SLSA_SOURCE_LEVEL_3");
    assert_eq!(branch["require_review"], true);
    assert_eq!(branch["immutable_tags"], false);
}

#[test]
fn test_draft_then_check_round_trip() {
    let ws = Workspace::new();
    let controls = ws.write("status.json", CONTINUITY_ONLY_CONTROLS);
    let out = ws.path().join("policies");

    ws.cmd()
        .args(["policy", "draft", "octo-org/widgets@main", "--controls"])
        .arg(&controls)
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    // The draft takes effect now, after the recorded push
    let later = ws.write(
        "later.json",
        r#"{
  "commit_push_time": "2999-01-01T00:00:00Z",
  "controls": [{"name": "CONTINUITY_ENFORCED", "since": "2024-01-01T00:00:00Z"}]
}"#,
    );

    ws.cmd()
        .arg("check")
        .arg("octo-org/widgets@main")
        .arg("--controls")
        .arg(&later)
        .arg("--use-local-policy")
        .arg(out.join("policy/github.com/octo-org/widgets/source-policy.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("SLSA_SOURCE_LEVEL_2"));
}
