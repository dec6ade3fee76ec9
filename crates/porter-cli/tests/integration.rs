//! Integration tests for the porter CLI.
//!
//! These tests verify the CLI commands work correctly end-to-end against
//! real git repositories in temp directories.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use serial_test::serial;
use std::fs;
use std::path::Path;
use std::process::Command as StdCommand;
use tempfile::TempDir;

/// Helper to run git in a directory.
fn git(dir: &Path, args: &[&str]) {
    let output = StdCommand::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to run git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Helper to create a git repository in a temp directory.
fn setup_git_repo() -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp dir");

    git(temp.path(), &["init"]);
    git(temp.path(), &["config", "user.email", "test@example.com"]);
    git(temp.path(), &["config", "user.name", "Test User"]);

    // Create initial commit so we have a valid HEAD
    let readme = temp.path().join("README.md");
    fs::write(&readme, "# Test Repo\n").expect("Failed to write README");
    git(temp.path(), &["add", "."]);
    git(temp.path(), &["commit", "-m", "Initial commit"]);
    git(temp.path(), &["branch", "-M", "main"]);

    temp
}

/// Helper to get the porter command.
fn porter() -> Command {
    Command::new(env!("CARGO_BIN_EXE_porter"))
}

// ============================================================================
// Basic CLI tests
// ============================================================================

#[test]
fn test_version_flag() {
    porter()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("porter"));
}

#[test]
fn test_help_flag() {
    porter()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("cherry"))
        .stdout(predicate::str::contains("stage"))
        .stdout(predicate::str::contains("prune"))
        .stdout(predicate::str::contains("forks"));
}

#[test]
fn test_completions() {
    porter()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("porter"));
}

#[test]
fn test_outside_git_repo_fails() {
    let temp = TempDir::new().unwrap();
    porter()
        .args(["top"])
        .current_dir(&temp)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not inside a git repository"));
}

// ============================================================================
// stage
// ============================================================================

/// Set up a repo with two unstaged modifications in different files.
fn setup_stage_repo() -> TempDir {
    let temp = setup_git_repo();

    fs::write(temp.path().join("alpha.txt"), "one\ntwo\nthree\n").unwrap();
    fs::write(temp.path().join("beta.txt"), "red\ngreen\nblue\n").unwrap();
    git(temp.path(), &["add", "."]);
    git(temp.path(), &["commit", "-m", "Add files"]);

    fs::write(
        temp.path().join("alpha.txt"),
        "one\ntwo\nthree\nalpha_marker\n",
    )
    .unwrap();
    fs::write(
        temp.path().join("beta.txt"),
        "red\ngreen\nblue\nbeta_marker\n",
    )
    .unwrap();

    temp
}

#[test]
#[serial]
fn test_stage_applies_matching_hunks_only() {
    let temp = setup_stage_repo();

    porter()
        .args(["stage", "--pattern", "alpha_marker"])
        .current_dir(&temp)
        .assert()
        .success()
        .stdout(predicate::str::contains("staged 1 hunk(s)"));

    let cached = StdCommand::new("git")
        .args(["diff", "--cached"])
        .current_dir(&temp)
        .output()
        .unwrap();
    let cached = String::from_utf8_lossy(&cached.stdout);
    assert!(cached.contains("alpha_marker"));
    assert!(!cached.contains("beta_marker"));
}

#[test]
#[serial]
fn test_stage_preview_does_not_stage() {
    let temp = setup_stage_repo();

    porter()
        .args(["stage", "--pattern", "beta_marker", "--preview"])
        .current_dir(&temp)
        .assert()
        .success()
        .stdout(predicate::str::contains("beta_marker"))
        .stderr(predicate::str::contains("previewing 1 hunk(s)"));

    let cached = StdCommand::new("git")
        .args(["diff", "--cached"])
        .current_dir(&temp)
        .output()
        .unwrap();
    assert!(cached.stdout.is_empty());
}

#[test]
fn test_stage_no_matches() {
    let temp = setup_stage_repo();

    porter()
        .args(["stage", "--pattern", "no_such_marker"])
        .current_dir(&temp)
        .assert()
        .success()
        .stderr(predicate::str::contains("no hunks matched"));
}

#[test]
fn test_stage_invalid_pattern() {
    let temp = setup_git_repo();

    porter()
        .args(["stage", "--pattern", "[unclosed"])
        .current_dir(&temp)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid regex pattern"));
}

// ============================================================================
// workspace
// ============================================================================

#[test]
fn test_workspace_rejects_bad_format() {
    let temp = setup_git_repo();

    porter()
        .args(["workspace", "no-colon-here"])
        .current_dir(&temp)
        .assert()
        .failure()
        .stderr(predicate::str::contains("user:branch"));
}

#[test]
fn test_workspace_switches_branch() {
    let temp = setup_git_repo();
    git(temp.path(), &["branch", "their-feature"]);

    porter()
        .args(["workspace", "someone:their-feature"])
        .current_dir(&temp)
        .assert()
        .success();

    let head = StdCommand::new("git")
        .args(["rev-parse", "--abbrev-ref", "HEAD"])
        .current_dir(&temp)
        .output()
        .unwrap();
    assert_eq!(String::from_utf8_lossy(&head.stdout).trim(), "their-feature");
}

// ============================================================================
// remote resolution
// ============================================================================

#[test]
fn test_cherry_without_fork_remote_names_config_key() {
    let temp = setup_git_repo();

    porter()
        .args(["cherry", "1234"])
        .current_dir(&temp)
        .env("PORTER_GITHUB_USER", "testuser")
        .assert()
        .failure()
        .stderr(predicate::str::contains("gitflow.fork.remote"));
}

#[test]
#[serial]
fn test_forks_normalizes_fork_remote() {
    let temp = setup_git_repo();
    git(
        temp.path(),
        &[
            "remote",
            "add",
            "origin",
            "https://github.com/testuser/widget.git",
        ],
    );
    git(
        temp.path(),
        &[
            "remote",
            "add",
            "upstream",
            "https://github.com/widgets/widget.git",
        ],
    );

    porter()
        .args(["forks"])
        .current_dir(&temp)
        .env("PORTER_GITHUB_USER", "testuser")
        .assert()
        .success();

    // Remote renamed to the identity and recorded in config.
    let remotes = StdCommand::new("git")
        .args(["remote"])
        .current_dir(&temp)
        .output()
        .unwrap();
    let remotes = String::from_utf8_lossy(&remotes.stdout);
    assert!(remotes.contains("testuser"));
    assert!(!remotes.lines().any(|line| line == "origin"));

    let fork_key = StdCommand::new("git")
        .args(["config", "gitflow.fork.remote"])
        .current_dir(&temp)
        .output()
        .unwrap();
    assert_eq!(String::from_utf8_lossy(&fork_key.stdout).trim(), "testuser");

    // URLs rewritten to canonical HTTPS-fetch/SSH-push form.
    let push_url = StdCommand::new("git")
        .args(["remote", "get-url", "--push", "testuser"])
        .current_dir(&temp)
        .output()
        .unwrap();
    assert_eq!(
        String::from_utf8_lossy(&push_url.stdout).trim(),
        "git@github.com:testuser/widget"
    );

    let upstream_key = StdCommand::new("git")
        .args(["config", "gitflow.upstream.remote"])
        .current_dir(&temp)
        .output()
        .unwrap();
    assert_eq!(
        String::from_utf8_lossy(&upstream_key.stdout).trim(),
        "upstream"
    );
}

#[test]
#[serial]
fn test_forks_no_fix_urls_leaves_urls() {
    let temp = setup_git_repo();
    git(
        temp.path(),
        &[
            "remote",
            "add",
            "testuser",
            "https://github.com/testuser/widget.git",
        ],
    );
    git(
        temp.path(),
        &[
            "remote",
            "add",
            "upstream",
            "https://github.com/widgets/widget.git",
        ],
    );

    porter()
        .args(["forks", "--no-fix-urls"])
        .current_dir(&temp)
        .env("PORTER_GITHUB_USER", "testuser")
        .assert()
        .success();

    let url = StdCommand::new("git")
        .args(["remote", "get-url", "testuser"])
        .current_dir(&temp)
        .output()
        .unwrap();
    assert_eq!(
        String::from_utf8_lossy(&url.stdout).trim(),
        "https://github.com/testuser/widget.git"
    );
}

// ============================================================================
// top / prune
// ============================================================================

#[test]
fn test_top_lists_recent_branches() {
    let temp = setup_git_repo();
    git(temp.path(), &["branch", "feature-x"]);

    porter().args(["top"]).current_dir(&temp).assert().success();
}

#[test]
#[serial]
fn test_prune_dry_run_reports_merged_branches() {
    // An "upstream" repo with a main branch, added as a remote.
    let upstream = setup_git_repo();
    let temp = setup_git_repo();
    git(
        temp.path(),
        &[
            "remote",
            "add",
            "upstream",
            upstream.path().to_str().unwrap(),
        ],
    );
    // A local branch fully merged into upstream/main after fetch.
    git(temp.path(), &["fetch", "upstream"]);
    git(
        temp.path(),
        &["branch", "feature-x", "upstream/main"],
    );

    porter()
        .args(["prune", "--dry-run"])
        .current_dir(&temp)
        .assert()
        .success()
        .stdout(predicate::str::contains("would delete feature-x"));

    // Dry run deleted nothing.
    let branches = StdCommand::new("git")
        .args(["branch"])
        .current_dir(&temp)
        .output()
        .unwrap();
    assert!(String::from_utf8_lossy(&branches.stdout).contains("feature-x"));
}
