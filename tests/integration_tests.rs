//! Integration tests for the authorguard CLI

use assert_cmd::Command;
use git2::Repository;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Fresh repository with a local identity, isolated from the user's own config
fn repo_with_identity(name: &str, email: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    let mut config = repo.config().unwrap();
    config.set_str("user.name", name).unwrap();
    config.set_str("user.email", email).unwrap();
    dir
}

fn authorguard(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("authorguard").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("RUST_LOG")
        .env_remove("AUTHORGUARD_CONFIG");
    cmd
}

fn write_config(dir: &Path, name: Option<&str>, email: Option<&str>) {
    let mut options = Vec::new();
    if let Some(name) = name {
        options.push(format!("name = '{name}'"));
    }
    if let Some(email) = email {
        options.push(format!("email = '{email}'"));
    }
    fs::write(
        dir.join("authorguard.toml"),
        format!(
            "[hooks.pre-commit]\nactions = [{{ action = \"validate_author\", options = {{ {} }} }}]\n",
            options.join(", ")
        ),
    )
    .unwrap();
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("authorguard").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("user.name and user.email"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("authorguard").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("authorguard"));
}

#[test]
fn test_invalid_subcommand() {
    let mut cmd = Command::cargo_bin("authorguard").unwrap();
    cmd.arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_run_without_patterns_passes() {
    let dir = repo_with_identity("Anyone", "anyone@anywhere");

    authorguard(dir.path())
        .args(["run", "pre-commit"])
        .assert()
        .success();
}

#[test]
fn test_run_matching_identity() {
    let dir = repo_with_identity("Some author name", "test@test.loc");
    write_config(dir.path(), Some("/[A-Z]+/"), Some(r"/test@test\.loc/"));

    authorguard(dir.path())
        .args(["run", "pre-commit"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pre-commit passed"));
}

#[test]
fn test_run_name_mismatch_aborts() {
    let dir = repo_with_identity("ABCDEF", "test@test.loc");
    write_config(dir.path(), Some("/^[1-9]+$/"), None);

    authorguard(dir.path())
        .args(["run", "pre-commit"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "author name 'ABCDEF' does not match pattern /^[1-9]+$/",
        ));
}

#[test]
fn test_run_email_mismatch_aborts() {
    let dir = repo_with_identity("ABCDEF", "test@test.loc");
    write_config(dir.path(), None, Some("/^[1-9]+$/"));

    authorguard(dir.path())
        .args(["run", "pre-commit"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("author email 'test@test.loc'"));
}

#[test]
fn test_run_malformed_pattern_is_config_error() {
    let dir = repo_with_identity("ABCDEF", "test@test.loc");
    write_config(dir.path(), Some("[A-F]+"), None);

    authorguard(dir.path())
        .args(["run", "pre-commit"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid `name` pattern"))
        .stderr(predicate::str::contains("does not match").not());
}

#[test]
fn test_run_stray_delimiter_is_config_error() {
    let dir = repo_with_identity("x", "test@test.loc");
    write_config(dir.path(), Some("/^x$/ i/"), None);

    authorguard(dir.path())
        .args(["run", "pre-commit"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid `name` pattern"))
        .stderr(predicate::str::contains("does not match").not());
}

#[test]
fn test_config_file_from_environment() {
    let dir = repo_with_identity("ABCDEF", "test@test.loc");
    fs::write(
        dir.path().join("team.toml"),
        "[hooks.pre-commit]\nactions = [{ action = \"validate_author\", options = { name = \"/^[1-9]+$/\" } }]\n",
    )
    .unwrap();

    authorguard(dir.path())
        .env("AUTHORGUARD_CONFIG", "team.toml")
        .args(["run", "pre-commit"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("author name 'ABCDEF'"));
}

#[test]
fn test_run_passes_hook_arguments_through() {
    let dir = repo_with_identity("ABCDEF", "test@test.loc");

    authorguard(dir.path())
        .args(["run", "commit-msg", ".git/COMMIT_EDITMSG"])
        .assert()
        .success();
}

#[test]
fn test_run_unknown_hook() {
    let dir = repo_with_identity("ABCDEF", "test@test.loc");

    authorguard(dir.path())
        .args(["run", "post-rewrite"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown hook: post-rewrite"));
}

#[test]
fn test_check_flags_override_config() {
    let dir = repo_with_identity("ABCDEF", "test@test.loc");
    write_config(dir.path(), Some("/^[1-9]+$/"), None);

    authorguard(dir.path())
        .args(["check", "--name", "/[A-F]+/"])
        .assert()
        .success();

    authorguard(dir.path())
        .args(["check", "--email", "/@/"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("author name"));
}

#[test]
fn test_install_and_uninstall() {
    let dir = repo_with_identity("ABCDEF", "test@test.loc");
    let hooks_dir = dir.path().join(".git").join("hooks");

    authorguard(dir.path()).arg("install").assert().success();

    let pre_commit = fs::read_to_string(hooks_dir.join("pre-commit")).unwrap();
    assert!(pre_commit.contains("authorguard run pre-commit"));
    assert!(hooks_dir.join("commit-msg").exists());

    authorguard(dir.path()).arg("uninstall").assert().success();
    assert!(!hooks_dir.join("pre-commit").exists());
    assert!(!hooks_dir.join("commit-msg").exists());
}

#[test]
fn test_install_keeps_foreign_hook() {
    let dir = repo_with_identity("ABCDEF", "test@test.loc");
    let hooks_dir = dir.path().join(".git").join("hooks");
    fs::create_dir_all(&hooks_dir).unwrap();
    fs::write(hooks_dir.join("pre-commit"), "#!/bin/sh\necho mine\n").unwrap();

    authorguard(dir.path())
        .args(["install", "--hooks", "pre-commit"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    authorguard(dir.path()).arg("uninstall").assert().success();
    assert_eq!(
        fs::read_to_string(hooks_dir.join("pre-commit")).unwrap(),
        "#!/bin/sh\necho mine\n"
    );
}

#[test]
fn test_config_commands() {
    let dir = repo_with_identity("ABCDEF", "test@test.loc");

    authorguard(dir.path())
        .args(["config", "init"])
        .assert()
        .success();
    assert!(dir.path().join("authorguard.toml").exists());

    authorguard(dir.path())
        .args(["config", "init"])
        .assert()
        .failure();

    authorguard(dir.path())
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));

    authorguard(dir.path())
        .args(["config", "show", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("validate_author"));

    write_config(dir.path(), None, Some("/x/q"));
    authorguard(dir.path())
        .args(["config", "validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported modifier 'q'"));
}

#[test]
fn test_status_outside_repository() {
    let dir = TempDir::new().unwrap();

    authorguard(dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not in a git repository"));
}
