//! CLI integration tests
//!
//! These run the binary in `--list` mode, which needs no terminal.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Create a project with a manifest and a .gitignore
fn project(manifest: &str, gitignore: &str) -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::write(dir.path().join("package.json"), manifest).unwrap();
    fs::write(dir.path().join(".gitignore"), gitignore).unwrap();
    dir
}

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn depsweep() -> Command {
    Command::cargo_bin("depsweep").expect("binary should be built")
}

/// Run `--list --format json` and parse the result
fn list_json(root: &Path, extra_args: &[&str]) -> Vec<String> {
    let output = depsweep()
        .arg(root)
        .args(["--list", "--format", "json", "--quiet"])
        .args(extra_args)
        .output()
        .expect("Failed to execute command");

    assert!(
        output.status.success(),
        "depsweep failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be a JSON array")
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_cli_help() {
    depsweep()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("depsweep"))
        .stdout(predicate::str::contains("--list"))
        .stdout(predicate::str::contains("--exclude"));
}

#[test]
fn test_cli_version() {
    depsweep()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("depsweep"));
}

// ============================================================================
// Detection
// ============================================================================

#[test]
fn test_unused_dependency_is_listed() {
    let dir = project(
        r#"{"dependencies": {"lodash": "^4", "chalk": "^5"}}"#,
        "node_modules\n",
    );
    write(dir.path(), "index.js", "const _ = require('lodash');\n");
    write(dir.path(), "node_modules/chalk/index.js", "module.exports = 'chalk';\n");

    assert_eq!(list_json(dir.path(), &[]), vec!["chalk"]);
}

#[test]
fn test_dev_dependencies_are_candidates() {
    let dir = project(
        r#"{"dependencies": {"react": "^18"}, "devDependencies": {"jest": "^29", "react": "^18"}}"#,
        "",
    );
    write(dir.path(), "src/App.jsx", "import React from 'react';\n");

    assert_eq!(list_json(dir.path(), &[]), vec!["jest"]);
}

#[test]
fn test_manifest_scripts_count_as_usage() {
    let dir = project(
        r#"{"scripts": {"test": "jest"}, "devDependencies": {"jest": "^29", "nodemon": "^3"}}"#,
        "",
    );

    assert_eq!(list_json(dir.path(), &[]), vec!["nodemon"]);
}

#[test]
fn test_exclude_flag_prunes_directory() {
    let dir = project(r#"{"dependencies": {"moment": "^2"}}"#, "");
    write(dir.path(), "legacy/dates.js", "require('moment')\n");

    assert!(list_json(dir.path(), &[]).is_empty());
    assert_eq!(list_json(dir.path(), &["--exclude", "legacy"]), vec!["moment"]);
}

#[test]
fn test_gitignore_entries_are_excluded() {
    let dir = project(r#"{"dependencies": {"moment": "^2"}}"#, "# build\ndist\n");
    write(dir.path(), "dist/bundle.js", "require('moment')\n");

    assert_eq!(list_json(dir.path(), &[]), vec!["moment"]);
}

#[test]
fn test_config_file_excludes() {
    let dir = project(r#"{"dependencies": {"moment": "^2"}}"#, "");
    write(dir.path(), "vendor/dates.js", "require('moment')\n");
    write(dir.path(), ".depsweep.yml", "exclude:\n  - vendor\n");

    assert_eq!(list_json(dir.path(), &[]), vec!["moment"]);
}

#[test]
fn test_terminal_list_format() {
    let dir = project(r#"{"dependencies": {"left-pad": "^1"}}"#, "");

    depsweep()
        .arg(dir.path())
        .args(["--list", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 unused dependencies"))
        .stdout(predicate::str::contains("left-pad"));
}

#[test]
fn test_output_file() {
    let dir = project(r#"{"dependencies": {"left-pad": "^1"}}"#, "");
    let out = TempDir::new().unwrap();
    let out_path = out.path().join("unused.json");

    depsweep()
        .arg(dir.path())
        .args(["--list", "--format", "json", "--quiet", "--output"])
        .arg(&out_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Report written to"));

    let written: Vec<String> = serde_json::from_str(&fs::read_to_string(out_path).unwrap()).unwrap();
    assert_eq!(written, vec!["left-pad"]);
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_missing_manifest_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".gitignore"), "").unwrap();

    depsweep()
        .arg(dir.path())
        .args(["--list", "--quiet"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("package.json"));
}

#[test]
fn test_missing_ignore_file_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("package.json"), "{}").unwrap();

    depsweep()
        .arg(dir.path())
        .args(["--list", "--quiet"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(".gitignore"));
}

#[test]
fn test_malformed_manifest_fails() {
    let dir = project("{ not json", "");

    depsweep()
        .arg(dir.path())
        .args(["--list", "--quiet"])
        .assert()
        .failure();
}

#[test]
fn test_nonexistent_root_fails() {
    depsweep()
        .args(["/nonexistent/path/to/project", "--list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}
