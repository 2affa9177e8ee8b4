//! Smoke tests for the owacov CLI
//!
//! These tests verify basic CLI functionality works end to end.

#![allow(deprecated)] // Allow deprecated Command::cargo_bin until assert_cmd is updated
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a command for the owacov binary
fn owacov() -> Command {
    Command::cargo_bin("owacov").expect("owacov binary should exist")
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    owacov()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.3.0"));
}

#[test]
fn test_help_flag() {
    owacov()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("random"))
        .stdout(predicate::str::contains("matrix"))
        .stdout(predicate::str::contains("replay"));
}

#[test]
fn test_no_args_shows_help() {
    owacov().assert().failure(); // Requires a subcommand
}

#[test]
fn test_random_subcommand_help() {
    owacov()
        .args(["random", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--unknown-percent"))
        .stdout(predicate::str::contains("--maxsat-oracle"));
}

// ============================================================================
// Runs
// ============================================================================

#[test]
fn test_random_run_writes_series() {
    let dir = TempDir::new().unwrap();
    owacov()
        .args(["-q", "--no-progress", "--output"])
        .arg(dir.path())
        .args(["random", "-n", "2", "-p", "10", "-m", "2000"])
        .assert()
        .success();

    let text = fs::read_to_string(dir.path().join("n=2_p=0.1.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["id"], "n=2_p=0.1");
    assert!(!value["series"]["ticks"].as_array().unwrap().is_empty());
}

#[test]
fn test_replay_run_writes_series() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("recorded.txt");
    fs::write(&input, "?F\nTF\n# comment\nTT\n").unwrap();

    owacov()
        .args(["-q", "--output"])
        .arg(dir.path().join("out"))
        .args(["replay", "--input"])
        .arg(&input)
        .assert()
        .success();

    let text = fs::read_to_string(dir.path().join("out/recorded.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["observed_counts"], serde_json::json!([1, 2, 3]));
    assert_eq!(value["stop_reason"], "Exhausted");
}

#[test]
fn test_bad_replay_fails_with_line_number() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("broken.txt");
    fs::write(&input, "TT\nTX\n").unwrap();

    owacov()
        .args(["-q", "--output"])
        .arg(dir.path())
        .args(["replay", "-i"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn test_missing_replay_file_fails() {
    owacov()
        .args(["-q", "replay", "-i", "/nonexistent/owacov/input.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}
