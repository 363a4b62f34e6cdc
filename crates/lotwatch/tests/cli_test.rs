//! Integration tests for the `lotwatch` CLI binary.
//!
//! These tests validate argument parsing, help output, shell completions,
//! and error handling — all without requiring a live dashboard server.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `lotwatch` binary with env isolation.
///
/// Clears all `LOTWATCH_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn lotwatch_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("lotwatch");
    cmd.env("HOME", "/tmp/lotwatch-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/lotwatch-cli-test-nonexistent")
        .env_remove("LOTWATCH_SERVER")
        .env_remove("LOTWATCH_API_KEY")
        .env_remove("LOTWATCH_SESSION")
        .env_remove("LOTWATCH_INSECURE")
        .env_remove("LOTWATCH_TIMEOUT")
        .env_remove("LOTWATCH_OUTPUT")
        .env_remove("LOTWATCH_PASSWORD");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = lotwatch_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    lotwatch_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("parking-lot")
            .and(predicate::str::contains("watch"))
            .and(predicate::str::contains("devices"))
            .and(predicate::str::contains("open-gate"))
            .and(predicate::str::contains("book")),
    );
}

#[test]
fn test_version_flag() {
    lotwatch_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("lotwatch"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    lotwatch_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    lotwatch_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_completions_fish() {
    lotwatch_cmd()
        .args(["completions", "fish"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = lotwatch_cmd().arg("foobar").output().unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for invalid subcommand"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_devices_without_server() {
    let output = lotwatch_cmd().arg("devices").output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(
        text.contains("server") || text.contains("--server") || text.contains("login"),
        "Expected error pointing at --server or login:\n{text}"
    );
}

#[test]
fn test_open_gate_without_server() {
    lotwatch_cmd()
        .args(["open-gate", "lot-a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("server").or(predicate::str::contains("login")));
}

#[test]
fn test_invalid_output_format() {
    let output = lotwatch_cmd()
        .args(["--output", "invalid", "devices"])
        .output()
        .unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for invalid output format"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("invalid")
            || text.contains("possible values")
            || text.contains("valid value"),
        "Expected error about valid output formats:\n{text}"
    );
}

#[test]
fn test_book_slot_conflicts_with_clear() {
    let output = lotwatch_cmd()
        .args(["book", "lot-a", "--slot", "1", "--clear"])
        .output()
        .unwrap();
    assert!(
        !output.status.success(),
        "Expected --slot/--clear conflict to fail"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("cannot be used with") || text.contains("conflict"),
        "Expected conflict error:\n{text}"
    );
}

#[test]
fn test_config_file_with_invalid_server() {
    let dir = tempfile::tempdir().unwrap();
    let cfg_dir = dir.path().join("lotwatch");
    std::fs::create_dir_all(&cfg_dir).unwrap();
    std::fs::write(cfg_dir.join("config.toml"), "server = \"not a url\"\n").unwrap();

    let output = lotwatch_cmd()
        .env("XDG_CONFIG_HOME", dir.path())
        .arg("devices")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(
        text.contains("invalid URL") || text.contains("Invalid value"),
        "Expected URL validation error:\n{text}"
    );
}

#[test]
fn test_global_flags_parsing() {
    // All flags should parse correctly — the failure should be about the
    // missing server, not about argument parsing.
    lotwatch_cmd()
        .args([
            "--output",
            "json",
            "--verbose",
            "--insecure",
            "--timeout",
            "60",
            "devices",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("server").or(predicate::str::contains("login")));
}

// ── Subcommand help discovery ───────────────────────────────────────

#[test]
fn test_exit_subcommands_exist() {
    lotwatch_cmd()
        .args(["exit", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("approve").and(predicate::str::contains("revoke")));
}

#[test]
fn test_watch_help_shows_defaults() {
    lotwatch_cmd()
        .args(["watch", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("lotwatch.html").and(predicate::str::contains("interval")),
        );
}

#[test]
fn test_book_help_shows_slot_flag() {
    lotwatch_cmd()
        .args(["book", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--slot").and(predicate::str::contains("--clear")));
}
