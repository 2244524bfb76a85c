//! Smoke tests for CLI argument parsing.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_subcommands() {
    Command::cargo_bin("habitctl")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("toggle"))
        .stdout(predicate::str::contains("stats"));
}

#[test]
fn test_no_subcommand_shows_usage() {
    Command::cargo_bin("habitctl")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_rejects_unknown_subcommand() {
    Command::cargo_bin("habitctl")
        .unwrap()
        .arg("frobnicate")
        .assert()
        .failure();
}
