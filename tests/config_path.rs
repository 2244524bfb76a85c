//! Tests for config path resolution and `config init`.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_config_path_respects_home_env() {
    let temp = tempdir().unwrap();

    Command::cargo_bin("habitctl")
        .unwrap()
        .env("HABITCTL_HOME", temp.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(temp.path().to_str().unwrap()))
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_writes_template_once() {
    let temp = tempdir().unwrap();
    let config_path = temp.path().join("config.toml");

    Command::cargo_bin("habitctl")
        .unwrap()
        .env("HABITCTL_HOME", temp.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default config"));

    assert!(config_path.exists());
    let contents = std::fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains("request_timeout_secs"));

    // A second init refuses to clobber the existing file.
    Command::cargo_bin("habitctl")
        .unwrap()
        .env("HABITCTL_HOME", temp.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}
