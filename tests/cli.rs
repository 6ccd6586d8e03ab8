// ABOUTME: Integration tests for the gantry CLI commands.
// ABOUTME: Validates --help output, argument checking, and error reporting.

use assert_cmd::Command;
use predicates::prelude::*;

fn gantry_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("gantry"));
    cmd.env_remove("GANTRY_BASE_URL").env_remove("GANTRY_LOGLEVEL");
    cmd
}

#[test]
fn help_shows_commands() {
    gantry_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("deploy"))
        .stdout(predicate::str::contains("containers"))
        .stdout(predicate::str::contains("ports"))
        .stdout(predicate::str::contains("--base-url"));
}

#[test]
fn deploy_help_shows_tag_flags() {
    gantry_cmd()
        .args(["deploy", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--from-tag"))
        .stdout(predicate::str::contains("--to-tag"));
}

#[test]
fn deploy_requires_both_tags() {
    gantry_cmd()
        .args(["deploy", "-f", "123", "foo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--to-tag"));
}

#[test]
fn invalid_tag_is_rejected_before_connecting() {
    gantry_cmd()
        .args(["deploy", "-f", "1:2", "-t", "124", "foo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn ports_quiet_conflicts_with_json() {
    gantry_cmd()
        .args(["ports", "-q", "--json", "foo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn unreachable_daemon_fails_with_one_line() {
    let dir = tempfile::tempdir().unwrap();

    gantry_cmd()
        .current_dir(dir.path())
        .args([
            "--base-url",
            "http://127.0.0.1:1",
            "deploy",
            "-f",
            "123",
            "-t",
            "124",
            "foo",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("Error: "))
        .stderr(predicate::function(|s: &str| s.trim_end().lines().count() == 1));
}

#[test]
fn invalid_base_url_is_reported() {
    let dir = tempfile::tempdir().unwrap();

    gantry_cmd()
        .current_dir(dir.path())
        .args(["-b", "ftp://nope", "containers", "foo"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("base_url"));
}

#[test]
fn missing_config_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();

    gantry_cmd()
        .current_dir(dir.path())
        .args(["-c", "absent.yml", "containers", "foo"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("configuration file not found"));
}

#[test]
fn help_names_base_url_default_and_env() {
    gantry_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("http://localhost:4243"))
        .stdout(predicate::str::contains("GANTRY_BASE_URL"));
}

#[test]
fn https_base_url_is_rejected_at_startup() {
    let dir = tempfile::tempdir().unwrap();

    gantry_cmd()
        .current_dir(dir.path())
        .args(["-b", "https://127.0.0.1:2376", "containers", "foo"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid configuration"))
        .stderr(predicate::str::contains("base_url"));
}
