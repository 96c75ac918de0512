//! Command-line behaviour that must hold before any terminal or network
//! access happens.

use assert_cmd::Command;
use predicates::prelude::*;

fn ghfetch() -> Command {
    let mut cmd = Command::cargo_bin("ghfetch").unwrap();
    cmd.env_remove("ACCESS_TOKEN").env("GHFETCH_API_URL", "http://127.0.0.1:9/graphql");
    cmd
}

#[test]
fn help_exits_zero() {
    ghfetch()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--user"))
        .stdout(predicate::str::contains("--access-token"));
}

#[test]
fn missing_user_fails() {
    ghfetch()
        .args(["--access-token", "t"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("--user"));
}

#[test]
fn empty_user_fails() {
    ghfetch()
        .args(["--user", "", "--access-token", "t"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());
}

#[test]
fn missing_token_fails() {
    ghfetch()
        .args(["--user", "octocat"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("access token"));
}

#[test]
fn empty_token_from_env_fails() {
    ghfetch()
        .env("ACCESS_TOKEN", "")
        .args(["-u", "octocat"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("access token"));
}

#[test]
fn invalid_profile_json_fails() {
    ghfetch()
        .args(["-u", "octocat", "--access-token", "t", "-p", "{not json"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("--profile"));
}

#[test]
fn unknown_color_fails() {
    ghfetch()
        .args(["-u", "octocat", "--access-token", "t", "-c", "purple"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());
}
