mod common;

use assert_cmd::Command;
use predicates::prelude::*;

fn autotagger() -> Command {
    let mut cmd = Command::cargo_bin("autotagger").unwrap();
    cmd.env_clear();
    cmd
}

#[test]
fn test_help_lists_environment() {
    autotagger()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("NEVER_FAIL"))
        .stdout(predicate::str::contains("TAG_PREFIX"));
}

#[test]
fn test_unknown_argument_is_fatal() {
    autotagger().arg("--bogus").assert().code(1);
}

#[test]
fn test_unknown_argument_respects_never_fail() {
    autotagger()
        .env("NEVER_FAIL", "true")
        .arg("--bogus")
        .assert()
        .code(78);
}

#[test]
fn test_other_trigger_is_a_no_op() {
    autotagger()
        .env("GITHUB_EVENT_NAME", "push")
        .assert()
        .code(78)
        .stderr(predicate::str::contains("Ignoring trigger"));
}

#[test]
fn test_no_ex_config_turns_no_op_into_success() {
    autotagger()
        .env("GITHUB_EVENT_NAME", "push")
        .env("NO_EX_CONFIG", "true")
        .assert()
        .code(0);
}

#[test]
fn test_missing_token_is_fatal() {
    autotagger()
        .env("GITHUB_EVENT_NAME", "pull_request")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("GITHUB_TOKEN"));
}

#[test]
fn test_never_fail_uses_no_op_code() {
    autotagger()
        .env("GITHUB_EVENT_NAME", "pull_request")
        .env("NEVER_FAIL", "true")
        .assert()
        .code(78);
}

#[test]
fn test_never_fail_with_no_ex_config_succeeds() {
    autotagger()
        .env("GITHUB_EVENT_NAME", "pull_request")
        .env("NEVER_FAIL", "true")
        .env("NO_EX_CONFIG", "true")
        .assert()
        .code(0);
}

#[test]
fn test_invalid_file_regexp_is_fatal() {
    autotagger()
        .env("GITHUB_EVENT_NAME", "pull_request")
        .env("GITHUB_TOKEN", "token")
        .env("FILE_REGEXP", "(unclosed")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Regex error"));
}

#[test]
fn test_config_failure_respects_never_fail() {
    autotagger()
        .env("GITHUB_EVENT_NAME", "pull_request")
        .env("NEVER_FAIL", "true")
        .env("NO_EX_CONFIG", "true")
        .env("FILE_REGEXP", "(unclosed")
        .assert()
        .code(0)
        .stderr(predicate::str::contains("Regex error"));
}

#[test]
fn test_unmerged_pull_request_is_a_no_op() {
    let (_dir, path) = common::write_event(&common::pull_request_payload("closed", false));

    autotagger()
        .env("GITHUB_EVENT_NAME", "pull_request")
        .env("GITHUB_TOKEN", "token")
        .env("GITHUB_EVENT_PATH", &path)
        .assert()
        .code(78)
        .stderr(predicate::str::contains("PR not ready to tag"));
}

#[test]
fn test_event_path_flag_overrides_environment() {
    let (_dir, path) = common::write_event(&common::pull_request_payload("opened", false));

    autotagger()
        .env("GITHUB_EVENT_NAME", "pull_request")
        .env("GITHUB_TOKEN", "token")
        .env("GITHUB_EVENT_PATH", "/nonexistent/event.json")
        .arg("--event-path")
        .arg(&path)
        .assert()
        .code(78);
}

#[test]
fn test_unreadable_event_is_fatal() {
    let (_dir, path) = common::write_event("{ this is not json");

    autotagger()
        .env("GITHUB_EVENT_NAME", "pull_request")
        .env("GITHUB_TOKEN", "token")
        .env("GITHUB_EVENT_PATH", &path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("could not unmarshal event info"));
}

#[test]
fn test_unreachable_api_is_fatal() {
    let (_dir, path) = common::write_event(&common::pull_request_payload("closed", true));

    autotagger()
        .env("GITHUB_EVENT_NAME", "pull_request")
        .env("GITHUB_TOKEN", "token")
        .env("GITHUB_EVENT_PATH", &path)
        .env("GITHUB_API_URL", "http://127.0.0.1:1")
        .env("GITHUB_TIMEOUT_SECS", "2")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("HTTP error"));
}

#[test]
fn test_quiet_hides_skip_notice() {
    autotagger()
        .env("GITHUB_EVENT_NAME", "push")
        .arg("-q")
        .assert()
        .code(78)
        .stderr(predicate::str::is_empty());
}
