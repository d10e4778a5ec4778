use assert_cmd::Command;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// `rulekit` running inside `dir`, isolated from the caller's RULEKIT_* settings.
fn rulekit(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("rulekit").unwrap();
    cmd.current_dir(dir)
        .env_remove("RULEKIT_LOG")
        .env_remove("RULEKIT_LOG_FORMAT")
        .env_remove("RULEKIT_MESSAGES")
        .env_remove("RULEKIT_RECORDS");
    cmd
}

fn write_json(dir: &Path, name: &str, value: Value) {
    fs::write(dir.join(name), serde_json::to_string(&value).unwrap()).unwrap();
}

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn check_passes() {
    let dir = TempDir::new().unwrap();
    write_json(dir.path(), "data.json", json!({ "name": "Ada", "age": 36 }));
    write_json(
        dir.path(),
        "rules.json",
        json!({ "name": "required|min:2", "age": "required|integer|min:18" }),
    );

    let output = rulekit(dir.path())
        .args(["check", "--data", "data.json", "--rules", "rules.json"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output).trim(), "passed");
}

#[test]
fn check_prints_error_map_on_failure() {
    let dir = TempDir::new().unwrap();
    write_json(dir.path(), "data.json", json!({ "firstName": "", "tags": ["a", ""] }));
    write_json(
        dir.path(),
        "rules.json",
        json!({ "firstName": "required", "tags.*": "required" }),
    );

    let output = rulekit(dir.path())
        .args(["check", "-d", "data.json", "-r", "rules.json"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let errors: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(
        errors,
        json!({
            "firstName": "The first name field is required.",
            "tags": [null, "The tags field is required."]
        })
    );
}

#[test]
fn check_rejects_unknown_rules() {
    let dir = TempDir::new().unwrap();
    write_json(dir.path(), "data.json", json!({}));
    write_json(dir.path(), "rules.json", json!({ "attributeName": "invalid_rule" }));

    let output = rulekit(dir.path())
        .args(["check", "--data", "data.json", "--rules", "rules.json"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Invalid validation rule invalid_rule"));
}

#[test]
fn check_uses_messages_and_records() {
    let dir = TempDir::new().unwrap();
    write_json(dir.path(), "data.json", json!({ "tag": "sports", "owner": 7 }));
    write_json(
        dir.path(),
        "rules.json",
        json!({ "tag": "exists:tag,name", "owner": "exists:users,id" }),
    );
    write_json(
        dir.path(),
        "messages.json",
        json!({ "tag": { "exists": "Unknown :resource." } }),
    );
    write_json(
        dir.path(),
        "records.json",
        json!({ "tag": { "name": ["news"] }, "users": { "id": [7] } }),
    );

    let output = rulekit(dir.path())
        .args([
            "check",
            "--data",
            "data.json",
            "--rules",
            "rules.json",
            "--messages",
            "messages.json",
            "--records",
            "records.json",
        ])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let errors: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(errors, json!({ "tag": "Unknown tag." }));
}

#[test]
fn check_reads_defaults_from_environment() {
    let dir = TempDir::new().unwrap();
    write_json(dir.path(), "data.json", json!({ "owner": 3 }));
    write_json(dir.path(), "rules.json", json!({ "owner": "exists:users,id" }));
    write_json(dir.path(), "records.json", json!({ "users": { "id": [3] } }));

    let output = rulekit(dir.path())
        .env("RULEKIT_RECORDS", "records.json")
        .args(["check", "--data", "data.json", "--rules", "rules.json"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn check_without_lookup_is_rejected() {
    let dir = TempDir::new().unwrap();
    write_json(dir.path(), "data.json", json!({ "owner": 3 }));
    write_json(dir.path(), "rules.json", json!({ "owner": "exists:users,id" }));

    let output = rulekit(dir.path())
        .args(["check", "--data", "data.json", "--rules", "rules.json"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("requires a record lookup"));
}

#[test]
fn check_reports_missing_files() {
    let dir = TempDir::new().unwrap();
    let output = rulekit(dir.path())
        .args(["check", "--data", "missing.json", "--rules", "rules.json"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("failed to read missing.json"));
}

#[test]
fn parse_prints_canonical_form() {
    let dir = TempDir::new().unwrap();
    let output = rulekit(dir.path())
        .args(["parse", "Required||digitsBetween:2,4|in:a, b"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    assert_eq!(
        text.lines().next(),
        Some("required|digits_between:2,4|in:a,b")
    );
    assert!(text.contains("\"digits_between\""));
}

#[test]
fn parse_rejects_unknown_rule() {
    let dir = TempDir::new().unwrap();
    let output = rulekit(dir.path()).args(["parse", "nope"]).output().unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Invalid validation rule nope"));
}

#[test]
fn rules_lists_builtins() {
    let dir = TempDir::new().unwrap();
    let output = rulekit(dir.path()).arg("rules").output().unwrap();

    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    assert!(text.contains("digits_between"));
    assert!(text.contains("The :attribute field is required."));
}

#[test]
fn example_basic() {
    let dir = TempDir::new().unwrap();
    let output = rulekit(dir.path())
        .args(["example", "basic"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    assert!(text.contains("The first name field is required."));
    assert!(text.contains("The age must be at least 18."));
}

#[test]
fn example_unknown_lists_available() {
    let dir = TempDir::new().unwrap();
    let output = rulekit(dir.path())
        .args(["example", "nope"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let text = stderr(&output);
    assert!(text.contains("basic"));
    assert!(text.contains("wildcard"));
}
