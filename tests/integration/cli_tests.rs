use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn showcase() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("agent-showcase").unwrap();
    cmd.env_remove("SHOWCASE_SPEED")
        .env_remove("SHOWCASE_THEME")
        .env_remove("SHOWCASE_ANIMATIONS")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_cli_version() {
    showcase().arg("--version").assert().success();
}

#[test]
fn test_cli_help() {
    showcase()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("timeline"))
        .stdout(predicate::str::contains("--speed"));
}

#[test]
fn test_content_json() {
    let output = showcase()
        .args(["content", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["steps"].as_array().unwrap().len(), 5);
}

#[test]
fn test_content_text() {
    showcase()
        .arg("content")
        .assert()
        .success()
        .stdout(predicate::str::contains("Schulungskonzept"));
}

#[test]
fn test_timeline_text() {
    showcase()
        .arg("timeline")
        .assert()
        .success()
        .stdout(predicate::str::contains("Unternehmens-Analyse"))
        .stdout(predicate::str::contains("finished"));
}

#[test]
fn test_timeline_json_respects_speed() {
    let normal = showcase()
        .args(["timeline", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let fast = showcase()
        .args(["timeline", "--format", "json", "--speed", "2"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let normal: serde_json::Value = serde_json::from_slice(&normal).unwrap();
    let fast: serde_json::Value = serde_json::from_slice(&fast).unwrap();
    assert_eq!(
        normal["total_ms"].as_u64().unwrap(),
        fast["total_ms"].as_u64().unwrap() * 2
    );
}

#[test]
fn test_play_jsonl_fast() {
    let output = showcase()
        .args([
            "play",
            "--format",
            "jsonl",
            "--speed",
            "1000",
            "--decline",
            "--no-animations",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(output).unwrap();
    let lines: Vec<serde_json::Value> = text
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    let last_snapshot = lines
        .iter()
        .rev()
        .find(|l| l["type"] == "snapshot")
        .unwrap();
    assert_eq!(last_snapshot["state"]["messages"].as_array().unwrap().len(), 6);
    assert!(lines
        .iter()
        .any(|l| l["type"] == "decision" && l["accepted"] == false));
}

#[test]
fn test_play_text_accept() {
    showcase()
        .args(["--speed", "1000", "play", "--accept"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Erfolgreich gespeichert"));
}

#[test]
fn test_invalid_speed_exits_with_config_code() {
    showcase()
        .args(["timeline", "--speed", "0"])
        .assert()
        .code(2);
}

#[test]
fn test_tiny_speed_exits_with_config_code() {
    showcase()
        .args(["--speed", "1e-300", "play", "--no-animations", "--decline"])
        .write_stdin("")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("timing.speed"));
}

#[test]
fn test_config_file_is_used() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[timing]\nspeed = 4.0").unwrap();
    let output = showcase()
        .args(["timeline", "--format", "json", "-c"])
        .arg(file.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["speed"], 4.0);
}

#[test]
fn test_missing_config_file_fails() {
    showcase()
        .args(["timeline", "-c", "/no/such/agent-showcase.toml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Configuration error"));
}
