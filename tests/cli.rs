//! Runs the built binary end to end
mod common;

use assert_cmd::Command;
use common::{demo_path, house_text, trace_text, write_inputs};
use predicates::prelude::*;
use serde_json::Value;

fn replay_cmd() -> Command {
    let mut cmd = Command::cargo_bin("cleanbot-replay").unwrap();
    cmd.env_remove("CLEANBOT_LOG_LEVEL");
    cmd
}

#[test]
fn test_headless_stdout_is_json_summary() {
    let dir = tempfile::tempdir().unwrap();
    let output = replay_cmd()
        .arg(demo_path("house.txt"))
        .arg(demo_path("trace.txt"))
        .arg("--headless")
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let summary: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(summary["steps_replayed"], 13);
    assert_eq!(summary["dirt_left"], 27);
    assert_eq!(summary["battery"], 37);
    assert_eq!(summary["at_docking"], true);
    assert_eq!(summary["score"], 8113);

    // The log still runs, on stderr
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Loaded house"), "stderr was {stderr:?}");
}

#[test]
fn test_wrong_argument_count_is_usage_error() {
    replay_cmd().assert().failure().code(2);
    replay_cmd()
        .arg(demo_path("house.txt"))
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_oversized_house_fails_cleanly() {
    let house = house_text(1, 1, usize::MAX, 1, &["D"]);
    let (_dir, house_path, trace_path) = write_inputs(&house, &trace_text("F", 0, "FINISHED", 0));

    replay_cmd()
        .arg(&house_path)
        .arg(&trace_path)
        .arg("--headless")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Too many rows"));
}
