//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with a throwaway config directory and
//! verify outputs.

use std::io::Write;
use std::process::{Command, Stdio};

use tempfile::TempDir;

/// Run a CLI command against `home` and return (stdout, stderr, code).
fn run_cli_in(home: &TempDir, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_pomocycle"))
        .args(args)
        .env("POMOCYCLE_HOME", home.path())
        .env_remove("POMOCYCLE_LOG")
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_cli(args: &[&str]) -> (String, String, i32) {
    let home = TempDir::new().expect("tempdir");
    run_cli_in(&home, args)
}

fn parse_json(stdout: &str) -> serde_json::Value {
    serde_json::from_str(stdout).expect("Failed to parse JSON output")
}

#[test]
fn test_score_single_cycle() {
    let (stdout, _, code) = run_cli(&[
        "score", "--planned", "1500", "--actual", "1500", "--completed", "1", "--cycles", "1",
    ]);
    assert_eq!(code, 0, "score failed");
    let json = parse_json(&stdout);
    assert_eq!(json["score"], 85);
    assert_eq!(json["label"], "Excellent!");
}

#[test]
fn test_score_nothing_planned() {
    let (stdout, _, code) = run_cli(&["score", "--planned", "0", "--actual", "100"]);
    assert_eq!(code, 0);
    assert_eq!(parse_json(&stdout)["score"], 0);
}

#[test]
fn test_simulate_single_cycle() {
    let (stdout, _, code) = run_cli(&[
        "simulate", "--minutes", "0", "--seconds", "3", "--cycles", "1",
    ]);
    assert_eq!(code, 0, "simulate failed");
    let json = parse_json(&stdout);
    assert_eq!(json["completed_cycles"], 1);
    assert_eq!(json["planned_study_time"], 3);
    assert_eq!(json["total_break_time"], 0);
    assert_eq!(json["is_infinite"], false);
}

#[test]
fn test_simulate_streams_events_in_order() {
    let (stdout, _, code) = run_cli(&[
        "simulate", "--events", "--minutes", "0", "--seconds", "2", "--cycles", "1",
    ]);
    assert_eq!(code, 0, "simulate failed");
    let types: Vec<String> = stdout
        .lines()
        .take(5)
        .map(|line| {
            let event: serde_json::Value = serde_json::from_str(line).expect("event line");
            event["type"].as_str().unwrap_or_default().to_string()
        })
        .collect();
    assert_eq!(
        types,
        [
            "state_changed",
            "state_changed",
            "segment_complete",
            "state_changed",
            "session_complete",
        ]
    );

    // The pretty summary follows the event lines.
    let rest: Vec<&str> = stdout.lines().skip(5).collect();
    let summary = parse_json(&rest.join("\n"));
    assert_eq!(summary["completed_cycles"], 1);
}

#[test]
fn test_simulate_without_events_prints_only_summary() {
    let (stdout, _, code) = run_cli(&[
        "simulate", "--minutes", "0", "--seconds", "2", "--cycles", "1",
    ]);
    assert_eq!(code, 0);
    assert!(!stdout.contains("\"type\""));
    assert_eq!(parse_json(&stdout)["completed_cycles"], 1);
}

#[test]
fn test_simulate_default_plan() {
    let (stdout, _, code) = run_cli(&["simulate"]);
    assert_eq!(code, 0);
    let json = parse_json(&stdout);
    assert_eq!(json["completed_cycles"], 4);
    assert_eq!(json["planned_study_time"], 6000);
}

#[test]
fn test_simulate_coerces_plan_input() {
    let (stdout, _, code) = run_cli(&["simulate", "--minutes", "9x9", "--cycles", "1"]);
    assert_eq!(code, 0);
    assert_eq!(parse_json(&stdout)["planned_study_time"], 59 * 60);
}

#[test]
fn test_simulate_zero_study_fails() {
    let (_, stderr, code) = run_cli(&["simulate", "--minutes", "0"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("study duration is zero"));
}

#[test]
fn test_simulate_infinite_needs_ticks() {
    let (_, stderr, code) = run_cli(&["simulate", "--infinite"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("--ticks"));
}

#[test]
fn test_simulate_infinite_with_ticks() {
    let (stdout, _, code) = run_cli(&[
        "simulate", "--infinite", "--minutes", "0", "--seconds", "10", "--break-minutes", "0",
        "--break-seconds", "5", "--ticks", "150",
    ]);
    assert_eq!(code, 0);
    let json = parse_json(&stdout);
    assert_eq!(json["completed_cycles"], 10);
    assert_eq!(json["is_infinite"], true);
}

#[test]
fn test_simulate_uses_saved_defaults() {
    let home = TempDir::new().unwrap();
    let (_, _, code) = run_cli_in(&home, &["config", "set", "session.total_cycles", "2"]);
    assert_eq!(code, 0);
    let (stdout, _, code) = run_cli_in(&home, &["simulate"]);
    assert_eq!(code, 0);
    assert_eq!(parse_json(&stdout)["total_cycles"], 2);
}

#[test]
fn test_config_set_then_get() {
    let home = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli_in(&home, &["config", "set", "session.study_minutes", "75"]);
    assert_eq!(code, 0, "config set failed");
    assert_eq!(stdout.trim(), "59");

    let (stdout, _, code) = run_cli_in(&home, &["config", "get", "session.study_minutes"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "59");
}

#[test]
fn test_config_get_unknown_key() {
    let (_, stderr, code) = run_cli(&["config", "get", "session.nope"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_config_list_and_reset() {
    let home = TempDir::new().unwrap();
    run_cli_in(&home, &["config", "set", "notifications.bell", "false"]);
    let (stdout, _, code) = run_cli_in(&home, &["config", "list"]);
    assert_eq!(code, 0);
    assert_eq!(parse_json(&stdout)["notifications"]["bell"], false);

    let (_, _, code) = run_cli_in(&home, &["config", "reset"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli_in(&home, &["config", "get", "notifications.bell"]);
    assert_eq!(stdout.trim(), "true");
}

#[test]
fn test_config_path_is_inside_home() {
    let home = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli_in(&home, &["config", "path"]);
    assert_eq!(code, 0);
    assert!(stdout.trim().ends_with("config.toml"));
    assert!(stdout.contains(&*home.path().to_string_lossy()));
}

#[test]
fn test_completions() {
    let (stdout, _, code) = run_cli(&["completions", "bash"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("pomocycle"));
}

#[test]
fn test_run_json_completes_short_session() {
    let (stdout, _, code) = run_cli(&[
        "run", "--json", "--no-bell", "--minutes", "0", "--seconds", "2", "--cycles", "1",
    ]);
    assert_eq!(code, 0, "run failed");
    let events: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("event line"))
        .collect();
    assert_eq!(events.first().unwrap()["type"], "state_changed");
    let last = events.last().unwrap();
    assert_eq!(last["type"], "session_complete");
    assert_eq!(last["summary"]["completed_cycles"], 1);
    assert!(events.iter().any(|e| e["type"] == "segment_complete"));
}

#[test]
fn test_run_reads_commands_from_stdin() {
    let home = TempDir::new().expect("tempdir");
    let mut child = Command::new(env!("CARGO_BIN_EXE_pomocycle"))
        .args(["run", "--json", "--no-bell"])
        .env("POMOCYCLE_HOME", home.path())
        .env_remove("POMOCYCLE_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn CLI");

    {
        let mut stdin = child.stdin.take().expect("stdin");
        stdin.write_all(b"p\ns\nq\n").expect("write commands");
    }
    let output = child.wait_with_output().expect("wait for CLI");
    assert_eq!(output.status.code(), Some(0), "run failed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("json line"))
        .collect();
    assert!(lines
        .iter()
        .any(|line| line["snapshot"]["phase"] == "paused"));

    let summary = lines.last().expect("summary line");
    assert!(summary.get("score").is_some());
    assert_eq!(summary["completed_cycles"], 0);
}
