//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with HOME pointed at a temporary directory
//! and verify outputs.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_habitual"))
        .args(args)
        .env("HOME", home)
        .env_remove("HABITUAL_ENV")
        .env_remove("HABITUAL_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn add_habit(home: &Path, args: &[&str]) -> String {
    let mut full = vec!["habit", "add"];
    full.extend_from_slice(args);
    let (stdout, stderr, code) = run_cli(home, &full);
    assert_eq!(code, 0, "habit add failed: {stderr}");
    let first = stdout.lines().next().unwrap();
    first.trim_start_matches("Habit created: ").trim().to_string()
}

#[test]
fn test_freq_encode_decode() {
    let home = tempfile::tempdir().unwrap();
    let (out, _, code) = run_cli(
        home.path(),
        &["freq", "encode", "--every", "2", "--period", "weeks", "--days", "Fri,Mon"],
    );
    assert_eq!(code, 0);
    assert_eq!(out.trim(), "Every 2 weeks on Mon, Fri");

    let (out, _, code) = run_cli(home.path(), &["freq", "encode", "--every", "x", "--period", "days"]);
    assert_eq!(code, 0);
    assert_eq!(out.trim(), "Daily");

    let (out, _, code) = run_cli(home.path(), &["freq", "decode", "Every 3 days"]);
    assert_eq!(code, 0);
    let draft: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(draft["interval"], "3");
    assert_eq!(draft["period"], "days");
}

#[test]
fn test_week_start() {
    let home = tempfile::tempdir().unwrap();
    let (out, _, code) = run_cli(home.path(), &["week-start", "--day", "Monday", "--date", "2026-10-17"]);
    assert_eq!(code, 0);
    assert_eq!(out.trim(), "2026-10-12");

    let (out, _, code) = run_cli(home.path(), &["week-start", "--day", "sun", "--date", "2026-10-17"]);
    assert_eq!(code, 0);
    assert_eq!(out.trim(), "2026-10-11");
}

#[test]
fn test_habit_lifecycle() {
    let home = tempfile::tempdir().unwrap();
    let id = add_habit(home.path(), &["Read", "--icon", "book", "--color", "green", "--goal", "2"]);

    let (out, _, code) = run_cli(home.path(), &["habit", "list", "--json"]);
    assert_eq!(code, 0);
    let habits: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(habits.as_array().unwrap().len(), 1);
    assert_eq!(habits[0]["iconColor"], "green");

    let (out, _, code) = run_cli(home.path(), &["habit", "inc", &id]);
    assert_eq!(code, 0);
    assert!(out.contains("1/2"));
    let (out, _, _) = run_cli(home.path(), &["habit", "inc", &id]);
    assert!(out.contains("2/2"));
    assert!(out.contains("streak 1"));

    let (out, _, code) = run_cli(home.path(), &["habit", "logs", &id]);
    assert_eq!(code, 0);
    let logs: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(logs.as_array().unwrap().len(), 1);
    assert_eq!(logs[0]["status"], "done");

    let (_, _, code) = run_cli(home.path(), &["habit", "delete", &id]);
    assert_eq!(code, 0);
    let (out, _, _) = run_cli(home.path(), &["habit", "list", "--json"]);
    let habits: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert!(habits.as_array().unwrap().is_empty());
}

#[test]
fn test_habit_validation_errors() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["habit", "add", "   "]);
    assert_eq!(code, 1);
    assert!(stderr.starts_with("error:"));

    let (_, _, code) = run_cli(home.path(), &["habit", "add", "Run", "--goal", "0"]);
    assert_eq!(code, 1);

    let (_, _, code) = run_cli(home.path(), &["habit", "inc", "no-such-id"]);
    assert_eq!(code, 1);
}

#[test]
fn test_premium_gates() {
    let home = tempfile::tempdir().unwrap();

    let (_, stderr, code) = run_cli(home.path(), &["habit", "add", "Swim", "--every", "3", "--period", "days"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("premium"));
    let (_, _, code) = run_cli(home.path(), &["stats", "heatmap"]);
    assert_eq!(code, 1);

    let (out, _, code) = run_cli(home.path(), &["config", "set", "entitlement.premium", "true"]);
    assert_eq!(code, 0, "{out}");

    let id = add_habit(home.path(), &["Swim", "--every", "3", "--period", "days"]);
    assert!(!id.is_empty());
    let (out, _, code) = run_cli(home.path(), &["stats", "heatmap", "--weeks", "2"]);
    assert_eq!(code, 0);
    assert!(out.contains("Legend"));

    let (out, _, code) = run_cli(home.path(), &["entitlement", "check", "heatmap"]);
    assert_eq!(code, 0);
    assert!(out.contains("available"));
}

#[test]
fn test_heatmap_weeks_out_of_range() {
    let home = tempfile::tempdir().unwrap();
    run_cli(home.path(), &["config", "set", "entitlement.premium", "true"]);

    let (_, stderr, code) = run_cli(home.path(), &["stats", "heatmap", "--weeks", "20000000"]);
    assert_eq!(code, 1);
    assert!(stderr.starts_with("error:"), "{stderr}");
    assert!(!stderr.contains("panicked"));

    let (_, _, code) = run_cli(home.path(), &["config", "set", "stats.heatmap_weeks", "20000000"]);
    assert_eq!(code, 1);

    let (out, _, code) = run_cli(home.path(), &["stats", "heatmap", "--weeks", "520", "--json"]);
    assert_eq!(code, 0);
    let map: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(map["weeks"], 520);
}

#[test]
fn test_free_habit_limit() {
    let home = tempfile::tempdir().unwrap();
    run_cli(home.path(), &["config", "set", "entitlement.free_habit_limit", "2"]);
    add_habit(home.path(), &["One"]);
    add_habit(home.path(), &["Two"]);
    let (_, stderr, code) = run_cli(home.path(), &["habit", "add", "Three"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("limited to 2"));
}

#[test]
fn test_settings_and_identity() {
    let home = tempfile::tempdir().unwrap();
    let (out, _, code) = run_cli(home.path(), &["settings", "get", "theme_mode"]);
    assert_eq!(code, 0);
    assert_eq!(out.trim(), "dark");

    let (_, _, code) = run_cli(home.path(), &["settings", "set", "week_start_day", "Sunday"]);
    assert_eq!(code, 0);
    let (out, _, _) = run_cli(home.path(), &["week-start", "--date", "2026-10-17"]);
    assert_eq!(out.trim(), "2026-10-11");

    let (_, _, code) = run_cli(home.path(), &["settings", "set", "theme_mode", "sepia"]);
    assert_eq!(code, 1);

    let (out, _, code) = run_cli(home.path(), &["identity", "select", "reader", "bogus", "reader"]);
    assert_eq!(code, 0);
    let profile: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(profile["selectedAreaIds"], serde_json::json!(["reader"]));
}

#[test]
fn test_config_get_unknown_key() {
    let home = tempfile::tempdir().unwrap();
    let (out, _, code) = run_cli(home.path(), &["config", "get", "stats.heatmap_weeks"]);
    assert_eq!(code, 0);
    assert_eq!(out.trim(), "12");
    let (_, _, code) = run_cli(home.path(), &["config", "get", "nope"]);
    assert_eq!(code, 1);
}
