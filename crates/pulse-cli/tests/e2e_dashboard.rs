//! E2E tests for the read-only commands: list, show, summary, menu, export.
//!
//! Each test runs `pulse` as a subprocess in an isolated temp directory with
//! its own user config directory, so no ambient settings leak in.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

const NOW: &str = "2025-10-30T00:00:00Z";

fn pulse_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("pulse"));
    cmd.current_dir(dir);
    cmd.env("PULSE_LOG", "error");
    cmd.env("XDG_CONFIG_HOME", dir.join(".user-config"));
    cmd.env_remove("FORMAT");
    cmd
}

fn json_output(dir: &Path, args: &[&str]) -> Value {
    let output = pulse_cmd(dir)
        .args(args)
        .args(["--json", "--now", NOW])
        .output()
        .expect("pulse should not crash");
    assert!(
        output.status.success(),
        "{args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid JSON")
}

#[test]
fn list_defaults_to_seed_data_sorted_by_date() {
    let dir = TempDir::new().expect("tempdir");
    let rows = json_output(dir.path(), &["list"]);
    let rows = rows.as_array().expect("array");
    assert_eq!(rows.len(), 25);
    assert_eq!(rows[0]["contactNumber"], "202-555-0101");

    let dates: Vec<&str> = rows.iter().filter_map(|r| r["date"].as_str()).collect();
    let mut sorted = dates.clone();
    sorted.sort_unstable();
    assert_eq!(dates, sorted);
}

#[test]
fn list_does_not_write_storage() {
    let dir = TempDir::new().expect("tempdir");
    pulse_cmd(dir.path()).args(["list"]).assert().success();
    assert!(!dir.path().join(".pulse/event-pulse-events.json").exists());
}

#[test]
fn list_filters_by_status() {
    let dir = TempDir::new().expect("tempdir");
    let rows = json_output(dir.path(), &["list", "--status", "approved"]);
    let rows = rows.as_array().expect("array");
    assert!(!rows.is_empty());
    assert!(rows.iter().all(|r| r["status"] == "Approved"));
}

#[test]
fn list_search_matches_booker_case_insensitively() {
    let dir = TempDir::new().expect("tempdir");
    let rows = json_output(dir.path(), &["list", "--search", "MAYA"]);
    let rows = rows.as_array().expect("array");
    assert!(rows.iter().any(|r| r["contactNumber"] == "202-555-0101"));
    assert!(rows.iter().all(|r| {
        let haystack = format!("{} {} {}", r["title"], r["booker"], r["location"]).to_lowercase();
        haystack.contains("maya")
    }));
}

#[test]
fn list_with_no_matches_reports_empty_state() {
    let dir = TempDir::new().expect("tempdir");
    pulse_cmd(dir.path())
        .args(["list", "--search", "no such event anywhere", "--now", NOW])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No upcoming events matched your filters.",
        ));
}

#[test]
fn show_includes_countdown_and_orders() {
    let dir = TempDir::new().expect("tempdir");
    let booking = json_output(dir.path(), &["show", "202-555-0101"]);
    assert_eq!(booking["title"], "Azure Skyline Gala");
    assert_eq!(booking["daysUntil"], 4);
    assert_eq!(booking["soon"], true);
    assert!(booking["totalOrders"].as_u64().unwrap_or(0) > 0);
    assert!(!booking["orders"].as_array().expect("orders").is_empty());
}

#[test]
fn show_unknown_contact_fails_with_code() {
    let dir = TempDir::new().expect("tempdir");
    pulse_cmd(dir.path())
        .args(["show", "000-000-0000", "--json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E2001"));
}

#[test]
fn summary_totals_and_alert() {
    let dir = TempDir::new().expect("tempdir");
    let report = json_output(dir.path(), &["summary"]);
    assert_eq!(report["totalEvents"], 25);
    assert_eq!(report["soonThresholdDays"], 7);
    let status_total: u64 = report["statuses"]
        .as_array()
        .expect("statuses")
        .iter()
        .filter_map(|s| s["count"].as_u64())
        .sum();
    assert_eq!(status_total, 25);
    assert_eq!(report["alert"]["contactNumber"], "202-555-0101");
    assert_eq!(report["alert"]["urgent"], true);
}

#[test]
fn menu_lists_item_ids() {
    let dir = TempDir::new().expect("tempdir");
    pulse_cmd(dir.path())
        .args(["menu", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("taco-station"))
        .stdout(predicate::str::contains("gelato-cart"));
}

#[test]
fn export_to_stdout_is_a_record_array() {
    let dir = TempDir::new().expect("tempdir");
    let output = pulse_cmd(dir.path())
        .args(["export"])
        .output()
        .expect("export should not crash");
    assert!(output.status.success());
    let records: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    let records = records.as_array().expect("array");
    assert_eq!(records.len(), 25);
    assert!(records[0].get("orders").is_some());
}

#[test]
fn export_flag_without_path_writes_default_file() {
    let dir = TempDir::new().expect("tempdir");
    pulse_cmd(dir.path())
        .args(["export", "--output"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dataset exported for download."));
    let written =
        std::fs::read_to_string(dir.path().join("event-pulse-events.json")).expect("file");
    let records: Value = serde_json::from_str(&written).expect("valid JSON");
    assert_eq!(records.as_array().map(Vec::len), Some(25));
}

#[test]
fn format_env_selects_json() {
    let dir = TempDir::new().expect("tempdir");
    let output = pulse_cmd(dir.path())
        .env("FORMAT", "json")
        .args(["summary"])
        .output()
        .expect("summary should not crash");
    assert!(output.status.success());
    let report: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(report["totalEvents"], 25);
}

#[test]
fn broken_project_config_is_reported() {
    let dir = TempDir::new().expect("tempdir");
    std::fs::create_dir_all(dir.path().join(".pulse")).expect("mkdir");
    std::fs::write(dir.path().join(".pulse/config.toml"), "[dashboard\n").expect("write");
    pulse_cmd(dir.path())
        .args(["list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}
