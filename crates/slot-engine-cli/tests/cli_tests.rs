//! Integration tests for the `freeslots` CLI binary.
//!
//! These use `assert_cmd` and `predicates` to run the binary against JSON
//! free/busy fixtures, covering text and JSON output, the access policy, date
//! resolution, and settings files.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

const EMPTY_PRIMARY: &str = r#"{"calendars": {"primary": {"busy": []}}}"#;

/// `freeslots find` for Monday 2024-01-01, one day, UTC.
fn find_monday() -> Command {
    let mut cmd = Command::cargo_bin("freeslots").unwrap();
    cmd.args(["find", "--start-date", "2024-01-01", "--days", "1"]);
    cmd
}

// ─────────────────────────────────────────────────────────────────────────────
// Text output
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn monday_with_morning_meeting_lists_slots_after_it() {
    find_monday()
        .args(["--duration", "60", "-i", &fixture("monday.json")])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Available 60-minute slots for your calendar:",
        ))
        .stdout(predicate::str::contains("- 2024-01-01 10:00 AM UTC"))
        .stdout(predicate::str::contains("09:30 AM").not())
        .stdout(predicate::str::contains(
            "(Showing first 10 of 13 available slots)",
        ));
}

#[test]
fn display_cap_summarizes_the_rest() {
    find_monday()
        .args(["-i", &fixture("half_hour.json")])
        .assert()
        .success()
        .stdout(predicate::str::contains("- 2024-01-01 09:30 AM UTC"))
        .stdout(predicate::str::contains("- 2024-01-01 02:00 PM UTC"))
        .stdout(predicate::str::contains("- 2024-01-01 02:30 PM UTC").not())
        .stdout(predicate::str::contains(
            "(Showing first 10 of 15 available slots)",
        ));
}

#[test]
fn display_cap_flag_overrides_default() {
    find_monday()
        .args(["--display-cap", "3", "-i", &fixture("half_hour.json")])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "(Showing first 3 of 15 available slots)",
        ));
}

#[test]
fn busy_data_from_stdin() {
    find_monday()
        .args(["--duration", "480"])
        .write_stdin(EMPTY_PRIMARY)
        .assert()
        .success()
        .stdout(predicate::str::contains("- 2024-01-01 09:00 AM UTC"))
        .stdout(predicate::str::contains("Showing").not());
}

#[test]
fn participants_are_named_in_header() {
    find_monday()
        .args(["--email", "a@x.com", "-i", &fixture("team.json")])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Available 30-minute slots for calendars of: you, a@x.com:",
        ))
        .stdout(predicate::str::contains("- 2024-01-01 04:00 PM UTC"))
        .stdout(predicate::str::contains("- 2024-01-01 04:30 PM UTC"))
        .stdout(predicate::str::contains("03:30 PM").not());
}

#[test]
fn fully_booked_reports_no_free_slots() {
    find_monday()
        .args(["-i", &fixture("booked.json")])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No free slots found for you in the specified time range.",
        ));
}

#[test]
fn timezone_localizes_working_hours() {
    find_monday()
        .args(["--timezone", "America/New_York", "--duration", "480"])
        .write_stdin(EMPTY_PRIMARY)
        .assert()
        .success()
        .stdout(predicate::str::contains("- 2024-01-01 09:00 AM EST"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Access policy
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn inaccessible_participant_fails_whole_query() {
    find_monday()
        .args(["--email", "a@x.com", "--email", "b@y.com"])
        .args(["-i", &fixture("team.json")])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "Could not access calendars for: b@y.com. Please check the email addresses",
        ));
}

#[test]
fn participants_missing_from_response_are_inaccessible() {
    find_monday()
        .args(["--email", "c@z.com,a@x.com,d@w.com"])
        .args(["-i", &fixture("team.json")])
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "Could not access calendars for: c@z.com, d@w.com.",
        ));
}

#[test]
fn missing_primary_calendar_fails() {
    find_monday()
        .write_stdin(r#"{"calendars": {}}"#)
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "Could not access your calendar. Please check your permissions.",
        ));
}

// ─────────────────────────────────────────────────────────────────────────────
// JSON output
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn json_output_lists_capped_slots() {
    let output = find_monday()
        .args(["--duration", "60", "--format", "json", "-i", &fixture("monday.json")])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["status"], "available");
    assert_eq!(value["duration_minutes"], 60);
    assert_eq!(value["timezone"], "UTC");
    assert_eq!(value["total"], 13);
    assert_eq!(value["remaining"], 3);
    assert_eq!(value["slots"].as_array().unwrap().len(), 10);
    assert_eq!(value["slots"][0]["start"], "2024-01-01T10:00:00+00:00");
    assert_eq!(value["slots"][0]["end"], "2024-01-01T11:00:00+00:00");
}

#[test]
fn json_output_for_no_free_slots() {
    let output = find_monday()
        .args(["--format", "json", "-i", &fixture("booked.json")])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["status"], "no_free_slots");
    assert_eq!(value["total"], 0);
}

#[test]
fn json_output_for_access_error() {
    let output = find_monday()
        .args(["--email", "b@y.com", "--format", "json", "-i", &fixture("team.json")])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["status"], "error");
    assert_eq!(value["kind"], "calendar_access");
    assert_eq!(value["calendars"], serde_json::json!(["b@y.com"]));
}

// ─────────────────────────────────────────────────────────────────────────────
// Dates, settings, validation
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn tomorrow_resolves_against_now_and_skips_weekend() {
    // Thursday 2024-01-04 → tomorrow is Friday; Friday..Monday over 4 days.
    Command::cargo_bin("freeslots")
        .unwrap()
        .args(["find", "--start-date", "tomorrow", "--days", "4", "--duration", "480"])
        .args(["--now", "2024-01-04T12:00:00Z"])
        .write_stdin(EMPTY_PRIMARY)
        .assert()
        .success()
        .stdout(predicate::str::contains("- 2024-01-05 09:00 AM UTC"))
        .stdout(predicate::str::contains("- 2024-01-08 09:00 AM UTC"))
        .stdout(predicate::str::contains("2024-01-06").not())
        .stdout(predicate::str::contains("2024-01-07").not());
}

#[test]
fn today_uses_the_local_date() {
    // 03:00 UTC on Tuesday is still Monday evening in Los Angeles.
    Command::cargo_bin("freeslots")
        .unwrap()
        .args(["find", "--start-date", "today", "--days", "1", "--duration", "480"])
        .args(["--timezone", "America/Los_Angeles", "--now", "2024-01-02T03:00:00Z"])
        .write_stdin(EMPTY_PRIMARY)
        .assert()
        .success()
        .stdout(predicate::str::contains("- 2024-01-01 09:00 AM PST"));
}

#[test]
fn settings_file_supplies_defaults() {
    // 13:00-15:00 with 60-minute meetings: 13:00, 13:30, 14:00; cap 2.
    Command::cargo_bin("freeslots")
        .unwrap()
        .args(["find", "--start-date", "2024-01-01"])
        .args(["--config", &fixture("settings.toml")])
        .write_stdin(EMPTY_PRIMARY)
        .assert()
        .success()
        .stdout(predicate::str::contains("- 2024-01-01 01:00 PM UTC"))
        .stdout(predicate::str::contains(
            "(Showing first 2 of 3 available slots)",
        ));
}

#[test]
fn flags_override_settings_file() {
    Command::cargo_bin("freeslots")
        .unwrap()
        .args(["find", "--start-date", "2024-01-01", "--end-hour", "14"])
        .args(["--config", &fixture("settings.toml")])
        .write_stdin(EMPTY_PRIMARY)
        .assert()
        .success()
        .stdout(predicate::str::contains("- 2024-01-01 01:00 PM UTC"))
        .stdout(predicate::str::contains("01:30 PM").not())
        .stdout(predicate::str::contains("Showing").not());
}

#[test]
fn inverted_working_hours_rejected() {
    find_monday()
        .args(["--start-hour", "17", "--end-hour", "9"])
        .write_stdin(EMPTY_PRIMARY)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("working hours 17..9 are invalid"));
}

#[test]
fn zero_duration_rejected() {
    find_monday()
        .args(["--duration", "0"])
        .write_stdin(EMPTY_PRIMARY)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("duration must be greater than zero"));
}

#[test]
fn unknown_start_date_rejected() {
    Command::cargo_bin("freeslots")
        .unwrap()
        .args(["find", "--start-date", "next tuesday"])
        .write_stdin(EMPTY_PRIMARY)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid start date 'next tuesday'"));
}

#[test]
fn unknown_timezone_rejected() {
    find_monday()
        .args(["--timezone", "Mars/Olympus_Mons"])
        .write_stdin(EMPTY_PRIMARY)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid timezone: Mars/Olympus_Mons"));
}

#[test]
fn malformed_busy_json_rejected() {
    find_monday()
        .write_stdin("{not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid free/busy JSON"));
}

#[test]
fn writes_output_file() {
    let output_path = std::env::temp_dir().join("freeslots-test-output.txt");
    let _ = std::fs::remove_file(&output_path);

    find_monday()
        .args(["-i", &fixture("monday.json")])
        .args(["-o", output_path.to_str().unwrap()])
        .assert()
        .success();

    let content = std::fs::read_to_string(&output_path).expect("output file must exist");
    assert!(content.contains("Available 30-minute slots for your calendar:"));
    let _ = std::fs::remove_file(&output_path);
}
