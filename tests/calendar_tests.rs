//! Integration tests for the appointments calendar

#![allow(deprecated)]

use predicates::prelude::*;
use tempfile::TempDir;

mod common;
use common::{clinic_cmd, empty_clinic};

/// Clinic with one doctor, one patient and a 09:00-10:00 visit on 2025-01-17
fn booked_clinic() -> TempDir {
    let temp = empty_clinic();
    clinic_cmd(&temp)
        .args([
            "doctor",
            "add",
            "--name",
            "Dr. Jane Foster",
            "--email",
            "jane.foster@northside.clinic",
        ])
        .assert()
        .success();
    clinic_cmd(&temp)
        .args(["patient", "add", "--first-name", "Jane", "--last-name", "Smith"])
        .assert()
        .success();
    clinic_cmd(&temp)
        .args([
            "appointment",
            "add",
            "--patient",
            "1000",
            "--doctor",
            "Dr. Jane Foster",
            "--date",
            "2025-01-17",
            "--time",
            "09:00",
            "--duration",
            "60",
            "--type",
            "follow-up",
        ])
        .assert()
        .success();
    temp
}

fn line_starting<'a>(out: &'a str, prefix: &str) -> &'a str {
    out.lines().find(|l| l.starts_with(prefix)).unwrap()
}

#[test]
fn test_month_view() {
    let temp = booked_clinic();

    clinic_cmd(&temp)
        .args(["calendar", "--view", "month", "--date", "2025-01-17"])
        .assert()
        .success()
        .stdout(predicate::str::contains("‹ January 2025 ›"))
        .stdout(predicate::str::contains("Monthly schedule overview"))
        .stdout(predicate::str::contains("1 appointment\n"))
        .stdout(predicate::str::contains("09:00 · Jane"))
        .stdout(predicate::str::contains("(29)"));
}

#[test]
fn test_default_view_is_month() {
    let temp = booked_clinic();

    clinic_cmd(&temp)
        .args(["calendar", "--date", "2025-01-17"])
        .assert()
        .success()
        .stdout(predicate::str::contains("January 2025"));
}

#[test]
fn test_week_view() {
    let temp = booked_clinic();

    let output = clinic_cmd(&temp)
        .args(["calendar", "--view", "week", "--date", "2025-01-17"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let out = String::from_utf8(output).unwrap();

    assert!(out.contains("Week of Jan 17, 2025"));
    assert!(out.contains("Sun 12"));
    assert!(out.contains("Sat 18"));
    assert!(line_starting(&out, "09:00 AM").contains("▌ Jane Smith"));
    assert!(line_starting(&out, "09:30 AM").contains("┆ 09:00 - 10:00"));
}

#[test]
fn test_day_view_shows_card_details() {
    let temp = booked_clinic();

    let output = clinic_cmd(&temp)
        .args(["calendar", "--view", "day", "--date", "2025-01-17"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let out = String::from_utf8(output).unwrap();

    assert!(out.contains("Detailed timeline for Friday, January 17"));
    assert!(line_starting(&out, "09:00 AM").contains("▌ Jane Smith"));
    assert!(line_starting(&out, "09:30 AM")
        .contains("┆ 09:00 - 10:00 · Follow-up · Dr. Jane Foster"));
    assert_eq!(line_starting(&out, "10:00 AM").trim_end(), "10:00 AM");
}

#[test]
fn test_default_view_follows_config() {
    let temp = booked_clinic();

    clinic_cmd(&temp)
        .args(["config", "default_view", "week"])
        .assert()
        .success();

    clinic_cmd(&temp)
        .args(["calendar", "--date", "2025-01-17"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Week of Jan 17, 2025"));
}

#[test]
fn test_step_moves_by_period() {
    let temp = booked_clinic();

    clinic_cmd(&temp)
        .args(["calendar", "--view", "month", "--date", "2025-01-31", "--step", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("‹ February 2025 ›"))
        .stdout(predicate::str::contains("0 appointments"));

    clinic_cmd(&temp)
        .args(["calendar", "--view", "week", "--date", "2025-01-24", "--step", "-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Week of Jan 17, 2025"))
        .stdout(predicate::str::contains("Jane Smith"));

    clinic_cmd(&temp)
        .args(["calendar", "--view", "day", "--date", "2025-01-16", "--step", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Jane Smith"));
}

#[test]
fn test_invalid_view() {
    let temp = booked_clinic();

    clinic_cmd(&temp)
        .args(["calendar", "--view", "year"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid view"));
}

#[test]
fn test_invalid_date_reference_exit_code() {
    let temp = booked_clinic();

    clinic_cmd(&temp)
        .args(["calendar", "--date", "the other day"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Invalid date reference"));
}
