//! Integration tests for the dashboard and reports

#![allow(deprecated)]

use predicates::prelude::*;

mod common;
use common::{clinic_cmd, demo_clinic, empty_clinic};

#[test]
fn test_dashboard_today() {
    let temp = demo_clinic();

    clinic_cmd(&temp)
        .arg("dashboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("Overview for"))
        .stdout(predicate::str::contains("Total Patients: 8"))
        .stdout(predicate::str::contains("Appointments Today: 4"))
        .stdout(predicate::str::contains("Today's Schedule"))
        .stdout(predicate::str::contains("09:00 AM"))
        .stdout(predicate::str::contains("John Doe"))
        .stdout(predicate::str::contains("02:30 PM"))
        .stdout(predicate::str::contains("Recent Activity"))
        .stdout(predicate::str::contains("Just now"));
}

#[test]
fn test_dashboard_other_day() {
    let temp = demo_clinic();

    clinic_cmd(&temp)
        .args(["dashboard", "--date", "tomorrow"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Appointments Today: 2"))
        .stdout(predicate::str::contains("Priya Sharma"))
        .stdout(predicate::str::contains("Fatima Al-Hassan"));
}

#[test]
fn test_dashboard_empty_clinic() {
    let temp = empty_clinic();

    clinic_cmd(&temp)
        .arg("dashboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Patients: 0"))
        .stdout(predicate::str::contains("No appointments scheduled."));
}

#[test]
fn test_patients_report() {
    let temp = demo_clinic();

    clinic_cmd(&temp)
        .args(["report", "patients"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Patients Report"))
        .stdout(predicate::str::contains("By status"))
        .stdout(predicate::str::contains("By gender"))
        .stdout(predicate::str::contains("Dr. Alan Grant"));
}

#[test]
fn test_appointments_report() {
    let temp = demo_clinic();

    clinic_cmd(&temp)
        .args(["report", "appointments"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Appointments Report"))
        .stdout(predicate::str::contains("Emergencies"))
        .stdout(predicate::str::contains("By type"));
}

#[test]
fn test_medicines_report() {
    let temp = demo_clinic();

    clinic_cmd(&temp)
        .args(["report", "medicines"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Medicines Report"))
        .stdout(predicate::str::contains("By form"))
        .stdout(predicate::str::contains("Tablet"));
}

#[test]
fn test_unknown_report() {
    let temp = demo_clinic();

    clinic_cmd(&temp)
        .args(["report", "billing"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid report"));
}
