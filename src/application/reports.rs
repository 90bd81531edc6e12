//! Report pages: aggregate breakdowns over the clinic records

use crate::domain::records::{AppointmentStatus, AppointmentType, PatientStatus, Records};
use crate::error::{ClinicError, Result};
use crate::infrastructure::{ClinicRepository, FileSystemRepository};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

const NEW_PATIENT_WINDOW_DAYS: i64 = 30;
const RECENT_PRESCRIPTION_DAYS: i64 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Patients,
    Appointments,
    Medicines,
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "patients" => Ok(ReportKind::Patients),
            "appointments" => Ok(ReportKind::Appointments),
            "medicines" => Ok(ReportKind::Medicines),
            _ => Err(format!(
                "Invalid report: '{}'. Valid reports are: patients, appointments, medicines",
                s
            )),
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReportKind::Patients => "patients",
            ReportKind::Appointments => "appointments",
            ReportKind::Medicines => "medicines",
        };
        f.write_str(name)
    }
}

/// Labelled counts, largest first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breakdown {
    pub title: &'static str,
    pub rows: Vec<(String, usize)>,
}

impl Breakdown {
    fn from_counts(title: &'static str, counts: BTreeMap<String, usize>) -> Self {
        let mut rows: Vec<(String, usize)> = counts.into_iter().collect();
        // Stable: ties keep alphabetical order
        rows.sort_by(|a, b| b.1.cmp(&a.1));
        Breakdown { title, rows }
    }

    pub fn total(&self) -> usize {
        self.rows.iter().map(|(_, n)| n).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub metrics: Vec<(&'static str, String)>,
    pub breakdowns: Vec<Breakdown>,
}

fn count_by<I: IntoIterator<Item = String>>(labels: I) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for label in labels {
        *counts.entry(label).or_insert(0) += 1;
    }
    counts
}

fn percent(part: usize, whole: usize) -> String {
    if whole == 0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", part as f64 * 100.0 / whole as f64)
}

fn patients_report(records: &Records, now: DateTime<Utc>) -> Report {
    let patients: Vec<_> = records.patients.iter().filter(|p| p.is_active).collect();
    let since = now - Duration::days(NEW_PATIENT_WINDOW_DAYS);
    let with_status = |s: PatientStatus| patients.iter().filter(|p| p.status == s).count();

    Report {
        title: "Patients Report",
        subtitle: "Patient demographics and clinical trends.",
        metrics: vec![
            ("Total patients", patients.len().to_string()),
            ("Active", with_status(PatientStatus::Active).to_string()),
            ("Critical", with_status(PatientStatus::Critical).to_string()),
            (
                "New in last 30 days",
                patients.iter().filter(|p| p.created_at > since).count().to_string(),
            ),
        ],
        breakdowns: vec![
            Breakdown::from_counts(
                "By status",
                count_by(patients.iter().map(|p| p.status.to_string())),
            ),
            Breakdown::from_counts(
                "By gender",
                count_by(patients.iter().map(|p| {
                    p.gender
                        .map(|g| g.to_string())
                        .unwrap_or_else(|| "unspecified".to_string())
                })),
            ),
            Breakdown::from_counts(
                "By assigned doctor",
                count_by(patients.iter().map(|p| match &p.assigned_doctor_id {
                    Some(id) => records.user_name(id),
                    None => "Unassigned".to_string(),
                })),
            ),
        ],
    }
}

fn appointments_report(records: &Records) -> Report {
    let appointments: Vec<_> = records.appointments.iter().filter(|a| a.is_active).collect();
    let total = appointments.len();
    let with_status =
        |s: AppointmentStatus| appointments.iter().filter(|a| a.status == s).count();
    let average = if total == 0 {
        0
    } else {
        appointments.iter().map(|a| u64::from(a.duration)).sum::<u64>() / total as u64
    };
    let emergencies = appointments
        .iter()
        .filter(|a| a.appointment_type == AppointmentType::Emergency)
        .count();

    Report {
        title: "Appointments Report",
        subtitle: "Appointment analytics and performance metrics.",
        metrics: vec![
            ("Total appointments", total.to_string()),
            (
                "Completion rate",
                percent(with_status(AppointmentStatus::Completed), total),
            ),
            ("No-show rate", percent(with_status(AppointmentStatus::NoShow), total)),
            ("Emergencies", emergencies.to_string()),
            ("Average duration", format!("{} min", average)),
        ],
        breakdowns: vec![
            Breakdown::from_counts(
                "By status",
                count_by(appointments.iter().map(|a| a.status.to_string())),
            ),
            Breakdown::from_counts(
                "By type",
                count_by(appointments.iter().map(|a| a.appointment_type.label().to_string())),
            ),
            Breakdown::from_counts(
                "By doctor",
                count_by(appointments.iter().map(|a| records.user_name(&a.doctor_id))),
            ),
        ],
    }
}

fn medicines_report(records: &Records, today: NaiveDate) -> Report {
    let medicines = &records.medicines;
    let recent_since = today - Duration::days(RECENT_PRESCRIPTION_DAYS);
    let recent = medicines
        .iter()
        .filter(|m| m.last_prescribed_date.is_some_and(|d| d.date() >= recent_since))
        .count();

    Report {
        title: "Medicines Report",
        subtitle: "Formulary coverage and prescribing activity.",
        metrics: vec![
            ("Total medicines", medicines.len().to_string()),
            (
                "Active",
                medicines.iter().filter(|m| m.is_active).count().to_string(),
            ),
            ("Prescribed in last 90 days", recent.to_string()),
        ],
        breakdowns: vec![
            Breakdown::from_counts(
                "By form",
                count_by(
                    medicines
                        .iter()
                        .map(|m| m.form.clone().unwrap_or_else(|| "Unspecified".to_string())),
                ),
            ),
            Breakdown::from_counts(
                "Active by form",
                count_by(
                    medicines
                        .iter()
                        .filter(|m| m.is_active)
                        .map(|m| m.form.clone().unwrap_or_else(|| "Unspecified".to_string())),
                ),
            ),
        ],
    }
}

/// Build a report from records
pub fn build(kind: ReportKind, records: &Records, now: DateTime<Utc>, today: NaiveDate) -> Report {
    match kind {
        ReportKind::Patients => patients_report(records, now),
        ReportKind::Appointments => appointments_report(records),
        ReportKind::Medicines => medicines_report(records, today),
    }
}

/// Service behind `clinicdesk report`
pub struct ReportService {
    repository: FileSystemRepository,
}

impl ReportService {
    pub fn new(repository: FileSystemRepository) -> Self {
        ReportService { repository }
    }

    pub fn show(&self, kind: &str, now: DateTime<Utc>, today: NaiveDate) -> Result<Report> {
        let kind = ReportKind::from_str(kind).map_err(ClinicError::InvalidArgument)?;
        let records = self.repository.load_records()?;
        log::debug!("event=report_build status=ok kind={}", kind);
        Ok(build(kind, &records, now, today))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::records::{Appointment, Clinic, Gender, Medicine, Patient, User, UserType};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap()
    }

    fn records() -> Records {
        let now = now();
        let mut records = Records::new(Clinic::new("Northside", "northside", now));
        let clinic_id = records.clinic.id;
        let doctor = User::new(clinic_id, "Dr. Alan Grant", "alan@northside.test", UserType::Doctor, now);

        let mut a = Patient::new(clinic_id, "Emma", "Watson", 8822, now);
        a.gender = Some(Gender::Female);
        a.assigned_doctor_id = Some(doctor.id.clone());
        let mut b = Patient::new(clinic_id, "John", "Doe", 8790, now - Duration::days(100));
        b.status = PatientStatus::Critical;

        let start = NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        for (status, duration) in [
            (AppointmentStatus::Completed, 30),
            (AppointmentStatus::Completed, 60),
            (AppointmentStatus::NoShow, 30),
            (AppointmentStatus::Pending, 40),
        ] {
            let mut appt = Appointment::new(clinic_id, a.id, &doctor.id, "Visit", start, now);
            appt.status = status;
            appt.duration = duration;
            records.appointments.push(appt);
        }

        for (name, form, active, days_ago) in [
            ("Metformin", "Tablet", true, Some(10)),
            ("Lisinopril", "Tablet", false, Some(200)),
            ("Salbutamol", "Inhaler", true, None),
        ] {
            let mut m = Medicine::new(clinic_id, name, now);
            m.form = Some(form.to_string());
            m.is_active = active;
            m.last_prescribed_date = days_ago.map(|d| start - Duration::days(d));
            records.medicines.push(m);
        }

        records.users.push(doctor);
        records.patients.extend([a, b]);
        records
    }

    fn metric<'a>(report: &'a Report, name: &str) -> &'a str {
        report
            .metrics
            .iter()
            .find(|(label, _)| *label == name)
            .map(|(_, v)| v.as_str())
            .unwrap()
    }

    #[test]
    fn test_report_kind_parse() {
        assert_eq!("Patients".parse::<ReportKind>().unwrap(), ReportKind::Patients);
        assert!("billing".parse::<ReportKind>().is_err());
    }

    #[test]
    fn test_patients_report() {
        let report = build(ReportKind::Patients, &records(), now(), now().date_naive());
        assert_eq!(metric(&report, "Total patients"), "2");
        assert_eq!(metric(&report, "New in last 30 days"), "1");
        let doctors = &report.breakdowns[2];
        assert!(doctors.rows.contains(&("Unassigned".to_string(), 1)));
        assert!(doctors.rows.contains(&("Dr. Alan Grant".to_string(), 1)));
        assert_eq!(report.breakdowns[1].total(), 2);
    }

    #[test]
    fn test_appointments_report_rates() {
        let report = build(ReportKind::Appointments, &records(), now(), now().date_naive());
        assert_eq!(metric(&report, "Completion rate"), "50.0%");
        assert_eq!(metric(&report, "No-show rate"), "25.0%");
        assert_eq!(metric(&report, "Average duration"), "40 min");
        assert_eq!(report.breakdowns[0].rows[0], ("completed".to_string(), 2));
    }

    #[test]
    fn test_medicines_report() {
        let report = build(ReportKind::Medicines, &records(), now(), now().date_naive());
        assert_eq!(metric(&report, "Active"), "2");
        assert_eq!(metric(&report, "Prescribed in last 90 days"), "1");
        assert_eq!(report.breakdowns[0].rows[0], ("Tablet".to_string(), 2));
        assert_eq!(report.breakdowns[1].total(), 2);
    }

    #[test]
    fn test_empty_clinic_has_zero_rates() {
        let empty = Records::new(Clinic::new("Empty", "empty", now()));
        let report = build(ReportKind::Appointments, &empty, now(), now().date_naive());
        assert_eq!(metric(&report, "Completion rate"), "0.0%");
        assert_eq!(metric(&report, "Average duration"), "0 min");
    }
}
