//! Integrity rules checked before records are persisted
//!
//! These mirror the unique indexes and foreign keys of the relational
//! schema: chart ids and emails are unique per clinic, and every reference
//! has to point at an existing row of the same clinic.

use crate::domain::records::{DocumentOwner, Records, UserType};
use crate::error::{ClinicError, Result};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

const MAX_NAME_LEN: usize = 255;
const MAX_SUBDOMAIN_LEN: usize = 100;
const MAX_PERSON_NAME_LEN: usize = 100;
const MAX_PHONE_LEN: usize = 20;

fn subdomain_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").unwrap())
}

fn email_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap())
}

/// Check a subdomain on its own (used by `init` before any records exist)
pub fn check_subdomain(subdomain: &str) -> Result<()> {
    if subdomain.len() > MAX_SUBDOMAIN_LEN || !subdomain_regex().is_match(subdomain) {
        return Err(ClinicError::Constraint(format!(
            "subdomain '{}' must be lowercase letters, digits and single hyphens (max {} chars)",
            subdomain, MAX_SUBDOMAIN_LEN
        )));
    }
    Ok(())
}

fn check_len(field: &str, value: &str, max: usize) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ClinicError::Constraint(format!("{} must not be empty", field)));
    }
    if value.chars().count() > max {
        return Err(ClinicError::Constraint(format!(
            "{} exceeds {} characters",
            field, max
        )));
    }
    Ok(())
}

fn check_phone(field: &str, value: Option<&str>) -> Result<()> {
    match value {
        Some(phone) if phone.chars().count() > MAX_PHONE_LEN => Err(ClinicError::Constraint(
            format!("{} exceeds {} characters", field, MAX_PHONE_LEN),
        )),
        _ => Ok(()),
    }
}

fn check_email(field: &str, value: Option<&str>) -> Result<()> {
    match value {
        Some(email) if !email_regex().is_match(email) => Err(ClinicError::Constraint(format!(
            "{} '{}' is not a valid address",
            field, email
        ))),
        _ => Ok(()),
    }
}

/// Validate the whole record set; the first violation wins
pub fn validate(records: &Records) -> Result<()> {
    let clinic = &records.clinic;
    let clinic_id = clinic.id;

    check_len("clinic name", &clinic.name, MAX_NAME_LEN)?;
    check_subdomain(&clinic.subdomain)?;
    check_phone("clinic phone", clinic.phone.as_deref())?;
    check_email("clinic email", clinic.email.as_deref())?;

    let mut user_ids = HashSet::new();
    let mut user_emails = HashSet::new();
    let mut user_charts = HashSet::new();
    for user in &records.users {
        if user.clinic_id.is_some_and(|id| id != clinic_id) {
            return Err(ClinicError::Constraint(format!(
                "user {} belongs to another clinic",
                user.id
            )));
        }
        check_len("user name", &user.name, MAX_NAME_LEN)?;
        check_email("user email", Some(&user.email))?;
        check_phone("user phone", user.phone.as_deref())?;
        if !user_ids.insert(user.id.as_str()) {
            return Err(ClinicError::Constraint(format!(
                "duplicate user id {}",
                user.id
            )));
        }
        if !user_emails.insert(user.email.to_lowercase()) {
            return Err(ClinicError::Constraint(format!(
                "email {} is already used in this clinic",
                user.email
            )));
        }
        if let Some(chart) = user.chart_id {
            if !user_charts.insert(chart) {
                return Err(ClinicError::Constraint(format!(
                    "user chart id {} is already used in this clinic",
                    chart
                )));
            }
        }
    }

    let mut patient_ids = HashSet::new();
    let mut patient_charts = HashSet::new();
    for patient in &records.patients {
        if patient.clinic_id != clinic_id {
            return Err(ClinicError::Constraint(format!(
                "patient {} belongs to another clinic",
                patient.chart_id
            )));
        }
        check_len("first name", &patient.first_name, MAX_PERSON_NAME_LEN)?;
        check_len("last name", &patient.last_name, MAX_PERSON_NAME_LEN)?;
        check_email("patient email", patient.email.as_deref())?;
        check_phone("patient phone", patient.phone.as_deref())?;
        check_phone(
            "emergency contact phone",
            patient.emergency_contact_phone.as_deref(),
        )?;
        if !patient_ids.insert(patient.id) {
            return Err(ClinicError::Constraint(format!(
                "duplicate patient id {}",
                patient.id
            )));
        }
        if !patient_charts.insert(patient.chart_id) {
            return Err(ClinicError::Constraint(format!(
                "chart id {} is already used in this clinic",
                patient.chart_id
            )));
        }
        if let Some(doctor_id) = &patient.assigned_doctor_id {
            match records.user(doctor_id) {
                Some(u) if u.user_type == UserType::Doctor => {}
                _ => {
                    return Err(ClinicError::Constraint(format!(
                        "patient {} is assigned to unknown doctor {}",
                        patient.chart_id, doctor_id
                    )))
                }
            }
        }
    }

    let mut appointment_ids = HashSet::new();
    for appt in &records.appointments {
        if appt.clinic_id != clinic_id {
            return Err(ClinicError::Constraint(format!(
                "appointment {} belongs to another clinic",
                appt.id
            )));
        }
        check_len("appointment title", &appt.title, MAX_NAME_LEN)?;
        if appt.duration == 0 {
            return Err(ClinicError::Constraint(format!(
                "appointment {} must last at least one minute",
                appt.id
            )));
        }
        if !patient_ids.contains(&appt.patient_id) {
            return Err(ClinicError::Constraint(format!(
                "appointment {} references unknown patient {}",
                appt.id, appt.patient_id
            )));
        }
        if !user_ids.contains(appt.doctor_id.as_str()) {
            return Err(ClinicError::Constraint(format!(
                "appointment {} references unknown doctor {}",
                appt.id, appt.doctor_id
            )));
        }
        appointment_ids.insert(appt.id);
    }

    for doc in &records.documents {
        if doc.clinic_id != clinic_id {
            return Err(ClinicError::Constraint(format!(
                "document {} belongs to another clinic",
                doc.id
            )));
        }
        check_len("document title", &doc.title, MAX_NAME_LEN)?;
        let owner_exists = match &doc.owner {
            DocumentOwner::Patient(id) => patient_ids.contains(id),
            DocumentOwner::User(id) => user_ids.contains(id.as_str()),
        };
        if !owner_exists {
            return Err(ClinicError::Constraint(format!(
                "document {} is assigned to a missing owner",
                doc.id
            )));
        }
        if let Some(appt_id) = doc.appointment_id {
            if !appointment_ids.contains(&appt_id) {
                return Err(ClinicError::Constraint(format!(
                    "document {} references unknown appointment {}",
                    doc.id, appt_id
                )));
            }
        }
    }

    for medicine in &records.medicines {
        if medicine.clinic_id != clinic_id {
            return Err(ClinicError::Constraint(format!(
                "medicine {} belongs to another clinic",
                medicine.name
            )));
        }
        check_len("medicine name", &medicine.name, MAX_NAME_LEN)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::records::{Appointment, Clinic, Document, DocumentType, Patient, User};
    use chrono::{NaiveDate, TimeZone, Utc};
    use uuid::Uuid;

    fn base() -> Records {
        let now = Utc.with_ymd_and_hms(2026, 10, 17, 8, 0, 0).unwrap();
        let clinic = Clinic::new("Northside Family Clinic", "northside", now);
        let mut records = Records::new(clinic.clone());
        records.users.push(User::new(
            clinic.id,
            "Dr. Sarah Jenkins",
            "sarah@northside.test",
            UserType::Doctor,
            now,
        ));
        records
            .patients
            .push(Patient::new(clinic.id, "Michael", "Ross", 8821, now));
        records
    }

    #[test]
    fn test_valid_records_pass() {
        assert!(validate(&base()).is_ok());
    }

    #[test]
    fn test_duplicate_chart_id_rejected() {
        let mut records = base();
        let dup = Patient::new(records.clinic.id, "Emma", "Watson", 8821, Utc::now());
        records.patients.push(dup);
        let err = validate(&records).unwrap_err();
        assert!(matches!(err, ClinicError::Constraint(ref m) if m.contains("8821")));
    }

    #[test]
    fn test_duplicate_email_is_case_insensitive() {
        let mut records = base();
        records.users.push(User::new(
            records.clinic.id,
            "Someone Else",
            "SARAH@northside.test",
            UserType::Staff,
            Utc::now(),
        ));
        assert!(validate(&records).is_err());
    }

    #[test]
    fn test_appointment_requires_known_patient_and_doctor() {
        let mut records = base();
        let start = NaiveDate::from_ymd_opt(2026, 10, 17)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let doctor = records.users[0].id.clone();
        let appt = Appointment::new(
            records.clinic.id,
            Uuid::new_v4(),
            &doctor,
            "Checkup",
            start,
            Utc::now(),
        );
        records.appointments.push(appt);
        let err = validate(&records).unwrap_err();
        assert!(err.to_string().contains("unknown patient"));

        let patient = records.patients[0].id;
        records.appointments[0].patient_id = patient;
        records.appointments[0].doctor_id = "ghost".to_string();
        assert!(validate(&records).unwrap_err().to_string().contains("unknown doctor"));
    }

    #[test]
    fn test_zero_duration_rejected() {
        let mut records = base();
        let start = NaiveDate::from_ymd_opt(2026, 10, 17)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let mut appt = Appointment::new(
            records.clinic.id,
            records.patients[0].id,
            &records.users[0].id.clone(),
            "Checkup",
            start,
            Utc::now(),
        );
        appt.duration = 0;
        records.appointments.push(appt);
        assert!(validate(&records).is_err());
    }

    #[test]
    fn test_document_owner_must_exist() {
        let mut records = base();
        let now = Utc::now();
        records.documents.push(Document {
            id: Uuid::new_v4(),
            clinic_id: records.clinic.id,
            title: "ID card".to_string(),
            description: None,
            document_type: DocumentType::Identification,
            appointment_id: None,
            file_key: "k".to_string(),
            file_name: "id.png".to_string(),
            file_size: 10,
            mime_type: "image/png".to_string(),
            uploaded_by: None,
            created_at: now,
            updated_at: now,
            owner: DocumentOwner::User("nobody".to_string()),
        });
        assert!(validate(&records).is_err());

        records.documents[0].owner = DocumentOwner::Patient(records.patients[0].id);
        assert!(validate(&records).is_ok());
    }

    #[test]
    fn test_assigned_doctor_must_be_a_doctor() {
        let mut records = base();
        let staff = User::new(
            records.clinic.id,
            "Front Desk",
            "desk@northside.test",
            UserType::Staff,
            Utc::now(),
        );
        records.patients[0].assigned_doctor_id = Some(staff.id.clone());
        records.users.push(staff);
        assert!(validate(&records).is_err());
    }

    #[test]
    fn test_subdomain_format() {
        assert!(check_subdomain("north-side").is_ok());
        assert!(check_subdomain("clinic42").is_ok());
        assert!(check_subdomain("North").is_err());
        assert!(check_subdomain("bad--dash").is_err());
        assert!(check_subdomain("").is_err());
    }
}
