//! Record creation and status updates

use crate::domain::records::{
    Appointment, AppointmentStatus, AppointmentType, Gender, Medicine, Patient, PatientStatus,
    Records, User, UserType,
};
use crate::error::{ClinicError, Result};
use crate::infrastructure::{ClinicRepository, FileSystemRepository};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct NewPatient {
    pub first_name: String,
    pub last_name: String,
    /// Next free chart id when omitted
    pub chart_id: Option<u32>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub status: PatientStatus,
    /// Doctor id, email or name
    pub doctor: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct NewDoctor {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct NewMedicine {
    pub name: String,
    pub brand: Option<String>,
    pub form: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub patient_chart_id: u32,
    /// Doctor id, email or name
    pub doctor: String,
    pub title: Option<String>,
    pub start: NaiveDateTime,
    pub duration: u32,
    pub appointment_type: AppointmentType,
    pub notes: Option<String>,
}

fn resolve_doctor<'a>(records: &'a Records, key: &str) -> Result<&'a User> {
    match records.find_user(key) {
        Some(user) if user.user_type == UserType::Doctor => Ok(user),
        Some(user) => Err(ClinicError::Constraint(format!(
            "{} is {} and cannot be assigned patients",
            user.name, user.user_type
        ))),
        None => Err(ClinicError::RecordNotFound(format!("doctor '{}'", key))),
    }
}

/// Add a patient; returns the assigned chart id
pub fn add_patient(records: &mut Records, input: NewPatient, now: DateTime<Utc>) -> Result<u32> {
    let chart_id = match input.chart_id {
        Some(id) => id,
        None => records.next_chart_id().ok_or_else(|| {
            ClinicError::Constraint(
                "no chart id left above the highest one; pass --chart-id".to_string(),
            )
        })?,
    };
    let doctor_id = match input.doctor.as_deref() {
        Some(key) => Some(resolve_doctor(records, key)?.id.clone()),
        None => None,
    };

    let mut patient = Patient::new(
        records.clinic.id,
        input.first_name.trim(),
        input.last_name.trim(),
        chart_id,
        now,
    );
    patient.email = input.email;
    patient.phone = input.phone;
    patient.date_of_birth = input.date_of_birth;
    patient.gender = input.gender;
    patient.status = input.status;
    patient.assigned_doctor_id = doctor_id;
    records.patients.push(patient);
    Ok(chart_id)
}

/// Add a doctor; returns the new user id
pub fn add_doctor(records: &mut Records, input: NewDoctor, now: DateTime<Utc>) -> String {
    let mut user = User::new(
        records.clinic.id,
        input.name.trim(),
        input.email.trim(),
        UserType::Doctor,
        now,
    );
    user.phone = input.phone;
    let id = user.id.clone();
    records.users.push(user);
    id
}

pub fn add_medicine(records: &mut Records, input: NewMedicine, now: DateTime<Utc>) -> Uuid {
    let mut medicine = Medicine::new(records.clinic.id, input.name.trim(), now);
    medicine.brand = input.brand;
    medicine.form = input.form;
    medicine.description = input.description;
    let id = medicine.id;
    records.medicines.push(medicine);
    id
}

/// Book an appointment for a patient looked up by chart id
pub fn add_appointment(
    records: &mut Records,
    input: NewAppointment,
    now: DateTime<Utc>,
) -> Result<Uuid> {
    let patient_id = records
        .patient_by_chart(input.patient_chart_id)
        .map(|p| p.id)
        .ok_or_else(|| {
            ClinicError::RecordNotFound(format!("patient with chart id {}", input.patient_chart_id))
        })?;
    let doctor_id = resolve_doctor(records, &input.doctor)?.id.clone();

    let title = input
        .title
        .unwrap_or_else(|| input.appointment_type.label().to_string());
    let mut appointment = Appointment::new(
        records.clinic.id,
        patient_id,
        &doctor_id,
        &title,
        input.start,
        now,
    );
    appointment.duration = input.duration;
    appointment.appointment_type = input.appointment_type;
    appointment.notes = input.notes;
    let id = appointment.id;
    records.appointments.push(appointment);
    Ok(id)
}

/// Move an appointment to a new status; `id` may be a unique prefix
pub fn set_appointment_status(
    records: &mut Records,
    id: &str,
    status: AppointmentStatus,
    now: DateTime<Utc>,
) -> Result<Uuid> {
    let found = records
        .appointment_by_prefix(id)
        .map(|a| a.id)
        .ok_or_else(|| ClinicError::RecordNotFound(format!("appointment '{}'", id)))?;
    let appointment = records
        .appointments
        .iter_mut()
        .find(|a| a.id == found)
        .ok_or_else(|| ClinicError::RecordNotFound(format!("appointment '{}'", id)))?;
    appointment.status = status;
    appointment.updated_at = now;
    Ok(found)
}

/// Service behind the `patient`, `doctor`, `medicine` and `appointment` commands.
/// Every change is validated as a whole before it is written.
pub struct RecordsService {
    repository: FileSystemRepository,
}

impl RecordsService {
    pub fn new(repository: FileSystemRepository) -> Self {
        RecordsService { repository }
    }

    fn update<T>(&self, change: impl FnOnce(&mut Records) -> Result<T>) -> Result<T> {
        let mut records = self.repository.load_records()?;
        let out = change(&mut records)?;
        records.clinic.updated_at = Utc::now();
        self.repository.save_records(&records)?;
        Ok(out)
    }

    pub fn add_patient(&self, input: NewPatient) -> Result<u32> {
        let chart_id = self.update(|r| add_patient(r, input, Utc::now()))?;
        log::info!("event=patient_add status=ok chart_id={}", chart_id);
        Ok(chart_id)
    }

    pub fn add_doctor(&self, input: NewDoctor) -> Result<String> {
        let id = self.update(|r| Ok(add_doctor(r, input, Utc::now())))?;
        log::info!("event=doctor_add status=ok id={}", id);
        Ok(id)
    }

    pub fn add_medicine(&self, input: NewMedicine) -> Result<Uuid> {
        let id = self.update(|r| Ok(add_medicine(r, input, Utc::now())))?;
        log::info!("event=medicine_add status=ok id={}", id);
        Ok(id)
    }

    pub fn add_appointment(&self, input: NewAppointment) -> Result<Uuid> {
        let id = self.update(|r| add_appointment(r, input, Utc::now()))?;
        log::info!("event=appointment_add status=ok id={}", id);
        Ok(id)
    }

    pub fn set_appointment_status(&self, id: &str, status: AppointmentStatus) -> Result<Uuid> {
        let found = self.update(|r| set_appointment_status(r, id, status, Utc::now()))?;
        log::info!(
            "event=appointment_status status=ok id={} new_status={}",
            found,
            status
        );
        Ok(found)
    }
}
