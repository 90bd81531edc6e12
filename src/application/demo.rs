//! Demo clinic content for `clinicdesk init --demo`

use crate::domain::records::{
    Appointment, AppointmentStatus, AppointmentType, Document, DocumentOwner, DocumentType,
    Gender, Medicine, Patient, PatientStatus, Records, User, UserType,
};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

const DOCTORS: [(&str, &str); 3] = [
    ("Dr. Sarah Jenkins", "sarah.jenkins"),
    ("Dr. Alan Grant", "alan.grant"),
    ("Dr. Emily Chen", "emily.chen"),
];

struct DemoPatient {
    first: &'static str,
    last: &'static str,
    chart: u32,
    email: &'static str,
    phone: &'static str,
    gender: Gender,
    status: PatientStatus,
    doctor: usize,
}

const PATIENTS: [DemoPatient; 8] = [
    DemoPatient { first: "Michael", last: "Ross", chart: 8821, email: "michael.ross@example.com", phone: "+1 (555) 012-3456", gender: Gender::Male, status: PatientStatus::Active, doctor: 0 },
    DemoPatient { first: "Emma", last: "Watson", chart: 8822, email: "emma.watson@example.com", phone: "+1 (555) 234-5678", gender: Gender::Female, status: PatientStatus::Active, doctor: 1 },
    DemoPatient { first: "John", last: "Doe", chart: 8790, email: "john.doe@example.com", phone: "+1 (555) 345-6789", gender: Gender::Male, status: PatientStatus::Inactive, doctor: 0 },
    DemoPatient { first: "Alice", last: "Wong", chart: 8805, email: "alice.w@example.com", phone: "+1 (555) 456-7890", gender: Gender::Female, status: PatientStatus::Critical, doctor: 2 },
    DemoPatient { first: "Robert", last: "Brown", chart: 8810, email: "r.brown@example.com", phone: "+1 (555) 567-8901", gender: Gender::Male, status: PatientStatus::Active, doctor: 1 },
    DemoPatient { first: "Priya", last: "Sharma", chart: 8834, email: "priya.sharma@example.com", phone: "+1 (555) 678-9012", gender: Gender::Female, status: PatientStatus::Active, doctor: 2 },
    DemoPatient { first: "James", last: "O'Connor", chart: 8799, email: "j.oconnor@example.com", phone: "+1 (555) 789-0123", gender: Gender::Male, status: PatientStatus::Inactive, doctor: 0 },
    DemoPatient { first: "Fatima", last: "Al-Hassan", chart: 8841, email: "fatima.h@example.com", phone: "+1 (555) 890-1234", gender: Gender::Female, status: PatientStatus::Critical, doctor: 1 },
];

/// (name, brand, form, active, days since last prescribed)
const MEDICINES: [(&str, &str, &str, bool, Option<i64>); 6] = [
    ("Amoxicillin", "Amoxil", "Capsule", true, Some(3)),
    ("Metformin", "Glucophage", "Tablet", true, Some(12)),
    ("Lisinopril", "Zestril", "Tablet", true, Some(40)),
    ("Salbutamol", "Ventolin", "Inhaler", true, Some(120)),
    ("Paracetamol", "Calpol", "Syrup", true, None),
    ("Ibuprofen", "Advil", "Tablet", false, Some(400)),
];

/// (day offset from today, hour, minute, duration, patient, type, title)
const SCHEDULE: [(i64, u32, u32, u32, usize, AppointmentType, &str); 14] = [
    (-3, 9, 0, 30, 0, AppointmentType::General, "General Checkup"),
    (-3, 11, 30, 60, 3, AppointmentType::Emergency, "Chest pain assessment"),
    (-2, 10, 0, 30, 1, AppointmentType::FollowUp, "Follow-up"),
    (-2, 15, 0, 30, 6, AppointmentType::General, "Consultation"),
    (-1, 8, 30, 45, 7, AppointmentType::FollowUp, "Blood pressure review"),
    (-1, 13, 0, 30, 4, AppointmentType::General, "Blood Work"),
    (0, 9, 0, 30, 2, AppointmentType::General, "General Checkup"),
    (0, 10, 30, 30, 1, AppointmentType::FollowUp, "Follow-up"),
    (0, 13, 0, 60, 4, AppointmentType::General, "Consultation"),
    (0, 14, 30, 30, 3, AppointmentType::General, "Blood Work"),
    (1, 9, 30, 30, 5, AppointmentType::General, "Annual physical"),
    (1, 16, 0, 90, 7, AppointmentType::Emergency, "Cardiology workup"),
    (2, 11, 0, 30, 0, AppointmentType::FollowUp, "Lab results review"),
    (3, 10, 0, 45, 5, AppointmentType::FollowUp, "Medication review"),
];

fn status_for(index: usize, day_offset: i64) -> AppointmentStatus {
    match day_offset {
        d if d < 0 && index % 4 == 3 => AppointmentStatus::NoShow,
        d if d < 0 => AppointmentStatus::Completed,
        _ => AppointmentStatus::Pending,
    }
}

/// Fill an empty clinic with doctors, patients, a week of appointments
/// around `today`, documents and medicines
pub fn seed(records: &mut Records, today: NaiveDate, now: DateTime<Utc>) {
    let clinic_id = records.clinic.id;
    let domain = format!("{}.clinic", records.clinic.subdomain);

    let doctor_ids: Vec<String> = DOCTORS
        .iter()
        .enumerate()
        .map(|(i, (name, handle))| {
            let mut user = User::new(
                clinic_id,
                name,
                &format!("{}@{}", handle, domain),
                UserType::Doctor,
                now - Duration::days(120),
            );
            user.chart_id = Some(100 + i as u32);
            user.email_verified = true;
            let id = user.id.clone();
            records.users.push(user);
            id
        })
        .collect();

    let admin = User::new(
        clinic_id,
        "Front Desk",
        &format!("frontdesk@{}", domain),
        UserType::Admin,
        now - Duration::days(120),
    );
    let admin_id = admin.id.clone();
    records.users.push(admin);

    let patient_ids: Vec<Uuid> = PATIENTS
        .iter()
        .enumerate()
        .map(|(i, p)| {
            // Spread registrations so growth figures are non-trivial
            let created = now - Duration::days(7 * i as i64) - Duration::hours(i as i64);
            let mut patient = Patient::new(clinic_id, p.first, p.last, p.chart, created);
            patient.email = Some(p.email.to_string());
            patient.phone = Some(p.phone.to_string());
            patient.gender = Some(p.gender);
            patient.status = p.status;
            patient.assigned_doctor_id = Some(doctor_ids[p.doctor].clone());
            patient.created_by = Some(admin_id.clone());
            let id = patient.id;
            records.patients.push(patient);
            id
        })
        .collect();

    for (i, (offset, hour, minute, duration, patient, kind, title)) in
        SCHEDULE.iter().copied().enumerate()
    {
        let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default();
        let start = (today + Duration::days(offset)).and_time(time);
        let doctor = &doctor_ids[PATIENTS[patient].doctor];
        let booked = now - Duration::days(10 - offset.min(0).abs()) - Duration::hours(i as i64);

        let mut appt = Appointment::new(
            clinic_id,
            patient_ids[patient],
            doctor,
            title,
            start,
            booked,
        );
        appt.duration = duration;
        appt.appointment_type = kind;
        appt.status = status_for(i, offset);
        appt.created_by = Some(admin_id.clone());
        if appt.status != AppointmentStatus::Pending {
            let closed = (start + Duration::minutes(i64::from(duration))).and_utc();
            appt.updated_at = closed.min(now);
        }
        if appt.status == AppointmentStatus::Completed {
            appt.actual_check_in = Some(start);
            appt.actual_check_out = Some(appt.end());
        }
        records.appointments.push(appt);
    }

    let lab_appointment = records
        .appointments
        .iter()
        .find(|a| a.patient_id == patient_ids[0] && a.status == AppointmentStatus::Completed)
        .map(|a| a.id);
    let documents = [
        (
            DocumentOwner::Patient(patient_ids[0]),
            "Hematology report",
            DocumentType::LabReport,
            lab_appointment,
            "application/pdf",
            Duration::minutes(12),
        ),
        (
            DocumentOwner::Patient(patient_ids[3]),
            "Chest X-ray",
            DocumentType::XRay,
            None,
            "image/png",
            Duration::hours(26),
        ),
        (
            DocumentOwner::Patient(patient_ids[1]),
            "Insurance card",
            DocumentType::Insurance,
            None,
            "image/jpeg",
            Duration::days(5),
        ),
        (
            DocumentOwner::User(doctor_ids[0].clone()),
            "Medical license",
            DocumentType::Identification,
            None,
            "application/pdf",
            Duration::days(100),
        ),
    ];
    for (owner, title, document_type, appointment_id, mime, age) in documents {
        let id = Uuid::new_v4();
        let extension = mime.rsplit('/').next().unwrap_or("bin");
        let created = now - age;
        records.documents.push(Document {
            id,
            clinic_id,
            title: title.to_string(),
            description: None,
            document_type,
            appointment_id,
            file_key: format!("{}/{}", clinic_id, id),
            file_name: format!("{}.{}", title.to_lowercase().replace(' ', "-"), extension),
            file_size: 48_000 + title.len() as u64 * 1_024,
            mime_type: mime.to_string(),
            uploaded_by: Some(admin_id.clone()),
            created_at: created,
            updated_at: created,
            owner,
        });
    }

    for (i, (name, brand, form, active, prescribed)) in MEDICINES.iter().copied().enumerate() {
        let mut medicine = Medicine::new(clinic_id, name, now - Duration::days(60 + i as i64));
        medicine.brand = Some(brand.to_string());
        medicine.form = Some(form.to_string());
        medicine.is_active = active;
        medicine.last_prescribed_date = prescribed
            .map(|days| (today - Duration::days(days)).and_time(NaiveTime::default()));
        medicine.created_by = Some(admin_id.clone());
        records.medicines.push(medicine);
    }
}
