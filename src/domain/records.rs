//! Clinic records: the relational schema as plain Rust types
//!
//! Every business record carries the id of the clinic it belongs to. A
//! clinic directory holds exactly one tenant, so [`Records`] bundles the
//! clinic row together with all rows scoped to it.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Declares a string-backed enum with its wire names, `FromStr` and `Display`.
macro_rules! string_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let normalized = s.trim().to_lowercase();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == normalized)
                    .ok_or_else(|| {
                        let valid: Vec<&str> = $name::ALL.iter().map(|v| v.as_str()).collect();
                        format!(
                            "Invalid {}: '{}'. Valid values are: {}",
                            stringify!($name),
                            s,
                            valid.join(", ")
                        )
                    })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_enum!(
    /// Staff role
    UserType { Admin => "admin", Doctor => "doctor", Staff => "staff" }
);

string_enum!(Gender { Male => "male", Female => "female", Other => "other" });

string_enum!(
    /// Clinical status shown in the patients directory
    PatientStatus { Active => "active", Inactive => "inactive", Critical => "critical" }
);

string_enum!(AppointmentStatus {
    Pending => "pending",
    Completed => "completed",
    Cancelled => "cancelled",
    NoShow => "no-show",
});

string_enum!(AppointmentType {
    General => "general",
    FollowUp => "follow-up",
    Emergency => "emergency",
});

string_enum!(DocumentType {
    Prescription => "prescription",
    LabReport => "lab-report",
    XRay => "x-ray",
    Scan => "scan",
    Identification => "identification",
    Insurance => "insurance",
    ConsentForm => "consent-form",
    Other => "other",
});

impl Default for UserType {
    fn default() -> Self {
        UserType::Staff
    }
}

impl Default for PatientStatus {
    fn default() -> Self {
        PatientStatus::Active
    }
}

impl Default for AppointmentStatus {
    fn default() -> Self {
        AppointmentStatus::Pending
    }
}

impl Default for AppointmentType {
    fn default() -> Self {
        AppointmentType::General
    }
}

impl Default for DocumentType {
    fn default() -> Self {
        DocumentType::Other
    }
}

impl AppointmentType {
    /// Human-readable label used on calendar cards
    pub fn label(&self) -> &'static str {
        match self {
            AppointmentType::General => "General",
            AppointmentType::FollowUp => "Follow-up",
            AppointmentType::Emergency => "Emergency",
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_duration() -> u32 {
    30
}

/// Tenant root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clinic {
    pub id: Uuid,
    pub name: String,
    pub subdomain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Clinic {
    pub fn new(name: &str, subdomain: &str, now: DateTime<Utc>) -> Self {
        Clinic {
            id: Uuid::new_v4(),
            name: name.to_string(),
            subdomain: subdomain.to_string(),
            license_number: None,
            address: None,
            phone: None,
            email: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Staff member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clinic_id: Option<Uuid>,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_id: Option<u32>,
    #[serde(rename = "type", default)]
    pub user_type: UserType,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        clinic_id: Uuid,
        name: &str,
        email: &str,
        user_type: UserType,
        now: DateTime<Utc>,
    ) -> Self {
        User {
            id: Uuid::new_v4().simple().to_string(),
            clinic_id: Some(clinic_id),
            name: name.to_string(),
            email: email.to_string(),
            email_verified: false,
            image: None,
            first_name: None,
            last_name: None,
            phone: None,
            address: None,
            chart_id: None,
            user_type,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Individual medical record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: Uuid,
    pub clinic_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub chart_id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allergies: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: PatientStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_doctor_id: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Patient {
    pub fn new(
        clinic_id: Uuid,
        first_name: &str,
        last_name: &str,
        chart_id: u32,
        now: DateTime<Utc>,
    ) -> Self {
        Patient {
            id: Uuid::new_v4(),
            clinic_id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: None,
            phone: None,
            address: None,
            chart_id,
            date_of_birth: None,
            gender: None,
            blood_group: None,
            emergency_contact_name: None,
            emergency_contact_phone: None,
            allergies: None,
            notes: None,
            status: PatientStatus::Active,
            assigned_doctor_id: None,
            is_active: true,
            created_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Clinical consultation or procedure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub clinic_id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub status: AppointmentStatus,
    #[serde(rename = "type", default)]
    pub appointment_type: AppointmentType,
    /// Start of the appointment in clinic-local time
    pub date: NaiveDateTime,
    /// Length in minutes
    #[serde(default = "default_duration")]
    pub duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_check_in: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_check_out: Option<NaiveDateTime>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    pub fn new(
        clinic_id: Uuid,
        patient_id: Uuid,
        doctor_id: &str,
        title: &str,
        date: NaiveDateTime,
        now: DateTime<Utc>,
    ) -> Self {
        Appointment {
            id: Uuid::new_v4(),
            clinic_id,
            patient_id,
            doctor_id: doctor_id.to_string(),
            title: title.to_string(),
            description: None,
            status: AppointmentStatus::Pending,
            appointment_type: AppointmentType::General,
            date,
            duration: default_duration(),
            notes: None,
            actual_check_in: None,
            actual_check_out: None,
            is_active: true,
            created_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Exclusive end of the time window
    pub fn end(&self) -> NaiveDateTime {
        self.date + Duration::minutes(i64::from(self.duration))
    }
}

/// Who a document is attached to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum DocumentOwner {
    Patient(Uuid),
    User(String),
}

/// File metadata; blobs live in external storage under `file_key`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub clinic_id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", default)]
    pub document_type: DocumentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointment_id: Option<Uuid>,
    pub file_key: String,
    pub file_name: String,
    pub file_size: u64,
    pub mime_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    // Table-valued, so it has to come after the plain values
    pub owner: DocumentOwner,
}

/// Reference entry for pharmacological data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medicine {
    pub id: Uuid,
    pub clinic_id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Tablet, Syrup, Capsule, ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_prescribed_date: Option<NaiveDateTime>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Medicine {
    pub fn new(clinic_id: Uuid, name: &str, now: DateTime<Utc>) -> Self {
        Medicine {
            id: Uuid::new_v4(),
            clinic_id,
            name: name.to_string(),
            description: None,
            brand: None,
            form: None,
            last_prescribed_date: None,
            is_active: true,
            created_by: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// All rows belonging to one clinic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Records {
    pub clinic: Clinic,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub patients: Vec<Patient>,
    #[serde(default)]
    pub appointments: Vec<Appointment>,
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub medicines: Vec<Medicine>,
}

/// First chart id handed out in an empty clinic
pub const FIRST_CHART_ID: u32 = 1000;

impl Records {
    pub fn new(clinic: Clinic) -> Self {
        Records {
            clinic,
            users: Vec::new(),
            patients: Vec::new(),
            appointments: Vec::new(),
            documents: Vec::new(),
            medicines: Vec::new(),
        }
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn patient(&self, id: Uuid) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == id)
    }

    pub fn patient_by_chart(&self, chart_id: u32) -> Option<&Patient> {
        self.patients.iter().find(|p| p.chart_id == chart_id)
    }

    pub fn doctors(&self) -> impl Iterator<Item = &User> {
        self.users
            .iter()
            .filter(|u| u.user_type == UserType::Doctor)
    }

    /// Display name for a user id, or the raw id when it is unknown
    pub fn user_name(&self, id: &str) -> String {
        self.user(id)
            .map(|u| u.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    pub fn patient_name(&self, id: Uuid) -> String {
        self.patient(id)
            .map(Patient::full_name)
            .unwrap_or_else(|| id.to_string())
    }

    /// Next unused patient chart id; `None` once `u32::MAX` is taken
    pub fn next_chart_id(&self) -> Option<u32> {
        match self.patients.iter().map(|p| p.chart_id).max() {
            Some(highest) => highest.checked_add(1).map(|next| next.max(FIRST_CHART_ID)),
            None => Some(FIRST_CHART_ID),
        }
    }

    /// Start of the patient's most recent completed appointment
    pub fn last_visit(&self, patient_id: Uuid) -> Option<NaiveDateTime> {
        self.appointments
            .iter()
            .filter(|a| a.patient_id == patient_id && a.status == AppointmentStatus::Completed)
            .map(|a| a.date)
            .max()
    }

    /// Find an appointment by full id or unique id prefix
    pub fn appointment_by_prefix(&self, prefix: &str) -> Option<&Appointment> {
        let prefix = prefix.trim().to_lowercase();
        if prefix.is_empty() {
            return None;
        }
        let mut matches = self
            .appointments
            .iter()
            .filter(|a| a.id.to_string().starts_with(&prefix));
        let first = matches.next()?;
        match matches.next() {
            Some(_) => None,
            None => Some(first),
        }
    }

    /// Find a user by id, email, or case-insensitive name
    pub fn find_user(&self, key: &str) -> Option<&User> {
        let needle = key.trim().to_lowercase();
        self.users.iter().find(|u| {
            u.id == key.trim()
                || u.email.to_lowercase() == needle
                || u.name.to_lowercase() == needle
        })
    }
}
