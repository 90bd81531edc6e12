//! Status and initials badges shared by every table

use crate::domain::records::{AppointmentStatus, PatientStatus};
use std::str::FromStr;

/// Every status that can appear in a badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppStatus {
    Confirmed,
    Pending,
    Cancelled,
    Completed,
    NoShow,
    Rescheduled,
    Active,
    Inactive,
    Critical,
}

impl AppStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AppStatus::Confirmed => "Confirmed",
            AppStatus::Pending => "Pending",
            AppStatus::Cancelled => "Cancelled",
            AppStatus::Completed => "Completed",
            AppStatus::NoShow => "No-show",
            AppStatus::Rescheduled => "Rescheduled",
            AppStatus::Active => "Active",
            AppStatus::Inactive => "Inactive",
            AppStatus::Critical => "Critical",
        }
    }

    /// Lenient lookup: anything unrecognised renders as pending
    pub fn from_str_lossy(raw: &str) -> Self {
        AppStatus::from_str(raw).unwrap_or(AppStatus::Pending)
    }
}

impl FromStr for AppStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "confirmed" => Ok(AppStatus::Confirmed),
            "pending" => Ok(AppStatus::Pending),
            "cancelled" => Ok(AppStatus::Cancelled),
            "completed" => Ok(AppStatus::Completed),
            "no-show" => Ok(AppStatus::NoShow),
            "rescheduled" => Ok(AppStatus::Rescheduled),
            "active" => Ok(AppStatus::Active),
            "inactive" => Ok(AppStatus::Inactive),
            "critical" => Ok(AppStatus::Critical),
            _ => Err(format!("Unknown status: '{}'", s)),
        }
    }
}

impl From<AppointmentStatus> for AppStatus {
    fn from(status: AppointmentStatus) -> Self {
        match status {
            AppointmentStatus::Pending => AppStatus::Pending,
            AppointmentStatus::Completed => AppStatus::Completed,
            AppointmentStatus::Cancelled => AppStatus::Cancelled,
            AppointmentStatus::NoShow => AppStatus::NoShow,
        }
    }
}

impl From<PatientStatus> for AppStatus {
    fn from(status: PatientStatus) -> Self {
        match status {
            PatientStatus::Active => AppStatus::Active,
            PatientStatus::Inactive => AppStatus::Inactive,
            PatientStatus::Critical => AppStatus::Critical,
        }
    }
}

/// "John Doe" → "JD", "Alice" → "A"
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(AppStatus::NoShow.label(), "No-show");
        assert_eq!(AppStatus::from(PatientStatus::Critical).label(), "Critical");
        assert_eq!(AppStatus::from(AppointmentStatus::Completed).label(), "Completed");
    }

    #[test]
    fn test_unknown_status_falls_back_to_pending() {
        assert_eq!(AppStatus::from_str_lossy("archived"), AppStatus::Pending);
        assert_eq!(AppStatus::from_str_lossy("NO-SHOW"), AppStatus::NoShow);
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("John Doe"), "JD");
        assert_eq!(initials("  jane   van smith "), "JV");
        assert_eq!(initials("Alice"), "A");
        assert_eq!(initials(""), "");
        assert_eq!(initials("Fatima Al-Hassan"), "FA");
    }
}
