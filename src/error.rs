//! Error types for clinicdesk

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the clinicdesk application
#[derive(Debug, Error)]
pub enum ClinicError {
    #[error("Not a clinicdesk directory: {0}")]
    NotClinicDirectory(PathBuf),

    #[error("Invalid date reference: {0}")]
    InvalidDateReference(String),

    #[error("Record not found: {0}")]
    RecordNotFound(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Logging error: {0}")]
    Logging(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl ClinicError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            ClinicError::NotClinicDirectory(_) => 2,
            ClinicError::InvalidDateReference(_) => 3,
            ClinicError::RecordNotFound(_) => 4,
            ClinicError::Constraint(_) => 5,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            ClinicError::NotClinicDirectory(path) => {
                format!(
                    "Not a clinicdesk directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'clinicdesk init --name <NAME> --subdomain <SUB>' to create a clinic\n\
                    • Navigate to an existing clinic directory\n\
                    • Set CLINICDESK_ROOT environment variable to your clinic path",
                    path.display()
                )
            }
            ClinicError::InvalidDateReference(ref_str) => {
                format!(
                    "Invalid date reference: '{}'\n\n\
                    Valid date references:\n\
                    • today, yesterday, tomorrow\n\
                    • monday, tuesday, ..., sunday (most recent)\n\
                    • last monday, next friday, etc.\n\
                    • Specific dates: YYYY-MM-DD (e.g., 2025-01-17)\n\n\
                    Examples:\n\
                    clinicdesk calendar --date today\n\
                    clinicdesk calendar --view week --date next monday\n\
                    clinicdesk dashboard --date 2025-01-15",
                    ref_str
                )
            }
            ClinicError::RecordNotFound(what) => {
                format!(
                    "Record not found: {}\n\n\
                    Suggestions:\n\
                    • Use 'clinicdesk patients' to look up chart ids\n\
                    • Record ids may be abbreviated to a unique prefix",
                    what
                )
            }
            ClinicError::Constraint(msg) => {
                format!(
                    "Constraint violation: {}\n\n\
                    No changes were written.",
                    msg
                )
            }
            ClinicError::Config(msg) => {
                if msg.contains("Invalid view") {
                    format!(
                        "{}\n\n\
                        Valid views: month, week, day\n\
                        Example: clinicdesk config default_view week",
                        msg
                    )
                } else {
                    msg.clone()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using ClinicError
pub type Result<T> = std::result::Result<T, ClinicError>;
