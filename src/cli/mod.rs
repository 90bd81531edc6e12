//! CLI layer - Command-line interface

pub mod calendar;
pub mod commands;
pub mod output;

pub use calendar::format_calendar;
pub use commands::{
    AppointmentCommand, Cli, Commands, DirectoryArgs, DoctorCommand, MedicineCommand,
    PatientCommand,
};
pub use output::{format_config, format_dashboard, format_medicines, format_patients, format_report};
