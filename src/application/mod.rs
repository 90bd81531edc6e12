//! Application layer - Use cases and orchestration

pub mod calendar;
pub mod dashboard;
pub mod demo;
pub mod directory;
pub mod init;
pub mod manage_config;
pub mod medicines;
pub mod patients;
pub mod records;
pub mod reports;

pub use calendar::{CalendarBody, CalendarPage, CalendarRequest, CalendarService};
pub use dashboard::{Dashboard, DashboardService};
pub use directory::{DirectoryQuery, TablePage};
pub use init::InitOptions;
pub use manage_config::ConfigService;
pub use medicines::{MedicineRow, MedicinesService};
pub use patients::{PatientRow, PatientsService};
pub use records::RecordsService;
pub use reports::{Report, ReportService};
