//! clinicdesk - Terminal clinic management
//!
//! Keeps a clinic's doctors, patients, appointments, documents and medicines
//! in a local directory and renders the dashboard, the searchable directories,
//! the appointments calendar and reports as text.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::ClinicError;
