//! Initialize clinic use case

use crate::application::demo;
use crate::domain::constraints;
use crate::domain::records::{Clinic, Records};
use crate::error::Result;
use crate::infrastructure::{ClinicRepository, Config, FileSystemRepository};
use chrono::{Local, Utc};
use std::fs;
use std::path::Path;

/// Options for `clinicdesk init`
#[derive(Debug, Clone)]
pub struct InitOptions {
    pub name: String,
    pub subdomain: String,
    /// Seed doctors, patients, appointments, documents and medicines
    pub demo: bool,
}

/// Initialize a new clinic at the specified path.
pub fn init(path: &Path, options: &InitOptions) -> Result<()> {
    let subdomain = options.subdomain.trim().to_lowercase();
    constraints::check_subdomain(&subdomain)?;

    let now = Utc::now();
    let mut records = Records::new(Clinic::new(options.name.trim(), &subdomain, now));
    if options.demo {
        demo::seed(&mut records, Local::now().date_naive(), now);
    }
    // Nothing touches the disk until the records are known to be valid
    constraints::validate(&records)?;

    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let repo = FileSystemRepository::new(path.to_path_buf());
    repo.initialize()?;
    repo.save_config(&Config::new())?;
    repo.save_records(&records)?;

    log::info!(
        "event=clinic_init status=ok subdomain={} demo={}",
        subdomain,
        options.demo
    );
    println!(
        "Initialized clinic '{}' ({}) at {}",
        records.clinic.name,
        subdomain,
        path.display()
    );
    if options.demo {
        println!(
            "Seeded {} doctors, {} patients, {} appointments, {} documents, {} medicines",
            records.doctors().count(),
            records.patients.len(),
            records.appointments.len(),
            records.documents.len(),
            records.medicines.len()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClinicError;
    use tempfile::TempDir;

    fn options(subdomain: &str, demo: bool) -> InitOptions {
        InitOptions {
            name: "Northside Family Practice".to_string(),
            subdomain: subdomain.to_string(),
            demo,
        }
    }

    #[test]
    fn test_init_writes_config_and_records() {
        let temp = TempDir::new().unwrap();
        init(temp.path(), &options("northside", false)).unwrap();

        let repo = FileSystemRepository::new(temp.path().to_path_buf());
        assert!(repo.load_config().is_ok());
        let records = repo.load_records().unwrap();
        assert_eq!(records.clinic.subdomain, "northside");
        assert!(records.patients.is_empty());
    }

    #[test]
    fn test_init_demo_seeds_records() {
        let temp = TempDir::new().unwrap();
        init(temp.path(), &options("northside", true)).unwrap();
        let records = FileSystemRepository::new(temp.path().to_path_buf())
            .load_records()
            .unwrap();
        assert_eq!(records.patients.len(), 8);
    }

    #[test]
    fn test_bad_subdomain_leaves_directory_untouched() {
        let temp = TempDir::new().unwrap();
        match init(temp.path(), &options("north side!", false)) {
            Err(ClinicError::Constraint(_)) => {}
            other => panic!("Expected Constraint error, got {:?}", other),
        }
        assert!(!temp.path().join(".clinicdesk").exists());
    }

    #[test]
    fn test_init_twice_fails() {
        let temp = TempDir::new().unwrap();
        init(temp.path(), &options("northside", false)).unwrap();
        assert!(init(temp.path(), &options("northside", false)).is_err());
    }
}
