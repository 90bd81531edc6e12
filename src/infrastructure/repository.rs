//! File system repository

use crate::domain::constraints;
use crate::domain::Records;
use crate::error::{ClinicError, Result};
use crate::infrastructure::config::CLINIC_DIR;
use crate::infrastructure::Config;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable pointing at a clinic directory
pub const ROOT_ENV: &str = "CLINICDESK_ROOT";
const RECORDS_FILE: &str = "records.toml";

/// Abstract repository for clinic storage
pub trait ClinicRepository {
    /// Get the root directory of this repository
    fn root(&self) -> &Path;

    /// Load configuration from .clinicdesk/config.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to .clinicdesk/config.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if .clinicdesk directory exists
    fn is_initialized(&self) -> bool;

    /// Create .clinicdesk directory structure
    fn initialize(&self) -> Result<()>;

    /// Load every record of the clinic
    fn load_records(&self) -> Result<Records>;

    /// Validate and persist every record of the clinic
    fn save_records(&self, records: &Records) -> Result<()>;
}

/// File system implementation of ClinicRepository
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Discover clinic root by walking up from current directory
    /// First checks CLINICDESK_ROOT environment variable, then falls back to discovery
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var(ROOT_ENV) {
            let path = PathBuf::from(root_path);
            if Self::has_clinic_dir(&path) {
                log::debug!("event=discover source=env root={}", path.display());
                return Ok(FileSystemRepository::new(path));
            } else {
                return Err(ClinicError::Config(format!(
                    "{} is set to '{}' but no .clinicdesk directory found. \
                    Run 'clinicdesk init' in that directory or unset {}.",
                    ROOT_ENV,
                    path.display(),
                    ROOT_ENV
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover clinic root by walking up from a specific starting directory
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_clinic_dir(&current) {
                log::debug!("event=discover source=walk root={}", current.display());
                return Ok(FileSystemRepository::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Err(ClinicError::NotClinicDirectory(start.to_path_buf())),
            }
        }
    }

    fn has_clinic_dir(path: &Path) -> bool {
        path.join(CLINIC_DIR).is_dir()
    }

    fn records_path(&self) -> PathBuf {
        self.root.join(CLINIC_DIR).join(RECORDS_FILE)
    }

    /// Write to a temp file next to the target, then rename into place.
    ///
    /// On Windows, `rename` does not overwrite existing files, so the
    /// destination is removed first.
    fn write_atomic(path: &Path, content: &str) -> Result<()> {
        let tmp_name = format!(
            "{}.clinicdesk-tmp-{}",
            path.file_name()
                .and_then(|s| s.to_str())
                .unwrap_or(RECORDS_FILE),
            std::process::id()
        );
        let tmp_path = path.with_file_name(tmp_name);

        fs::write(&tmp_path, content)?;
        if cfg!(windows) && path.exists() {
            fs::remove_file(path)?;
        }
        fs::rename(&tmp_path, path)?;
        Ok(())
    }
}

impl ClinicRepository for FileSystemRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        Self::has_clinic_dir(&self.root)
    }

    fn initialize(&self) -> Result<()> {
        let clinic_dir = self.root.join(CLINIC_DIR);

        if clinic_dir.exists() {
            return Err(ClinicError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir(&clinic_dir)?;
        Ok(())
    }

    fn load_records(&self) -> Result<Records> {
        let path = self.records_path();
        let contents = fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ClinicError::NotClinicDirectory(self.root.clone())
            } else {
                ClinicError::Io(e)
            }
        })?;

        let records: Records = toml::from_str(&contents)?;
        log::debug!(
            "event=records_load status=ok patients={} appointments={} users={}",
            records.patients.len(),
            records.appointments.len(),
            records.users.len()
        );
        Ok(records)
    }

    fn save_records(&self, records: &Records) -> Result<()> {
        if let Err(e) = constraints::validate(records) {
            log::warn!("event=records_save status=rejected reason=\"{}\"", e);
            return Err(e);
        }

        let contents = toml::to_string_pretty(records)?;
        Self::write_atomic(&self.records_path(), &contents)?;
        log::info!(
            "event=records_save status=ok patients={} appointments={} documents={} medicines={}",
            records.patients.len(),
            records.appointments.len(),
            records.documents.len(),
            records.medicines.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::records::{Clinic, Patient};
    use chrono::Utc;
    use std::ffi::OsString;
    use std::sync::{Mutex, OnceLock};
    use tempfile::TempDir;

    fn env_test_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }

    struct EnvVarRestore {
        key: &'static str,
        previous: Option<OsString>,
    }

    impl EnvVarRestore {
        fn capture(key: &'static str) -> Self {
            Self {
                key,
                previous: std::env::var_os(key),
            }
        }
    }

    impl Drop for EnvVarRestore {
        fn drop(&mut self) {
            if let Some(value) = &self.previous {
                std::env::set_var(self.key, value);
            } else {
                std::env::remove_var(self.key);
            }
        }
    }

    fn initialized_repo(temp: &TempDir) -> (FileSystemRepository, Records) {
        let repo = FileSystemRepository::new(temp.path().to_path_buf());
        repo.initialize().unwrap();
        let records = Records::new(Clinic::new("Northside", "northside", Utc::now()));
        repo.save_records(&records).unwrap();
        (repo, records)
    }

    #[test]
    fn test_is_initialized() {
        let temp = TempDir::new().unwrap();
        let repo = FileSystemRepository::new(temp.path().to_path_buf());
        assert!(!repo.is_initialized());
        repo.initialize().unwrap();
        assert!(repo.is_initialized());
        assert!(temp.path().join(".clinicdesk").is_dir());
    }

    #[test]
    fn test_initialize_twice_fails() {
        let temp = TempDir::new().unwrap();
        let repo = FileSystemRepository::new(temp.path().to_path_buf());
        repo.initialize().unwrap();
        assert!(repo.initialize().is_err());
    }

    #[test]
    fn test_discover_from_subdirectory() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".clinicdesk")).unwrap();
        let subdir = temp.path().join("reports").join("2026");
        fs::create_dir_all(&subdir).unwrap();

        let repo = FileSystemRepository::discover_from(&subdir).unwrap();
        assert_eq!(repo.root, temp.path());
    }

    #[test]
    fn test_discover_fails_when_no_clinic_dir() {
        let temp = TempDir::new().unwrap();
        match FileSystemRepository::discover_from(temp.path()) {
            Err(ClinicError::NotClinicDirectory(_)) => {}
            other => panic!("Expected NotClinicDirectory, got {:?}", other),
        }
    }

    #[test]
    fn test_save_and_load_records() {
        let temp = TempDir::new().unwrap();
        let (repo, mut records) = initialized_repo(&temp);

        let patient = Patient::new(records.clinic.id, "Emma", "Watson", 8822, Utc::now());
        records.patients.push(patient);
        repo.save_records(&records).unwrap();

        let loaded = repo.load_records().unwrap();
        assert_eq!(loaded, records);
    }

    #[test]
    fn test_save_rejects_duplicate_chart_and_keeps_file() {
        let temp = TempDir::new().unwrap();
        let (repo, mut records) = initialized_repo(&temp);
        let clinic_id = records.clinic.id;
        records
            .patients
            .push(Patient::new(clinic_id, "Emma", "Watson", 8822, Utc::now()));
        repo.save_records(&records).unwrap();
        let before = fs::read_to_string(temp.path().join(".clinicdesk/records.toml")).unwrap();

        records
            .patients
            .push(Patient::new(clinic_id, "John", "Doe", 8822, Utc::now()));
        match repo.save_records(&records) {
            Err(ClinicError::Constraint(_)) => {}
            other => panic!("Expected Constraint error, got {:?}", other),
        }

        let after = fs::read_to_string(temp.path().join(".clinicdesk/records.toml")).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_load_records_missing_file() {
        let temp = TempDir::new().unwrap();
        let repo = FileSystemRepository::new(temp.path().to_path_buf());
        repo.initialize().unwrap();
        assert!(matches!(
            repo.load_records(),
            Err(ClinicError::NotClinicDirectory(_))
        ));
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let temp = TempDir::new().unwrap();
        initialized_repo(&temp);
        let leftovers: Vec<_> = fs::read_dir(temp.path().join(".clinicdesk"))
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().contains("tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_discover_with_root_env() {
        let _env_lock = env_test_lock().lock().unwrap();
        let _restore = EnvVarRestore::capture(ROOT_ENV);

        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".clinicdesk")).unwrap();
        std::env::set_var(ROOT_ENV, temp.path());

        let repo = FileSystemRepository::discover().unwrap();
        assert_eq!(repo.root, temp.path());
    }

    #[test]
    fn test_discover_root_env_not_initialized() {
        let _env_lock = env_test_lock().lock().unwrap();
        let _restore = EnvVarRestore::capture(ROOT_ENV);

        let temp = TempDir::new().unwrap();
        std::env::set_var(ROOT_ENV, temp.path());

        match FileSystemRepository::discover() {
            Err(ClinicError::Config(msg)) => assert!(msg.contains("no .clinicdesk directory")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }
}
