//! Configuration management

use crate::domain::calendar::month::DEFAULT_MAX_EVENTS_VISIBLE;
use crate::domain::calendar::{CalendarView, TimeGridSettings};
use crate::domain::table::pagination::{DEFAULT_MAX_PAGE_CHIPS, DEFAULT_PAGE_SIZE};
use crate::error::{ClinicError, Result};
use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Name of the per-clinic metadata directory
pub const CLINIC_DIR: &str = ".clinicdesk";
const CONFIG_FILE: &str = "config.toml";

/// Keys accepted by `clinicdesk config`
pub const CONFIG_KEYS: &[&str] = &[
    "page_size",
    "max_page_chips",
    "default_view",
    "max_events_visible",
    "day_start",
    "day_end",
    "slot_minutes",
    "created",
];

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_max_page_chips() -> usize {
    DEFAULT_MAX_PAGE_CHIPS
}

fn default_max_events_visible() -> usize {
    DEFAULT_MAX_EVENTS_VISIBLE
}

fn default_day_start() -> String {
    "07:00".to_string()
}

fn default_day_end() -> String {
    "20:00".to_string()
}

fn default_slot_minutes() -> u32 {
    30
}

/// Presentation settings stored in `.clinicdesk/config.toml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_max_page_chips")]
    pub max_page_chips: usize,
    #[serde(default)]
    pub default_view: CalendarView,
    #[serde(default = "default_max_events_visible")]
    pub max_events_visible: usize,
    #[serde(default = "default_day_start")]
    pub day_start: String,
    #[serde(default = "default_day_end")]
    pub day_end: String,
    #[serde(default = "default_slot_minutes")]
    pub slot_minutes: u32,
    pub created: DateTime<Utc>,
}

impl Config {
    /// Create a new config with default values
    pub fn new() -> Self {
        Config {
            page_size: default_page_size(),
            max_page_chips: default_max_page_chips(),
            default_view: CalendarView::default(),
            max_events_visible: default_max_events_visible(),
            day_start: default_day_start(),
            day_end: default_day_end(),
            slot_minutes: default_slot_minutes(),
            created: Utc::now(),
        }
    }

    /// Load config from .clinicdesk/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(CLINIC_DIR).join(CONFIG_FILE);

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ClinicError::NotClinicDirectory(path.to_path_buf())
            } else {
                ClinicError::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| ClinicError::Config(format!("Failed to parse config.toml: {}", e)))?;
        config.time_grid()?;
        Ok(config)
    }

    /// Save config to .clinicdesk/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let clinic_dir = path.join(CLINIC_DIR);
        if !clinic_dir.exists() {
            fs::create_dir(&clinic_dir)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| ClinicError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(clinic_dir.join(CONFIG_FILE), contents)?;
        Ok(())
    }

    /// Hours and slot length of the week/day views
    pub fn time_grid(&self) -> Result<TimeGridSettings> {
        let settings = TimeGridSettings {
            day_start: parse_clock("day_start", &self.day_start)?,
            day_end: parse_clock("day_end", &self.day_end)?,
            slot_minutes: self.slot_minutes,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Read a single key as display text
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "page_size" => Ok(self.page_size.to_string()),
            "max_page_chips" => Ok(self.max_page_chips.to_string()),
            "default_view" => Ok(self.default_view.to_string()),
            "max_events_visible" => Ok(self.max_events_visible.to_string()),
            "day_start" => Ok(self.day_start.clone()),
            "day_end" => Ok(self.day_end.clone()),
            "slot_minutes" => Ok(self.slot_minutes.to_string()),
            "created" => Ok(self.created.to_rfc3339()),
            _ => Err(unknown_key(key)),
        }
    }

    /// Update a single key; the whole config is re-validated
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut updated = self.clone();
        match key {
            "page_size" => updated.page_size = parse_positive(key, value)?,
            "max_page_chips" => updated.max_page_chips = parse_positive(key, value)?,
            "max_events_visible" => updated.max_events_visible = parse_positive(key, value)?,
            "slot_minutes" => updated.slot_minutes = parse_positive::<u32>(key, value)?,
            "default_view" => {
                updated.default_view = CalendarView::from_str(value).map_err(ClinicError::Config)?
            }
            "day_start" => updated.day_start = value.trim().to_string(),
            "day_end" => updated.day_end = value.trim().to_string(),
            "created" => {
                return Err(ClinicError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ))
            }
            _ => return Err(unknown_key(key)),
        }
        updated.time_grid()?;
        *self = updated;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

fn unknown_key(key: &str) -> ClinicError {
    ClinicError::Config(format!(
        "Unknown config key: '{}'. Valid keys are: {}",
        key,
        CONFIG_KEYS.join(", ")
    ))
}

fn parse_clock(key: &str, value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|_| {
        ClinicError::Config(format!("{} must be HH:MM, got '{}'", key, value))
    })
}

fn parse_positive<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr + PartialOrd + Default,
{
    match value.trim().parse::<T>() {
        Ok(n) if n > T::default() => Ok(n),
        _ => Err(ClinicError::Config(format!(
            "{} must be a positive whole number, got '{}'",
            key, value
        ))),
    }
}
