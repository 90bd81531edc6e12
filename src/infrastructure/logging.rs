//! Logging bootstrap
//!
//! Diagnostics go to stderr so rendered pages on stdout stay clean. Messages
//! are `key=value` pairs, e.g. `event=records_save status=ok patients=8`.

use crate::error::{ClinicError, Result};
use flexi_logger::{Logger, LoggerHandle, WriteMode};

/// Environment variable holding the log level
pub const LOG_ENV: &str = "CLINICDESK_LOG";

const DEFAULT_LEVEL: &str = "warn";
const VERBOSE_LEVEL: &str = "debug";

/// Pick the effective level: `--verbose` wins, then the env var, then `warn`
pub fn resolve_level(verbose: bool, env_level: Option<&str>) -> Result<&'static str> {
    if verbose {
        return Ok(VERBOSE_LEVEL);
    }
    match env_level {
        Some(raw) if !raw.trim().is_empty() => normalize_level(raw),
        _ => Ok(DEFAULT_LEVEL),
    }
}

/// Start the stderr logger; keep the handle alive for the whole run
pub fn init_logging(verbose: bool) -> Result<LoggerHandle> {
    let env_level = std::env::var(LOG_ENV).ok();
    let level = resolve_level(verbose, env_level.as_deref())?;

    let handle = Logger::try_with_str(level)
        .map_err(|e| ClinicError::Logging(format!("invalid log level `{}`: {}", level, e)))?
        .log_to_stderr()
        .write_mode(WriteMode::Direct)
        .format(flexi_logger::default_format)
        .start()
        .map_err(|e| ClinicError::Logging(format!("failed to start logger: {}", e)))?;

    log::debug!(
        "event=logging_init status=ok level={} version={}",
        level,
        env!("CARGO_PKG_VERSION")
    );
    Ok(handle)
}

fn normalize_level(level: &str) -> Result<&'static str> {
    match level.trim().to_ascii_lowercase().as_str() {
        "off" => Ok("off"),
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(ClinicError::Logging(format!(
            "unsupported log level `{}` in {}; expected off|trace|debug|info|warn|error",
            other, LOG_ENV
        ))),
    }
}
