//! Runtime configuration handed to the core by its host.
//!
//! # Invariants
//! - Every field has a default, so partial documents deserialize.
//! - `validate` never touches the filesystem.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const DEFAULT_MAX_FILES: usize = 5;

/// Logging backend settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of `trace|debug|info|warn|error` (case-insensitive).
    pub level: String,
    /// Absolute directory for rotating log files; `None` logs to stderr.
    pub log_dir: Option<PathBuf>,
    pub max_file_size_bytes: u64,
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level().to_string(),
            log_dir: None,
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE_BYTES,
            max_files: DEFAULT_MAX_FILES,
        }
    }
}

impl LoggingConfig {
    /// Stderr logging at `level`.
    pub fn stderr(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            ..Self::default()
        }
    }

    /// Rotating file logging at `level` under `log_dir`.
    pub fn in_dir(level: impl Into<String>, log_dir: impl Into<PathBuf>) -> Self {
        Self {
            level: level.into(),
            log_dir: Some(log_dir.into()),
            ..Self::default()
        }
    }

    /// Returns the normalized settings: canonical level name, trimmed
    /// directory.
    ///
    /// # Errors
    /// - `UnsupportedLevel` for unknown level names.
    /// - `EmptyLogDir` / `RelativeLogDir` for unusable directories.
    /// - `ZeroRotation` when size or file count is zero.
    pub fn validate(&self) -> Result<ValidatedLogging, ConfigError> {
        let level = normalize_level(&self.level)?;
        let log_dir = match &self.log_dir {
            Some(dir) => Some(normalize_log_dir(dir)?),
            None => None,
        };
        if self.max_file_size_bytes == 0 || self.max_files == 0 {
            return Err(ConfigError::ZeroRotation);
        }
        Ok(ValidatedLogging {
            level,
            log_dir,
            max_file_size_bytes: self.max_file_size_bytes,
            max_files: self.max_files,
        })
    }
}

/// Logging settings that passed `LoggingConfig::validate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedLogging {
    pub level: &'static str,
    pub log_dir: Option<PathBuf>,
    pub max_file_size_bytes: u64,
    pub max_files: usize,
}

/// Errors from configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    UnsupportedLevel(String),
    EmptyLogDir,
    RelativeLogDir(PathBuf),
    ZeroRotation,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedLevel(level) => write!(
                f,
                "unsupported log level `{level}`; expected trace|debug|info|warn|error"
            ),
            Self::EmptyLogDir => write!(f, "log_dir cannot be empty"),
            Self::RelativeLogDir(dir) => write!(
                f,
                "log_dir must be an absolute path, got `{}`",
                dir.display()
            ),
            Self::ZeroRotation => write!(f, "log rotation size and file count must be non-zero"),
        }
    }
}

impl Error for ConfigError {}

/// Returns the default log level for current build mode.
///
/// - `debug` builds -> `debug`
/// - `release` builds -> `info`
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn normalize_level(level: &str) -> Result<&'static str, ConfigError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(ConfigError::UnsupportedLevel(other.to_string())),
    }
}

fn normalize_log_dir(log_dir: &std::path::Path) -> Result<PathBuf, ConfigError> {
    let raw = log_dir.to_string_lossy();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyLogDir);
    }
    let path = PathBuf::from(trimmed);
    if !path.is_absolute() {
        return Err(ConfigError::RelativeLogDir(path));
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::{normalize_level, ConfigError, LoggingConfig, ValidatedLogging};
    use std::path::PathBuf;

    #[test]
    fn normalize_level_accepts_known_values() {
        assert_eq!(
            normalize_level("INFO").expect("INFO should normalize"),
            "info"
        );
        assert_eq!(
            normalize_level(" warning ").expect("warning should normalize"),
            "warn"
        );
        assert!(matches!(
            normalize_level("verbose"),
            Err(ConfigError::UnsupportedLevel(_))
        ));
    }

    #[test]
    fn validate_rejects_relative_log_dir() {
        let error = LoggingConfig::in_dir("info", "logs/dev")
            .validate()
            .expect_err("relative paths must be rejected");
        assert_eq!(error, ConfigError::RelativeLogDir(PathBuf::from("logs/dev")));
        assert!(error.to_string().contains("absolute"));
    }

    #[test]
    fn validate_rejects_zero_rotation() {
        let config = LoggingConfig {
            max_files: 0,
            ..LoggingConfig::stderr("info")
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroRotation));
    }

    #[test]
    fn validate_hands_back_canonical_settings() {
        let validated = LoggingConfig::in_dir(" Warning ", " /var/log/lineage ")
            .validate()
            .expect("valid config");
        assert_eq!(
            validated,
            ValidatedLogging {
                level: "warn",
                log_dir: Some(PathBuf::from("/var/log/lineage")),
                max_file_size_bytes: LoggingConfig::default().max_file_size_bytes,
                max_files: LoggingConfig::default().max_files,
            }
        );
    }

    #[test]
    fn partial_document_falls_back_to_defaults() {
        let config: LoggingConfig =
            serde_json::from_value(serde_json::json!({ "level": "WARN" })).expect("decode config");
        assert!(config.log_dir.is_none());
        assert_eq!(config.max_files, LoggingConfig::default().max_files);

        let normalized = config.validate().expect("valid config");
        assert_eq!(normalized.level, "warn");
    }
}
