//! Logging configuration.
//!
//! The TUI owns the terminal, so log output goes to a file. The level is a
//! `tracing` filter directive; the `TASKFLOW_LOG` environment variable
//! overrides it when set.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Environment variable that overrides the configured log filter.
pub const LOG_ENV_VAR: &str = "TASKFLOW_LOG";

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Log levels accepted in the configuration file.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Name of the log file inside the cache directory.
const LOG_FILE_NAME: &str = "taskflow.log";

/// Configuration for log output.
///
/// # Examples
///
/// ```
/// use taskflow_config::LoggingConfig;
///
/// let config = LoggingConfig::default();
/// assert_eq!(config.level, "info");
/// assert!(config.file.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum level written to the log file.
    #[serde(default = "default_level")]
    pub level: String,

    /// Where to write logs. Defaults to the user cache directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

fn default_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Returns the filter directive to install.
    ///
    /// A non-empty `env_override` (the value of [`LOG_ENV_VAR`]) wins over
    /// the configured level.
    ///
    /// # Examples
    ///
    /// ```
    /// use taskflow_config::LoggingConfig;
    ///
    /// let config = LoggingConfig::default();
    /// assert_eq!(config.directive(None), "info");
    /// assert_eq!(config.directive(Some("taskflow=trace".into())), "taskflow=trace");
    /// ```
    #[must_use]
    pub fn directive(&self, env_override: Option<String>) -> String {
        env_override
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| self.level.clone())
    }

    /// Returns the log file path, falling back to
    /// `<cache dir>/taskflow/taskflow.log`.
    ///
    /// # Errors
    ///
    /// Returns an error if no file is configured and the cache directory
    /// cannot be determined.
    pub fn log_file(&self) -> Result<PathBuf> {
        match &self.file {
            Some(path) => Ok(path.clone()),
            None => dirs::cache_dir()
                .map(|dir| dir.join(crate::persistence::APP_DIR).join(LOG_FILE_NAME))
                .ok_or(ConfigError::NoHomeDirectory),
        }
    }

    /// Validates the logging configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the level is not one of [`LOG_LEVELS`].
    pub fn validate(&self) -> Result<()> {
        let level = self.level.to_ascii_lowercase();
        if LOG_LEVELS.contains(&level.as_str()) {
            Ok(())
        } else {
            Err(ConfigError::InvalidLogLevel {
                level: self.level.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_known_levels() {
        for level in LOG_LEVELS {
            let config = LoggingConfig {
                level: (*level).to_string(),
                file: None,
            };
            assert!(config.validate().is_ok(), "{level} should be valid");
        }
    }

    #[test]
    fn validate_is_case_insensitive() {
        let config = LoggingConfig {
            level: "DEBUG".to_string(),
            file: None,
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_unknown_level() {
        let config = LoggingConfig {
            level: "verbose".to_string(),
            file: None,
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidLogLevel { .. })
        ));
    }

    #[test]
    fn blank_env_override_is_ignored() {
        let config = LoggingConfig::default();
        assert_eq!(config.directive(Some("  ".to_string())), "info");
    }

    #[test]
    fn explicit_log_file_wins() {
        let config = LoggingConfig {
            level: default_level(),
            file: Some(PathBuf::from("/tmp/custom.log")),
        };
        assert_eq!(config.log_file().unwrap(), PathBuf::from("/tmp/custom.log"));
    }

    #[test]
    fn file_not_serialized_when_none() {
        let json = serde_json::to_string(&LoggingConfig::default()).unwrap();
        assert!(!json.contains("file"));
    }
}
