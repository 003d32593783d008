//! Core configuration struct and loading logic.
//!
//! This module provides the main [`Config`] struct which aggregates all
//! configuration options for the taskflow application. The configuration
//! tunes the application shell; it never carries board contents.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::assistant::AssistantConfig;
use crate::error::Result;
use crate::logging::LoggingConfig;
use crate::persistence::{find_config_file, read_config_file, write_config_file};

/// Initial layout of the terminal UI.
///
/// # Examples
///
/// ```
/// use taskflow_config::UiConfig;
///
/// let ui = UiConfig::default();
/// assert!(!ui.sidebar_collapsed);
/// assert!(!ui.chat_open);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Start with the sidebar collapsed to its icon rail.
    #[serde(default)]
    pub sidebar_collapsed: bool,

    /// Start with the assistant chat panel open.
    #[serde(default)]
    pub chat_open: bool,
}

/// The main configuration struct for the taskflow application.
///
/// # Examples
///
/// ```
/// use taskflow_config::{AssistantConfig, Config};
///
/// // Create a default config
/// let config = Config::default();
/// assert_eq!(config.assistant.reply_delay_ms, 1200);
///
/// // Create a custom config
/// let config = Config {
///     assistant: AssistantConfig::with_delay(500),
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Assistant chat panel behavior.
    #[serde(default)]
    pub assistant: AssistantConfig,

    /// Initial UI layout.
    #[serde(default)]
    pub ui: UiConfig,

    /// Log level and destination.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Creates a new configuration with all defaults.
    ///
    /// This is equivalent to `Config::default()`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from the default file locations.
    ///
    /// See [`find_config_file`] for the search order. If no configuration
    /// file is found, returns a default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is found but cannot be
    /// read, parsed, or validated.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use taskflow_config::Config;
    ///
    /// # fn example() -> taskflow_config::Result<()> {
    /// let config = Config::load()?;
    /// println!("Assistant replies after {:?}", config.assistant.reply_delay());
    /// # Ok(())
    /// # }
    /// ```
    pub fn load() -> Result<Self> {
        Self::load_with_source().map(|(config, _)| config)
    }

    /// Like [`Config::load`], but also returns the file the configuration
    /// came from, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is found but cannot be
    /// read, parsed, or validated.
    pub fn load_with_source() -> Result<(Self, Option<PathBuf>)> {
        match find_config_file() {
            Some(path) => {
                let config = Self::load_from(&path)?;
                Ok((config, Some(path)))
            }
            None => Ok((Self::default(), None)),
        }
    }

    /// Loads configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use taskflow_config::Config;
    ///
    /// # fn example() -> taskflow_config::Result<()> {
    /// let config = Config::load_from("custom-config.json5")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let config: Config = read_config_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves the configuration to a file.
    ///
    /// The file is written as pretty-printed JSON, which [`Config::load_from`]
    /// reads back unchanged. Missing parent directories are created. The
    /// board itself never writes its configuration; this is for tools that
    /// generate a starting `taskflow.json5`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    ///
    /// # Examples
    ///
    /// ```
    /// use taskflow_config::{AssistantConfig, Config};
    ///
    /// # fn example() -> taskflow_config::Result<()> {
    /// let dir = tempfile::tempdir().expect("temp dir");
    /// let path = dir.path().join("taskflow").join("config.json");
    ///
    /// let config = Config {
    ///     assistant: AssistantConfig::with_delay(500),
    ///     ..Config::default()
    /// };
    /// config.save_to(&path)?;
    /// assert_eq!(Config::load_from(&path)?, config);
    /// # Ok(())
    /// # }
    /// # example().expect("save and reload");
    /// ```
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        write_config_file(path, self)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use taskflow_config::{AssistantConfig, Config};
    ///
    /// let mut config = Config::default();
    /// assert!(config.validate().is_ok());
    ///
    /// config.assistant = AssistantConfig::with_delay(10); // Below minimum
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        self.assistant.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigError;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config::new();
        assert_eq!(config.assistant, AssistantConfig::default());
        assert_eq!(config.ui, UiConfig::default());
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_invalid_delay() {
        let config = Config {
            assistant: AssistantConfig::with_delay(120_000),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidReplyDelay { .. })
        ));
    }

    #[test]
    fn validate_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "chatty".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidLogLevel { .. })
        ));
    }

    #[test]
    fn deserialize_with_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn deserialize_partial() {
        let json = r#"{"ui": {"chat_open": true}}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.ui.chat_open);
        assert!(!config.ui.sidebar_collapsed);
        assert_eq!(config.assistant, AssistantConfig::default());
    }

    #[test]
    fn load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json5");
        std::fs::write(
            &path,
            r#"
            {
                assistant: { reply_delay_ms: 250 },
                ui: { sidebar_collapsed: true },
                logging: { level: "debug", file: "/tmp/taskflow-test.log" },
            }
            "#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.assistant.reply_delay_ms, 250);
        assert!(config.ui.sidebar_collapsed);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(
            config.logging.file,
            Some(PathBuf::from("/tmp/taskflow-test.log"))
        );
    }

    #[test]
    fn load_from_rejects_invalid_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json5");
        std::fs::write(&path, "{ assistant: { reply_delay_ms: 1 } }").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let original = Config {
            assistant: AssistantConfig::with_delay(900),
            ui: UiConfig {
                sidebar_collapsed: true,
                chat_open: true,
            },
            logging: LoggingConfig::default(),
        };

        original.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();

        assert_eq!(original, loaded);
    }
}
