//! Configuration file reading and writing.
//!
//! This module handles loading configuration from files and saving
//! configuration back to files.
//!
//! # File Formats
//!
//! The module supports both JSON5 and JSON formats:
//!
//! - JSON5 (`.json5`): Preferred format with comments and trailing commas
//! - JSON (`.json`): Standard JSON format
//!
//! # File Locations
//!
//! Configuration is searched in the following order:
//!
//! 1. The path named by `TASKFLOW_CONFIG`, if set
//! 2. Local: `./taskflow.json5` or `./taskflow.json`
//! 3. User: `~/.config/taskflow/config.json5` or `~/.config/taskflow/config.json`

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV_VAR: &str = "TASKFLOW_CONFIG";

/// Directory name used under the user config and cache directories.
pub const APP_DIR: &str = "taskflow";

/// Configuration file names to search for, in priority order.
const CONFIG_FILE_NAMES: &[&str] = &["taskflow.json5", "taskflow.json"];

/// User config file names to search for, in priority order.
const USER_CONFIG_FILE_NAMES: &[&str] = &["config.json5", "config.json"];

/// Finds the configuration file path.
///
/// Searches in the following order:
///
/// 1. `$TASKFLOW_CONFIG`, returned as-is even if it does not exist so that
///    a typo surfaces as a read error instead of silently using defaults
/// 2. Local directory: `./taskflow.json5`, `./taskflow.json`
/// 3. User config directory: `~/.config/taskflow/config.json5`,
///    `~/.config/taskflow/config.json`
///
/// # Returns
///
/// Returns `Some(path)` if a config file is found, `None` otherwise.
///
/// # Examples
///
/// ```no_run
/// use taskflow_config::persistence::find_config_file;
///
/// if let Some(path) = find_config_file() {
///     println!("Found config at: {}", path.display());
/// }
/// ```
#[must_use]
pub fn find_config_file() -> Option<PathBuf> {
    let explicit = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
    let user_dir = dirs::config_dir().map(|d| d.join(APP_DIR));
    locate_config_file(explicit, Path::new("."), user_dir.as_deref())
}

/// Resolves the configuration file against explicit search roots.
///
/// This is the pure part of [`find_config_file`].
#[must_use]
pub fn locate_config_file(
    explicit: Option<PathBuf>,
    local_dir: &Path,
    user_dir: Option<&Path>,
) -> Option<PathBuf> {
    if let Some(path) = explicit.filter(|p| !p.as_os_str().is_empty()) {
        return Some(path);
    }

    let local = CONFIG_FILE_NAMES.iter().map(|name| local_dir.join(name));
    let user = user_dir
        .into_iter()
        .flat_map(|dir| USER_CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)));

    local.chain(user).find(|path| path.exists())
}

/// Returns the default user configuration directory.
///
/// This is typically `~/.config/taskflow/` on Unix systems.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn user_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join(APP_DIR))
        .ok_or(ConfigError::NoHomeDirectory)
}

/// Returns the default user configuration file path.
///
/// This is typically `~/.config/taskflow/config.json5`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_user_config_path() -> Result<PathBuf> {
    Ok(user_config_dir()?.join("config.json5"))
}

/// Reads and parses a configuration file.
///
/// Supports both JSON5 and JSON formats.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The file content cannot be parsed
///
/// # Examples
///
/// ```no_run
/// use taskflow_config::persistence::read_config_file;
/// use taskflow_config::Config;
///
/// # fn main() -> taskflow_config::Result<()> {
/// let config: Config = read_config_file("taskflow.json5")?;
/// # Ok(())
/// # }
/// ```
pub fn read_config_file<T: serde::de::DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    // JSON5 parser handles both JSON5 and JSON
    serde_json5::from_str(&content).map_err(ConfigError::from)
}

/// Writes a configuration to a file.
///
/// The configuration is written as pretty-printed JSON (not JSON5, as
/// serde_json5 doesn't support serialization to JSON5 format).
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The file cannot be written
/// - The configuration cannot be serialized
pub fn write_config_file<T: serde::Serialize>(path: impl AsRef<Path>, config: &T) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.exists()) {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::WriteFile {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    let content = serde_json::to_string_pretty(config)?;

    std::fs::write(path, content).map_err(|e| ConfigError::WriteFile {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        delay: u64,
    }

    #[test]
    fn read_json5_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sample.json5");
        std::fs::write(
            &path,
            r#"
            {
                // comments are fine
                name: "board",
                delay: 1200,  // trailing comma
            }
            "#,
        )
        .unwrap();

        let sample: Sample = read_config_file(&path).unwrap();
        assert_eq!(sample.name, "board");
        assert_eq!(sample.delay, 1200);
    }

    #[test]
    fn read_nonexistent_file() {
        let result: Result<Sample> = read_config_file("/nonexistent/path.json");
        assert!(matches!(result, Err(ConfigError::ReadFile { .. })));
    }

    #[test]
    fn read_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("invalid.json");
        std::fs::write(&path, "not valid json").unwrap();

        let result: Result<Sample> = read_config_file(&path);
        assert!(matches!(result, Err(ConfigError::ParseJson5(_))));
    }

    #[test]
    fn write_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("dirs").join("config.json");

        let sample = Sample {
            name: "x".to_string(),
            delay: 1,
        };
        write_config_file(&path, &sample).unwrap();

        let loaded: Sample = read_config_file(&path).unwrap();
        assert_eq!(loaded, sample);
    }

    #[test]
    fn locate_prefers_explicit_path() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("taskflow.json5"), "{}").unwrap();

        let explicit = PathBuf::from("/somewhere/else.json5");
        let found = locate_config_file(Some(explicit.clone()), dir.path(), None);
        assert_eq!(found, Some(explicit));
    }

    #[test]
    fn locate_prefers_json5_over_json() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("taskflow.json"), "{}").unwrap();
        std::fs::write(dir.path().join("taskflow.json5"), "{}").unwrap();

        let found = locate_config_file(None, dir.path(), None);
        assert_eq!(found, Some(dir.path().join("taskflow.json5")));
    }

    #[test]
    fn locate_falls_back_to_user_dir() {
        let local = TempDir::new().unwrap();
        let user = TempDir::new().unwrap();
        std::fs::write(user.path().join("config.json"), "{}").unwrap();

        let found = locate_config_file(Some(PathBuf::new()), local.path(), Some(user.path()));
        assert_eq!(found, Some(user.path().join("config.json")));
    }

    #[test]
    fn locate_returns_none_without_files() {
        let local = TempDir::new().unwrap();
        let user = TempDir::new().unwrap();
        assert_eq!(locate_config_file(None, local.path(), Some(user.path())), None);
    }

    #[test]
    fn user_config_dir_returns_path() {
        if dirs::config_dir().is_some() {
            let result = user_config_dir();
            assert!(result.unwrap().ends_with(APP_DIR));
        }
    }
}
