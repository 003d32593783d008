//! Integration tests for the taskflow-config crate.

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use taskflow_config::persistence::locate_config_file;
use taskflow_config::{AssistantConfig, Config, ConfigError, LoggingConfig, UiConfig};

#[test]
fn config_load_from_json5_file() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("taskflow.json5");

    fs::write(
        &config_path,
        r#"
        {
            // Configuration for taskflow
            assistant: { reply_delay_ms: 800 },
            ui: { chat_open: true },
            logging: {
                level: "debug",
                file: "/tmp/taskflow-test.log",
            },
        }
        "#,
    )
    .unwrap();

    let config = Config::load_from(&config_path).unwrap();

    assert_eq!(config.assistant.reply_delay_ms, 800);
    assert!(config.ui.chat_open);
    assert!(!config.ui.sidebar_collapsed);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(
        config.logging.log_file().unwrap(),
        PathBuf::from("/tmp/taskflow-test.log")
    );
}

#[test]
fn config_missing_sections_use_defaults() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("taskflow.json");
    fs::write(&config_path, "{}").unwrap();

    let config = Config::load_from(&config_path).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn config_save_and_reload() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("nested").join("config.json");

    let original = Config {
        assistant: AssistantConfig::with_delay(2500),
        ui: UiConfig {
            sidebar_collapsed: true,
            chat_open: false,
        },
        logging: LoggingConfig {
            level: "warn".to_string(),
            file: None,
        },
    };

    original.save_to(&config_path).unwrap();
    let loaded = Config::load_from(&config_path).unwrap();
    assert_eq!(original, loaded);

    // Saved files are plain JSON.
    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&config_path).unwrap()).unwrap();
    assert_eq!(raw["assistant"]["reply_delay_ms"], 2500);
    assert_eq!(raw["ui"]["sidebar_collapsed"], true);
    assert!(raw["logging"].get("file").is_none());
}

#[test]
fn config_load_nonexistent_fails() {
    let result = Config::load_from("/nonexistent/path/config.json");
    assert!(matches!(result, Err(ConfigError::ReadFile { .. })));
}

#[test]
fn config_rejects_out_of_range_values() {
    let dir = TempDir::new().unwrap();

    let too_fast = dir.path().join("fast.json5");
    fs::write(&too_fast, "{ assistant: { reply_delay_ms: 5 } }").unwrap();
    assert!(matches!(
        Config::load_from(&too_fast),
        Err(ConfigError::InvalidReplyDelay { .. })
    ));

    let loud = dir.path().join("loud.json5");
    fs::write(&loud, r#"{ logging: { level: "loud" } }"#).unwrap();
    assert!(matches!(
        Config::load_from(&loud),
        Err(ConfigError::InvalidLogLevel { .. })
    ));
}

#[test]
fn config_rejects_malformed_file() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("broken.json5");
    fs::write(&config_path, "{ assistant: ").unwrap();

    assert!(matches!(
        Config::load_from(&config_path),
        Err(ConfigError::ParseJson5(_))
    ));
}

#[test]
fn config_file_discovery_order() {
    let local = TempDir::new().unwrap();
    let user = TempDir::new().unwrap();

    assert_eq!(locate_config_file(None, local.path(), Some(user.path())), None);

    let user_file = user.path().join("config.json5");
    fs::write(&user_file, "{}").unwrap();
    assert_eq!(
        locate_config_file(None, local.path(), Some(user.path())),
        Some(user_file)
    );

    let local_file = local.path().join("taskflow.json5");
    fs::write(&local_file, "{}").unwrap();
    assert_eq!(
        locate_config_file(None, local.path(), Some(user.path())),
        Some(local_file)
    );

    let explicit = PathBuf::from("/etc/taskflow/custom.json5");
    assert_eq!(
        locate_config_file(Some(explicit.clone()), local.path(), Some(user.path())),
        Some(explicit)
    );
}

#[test]
fn logging_directive_prefers_environment() {
    let logging = LoggingConfig::default();
    assert_eq!(logging.directive(None), "info");
    assert_eq!(logging.directive(Some("  ".to_string())), "info");
    assert_eq!(
        logging.directive(Some("taskflow_tui=trace".to_string())),
        "taskflow_tui=trace"
    );
}
