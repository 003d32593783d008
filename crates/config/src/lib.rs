//! Configuration management for the taskflow application.
//!
//! This crate handles loading, validating, and persisting configuration
//! from files, environment variables, and defaults.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`config`]: Core configuration struct and loading logic
//! - [`assistant`]: Reply delay of the simulated assistant
//! - [`logging`]: Log level and log file location
//! - [`persistence`]: Config file discovery, reading and writing
//! - [`error`]: Error types for configuration operations
//!
//! # Configuration Sources (Priority)
//!
//! 1. `TASKFLOW_CONFIG` naming an explicit file
//! 2. Local config (`./taskflow.json5` or `./taskflow.json`)
//! 3. User config (`~/.config/taskflow/config.json5` or `config.json`)
//! 4. Built-in defaults
//!
//! `TASKFLOW_LOG` overrides `logging.level` with any `tracing` filter
//! directive.
//!
//! # Example File
//!
//! ```json5
//! {
//!   assistant: { reply_delay_ms: 800 },
//!   ui: { sidebar_collapsed: false, chat_open: true },
//!   logging: { level: "debug" },
//! }
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use taskflow_config::Config;
//!
//! # fn example() -> taskflow_config::Result<()> {
//! let config = Config::load()?;
//! println!("Log level: {}", config.logging.level);
//! # Ok(())
//! # }
//! ```

pub mod assistant;
pub mod config;
pub mod error;
pub mod logging;
pub mod persistence;

// Re-export primary types at crate root for convenience
pub use assistant::AssistantConfig;
pub use config::{Config, UiConfig};
pub use error::{ConfigError, Result};
pub use logging::LoggingConfig;
