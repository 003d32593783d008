//! taskflow - A terminal Kanban board.
//!
//! This is the main binary that launches the TUI application.

use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use anyhow::Context;
use taskflow_config::{Config, LoggingConfig, logging::LOG_ENV_VAR};
use taskflow_protocol::seed::seeded_store;
use taskflow_tui::{App, terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, source) = Config::load_with_source().context("failed to load configuration")?;
    init_logging(&config.logging)?;
    info!(config = ?source, "starting taskflow");

    // Install panic hook to restore terminal on panic
    terminal::install_panic_hook();

    let mut terminal = terminal::setup_terminal()?;

    let mut app = App::with_config(seeded_store(), config, source);
    let result = app.run(&mut terminal).await;

    // Always restore terminal, even if app.run() failed
    terminal::restore_terminal(&mut terminal)?;

    result
}

/// Sends logs to a file, since the terminal belongs to the board.
fn init_logging(logging: &LoggingConfig) -> anyhow::Result<()> {
    let path = logging.log_file()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let directive = logging.directive(std::env::var(LOG_ENV_VAR).ok());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directive))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
