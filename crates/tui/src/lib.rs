//! Terminal UI for TaskFlow.
//!
//! This crate provides a Ratatui-based Kanban board: columns of task cards
//! that can be moved by mouse drag or keyboard, a task detail view, an
//! add-task dialog, and a simulated assistant chat panel.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`app`]: Main application struct and run loop
//! - [`state`]: Selection, focus, and view state over the task store
//! - [`drag`]: Drag-and-drop gestures and the moves they resolve to
//! - [`form`]: Add-task dialog state
//! - [`chat`]: Assistant chat conversation and delayed replies
//! - [`layout`]: Screen regions and pointer hit-testing
//! - [`event`]: Event handling and key mappings
//! - [`terminal`]: Terminal setup, teardown, and panic handling
//! - [`widgets`]: Rendering functions
//!
//! # Example
//!
//! ```no_run
//! use taskflow_protocol::seed::seeded_store;
//! use taskflow_tui::{App, terminal};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     terminal::install_panic_hook();
//!     let mut terminal = terminal::setup_terminal()?;
//!
//!     let mut app = App::new(seeded_store());
//!     let result = app.run(&mut terminal).await;
//!
//!     terminal::restore_terminal(&mut terminal)?;
//!     result
//! }
//! ```

pub mod app;
pub mod chat;
pub mod drag;
pub mod event;
pub mod form;
pub mod layout;
pub mod state;
pub mod terminal;
pub mod widgets;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export primary types at crate root for convenience
pub use app::App;
pub use state::{AppState, Focus, NavItem};
