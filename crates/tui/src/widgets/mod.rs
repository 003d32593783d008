//! Widget components for the TaskFlow TUI.
//!
//! This module provides reusable rendering functions for the Kanban board UI,
//! organized into focused submodules for each visual component.
//!
//! # Overview
//!
//! The widget system follows a functional rendering approach where each widget
//! is a pure function that renders state to a buffer. This enables easy testing
//! and composition.
//!
//! # Modules
//!
//! - [`board`]: Renders the board with its columns side by side
//! - [`column`]: Renders a single column, its add button, and the drop marker
//! - [`task_card`]: Renders task cards with tag, priority, and progress
//! - [`detail`]: Renders the task detail view with its subtask checklist
//! - [`dialog`]: Renders the add-task form
//! - [`chat`]: Renders the assistant chat panel
//! - [`sidebar`]: Renders the navigation sidebar
//! - [`settings`]: Renders the read-only configuration summary
//! - [`status_bar`]: Renders the footer with the last status and key hints
//! - [`help`]: Renders the keybinding overlay
//!
//! # Color Coding
//!
//! Cards show their priority with a colored dot:
//!
//! | Priority | Color |
//! |----------|-------|
//! | `High` | Red (`Color::Red`) |
//! | `Medium` | Yellow (`Color::Yellow`) |
//! | `Low` | Green (`Color::Green`) |
//!
//! # Example
//!
//! ```
//! use ratatui::buffer::Buffer;
//! use ratatui::layout::Rect;
//! use taskflow_protocol::seed::seeded_store;
//! use taskflow_tui::layout::Selection;
//! use taskflow_tui::widgets;
//!
//! let store = seeded_store();
//! let area = Rect::new(0, 0, 80, 24);
//! let mut buf = Buffer::empty(area);
//!
//! widgets::render_board(store.board(), Selection::default(), true, None, area, &mut buf);
//! ```

use ratatui::layout::Rect;

pub mod board;
pub mod chat;
pub mod column;
pub mod detail;
pub mod dialog;
pub mod help;
pub mod settings;
pub mod sidebar;
pub mod status_bar;
pub mod task_card;

// Re-export primary rendering functions for convenience
pub use board::render_board;
pub use chat::render_chat_panel;
pub use column::{ColumnView, render_column};
pub use detail::render_detail_panel;
pub use dialog::render_add_task_dialog;
pub use help::render_help_overlay;
pub use settings::render_settings_summary;
pub use sidebar::render_sidebar;
pub use status_bar::{StatusContext, render_status_bar};
pub use task_card::{CardHighlight, hsl_color, priority_color, render_task_card};

/// Creates a centered rectangle within a given area.
///
/// If the requested dimensions exceed the available area, the rectangle
/// will be clamped to fit.
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let popup_width = width.min(area.width);
    let popup_height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;

    Rect::new(x, y, popup_width, popup_height)
}
