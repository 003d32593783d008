//! Status bar rendering widget.
//!
//! This module renders the one-row footer: the outcome of the last action
//! followed by the keybinding hints for the current context.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Which set of hints the status bar shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusContext {
    /// Browsing the board.
    #[default]
    Board,
    /// A task's detail view is open.
    Detail,
    /// A card is grabbed.
    Dragging,
    /// The add-task dialog is open.
    Dialog,
    /// Typing into the chat panel.
    Chat,
    /// The settings view is shown.
    Settings,
}

impl StatusContext {
    /// Returns the `(key, action)` hints for this context.
    #[must_use]
    pub const fn hints(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Board => &[
                ("←→↑↓", "Navigate"),
                ("n", "New"),
                ("m", "Move"),
                ("c", "Chat"),
                ("?", "Help"),
            ],
            Self::Detail => &[
                ("Space", "Toggle"),
                ("d", "Delete"),
                ("Esc", "Back"),
            ],
            Self::Dragging => &[
                ("←→↑↓", "Choose slot"),
                ("Enter", "Drop"),
                ("Esc", "Cancel"),
            ],
            Self::Dialog => &[
                ("Tab", "Next field"),
                ("Enter", "Create"),
                ("Esc", "Cancel"),
            ],
            Self::Chat => &[("Enter", "Send"), ("Esc", "Leave chat")],
            Self::Settings => &[("1", "Board"), ("Esc", "Back"), ("?", "Help")],
        }
    }
}

/// Renders the status bar.
///
/// # Layout
///
/// ```text
///  Moved "Data Entry Cleanup" to In Progress  │ ←→↑↓ Navigate  n New  m Move
/// ```
///
/// # Examples
///
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use taskflow_tui::widgets::{StatusContext, render_status_bar};
///
/// let area = Rect::new(0, 0, 80, 1);
/// let mut buf = Buffer::empty(area);
///
/// render_status_bar(Some("Task added"), StatusContext::Board, area, &mut buf);
/// ```
pub fn render_status_bar(
    message: Option<&str>,
    context: StatusContext,
    area: Rect,
    buf: &mut Buffer,
) {
    let key_style = Style::default().fg(Color::Yellow);
    let text_style = Style::default().fg(Color::White);
    let message_style = Style::default().fg(Color::Cyan);

    let mut spans = Vec::new();
    if let Some(message) = message {
        spans.push(Span::styled(format!(" {message}"), message_style));
        spans.push(Span::styled("  │", Style::default().fg(Color::DarkGray)));
    }
    for (key, action) in context.hints() {
        spans.push(Span::styled(format!(" {key}"), key_style));
        spans.push(Span::styled(format!(" {action} "), text_style));
    }

    Paragraph::new(Line::from(spans)).render(area, buf);
}
