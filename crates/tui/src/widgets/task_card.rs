//! Task card rendering widget.
//!
//! This module provides functions for rendering individual task cards with
//! their tag color, priority, subtask progress, and due date.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};
use taskflow_protocol::{Priority, Task};

/// How a card stands out from its neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardHighlight {
    /// Plain card.
    #[default]
    None,
    /// The card under the board selection.
    Selected,
    /// The card picked up by a drag gesture.
    Grabbed,
}

/// Returns the color associated with a priority.
///
/// # Examples
///
/// ```
/// use ratatui::style::Color;
/// use taskflow_protocol::Priority;
/// use taskflow_tui::widgets::priority_color;
///
/// assert_eq!(priority_color(Priority::High), Color::Red);
/// assert_eq!(priority_color(Priority::Medium), Color::Yellow);
/// assert_eq!(priority_color(Priority::Low), Color::Green);
/// ```
#[must_use]
pub const fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Green,
    }
}

/// Parses an HSL triple (`"258 60% 55%"`) into a terminal color.
///
/// Returns `None` for malformed input.
///
/// # Examples
///
/// ```
/// use ratatui::style::Color;
/// use taskflow_tui::widgets::hsl_color;
///
/// assert_eq!(hsl_color("0 100% 50%"), Some(Color::Rgb(255, 0, 0)));
/// assert_eq!(hsl_color("nonsense"), None);
/// ```
#[must_use]
pub fn hsl_color(triple: &str) -> Option<Color> {
    let mut parts = triple.split_whitespace();
    let hue: f64 = parts.next()?.parse().ok()?;
    let saturation: f64 = parts.next()?.strip_suffix('%')?.parse().ok()?;
    let lightness: f64 = parts.next()?.strip_suffix('%')?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }

    let s = (saturation / 100.0).clamp(0.0, 1.0);
    let l = (lightness / 100.0).clamp(0.0, 1.0);
    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let sector = hue.rem_euclid(360.0) / 60.0;
    let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());

    let (r, g, b) = match sector.floor() as u8 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = l - chroma / 2.0;
    let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;

    Some(Color::Rgb(channel(r), channel(g), channel(b)))
}

/// Returns the display color of a task's tag.
#[must_use]
pub fn tag_color(task: &Task) -> Color {
    hsl_color(&task.tag_color).unwrap_or(Color::Magenta)
}

/// Renders a task card to the buffer.
///
/// # Layout
///
/// ```text
/// ╭──────────────────────────╮
/// │Create wireframes for l...│
/// │● High  Wireframes        │
/// │▰▰▰▱▱▱▱▱▱▱ 1/3    due 7d  │
/// ╰──────────────────────────╯
/// ```
///
/// The border takes the tag color; selected cards get a bold cyan border,
/// grabbed cards a double yellow one.
///
/// # Examples
///
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use taskflow_protocol::seed::seeded_store;
/// use taskflow_tui::widgets::{render_task_card, CardHighlight};
///
/// let store = seeded_store();
/// let task = &store.board().columns[0].tasks[0];
/// let area = Rect::new(0, 0, 30, 5);
/// let mut buf = Buffer::empty(area);
///
/// render_task_card(task, CardHighlight::Selected, area, &mut buf);
/// ```
pub fn render_task_card(task: &Task, highlight: CardHighlight, area: Rect, buf: &mut Buffer) {
    // Skip rendering if area is too small
    if area.width < 4 || area.height < 3 {
        return;
    }

    let tag = tag_color(task);
    let (border_style, border_type, title_style) = match highlight {
        CardHighlight::None => (
            Style::default().fg(tag),
            BorderType::Rounded,
            Style::default().fg(Color::White),
        ),
        CardHighlight::Selected => (
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            BorderType::Rounded,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        CardHighlight::Grabbed => (
            Style::default().fg(Color::Yellow),
            BorderType::Double,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::ITALIC),
        ),
    };

    let inner_width = usize::from(area.width.saturating_sub(2));

    let meta = Line::from(vec![
        Span::styled("● ", Style::default().fg(priority_color(task.priority))),
        Span::styled(
            task.priority.display_name(),
            Style::default().fg(Color::Gray),
        ),
        Span::raw("  "),
        Span::styled(
            truncate_string(&task.tag, inner_width.saturating_sub(task.priority.display_name().len() + 4)),
            Style::default().fg(tag),
        ),
    ]);

    let content = vec![
        Line::from(Span::styled(truncate_string(&task.title, inner_width), title_style)),
        meta,
        progress_line(task, inner_width),
    ];

    Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(border_type)
                .border_style(border_style),
        )
        .render(area, buf);
}

/// Builds the subtask progress and due date line.
fn progress_line(task: &Task, width: usize) -> Line<'static> {
    let mut spans = Vec::new();
    let mut used = 0;

    if let Some((done, total)) = task.subtask_progress() {
        let bar = progress_bar(done, total, 10);
        let count = format!(" {done}/{total}");
        used += bar.chars().count() + count.len();
        let bar_color = if done == total {
            Color::Green
        } else {
            Color::Blue
        };
        spans.push(Span::styled(bar, Style::default().fg(bar_color)));
        spans.push(Span::styled(count, Style::default().fg(Color::DarkGray)));
    }

    if let Some(due) = &task.due_date {
        let label = format!("due {due}");
        let gap = width.saturating_sub(used + label.chars().count()).max(1);
        if used + gap + label.chars().count() <= width {
            spans.push(Span::raw(" ".repeat(gap)));
            spans.push(Span::styled(label, Style::default().fg(Color::Gray)));
        }
    }

    Line::from(spans)
}

/// Renders a fixed-width bar of filled and empty segments.
///
/// # Examples
///
/// ```
/// use taskflow_tui::widgets::task_card::progress_bar;
///
/// assert_eq!(progress_bar(1, 2, 4), "▰▰▱▱");
/// assert_eq!(progress_bar(0, 0, 3), "▱▱▱");
/// ```
#[must_use]
pub fn progress_bar(done: usize, total: usize, width: usize) -> String {
    let filled = if total == 0 {
        0
    } else {
        (done.min(total) * width) / total
    };
    let mut bar = "▰".repeat(filled);
    bar.push_str(&"▱".repeat(width - filled));
    bar
}

/// Truncates a string to fit within a given width, adding ellipsis if needed.
pub(crate) fn truncate_string(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else if max_width > 3 {
        let truncated: String = s.chars().take(max_width - 3).collect();
        format!("{truncated}...")
    } else {
        s.chars().take(max_width).collect()
    }
}
