//! Task detail screen widget.
//!
//! This module renders the full task detail view that replaces the board
//! while a task is open: metadata, the wrapped description, and the
//! subtask checklist with its cursor.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};
use taskflow_protocol::Task;

use super::chat::wrap_text;
use super::task_card::{priority_color, progress_bar, tag_color, truncate_string};

/// Maximum description width for readability.
const MAX_TEXT_WIDTH: u16 = 100;

/// Renders the detail view of a task.
///
/// `cursor` indexes into the subtask checklist and is clamped for display.
///
/// # Layout
///
/// ```text
/// ╭ Create wireframes for landing page ─────────────────╮
/// │ To Do  ● High  Wireframes  due 7d                   │
/// │ Created 2026-01-01T09:00:00.000Z                    │
/// │─────────────────────────────────────────────────────│
/// │ Design wireframes for the new landing page          │
/// │                                                     │
/// │ Subtasks 1/3 (33%) ▰▰▰▱▱▱▱▱▱▱                       │
/// │ ▸ [x] Research competitors                          │
/// │   [ ] Sketch layouts                                │
/// │─────────────────────────────────────────────────────│
/// │ [Esc] Back  [Space] Toggle  [1-9] Jump  [d] Delete  │
/// ╰─────────────────────────────────────────────────────╯
/// ```
///
/// # Examples
///
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use taskflow_protocol::seed::seeded_store;
/// use taskflow_tui::widgets::render_detail_panel;
///
/// let store = seeded_store();
/// let task = &store.board().columns[0].tasks[0];
/// let area = Rect::new(0, 0, 80, 24);
/// let mut buf = Buffer::empty(area);
///
/// render_detail_panel(task, "To Do", 0, area, &mut buf);
/// ```
pub fn render_detail_panel(
    task: &Task,
    column_title: &str,
    cursor: usize,
    area: Rect,
    buf: &mut Buffer,
) {
    if area.width < 20 || area.height < 8 {
        return;
    }

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", truncate_string(&task.title, usize::from(area.width) - 4)),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));

    let inner_area = block.inner(area);
    block.render(area, buf);

    // Metadata (2) + Separator (1) + Body (flex) + Separator (1) + Footer (1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner_area);

    render_metadata(task, column_title, chunks[0], buf);
    render_separator(chunks[1], buf);
    render_body(task, cursor, chunks[2], buf);
    render_separator(chunks[3], buf);
    render_footer(chunks[4], buf);
}

fn render_metadata(task: &Task, column_title: &str, area: Rect, buf: &mut Buffer) {
    let mut first = vec![
        Span::styled(
            format!(" {column_title}"),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("● {}", task.priority.display_name()),
            Style::default().fg(priority_color(task.priority)),
        ),
        Span::raw("  "),
        Span::styled(task.tag.clone(), Style::default().fg(tag_color(task))),
    ];
    if let Some(due) = &task.due_date {
        first.push(Span::styled(
            format!("  due {due}"),
            Style::default().fg(Color::Gray),
        ));
    }

    let second = Line::from(vec![
        Span::styled(" Created ", Style::default().fg(Color::DarkGray)),
        Span::styled(task.created_at_iso(), Style::default().fg(Color::Gray)),
    ]);

    Paragraph::new(vec![Line::from(first), second]).render(area, buf);
}

/// Renders a horizontal separator line.
fn render_separator(area: Rect, buf: &mut Buffer) {
    let sep = Paragraph::new(Line::from(Span::styled(
        "\u{2500}".repeat(usize::from(area.width)),
        Style::default().fg(Color::DarkGray),
    )));
    sep.render(area, buf);
}

fn render_body(task: &Task, cursor: usize, area: Rect, buf: &mut Buffer) {
    let width = usize::from(area.width.min(MAX_TEXT_WIDTH).saturating_sub(2)).max(1);
    let mut lines: Vec<Line<'static>> = Vec::new();

    if task.description.is_empty() {
        lines.push(Line::from(Span::styled(
            " No description",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
    } else {
        lines.extend(
            wrap_text(&task.description, width)
                .into_iter()
                .map(|l| Line::from(format!(" {l}"))),
        );
    }
    lines.push(Line::default());

    let checklist_start = lines.len();
    match task.subtask_progress() {
        None => lines.push(Line::from(Span::styled(
            " No subtasks",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))),
        Some((done, total)) => {
            let percent = task.progress_percent().unwrap_or(0);
            lines.push(Line::from(vec![
                Span::styled(
                    format!(" Subtasks {done}/{total} ({percent}%) "),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(progress_bar(done, total, 10), Style::default().fg(Color::Green)),
            ]));

            let cursor = cursor.min(total - 1);
            for (i, subtask) in task.subtasks.iter().enumerate() {
                let is_cursor = i == cursor;
                let (check, check_style) = if subtask.completed {
                    ("[x]", Style::default().fg(Color::Green))
                } else {
                    ("[ ]", Style::default().fg(Color::Gray))
                };
                let mut title_style = if subtask.completed {
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::CROSSED_OUT)
                } else {
                    Style::default().fg(Color::White)
                };
                if is_cursor {
                    title_style = title_style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
                }
                lines.push(Line::from(vec![
                    Span::styled(
                        if is_cursor { " ▸ " } else { "   " },
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::styled(check, check_style),
                    Span::raw(" "),
                    Span::styled(
                        truncate_string(&subtask.title, width.saturating_sub(6)),
                        title_style,
                    ),
                ]));
            }
        }
    }

    // Keep the cursor row in view on short terminals.
    let visible = usize::from(area.height);
    let cursor_row = checklist_start + 1 + cursor.min(task.subtasks.len().saturating_sub(1));
    let skip = (cursor_row + 1).saturating_sub(visible);
    Paragraph::new(lines.into_iter().skip(skip).collect::<Vec<_>>()).render(area, buf);
}

/// Renders the footer with keybinding hints.
fn render_footer(area: Rect, buf: &mut Buffer) {
    let key = Style::default().fg(Color::Yellow);
    let text = Style::default().fg(Color::DarkGray);
    let footer = Paragraph::new(Line::from(vec![
        Span::styled(" [Esc]", key),
        Span::styled(" Back  ", text),
        Span::styled("[Space]", key),
        Span::styled(" Toggle  ", text),
        Span::styled("[1-9]", key),
        Span::styled(" Jump  ", text),
        Span::styled("[d]", key),
        Span::styled(" Delete", text),
    ]));
    footer.render(area, buf);
}
