//! Add-task dialog widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};
use taskflow_protocol::tag::tag_color;

use super::centered_rect;
use super::task_card::{hsl_color, priority_color, truncate_string};
use crate::form::{AddTaskForm, FormField};

const DIALOG_WIDTH: u16 = 60;
const DIALOG_HEIGHT: u16 = 20;
const LABEL_WIDTH: usize = 13;

/// Renders the add-task dialog centered over `area`.
///
/// ```text
/// ╭ New task in To Do ───────────────────────────╮
/// │                                              │
/// │ ▸ Title        Ship release▏                 │
/// │   Description                                │
/// │   Tag          ‹ Design ›                    │
/// │   Priority     ‹ Medium ›                    │
/// │   Due date                                   │
/// │   Subtasks     + add a subtask               │
/// │                                              │
/// │ [Enter] Create  [Tab] Next  [Esc] Cancel     │
/// ╰──────────────────────────────────────────────╯
/// ```
///
/// # Examples
///
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use taskflow_protocol::ColumnId;
/// use taskflow_tui::form::AddTaskForm;
/// use taskflow_tui::widgets::render_add_task_dialog;
///
/// let area = Rect::new(0, 0, 80, 24);
/// let mut buf = Buffer::empty(area);
/// render_add_task_dialog(&AddTaskForm::new(ColumnId::TODO), "To Do", area, &mut buf);
/// ```
pub fn render_add_task_dialog(form: &AddTaskForm, column_title: &str, area: Rect, buf: &mut Buffer) {
    let popup = centered_rect(DIALOG_WIDTH, DIALOG_HEIGHT, area);
    Clear.render(popup, buf);

    let block = Block::default()
        .title(Span::styled(
            format!(" New task in {column_title} "),
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::LightYellow));

    let value_width = usize::from(popup.width.saturating_sub(2)).saturating_sub(LABEL_WIDTH + 4);
    let mut lines = vec![Line::default()];
    for field in FormField::all() {
        lines.push(field_line(form, *field, value_width));
        if *field == FormField::Subtasks {
            let highlighted = form
                .selected_subtask()
                .filter(|_| form.focus() == FormField::Subtasks);
            lines.extend(form.subtasks().iter().enumerate().map(|(i, title)| {
                let title_style = if highlighted == Some(i) {
                    Style::default().add_modifier(Modifier::REVERSED)
                } else {
                    Style::default()
                };
                Line::from(vec![
                    Span::raw(" ".repeat(LABEL_WIDTH + 3)),
                    Span::styled(format!("{}. ", i + 1), Style::default().fg(Color::DarkGray)),
                    Span::styled(truncate_string(title, value_width.saturating_sub(3)), title_style),
                ])
            }));
        }
    }
    lines.push(Line::default());
    lines.push(footer(form.can_submit()));

    Paragraph::new(lines).block(block).render(popup, buf);
}

fn field_line(form: &AddTaskForm, field: FormField, value_width: usize) -> Line<'static> {
    let focused = form.focus() == field;
    let marker = if focused { " ▸ " } else { "   " };
    let label_style = if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    let mut spans = vec![
        Span::styled(marker, Style::default().fg(Color::Cyan)),
        Span::styled(format!("{:<width$}", field.label(), width = LABEL_WIDTH), label_style),
    ];

    let text = |value: &str| {
        let count = value.chars().count();
        value
            .chars()
            .skip(count.saturating_sub(value_width.saturating_sub(1)))
            .collect::<String>()
    };

    match field {
        FormField::Title => spans.push(Span::raw(text(form.title()))),
        FormField::Description => spans.push(Span::raw(text(form.description()))),
        FormField::DueDate => {
            if form.due_date().is_empty() && !focused {
                spans.push(Span::styled("e.g. 3d", Style::default().fg(Color::DarkGray)));
            } else {
                spans.push(Span::raw(text(form.due_date())));
            }
        }
        FormField::Tag => {
            let color = hsl_color(tag_color(form.tag())).unwrap_or(Color::Magenta);
            spans.push(Span::styled("‹ ", Style::default().fg(Color::DarkGray)));
            spans.push(Span::styled(form.tag(), Style::default().fg(color)));
            spans.push(Span::styled(" ›", Style::default().fg(Color::DarkGray)));
        }
        FormField::Priority => {
            let priority = form.priority();
            spans.push(Span::styled("‹ ", Style::default().fg(Color::DarkGray)));
            spans.push(Span::styled(
                priority.display_name(),
                Style::default().fg(priority_color(priority)),
            ));
            spans.push(Span::styled(" ›", Style::default().fg(Color::DarkGray)));
        }
        FormField::Subtasks => {
            if form.subtask_input().is_empty() && !focused {
                spans.push(Span::styled(
                    "+ add a subtask",
                    Style::default().fg(Color::DarkGray),
                ));
            } else {
                spans.push(Span::styled("+ ", Style::default().fg(Color::Green)));
                spans.push(Span::raw(text(form.subtask_input())));
            }
        }
    }

    if focused && field.is_text() {
        spans.push(Span::styled("▏", Style::default().fg(Color::Cyan)));
    }
    Line::from(spans)
}

fn footer(can_submit: bool) -> Line<'static> {
    let key_style = Style::default().fg(Color::Yellow);
    let text_style = Style::default().fg(Color::White);
    let create_style = if can_submit {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    };

    Line::from(vec![
        Span::styled(" [Enter]", key_style),
        Span::styled(" Create", create_style),
        Span::styled("  [Tab]", key_style),
        Span::styled(" Next", text_style),
        Span::styled("  [←→]", key_style),
        Span::styled(" Change", text_style),
        Span::styled("  [Esc]", key_style),
        Span::styled(" Cancel", text_style),
    ])
}

#[cfg(test)]
mod tests {
    use ratatui::{buffer::Buffer, layout::Rect, style::Modifier};
    use taskflow_protocol::ColumnId;

    use super::render_add_task_dialog;
    use crate::form::{AddTaskForm, FormField};
    use crate::test_utils::buffer_to_string;

    /// Modifier of the last cell of `needle` on the first row containing it.
    fn modifier_at(buf: &Buffer, needle: &str) -> Modifier {
        let text = buffer_to_string(buf);
        let (y, line) = text
            .lines()
            .enumerate()
            .find(|(_, line)| line.contains(needle))
            .expect("row rendered");
        let chars: Vec<char> = line.chars().collect();
        let target: Vec<char> = needle.chars().collect();
        let x = chars
            .windows(target.len())
            .position(|w| w == target.as_slice())
            .expect("column")
            + target.len()
            - 1;
        buf[(x as u16, y as u16)].modifier
    }

    #[test]
    fn highlighted_subtask_is_reversed() {
        let mut form = AddTaskForm::new(ColumnId::TODO);
        while form.focus() != FormField::Subtasks {
            form.next_field();
        }
        for title in ['a', 'b'] {
            form.input(title);
            form.stage_subtask();
        }
        form.cycle(false);

        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        render_add_task_dialog(&form, "To Do", area, &mut buf);

        assert!(modifier_at(&buf, "2. b").contains(Modifier::REVERSED));
        assert!(!modifier_at(&buf, "1. a").contains(Modifier::REVERSED));
    }
}
