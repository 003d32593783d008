//! Column rendering widget.
//!
//! This module provides functions for rendering individual Kanban columns
//! with their headers, task lists, and the drop marker of a drag in flight.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};
use taskflow_protocol::Column;

use super::task_card::{CardHighlight, render_task_card};
use crate::layout::{
    ADD_BUTTON_WIDTH, TASK_CARD_HEIGHT, card_area, column_inner, scroll_offset, visible_cards,
};

/// Per-column view flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColumnView {
    /// Whether this column has the board selection.
    pub focused: bool,
    /// Selected card, for the focused column.
    pub selected: Option<usize>,
    /// Card being dragged out of this column.
    pub grabbed: Option<usize>,
    /// Drop marker slot, counted with the grabbed card still in place.
    pub drop_slot: Option<usize>,
}

/// Renders a single column to the buffer.
///
/// # Layout
///
/// ```text
/// ╭To Do (3)──────────── + ╮
/// │╭──────────────────────╮│
/// ││Create wireframes...  ││  <- Task cards
/// ││● High  Wireframes    ││
/// ││▰▰▰▱▱▱▱▱▱▱ 1/3  due 7d││
/// │╰──────────────────────╯│
/// ╰────────────────────────╯
/// ```
///
/// Empty columns show a "No tasks" placeholder.
///
/// # Examples
///
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use taskflow_protocol::seed::seeded_store;
/// use taskflow_tui::widgets::{render_column, ColumnView};
///
/// let store = seeded_store();
/// let area = Rect::new(0, 0, 30, 20);
/// let mut buf = Buffer::empty(area);
///
/// let view = ColumnView { focused: true, selected: Some(0), ..ColumnView::default() };
/// render_column(&store.board().columns[0], view, area, &mut buf);
/// ```
pub fn render_column(column: &Column, view: ColumnView, area: Rect, buf: &mut Buffer) {
    let is_drop_target = view.drop_slot.is_some();
    let border_style = if is_drop_target {
        Style::default().fg(Color::Yellow)
    } else if view.focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let title = format!("{} ({})", column.title, column.len());
    let title_style = if view.focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    let add_button = Line::from(Span::styled(
        format!("{:^width$}", "+", width = usize::from(ADD_BUTTON_WIDTH) - 1),
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Right);

    let block = Block::default()
        .title(Span::styled(title, title_style))
        .title_top(add_button)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style);

    let inner = column_inner(area);
    block.render(area, buf);

    if column.is_empty() {
        render_empty_placeholder(inner, buf);
        if view.drop_slot.is_some() {
            render_drop_marker(inner, 0, buf);
        }
        return;
    }

    let visible = visible_cards(inner);
    let offset = scroll_offset(view.selected, column.len(), visible);

    for (slot, (index, task)) in column.tasks.iter().enumerate().skip(offset).take(visible).enumerate() {
        let Some(card) = card_area(inner, slot) else {
            break;
        };
        let highlight = if view.grabbed == Some(index) {
            CardHighlight::Grabbed
        } else if view.selected == Some(index) {
            CardHighlight::Selected
        } else {
            CardHighlight::None
        };
        render_task_card(task, highlight, card, buf);
    }

    if let Some(slot) = view.drop_slot
        && let Some(visible_slot) = slot.checked_sub(offset)
        && visible_slot <= visible
    {
        render_drop_marker(inner, visible_slot, buf);
    }
}

/// Renders the "No tasks" placeholder for empty columns.
fn render_empty_placeholder(area: Rect, buf: &mut Buffer) {
    let placeholder = Paragraph::new(Line::from(Span::styled(
        "No tasks",
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )))
    .alignment(Alignment::Center);

    // Center vertically
    if area.height > 0 {
        let y_offset = area.height / 2;
        let centered_area = Rect {
            x: area.x,
            y: area.y + y_offset,
            width: area.width,
            height: 1,
        };
        placeholder.render(centered_area, buf);
    }
}

/// Draws the insertion marker above the card in `slot`.
fn render_drop_marker(inner: Rect, slot: usize, buf: &mut Buffer) {
    if inner.width == 0 || inner.height == 0 {
        return;
    }
    let offset = u16::try_from(slot)
        .ok()
        .and_then(|s| s.checked_mul(TASK_CARD_HEIGHT))
        .unwrap_or(u16::MAX);
    let y = inner
        .y
        .saturating_add(offset)
        .min(inner.bottom().saturating_sub(1));

    let label = " drop here ";
    let width = usize::from(inner.width);
    let marker = if width > label.len() + 2 {
        let side = width - label.len();
        format!("{}{label}{}", "━".repeat(side / 2), "━".repeat(side - side / 2))
    } else {
        "━".repeat(width)
    };
    buf.set_string(
        inner.x,
        y,
        marker,
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    );
}
