//! Navigation sidebar widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Widget},
};

use crate::layout::SIDEBAR_NAV_OFFSET;
use crate::state::{NavItem, Sidebar};

/// Renders the sidebar: brand, navigation entries, and the collapse toggle.
///
/// Rows line up with [`hit_test`](crate::layout::hit_test): entries start
/// [`SIDEBAR_NAV_OFFSET`] rows from the top, the toggle sits on the last row.
///
/// ```text
/// TaskFlow        │     TF │
///                 │        │
/// ▦ Board         │     ▦  │
/// ✦ AI Chat       │     ✦  │
/// ⚙ Settings      │     ⚙  │
///                 │        │
/// « Collapse      │     »  │
/// ```
pub fn render_sidebar(sidebar: &Sidebar, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    block.render(area, buf);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let brand = if sidebar.collapsed { "TF" } else { " TaskFlow" };
    buf.set_stringn(
        inner.x,
        inner.y,
        brand,
        usize::from(inner.width),
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
    );

    for (i, item) in NavItem::all().iter().enumerate() {
        let Ok(offset) = u16::try_from(i) else {
            break;
        };
        let y = inner.y + SIDEBAR_NAV_OFFSET + offset;
        if y >= inner.bottom().saturating_sub(1) {
            break;
        }

        let is_active = sidebar.active == *item;
        let style = if is_active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        let label = if sidebar.collapsed {
            format!(" {}", item.icon())
        } else {
            format!(" {} {}", item.icon(), item.label())
        };
        let padded = format!("{label:<width$}", width = usize::from(inner.width));
        buf.set_stringn(inner.x, y, padded, usize::from(inner.width), style);
    }

    let toggle = if sidebar.collapsed { " »" } else { " « Collapse" };
    buf.set_stringn(
        inner.x,
        inner.bottom() - 1,
        toggle,
        usize::from(inner.width),
        Style::default().fg(Color::DarkGray),
    );
}
