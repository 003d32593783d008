//! Centralized layout measurements for the TUI.
//!
//! Rendering and mouse hit-testing both derive their geometry from this
//! module, so a click always lands on the thing that was drawn under it.

use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use taskflow_protocol::Board;

/// Height of the header bar in rows.
pub const HEADER_HEIGHT: u16 = 3;

/// Height of the status line at the bottom of the screen.
pub const STATUS_HEIGHT: u16 = 1;

/// Height of each task card in rows.
///
/// Border (2 rows) plus title, tag/priority, and progress lines.
pub const TASK_CARD_HEIGHT: u16 = 5;

/// Width of the expanded sidebar, including its right border.
pub const SIDEBAR_WIDTH: u16 = 18;

/// Width of the collapsed sidebar (icons only).
pub const SIDEBAR_COLLAPSED_WIDTH: u16 = 5;

/// Preferred width of the assistant chat panel.
pub const CHAT_WIDTH: u16 = 40;

/// Width of the "+" add-task button drawn in each column's top border.
pub const ADD_BUTTON_WIDTH: u16 = 5;

/// Rows above the first navigation entry in the sidebar (brand + blank).
pub const SIDEBAR_NAV_OFFSET: u16 = 2;

/// Minimum terminal height for useful rendering.
///
/// Below this height, we display a "terminal too small" message.
pub const MIN_HEIGHT: u16 = 12;

/// Minimum terminal height for rendering with header.
///
/// When terminal height is between `MIN_HEIGHT` and `MIN_HEIGHT_WITH_HEADER`,
/// we hide the header to reclaim 3 rows of content space.
pub const MIN_HEIGHT_WITH_HEADER: u16 = MIN_HEIGHT + HEADER_HEIGHT;

/// Minimum terminal width for useful rendering.
pub const MIN_WIDTH: u16 = 50;

/// The regions of the screen for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenLayout {
    /// Title bar, hidden on short terminals.
    pub header: Option<Rect>,
    /// Navigation sidebar.
    pub sidebar: Rect,
    /// Board (or settings) area.
    pub main: Rect,
    /// Assistant chat panel, when open.
    pub chat: Option<Rect>,
    /// Status line.
    pub status: Rect,
}

impl ScreenLayout {
    /// Splits the terminal area into screen regions.
    ///
    /// # Examples
    ///
    /// ```
    /// use ratatui::layout::Rect;
    /// use taskflow_tui::layout::{ScreenLayout, SIDEBAR_WIDTH};
    ///
    /// let layout = ScreenLayout::compute(Rect::new(0, 0, 100, 30), false, true);
    /// assert!(layout.header.is_some());
    /// assert_eq!(layout.sidebar.width, SIDEBAR_WIDTH);
    /// assert!(layout.chat.is_some());
    /// ```
    #[must_use]
    pub fn compute(area: Rect, sidebar_collapsed: bool, chat_open: bool) -> Self {
        let show_header = area.height >= MIN_HEIGHT_WITH_HEADER;
        let header_height = if show_header { HEADER_HEIGHT } else { 0 };

        let [header, body, status] = Layout::vertical([
            Constraint::Length(header_height),
            Constraint::Min(0),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .areas(area);

        let sidebar_width = if sidebar_collapsed {
            SIDEBAR_COLLAPSED_WIDTH
        } else {
            SIDEBAR_WIDTH
        };
        let chat_width = if chat_open {
            CHAT_WIDTH.min(body.width.saturating_sub(sidebar_width) / 2)
        } else {
            0
        };

        let [sidebar, main, chat] = Layout::horizontal([
            Constraint::Length(sidebar_width),
            Constraint::Min(0),
            Constraint::Length(chat_width),
        ])
        .areas(body);

        Self {
            header: show_header.then_some(header),
            sidebar,
            main,
            chat: (chat_width > 0).then_some(chat),
            status,
        }
    }
}

/// Splits the board area into one equal-width area per column.
#[must_use]
pub fn column_areas(main: Rect, count: usize) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let ratio = u32::try_from(count).unwrap_or(u32::MAX);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints((0..count).map(|_| Constraint::Ratio(1, ratio)))
        .split(main)
        .to_vec()
}

/// Returns the area inside a column's border.
#[must_use]
pub fn column_inner(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

/// Number of cards that fit in a column's inner area (at least one).
#[must_use]
pub fn visible_cards(inner: Rect) -> usize {
    usize::from((inner.height / TASK_CARD_HEIGHT).max(1))
}

/// Calculates the scroll offset that keeps the selected card visible.
#[must_use]
pub fn scroll_offset(selected: Option<usize>, total: usize, visible: usize) -> usize {
    let Some(selected) = selected else {
        return 0;
    };

    if total <= visible {
        return 0;
    }

    let max_offset = total.saturating_sub(visible);
    if selected < visible / 2 {
        0
    } else {
        selected.saturating_sub(visible / 2).min(max_offset)
    }
}

/// The area of the card drawn in slot `slot` (0-based, after scrolling).
#[must_use]
pub fn card_area(inner: Rect, slot: usize) -> Option<Rect> {
    let offset = u16::try_from(slot).ok()?.checked_mul(TASK_CARD_HEIGHT)?;
    let y = inner.y.checked_add(offset)?;
    if y >= inner.bottom() {
        return None;
    }
    Some(Rect {
        x: inner.x,
        y,
        width: inner.width,
        height: TASK_CARD_HEIGHT.min(inner.bottom() - y),
    })
}

/// What lies under a screen position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// A sidebar navigation entry.
    NavItem(usize),
    /// The collapse/expand control at the bottom of the sidebar.
    SidebarToggle,
    /// The "+" button of a column.
    AddTask {
        /// Column index on the board.
        column: usize,
    },
    /// A task card.
    Card {
        /// Column index on the board.
        column: usize,
        /// Task index within the column.
        index: usize,
    },
    /// Empty space inside a column.
    Column {
        /// Column index on the board.
        column: usize,
    },
    /// The chat panel.
    Chat,
    /// Nothing interactive.
    Nothing,
}

/// Selection used to reproduce the per-column scroll offsets of the last
/// frame: only the selected column scrolls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    /// Selected column index.
    pub column: usize,
    /// Selected task within that column.
    pub task: Option<usize>,
}

impl Selection {
    fn for_column(self, column: usize) -> Option<usize> {
        (self.column == column).then_some(self.task).flatten()
    }
}

/// Resolves a screen position to the element drawn there.
#[must_use]
pub fn hit_test(
    layout: &ScreenLayout,
    board: &Board,
    selection: Selection,
    nav_items: usize,
    column: u16,
    row: u16,
) -> Hit {
    let pos = Position::new(column, row);

    if layout.sidebar.contains(pos) {
        return sidebar_hit(layout.sidebar, nav_items, row);
    }

    if layout.chat.is_some_and(|chat| chat.contains(pos)) {
        return Hit::Chat;
    }

    if !layout.main.contains(pos) {
        return Hit::Nothing;
    }

    let areas = column_areas(layout.main, board.columns.len());
    let Some((index, area)) = areas.iter().enumerate().find(|(_, a)| a.contains(pos)) else {
        return Hit::Nothing;
    };

    if row == area.y && column >= area.right().saturating_sub(ADD_BUTTON_WIDTH) {
        return Hit::AddTask { column: index };
    }

    let inner = column_inner(*area);
    if !inner.contains(pos) {
        return Hit::Column { column: index };
    }

    let len = board.columns[index].len();
    let visible = visible_cards(inner);
    let offset = scroll_offset(selection.for_column(index), len, visible);
    let slot = usize::from((row - inner.y) / TASK_CARD_HEIGHT);
    let task = offset + slot;

    if slot < visible && task < len {
        Hit::Card {
            column: index,
            index: task,
        }
    } else {
        Hit::Column { column: index }
    }
}

/// Resolves a screen position to an insertion slot for a dragged card.
///
/// The slot counts positions in the column as currently drawn (0 is above
/// the first card, `len` is below the last one). Pointing at the lower half
/// of a card selects the slot after it. Returns `None` outside every column.
#[must_use]
pub fn drop_slot_at(
    layout: &ScreenLayout,
    board: &Board,
    selection: Selection,
    column: u16,
    row: u16,
) -> Option<(usize, usize)> {
    let pos = Position::new(column, row);
    if !layout.main.contains(pos) {
        return None;
    }

    let areas = column_areas(layout.main, board.columns.len());
    let (index, area) = areas.iter().enumerate().find(|(_, a)| a.contains(pos))?;
    let len = board.columns[index].len();

    let inner = column_inner(*area);
    if row < inner.y {
        return Some((index, 0));
    }
    if row >= inner.bottom() {
        return Some((index, len));
    }

    let visible = visible_cards(inner);
    let offset = scroll_offset(selection.for_column(index), len, visible);
    let relative = row - inner.y;
    let card = usize::from(relative / TASK_CARD_HEIGHT);
    let lower_half = relative % TASK_CARD_HEIGHT >= TASK_CARD_HEIGHT / 2;

    Some((index, (offset + card + usize::from(lower_half)).min(len)))
}

fn sidebar_hit(sidebar: Rect, nav_items: usize, row: u16) -> Hit {
    if sidebar.height > 0 && row == sidebar.bottom() - 1 {
        return Hit::SidebarToggle;
    }
    let first = sidebar.y + SIDEBAR_NAV_OFFSET;
    if row >= first {
        let index = usize::from(row - first);
        if index < nav_items {
            return Hit::NavItem(index);
        }
    }
    Hit::Nothing
}
