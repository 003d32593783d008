//! Kanban board rendering widget.
//!
//! This module provides functions for rendering the complete Kanban board
//! with its columns arranged horizontally.

use ratatui::{buffer::Buffer, layout::Rect};
use taskflow_protocol::Board;

use super::column::{ColumnView, render_column};
use crate::drag::DragGesture;
use crate::layout::{Selection, column_areas};

/// Renders the complete Kanban board to the buffer.
///
/// The columns are arranged horizontally with equal widths. Only the
/// selected column highlights (and scrolls to) its selected task. While a
/// card is grabbed, its origin card and the drop marker are drawn too.
///
/// # Layout
///
/// ```text
/// ╭To Do (3)────────── + ╮╭In Progress (2)──── + ╮
/// │ Task 1               ││ Task 4               │
/// │ Task 2               ││ Task 5               │
/// │ Task 3               ││                      │
/// ╰──────────────────────╯╰──────────────────────╯
/// ```
///
/// # Examples
///
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use taskflow_protocol::seed::seeded_store;
/// use taskflow_tui::layout::Selection;
/// use taskflow_tui::widgets::render_board;
///
/// let store = seeded_store();
/// let area = Rect::new(0, 0, 80, 20);
/// let mut buf = Buffer::empty(area);
///
/// let selection = Selection { column: 0, task: Some(0) };
/// render_board(store.board(), selection, true, None, area, &mut buf);
/// ```
pub fn render_board(
    board: &Board,
    selection: Selection,
    focused: bool,
    drag: Option<&DragGesture>,
    area: Rect,
    buf: &mut Buffer,
) {
    let origin = drag.map(DragGesture::origin);
    let marker = drag.and_then(DragGesture::marker_slot);

    for (i, (column, column_area)) in board
        .columns
        .iter()
        .zip(column_areas(area, board.columns.len()))
        .enumerate()
    {
        let is_selected = selection.column == i;
        let view = ColumnView {
            focused: focused && is_selected,
            // Only show task selection in the selected column
            selected: if is_selected { selection.task } else { None },
            grabbed: origin.filter(|o| o.column == i).map(|o| o.index),
            drop_slot: marker.filter(|(c, _)| *c == i).map(|(_, slot)| slot),
        };
        render_column(column, view, column_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drag::DragSource;
    use crate::test_utils::{buffer_to_string, test_store};

    #[test]
    fn render_board_shows_every_column() {
        let store = test_store();
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);

        render_board(store.board(), Selection::default(), true, None, area, &mut buf);

        let content = buffer_to_string(&buf);
        assert!(content.contains("To Do (3)"));
        assert!(content.contains("In Progress (2)"));
        assert!(content.contains("Graphic Design Edits"));
    }

    #[test]
    fn render_board_marks_drag_origin_and_target() {
        let store = test_store();
        let board = store.board();
        let mut gesture = DragGesture::grab(board, 0, 0, DragSource::Keyboard).expect("card");
        gesture.step_right(board);

        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        render_board(board, Selection::default(), true, Some(&gesture), area, &mut buf);

        let content = buffer_to_string(&buf);
        assert!(content.contains("drop here"));
        // Grabbed card keeps its place with a double border.
        assert_eq!(buf[(1, 1)].symbol(), "╔");
    }
}
