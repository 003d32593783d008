//! Drag-and-drop gesture translation.
//!
//! A [`DragGesture`] follows a grabbed card from the moment it is picked up
//! (mouse press or `m`) until it is dropped or abandoned. While the gesture
//! is in flight only its preview changes; the board is touched exactly once,
//! through the [`MoveRequest`] returned by [`DragGesture::finish`].

use taskflow_protocol::{Board, ColumnId, TaskId};

/// Where the grabbed card came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragOrigin {
    /// Column index on the board.
    pub column: usize,
    /// Task index within the column.
    pub index: usize,
    /// The grabbed task.
    pub task: TaskId,
}

/// Candidate drop position.
///
/// `index` is the position the card will occupy after the move, so for the
/// origin column it counts positions with the card already lifted out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropTarget {
    /// Column index on the board.
    pub column: usize,
    /// Final position within the column.
    pub index: usize,
}

/// How the gesture was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSource {
    /// Left button pressed on a card.
    Mouse,
    /// `m` pressed on the selected card.
    Keyboard,
}

/// A resolved move, ready for [`KanbanStore::move_task`](taskflow_protocol::KanbanStore::move_task).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRequest {
    /// Column the card leaves.
    pub source: ColumnId,
    /// Column the card lands in.
    pub dest: ColumnId,
    /// Position of the card in the source column.
    pub source_index: usize,
    /// Position of the card in the destination column after the move.
    pub dest_index: usize,
}

/// An in-flight drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragGesture {
    origin: DragOrigin,
    preview: Option<DropTarget>,
    source: DragSource,
}

impl DragGesture {
    /// Picks up the card at `(column, index)`.
    ///
    /// Returns `None` if there is no card there. The preview starts at the
    /// origin, so dropping right away changes nothing.
    #[must_use]
    pub fn grab(board: &Board, column: usize, index: usize, source: DragSource) -> Option<Self> {
        let task = board.columns.get(column)?.tasks.get(index)?;
        Some(Self {
            origin: DragOrigin {
                column,
                index,
                task: task.id,
            },
            preview: Some(DropTarget { column, index }),
            source,
        })
    }

    /// Returns where the card was picked up.
    #[must_use]
    pub const fn origin(&self) -> DragOrigin {
        self.origin
    }

    /// Returns the current drop preview, if the pointer is over a column.
    #[must_use]
    pub const fn preview(&self) -> Option<DropTarget> {
        self.preview
    }

    /// Returns how the gesture was started.
    #[must_use]
    pub const fn source(&self) -> DragSource {
        self.source
    }

    /// Returns `true` if the preview still points at the origin.
    #[must_use]
    pub fn is_at_origin(&self) -> bool {
        self.preview
            == Some(DropTarget {
                column: self.origin.column,
                index: self.origin.index,
            })
    }

    /// Largest valid final position in `column`.
    #[must_use]
    pub fn max_index(&self, board: &Board, column: usize) -> usize {
        let len = board.columns.get(column).map_or(0, |c| c.len());
        if column == self.origin.column {
            len.saturating_sub(1)
        } else {
            len
        }
    }

    /// Points the preview at a slot of the column as it is drawn.
    ///
    /// Slots count positions with the grabbed card still in place (0 is
    /// above the first card, `len` below the last). `None` clears the
    /// preview, as when the pointer leaves every column.
    pub fn hover_slot(&mut self, slot: Option<(usize, usize)>) {
        self.preview = slot.map(|(column, slot)| {
            let index = if column == self.origin.column && slot > self.origin.index {
                slot - 1
            } else {
                slot
            };
            DropTarget { column, index }
        });
    }

    /// Moves the preview one position up.
    pub fn step_up(&mut self) {
        let target = self.keyboard_target();
        self.preview = Some(DropTarget {
            index: target.index.saturating_sub(1),
            ..target
        });
    }

    /// Moves the preview one position down, stopping at the end of the column.
    pub fn step_down(&mut self, board: &Board) {
        let target = self.keyboard_target();
        let max = self.max_index(board, target.column);
        self.preview = Some(DropTarget {
            index: (target.index + 1).min(max),
            ..target
        });
    }

    /// Moves the preview to the previous column, wrapping around.
    pub fn step_left(&mut self, board: &Board) {
        let count = board.columns.len();
        if count == 0 {
            return;
        }
        let target = self.keyboard_target();
        let column = if target.column == 0 {
            count - 1
        } else {
            target.column - 1
        };
        self.retarget(board, column, target.index);
    }

    /// Moves the preview to the next column, wrapping around.
    pub fn step_right(&mut self, board: &Board) {
        let count = board.columns.len();
        if count == 0 {
            return;
        }
        let target = self.keyboard_target();
        self.retarget(board, (target.column + 1) % count, target.index);
    }

    /// Position of the drop marker as drawn: `(column, slot)` with the
    /// grabbed card still in place.
    #[must_use]
    pub fn marker_slot(&self) -> Option<(usize, usize)> {
        let target = self.preview?;
        let slot = if target.column == self.origin.column && target.index >= self.origin.index {
            target.index + 1
        } else {
            target.index
        };
        Some((target.column, slot))
    }

    /// Ends the gesture and resolves the drop.
    ///
    /// Returns `None` when the card was released outside every column, when
    /// the resolved destination equals the origin, or when the grabbed card
    /// is no longer where it was picked up.
    #[must_use]
    pub fn finish(self, board: &Board) -> Option<MoveRequest> {
        let target = self.preview?;
        let source = board.columns.get(self.origin.column)?;
        if source.tasks.get(self.origin.index).map(|t| t.id) != Some(self.origin.task) {
            return None;
        }
        let dest = board.columns.get(target.column)?;

        let dest_index = target.index.min(self.max_index(board, target.column));
        if target.column == self.origin.column && dest_index == self.origin.index {
            return None;
        }

        Some(MoveRequest {
            source: source.id.clone(),
            dest: dest.id.clone(),
            source_index: self.origin.index,
            dest_index,
        })
    }

    fn keyboard_target(&self) -> DropTarget {
        self.preview.unwrap_or(DropTarget {
            column: self.origin.column,
            index: self.origin.index,
        })
    }

    fn retarget(&mut self, board: &Board, column: usize, index: usize) {
        self.preview = Some(DropTarget {
            column,
            index: index.min(self.max_index(board, column)),
        });
    }
}
