//! Kanban board types and structures.
//!
//! This module defines columns and the board aggregate that orders them.
//! Mutation goes through [`KanbanStore`](crate::KanbanStore); the types here
//! only expose read access plus the crate-private plumbing the store needs.

use serde::{Deserialize, Serialize};

use crate::error::{ProtocolError, Result};
use crate::ids::{ColumnId, TaskId};
use crate::task::Task;

/// A single column on the Kanban board.
///
/// Contains tasks that share the same workflow stage, in display order.
///
/// # Examples
///
/// ```
/// use taskflow_protocol::{Column, ColumnId};
///
/// let column = Column::new(ColumnId::TODO, "To Do");
/// assert!(column.is_empty());
/// assert_eq!(column.title, "To Do");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Stable identifier of this column.
    pub id: ColumnId,
    /// Human-readable name.
    pub title: String,
    /// Tasks currently in this column, ordered by position.
    pub tasks: Vec<Task>,
}

impl Column {
    /// Creates a new empty column.
    #[must_use]
    pub fn new(id: ColumnId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            tasks: Vec::new(),
        }
    }

    /// Returns the number of tasks in this column.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` if the column has no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Returns the position of a task in this column.
    #[must_use]
    pub fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    /// Returns a reference to a task by ID, if found.
    #[must_use]
    pub fn get_task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }
}

/// Where a task currently lives on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskLocation {
    /// Column holding the task.
    pub column: ColumnId,
    /// Position of the column on the board.
    pub column_index: usize,
    /// Position of the task within the column.
    pub index: usize,
}

/// The root aggregate: an ordered sequence of columns.
///
/// # Examples
///
/// ```
/// use taskflow_protocol::{Board, ColumnId};
///
/// let board = Board::standard();
/// assert_eq!(board.columns.len(), 2);
/// assert!(board.column(&ColumnId::TODO).is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Board {
    /// Columns in display order.
    pub columns: Vec<Column>,
}

impl Board {
    /// Creates a board from its columns.
    #[must_use]
    pub const fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Creates the standard two-column board ("To Do", "In Progress") with
    /// no tasks.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(vec![
            Column::new(ColumnId::TODO, "To Do"),
            Column::new(ColumnId::IN_PROGRESS, "In Progress"),
        ])
    }

    /// Returns the position of a column on the board.
    #[must_use]
    pub fn column_index(&self, id: &ColumnId) -> Option<usize> {
        self.columns.iter().position(|c| &c.id == id)
    }

    /// Returns a column by id.
    #[must_use]
    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| &c.id == id)
    }

    /// Returns a column by id or a [`ProtocolError::ColumnNotFound`].
    ///
    /// # Errors
    ///
    /// Fails when no column has the given id.
    pub fn try_column(&self, id: &ColumnId) -> Result<&Column> {
        self.column(id)
            .ok_or_else(|| ProtocolError::ColumnNotFound(id.clone()))
    }

    /// Finds a task anywhere on the board.
    #[must_use]
    pub fn get_task(&self, id: TaskId) -> Option<&Task> {
        self.columns.iter().find_map(|c| c.get_task(id))
    }

    /// Returns `true` if any column holds a task with this id.
    #[must_use]
    pub fn contains_task(&self, id: TaskId) -> bool {
        self.get_task(id).is_some()
    }

    /// Locates a task on the board.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::TaskNotFound`] if no column holds the task.
    pub fn locate(&self, id: TaskId) -> Result<TaskLocation> {
        self.columns
            .iter()
            .enumerate()
            .find_map(|(column_index, column)| {
                column.position(id).map(|index| TaskLocation {
                    column: column.id.clone(),
                    column_index,
                    index,
                })
            })
            .ok_or(ProtocolError::TaskNotFound(id))
    }

    /// Returns the total number of tasks across all columns.
    #[must_use]
    pub fn total_tasks(&self) -> usize {
        self.columns.iter().map(Column::len).sum()
    }

    /// Iterates over every task id on the board, column by column.
    pub fn task_ids(&self) -> impl Iterator<Item = TaskId> + '_ {
        self.columns
            .iter()
            .flat_map(|c| c.tasks.iter().map(|t| t.id))
    }

    /// Serializes the board as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::SerializationFailed`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(ProtocolError::SerializationFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{KanbanStore, TaskDraft};

    fn board_with_tasks() -> Board {
        let mut store = KanbanStore::new(Board::standard());
        store.add_task(&ColumnId::TODO, TaskDraft::new("a"));
        store.add_task(&ColumnId::TODO, TaskDraft::new("b"));
        store.add_task(&ColumnId::IN_PROGRESS, TaskDraft::new("c"));
        store.board().clone()
    }

    #[test]
    fn standard_board_has_fixed_columns() {
        let board = Board::standard();
        let ids: Vec<&str> = board.columns.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["todo", "in-progress"]);
        assert_eq!(board.total_tasks(), 0);
    }

    #[test]
    fn column_lookup() {
        let board = Board::standard();
        assert_eq!(board.column_index(&ColumnId::IN_PROGRESS), Some(1));
        assert!(board.column(&ColumnId::new("done")).is_none());
        assert!(matches!(
            board.try_column(&ColumnId::new("done")),
            Err(ProtocolError::ColumnNotFound(_))
        ));
    }

    #[test]
    fn locate_finds_column_and_index() {
        let board = board_with_tasks();
        let id = board.columns[0].tasks[1].id;

        let location = board.locate(id).expect("task should exist");
        assert_eq!(location.column, ColumnId::TODO);
        assert_eq!(location.column_index, 0);
        assert_eq!(location.index, 1);

        assert!(matches!(
            board.locate(TaskId::new_v4()),
            Err(ProtocolError::TaskNotFound(_))
        ));
    }

    #[test]
    fn task_ids_are_in_board_order() {
        let board = board_with_tasks();
        let titles: Vec<&str> = board
            .task_ids()
            .filter_map(|id| board.get_task(id))
            .map(|t| t.title.as_str())
            .collect();
        assert_eq!(titles, ["a", "b", "c"]);
    }

    #[test]
    fn board_json_roundtrip() {
        let board = board_with_tasks();
        let json = board.to_json().expect("serialize");
        let parsed: Board = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(board, parsed);
    }
}
