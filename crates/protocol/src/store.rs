//! The in-memory Kanban store.
//!
//! [`KanbanStore`] is the single source of truth for the board. Every
//! mutation goes through it and produces a new snapshot; readers hold
//! [`Arc<Board>`] snapshots that later mutations never touch.
//!
//! All operations are total. Invalid column ids, task ids, subtask ids and
//! out-of-range indices leave the board unchanged and are reported through
//! the return value (`None` or `false`).
//!
//! # Examples
//!
//! ```
//! use taskflow_protocol::{Board, ColumnId, KanbanStore, TaskDraft};
//!
//! let mut store = KanbanStore::new(Board::standard());
//! let id = store.add_task(&ColumnId::TODO, TaskDraft::new("Write docs")).unwrap();
//!
//! assert!(store.move_task(&ColumnId::TODO, &ColumnId::IN_PROGRESS, 0, 0));
//! assert_eq!(store.find_task(id), Some((ColumnId::IN_PROGRESS, 0)));
//! ```

use std::sync::Arc;

use tracing::debug;

use crate::board::{Board, Column};
use crate::clock::{Clock, SystemClock};
use crate::ids::{ColumnId, IdGenerator, RandomIds, SubtaskId, TaskId};
use crate::task::{Task, TaskDraft};

/// Owns the board and applies mutations to it.
#[derive(Debug)]
pub struct KanbanStore {
    snapshot: Arc<Board>,
    revision: u64,
    ids: Box<dyn IdGenerator>,
    clock: Box<dyn Clock>,
}

impl KanbanStore {
    /// Creates a store over `board` using random ids and the system clock.
    #[must_use]
    pub fn new(board: Board) -> Self {
        Self::with_collaborators(board, Box::new(RandomIds), Box::new(SystemClock))
    }

    /// Creates a store with explicit id and timestamp sources.
    #[must_use]
    pub fn with_collaborators(
        board: Board,
        ids: Box<dyn IdGenerator>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            snapshot: Arc::new(board),
            revision: 0,
            ids,
            clock,
        }
    }

    /// Returns the latest snapshot.
    ///
    /// The returned board is frozen: mutations applied to the store later do
    /// not show up in it.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Board> {
        Arc::clone(&self.snapshot)
    }

    /// Borrows the current board without taking a snapshot.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.snapshot
    }

    /// Number of successful mutations applied so far.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns a column by id.
    #[must_use]
    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.snapshot.column(id)
    }

    /// Returns the column id and index currently holding a task.
    #[must_use]
    pub fn find_task(&self, id: TaskId) -> Option<(ColumnId, usize)> {
        self.snapshot
            .locate(id)
            .ok()
            .map(|location| (location.column, location.index))
    }

    /// Returns the total number of tasks on the board.
    #[must_use]
    pub fn total_tasks(&self) -> usize {
        self.snapshot.total_tasks()
    }

    /// Appends a new task built from `draft` to the end of a column.
    ///
    /// The store assigns the task id, one id per subtask, and the creation
    /// timestamp. Returns `None` without touching the board if the column
    /// does not exist.
    pub fn add_task(&mut self, column: &ColumnId, draft: TaskDraft) -> Option<TaskId> {
        let Some(column_index) = self.snapshot.column_index(column) else {
            debug!(%column, "add_task: unknown column, ignoring");
            return None;
        };

        let id = self.fresh_task_id();
        let subtask_ids = self.fresh_subtask_ids(draft.subtasks.len());
        let task = Task::from_draft(id, self.clock.now(), draft, subtask_ids);

        let board = self.board_mut();
        board.columns[column_index].tasks.push(task);
        debug!(%column, task = %id.short(), "task added");
        Some(id)
    }

    /// Moves a task by position, within a column or across columns.
    ///
    /// The task at `source_index` is removed first, then inserted at
    /// `dest_index`. When both columns are the same, `dest_index` therefore
    /// refers to the sequence after removal.
    ///
    /// Returns `false` and leaves the board unchanged when a column is
    /// unknown, an index is out of range, or the move would not change
    /// anything (same column, same index).
    pub fn move_task(
        &mut self,
        source: &ColumnId,
        dest: &ColumnId,
        source_index: usize,
        dest_index: usize,
    ) -> bool {
        let (Some(from), Some(to)) = (
            self.snapshot.column_index(source),
            self.snapshot.column_index(dest),
        ) else {
            debug!(%source, %dest, "move_task: unknown column, ignoring");
            return false;
        };

        if from == to && source_index == dest_index {
            debug!(column = %source, index = source_index, "move_task: nothing to move");
            return false;
        }

        let source_len = self.snapshot.columns[from].len();
        if source_index >= source_len {
            debug!(%source, source_index, source_len, "move_task: source index out of range");
            return false;
        }

        let dest_len = if from == to {
            source_len - 1
        } else {
            self.snapshot.columns[to].len()
        };
        if dest_index > dest_len {
            debug!(%dest, dest_index, dest_len, "move_task: destination index out of range");
            return false;
        }

        let board = self.board_mut();
        let task = board.columns[from].tasks.remove(source_index);
        debug!(
            task = %task.id.short(),
            %source,
            %dest,
            source_index,
            dest_index,
            "task moved"
        );
        board.columns[to].tasks.insert(dest_index, task);
        true
    }

    /// Removes a task from a column and returns it.
    ///
    /// Returns `None` if the column or the task does not resolve, so a second
    /// call with the same id is a no-op.
    pub fn delete_task(&mut self, column: &ColumnId, task: TaskId) -> Option<Task> {
        let Some((column_index, task_index)) = self.resolve_task(column, task) else {
            debug!(%column, task = %task.short(), "delete_task: task not found, ignoring");
            return None;
        };

        let removed = self.board_mut().columns[column_index]
            .tasks
            .remove(task_index);
        debug!(%column, task = %task.short(), "task deleted");
        Some(removed)
    }

    /// Flips the completion flag of a subtask and returns the new value.
    ///
    /// Returns `None` if any of the ids does not resolve. Every other field
    /// of the task, and the order of its subtasks, is preserved.
    pub fn toggle_subtask(
        &mut self,
        column: &ColumnId,
        task: TaskId,
        subtask: SubtaskId,
    ) -> Option<bool> {
        let resolved = self.resolve_task(column, task).filter(|&(c, t)| {
            self.snapshot.columns[c].tasks[t]
                .subtask(subtask)
                .is_some()
        });
        let Some((column_index, task_index)) = resolved else {
            debug!(
                %column,
                task = %task.short(),
                subtask = %subtask.short(),
                "toggle_subtask: subtask not found, ignoring"
            );
            return None;
        };

        let completed = self.board_mut().columns[column_index].tasks[task_index]
            .toggle_subtask(subtask);
        debug!(task = %task.short(), subtask = %subtask.short(), ?completed, "subtask toggled");
        completed
    }

    fn resolve_task(&self, column: &ColumnId, task: TaskId) -> Option<(usize, usize)> {
        let column_index = self.snapshot.column_index(column)?;
        let task_index = self.snapshot.columns[column_index].position(task)?;
        Some((column_index, task_index))
    }

    /// Hands out a mutable board for a mutation that is known to succeed.
    fn board_mut(&mut self) -> &mut Board {
        self.revision += 1;
        Arc::make_mut(&mut self.snapshot)
    }

    fn fresh_task_id(&mut self) -> TaskId {
        loop {
            let id = TaskId::from(self.ids.next_uuid());
            if !self.snapshot.contains_task(id) {
                return id;
            }
        }
    }

    fn fresh_subtask_ids(&mut self, count: usize) -> Vec<SubtaskId> {
        let mut issued: Vec<SubtaskId> = Vec::with_capacity(count);
        while issued.len() < count {
            let id = SubtaskId::from(self.ids.next_uuid());
            if !issued.contains(&id) {
                issued.push(id);
            }
        }
        issued
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::ids::SequentialIds;
    use crate::seed::seeded_store;
    use crate::task::Priority;
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;
    use uuid::Uuid;

    fn test_store(board: Board) -> KanbanStore {
        let at = Utc.with_ymd_and_hms(2025, 1, 15, 10, 30, 0).unwrap();
        KanbanStore::with_collaborators(
            board,
            Box::new(SequentialIds::default()),
            Box::new(FixedClock::new(at)),
        )
    }

    /// A standard board with `todo` tasks in "todo" and `doing` in "in-progress".
    fn store_with(todo: usize, doing: usize) -> KanbanStore {
        let mut store = test_store(Board::standard());
        for n in 0..todo {
            store.add_task(&ColumnId::TODO, TaskDraft::new(format!("todo {n}")).subtask("a"));
        }
        for n in 0..doing {
            store.add_task(&ColumnId::IN_PROGRESS, TaskDraft::new(format!("doing {n}")));
        }
        store
    }

    fn titles(store: &KanbanStore, column: &ColumnId) -> Vec<String> {
        store
            .column(column)
            .map(|c| c.tasks.iter().map(|t| t.title.clone()).collect())
            .unwrap_or_default()
    }

    fn sorted_ids(column: &Column) -> Vec<TaskId> {
        let mut ids: Vec<TaskId> = column.tasks.iter().map(|t| t.id).collect();
        ids.sort();
        ids
    }

    #[test]
    fn add_task_appends_with_fresh_identity() {
        let mut store = store_with(2, 0);
        let id = store
            .add_task(&ColumnId::TODO, TaskDraft::new("new").subtask("x").subtask("y"))
            .expect("column exists");

        let column = store.column(&ColumnId::TODO).expect("todo");
        let task = column.tasks.last().expect("appended");
        assert_eq!(task.id, id);
        assert_eq!(task.title, "new");
        assert_eq!(task.created_at_iso(), "2025-01-15T10:30:00.000Z");
        assert_ne!(task.subtasks[0].id, task.subtasks[1].id);
        assert!(task.subtasks.iter().all(|s| !s.completed));
    }

    #[test]
    fn add_task_to_unknown_column_is_noop() {
        let mut store = store_with(1, 1);
        let before = store.snapshot();

        assert_eq!(store.add_task(&ColumnId::new("done"), TaskDraft::new("x")), None);
        assert_eq!(*store.snapshot(), *before);
        assert_eq!(store.revision(), 2);
    }

    #[test]
    fn add_task_skips_colliding_ids() {
        #[derive(Debug)]
        struct Repeating(Vec<Uuid>);
        impl IdGenerator for Repeating {
            fn next_uuid(&mut self) -> Uuid {
                self.0.remove(0)
            }
        }

        let first = Uuid::from_u128(1);
        let ids = Repeating(vec![first, first, Uuid::from_u128(2)]);
        let mut store = KanbanStore::with_collaborators(
            Board::standard(),
            Box::new(ids),
            Box::new(SystemClock),
        );

        let a = store.add_task(&ColumnId::TODO, TaskDraft::new("a")).expect("added");
        let b = store.add_task(&ColumnId::TODO, TaskDraft::new("b")).expect("added");
        assert_eq!(*a.as_uuid(), first);
        assert_eq!(b.as_uuid().as_u128(), 2);
    }

    #[test]
    fn snapshots_are_isolated_from_later_mutations() {
        let mut store = store_with(3, 0);
        let before = store.snapshot();

        assert!(store.move_task(&ColumnId::TODO, &ColumnId::IN_PROGRESS, 0, 0));
        assert_eq!(before.column(&ColumnId::TODO).map(Column::len), Some(3));
        assert_eq!(store.column(&ColumnId::TODO).map(Column::len), Some(2));
    }

    #[test]
    fn revision_counts_successful_mutations_only() {
        let mut store = store_with(2, 0);
        let start = store.revision();

        assert!(!store.move_task(&ColumnId::TODO, &ColumnId::TODO, 1, 1));
        assert!(!store.move_task(&ColumnId::TODO, &ColumnId::TODO, 5, 0));
        assert_eq!(store.revision(), start);

        assert!(store.move_task(&ColumnId::TODO, &ColumnId::TODO, 0, 1));
        assert_eq!(store.revision(), start + 1);
    }

    #[test]
    fn move_within_column_uses_post_removal_index() {
        let mut store = store_with(3, 0);
        assert!(store.move_task(&ColumnId::TODO, &ColumnId::TODO, 0, 2));
        assert_eq!(titles(&store, &ColumnId::TODO), ["todo 1", "todo 2", "todo 0"]);

        assert!(store.move_task(&ColumnId::TODO, &ColumnId::TODO, 2, 0));
        assert_eq!(titles(&store, &ColumnId::TODO), ["todo 0", "todo 1", "todo 2"]);
    }

    #[test]
    fn move_rejects_out_of_range_indices() {
        let mut store = store_with(3, 1);
        // Same column: only 0..=2 are valid after removal.
        assert!(!store.move_task(&ColumnId::TODO, &ColumnId::TODO, 0, 3));
        // Other column: appending at len is fine, len + 1 is not.
        assert!(!store.move_task(&ColumnId::TODO, &ColumnId::IN_PROGRESS, 0, 2));
        assert!(store.move_task(&ColumnId::TODO, &ColumnId::IN_PROGRESS, 0, 1));
        assert!(!store.move_task(&ColumnId::new("x"), &ColumnId::TODO, 0, 0));
    }

    #[test]
    fn move_into_empty_column() {
        let mut store = store_with(1, 0);
        assert!(store.move_task(&ColumnId::TODO, &ColumnId::IN_PROGRESS, 0, 0));
        assert!(store.column(&ColumnId::TODO).is_some_and(Column::is_empty));
        assert_eq!(titles(&store, &ColumnId::IN_PROGRESS), ["todo 0"]);
    }

    #[test]
    fn delete_is_idempotent() {
        let mut store = store_with(2, 0);
        let id = store.board().columns[0].tasks[0].id;

        let removed = store.delete_task(&ColumnId::TODO, id).expect("removed");
        assert_eq!(removed.id, id);
        let after_first = store.snapshot();

        assert!(store.delete_task(&ColumnId::TODO, id).is_none());
        assert_eq!(*store.snapshot(), *after_first);
    }

    #[test]
    fn delete_requires_matching_column() {
        let mut store = store_with(1, 0);
        let id = store.board().columns[0].tasks[0].id;
        assert!(store.delete_task(&ColumnId::IN_PROGRESS, id).is_none());
        assert_eq!(store.total_tasks(), 1);
    }

    #[test]
    fn toggle_subtask_reports_new_value() {
        let mut store = store_with(1, 0);
        let task = store.board().columns[0].tasks[0].clone();
        let sub = task.subtasks[0].id;

        assert_eq!(store.toggle_subtask(&ColumnId::TODO, task.id, sub), Some(true));
        assert_eq!(store.toggle_subtask(&ColumnId::TODO, task.id, sub), Some(false));
        assert_eq!(store.board().columns[0].tasks[0], task);
    }

    #[test]
    fn toggle_subtask_with_unknown_ids_is_noop() {
        let mut store = store_with(1, 0);
        let task = store.board().columns[0].tasks[0].id;
        let start = store.revision();

        assert_eq!(store.toggle_subtask(&ColumnId::TODO, task, SubtaskId::new_v4()), None);
        assert_eq!(store.toggle_subtask(&ColumnId::TODO, TaskId::new_v4(), SubtaskId::new_v4()), None);
        assert_eq!(store.revision(), start);
    }

    #[test]
    fn seed_scenario_add() {
        let mut store = seeded_store();
        assert_eq!(store.column(&ColumnId::TODO).map(Column::len), Some(3));

        let draft = TaskDraft::new("X").priority(Priority::Low);
        store.add_task(&ColumnId::TODO, draft).expect("added");

        let todo = store.column(&ColumnId::TODO).expect("todo");
        assert_eq!(todo.len(), 4);
        assert_eq!(todo.tasks.last().map(|t| t.title.as_str()), Some("X"));
    }

    #[test]
    fn seed_scenario_reorder() {
        let mut store = seeded_store();
        let old: Vec<TaskId> = store.board().columns[0].tasks.iter().map(|t| t.id).collect();

        assert!(store.move_task(&ColumnId::TODO, &ColumnId::TODO, 0, 2));
        let new: Vec<TaskId> = store.board().columns[0].tasks.iter().map(|t| t.id).collect();
        assert_eq!(new, [old[1], old[2], old[0]]);
    }

    #[test]
    fn seed_scenario_cross_column() {
        let mut store = seeded_store();
        let moved = store.board().columns[0].tasks[0].id;

        assert!(store.move_task(&ColumnId::TODO, &ColumnId::IN_PROGRESS, 0, 0));
        assert_eq!(store.column(&ColumnId::TODO).map(Column::len), Some(2));
        assert_eq!(store.find_task(moved), Some((ColumnId::IN_PROGRESS, 0)));
    }

    proptest! {
        #[test]
        fn add_task_grows_only_target_column(todo in 0usize..6, doing in 0usize..6, into_todo in any::<bool>()) {
            let mut store = store_with(todo, doing);
            let (target, other) = if into_todo {
                (ColumnId::TODO, ColumnId::IN_PROGRESS)
            } else {
                (ColumnId::IN_PROGRESS, ColumnId::TODO)
            };
            let before = store.snapshot();
            let existing: Vec<TaskId> = before.task_ids().collect();

            let id = store.add_task(&target, TaskDraft::new("new")).expect("added");

            prop_assert_eq!(
                store.column(&target).map(Column::len),
                before.column(&target).map(|c| c.len() + 1)
            );
            prop_assert_eq!(store.column(&other), before.column(&other));
            prop_assert!(!existing.contains(&id));
        }

        #[test]
        fn same_column_move_preserves_multiset(len in 1usize..8, src in 0usize..8, dst in 0usize..8) {
            let mut store = store_with(len, 0);
            let before = store.snapshot();
            let moved = store.move_task(&ColumnId::TODO, &ColumnId::TODO, src, dst);

            let expected = src < len && dst < len && src != dst;
            prop_assert_eq!(moved, expected);

            let column = store.column(&ColumnId::TODO).expect("todo");
            let original = before.column(&ColumnId::TODO).expect("todo");
            prop_assert_eq!(column.len(), original.len());
            prop_assert_eq!(sorted_ids(column), sorted_ids(original));
            if moved {
                prop_assert_eq!(column.tasks[dst].id, original.tasks[src].id);
            } else {
                prop_assert_eq!(column, original);
            }
        }

        #[test]
        fn cross_column_move_lands_at_dest_index(
            todo in 1usize..6,
            doing in 0usize..6,
            src in 0usize..6,
            dst in 0usize..7,
        ) {
            let mut store = store_with(todo, doing);
            let total = store.total_tasks();
            let before = store.snapshot();
            let moved = store.move_task(&ColumnId::TODO, &ColumnId::IN_PROGRESS, src, dst);

            prop_assert_eq!(moved, src < todo && dst <= doing);
            prop_assert_eq!(store.total_tasks(), total);
            if moved {
                let task = before.columns[0].tasks[src].id;
                prop_assert_eq!(store.find_task(task), Some((ColumnId::IN_PROGRESS, dst)));
                prop_assert_eq!(store.column(&ColumnId::TODO).map(Column::len), Some(todo - 1));
            } else {
                let after = store.snapshot();
                prop_assert_eq!(&*after, &*before);
            }
        }

        #[test]
        fn toggle_twice_restores_board(todo in 1usize..5, pick in 0usize..5) {
            let mut store = store_with(todo, 0);
            let index = pick % todo;
            let before = store.snapshot();
            let task = &before.columns[0].tasks[index];
            let sub = task.subtasks[0].id;

            store.toggle_subtask(&ColumnId::TODO, task.id, sub);
            store.toggle_subtask(&ColumnId::TODO, task.id, sub);
            let after = store.snapshot();
            prop_assert_eq!(&*after, &*before);
        }
    }
}
