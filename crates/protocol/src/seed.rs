//! The board every session starts from.
//!
//! Nothing is persisted, so each launch begins with the same five tasks
//! spread across the two standard columns.
//!
//! # Examples
//!
//! ```
//! use taskflow_protocol::seed::seeded_store;
//! use taskflow_protocol::ColumnId;
//!
//! let store = seeded_store();
//! assert_eq!(store.total_tasks(), 5);
//! assert_eq!(store.column(&ColumnId::TODO).map(|c| c.len()), Some(3));
//! ```

use crate::board::Board;
use crate::ids::ColumnId;
use crate::store::KanbanStore;
use crate::task::{Priority, TaskDraft};

/// Returns the drafts seeded into each column, in board order.
#[must_use]
pub fn seed_drafts() -> Vec<(ColumnId, Vec<TaskDraft>)> {
    vec![
        (
            ColumnId::TODO,
            vec![
                TaskDraft::new("Create wireframes for landing page")
                    .description("Design wireframes for the new landing page")
                    .tag("Wireframes")
                    .priority(Priority::High)
                    .due_date("7d")
                    .done_subtask("Research competitors")
                    .subtask("Sketch layouts")
                    .subtask("Create hi-fi mockup"),
                TaskDraft::new("Data Entry Cleanup")
                    .description("Clean up and validate all data entries")
                    .tag("Data Entry")
                    .priority(Priority::Medium)
                    .due_date("6d")
                    .done_subtask("Audit existing data")
                    .done_subtask("Fix duplicates")
                    .subtask("Validate formats")
                    .subtask("Update records")
                    .subtask("Generate report"),
                TaskDraft::new("Social Media Scheduling")
                    .description("Plan and schedule social media posts")
                    .tag("Media")
                    .priority(Priority::Low)
                    .due_date("1d")
                    .done_subtask("Create content calendar")
                    .done_subtask("Design graphics")
                    .subtask("Write captions")
                    .subtask("Schedule posts"),
            ],
        ),
        (
            ColumnId::IN_PROGRESS,
            vec![
                TaskDraft::new("Graphic Design Edits")
                    .description("Revise graphic design assets based on feedback")
                    .tag("Graphic Design")
                    .priority(Priority::High)
                    .due_date("3d")
                    .done_subtask("Review feedback")
                    .subtask("Update hero banner")
                    .subtask("Resize for mobile"),
                TaskDraft::new("Presentation Slide Design")
                    .description("Create presentation slides for the quarterly review")
                    .tag("UI Design")
                    .priority(Priority::Medium)
                    .due_date("5d")
                    .done_subtask("Outline content")
                    .subtask("Design template")
                    .subtask("Add data visuals"),
            ],
        ),
    ]
}

/// Fills `store` with the seed drafts.
///
/// Columns that the store's board does not have are skipped.
pub fn seed_into(store: &mut KanbanStore) {
    for (column, drafts) in seed_drafts() {
        for draft in drafts {
            store.add_task(&column, draft);
        }
    }
}

/// Creates a store over the standard board, filled with the seed tasks.
#[must_use]
pub fn seeded_store() -> KanbanStore {
    let mut store = KanbanStore::new(Board::standard());
    seed_into(&mut store);
    store
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_layout() {
        let store = seeded_store();
        let board = store.board();

        assert_eq!(board.columns[0].title, "To Do");
        assert_eq!(board.columns[0].len(), 3);
        assert_eq!(board.columns[1].title, "In Progress");
        assert_eq!(board.columns[1].len(), 2);
    }

    #[test]
    fn seed_task_ids_are_unique() {
        let store = seeded_store();
        let mut ids: Vec<_> = store.board().task_ids().collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn seed_progress_matches_checklists() {
        let store = seeded_store();
        let progress: Vec<_> = store
            .board()
            .columns
            .iter()
            .flat_map(|c| c.tasks.iter())
            .map(|t| t.subtask_progress())
            .collect();
        assert_eq!(
            progress,
            [Some((1, 3)), Some((2, 5)), Some((2, 4)), Some((1, 3)), Some((1, 3))]
        );
    }

    #[test]
    fn seed_tags_use_palette_colors() {
        let store = seeded_store();
        let first = &store.board().columns[0].tasks[0];
        assert_eq!(first.tag, "Wireframes");
        assert_eq!(first.tag_color, "258 60% 55%");
        assert_eq!(first.due_date.as_deref(), Some("7d"));
    }

    #[test]
    fn seed_into_skips_missing_columns() {
        let mut store = KanbanStore::new(Board::new(vec![crate::Column::new(
            ColumnId::TODO,
            "To Do",
        )]));
        seed_into(&mut store);
        assert_eq!(store.total_tasks(), 3);
    }
}
