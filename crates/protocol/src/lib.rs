//! Shared protocol types for the taskflow application.
//!
//! This crate defines the data model of the board, the in-memory store that
//! owns it, and the messages the TUI exchanges with its state.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`task`]: tasks, subtasks, priorities and task drafts
//! - [`board`]: columns and the `Board` aggregate
//! - [`store`]: the `KanbanStore` that applies add/move/delete/toggle
//! - [`ids`]: identifiers and id generators
//! - [`clock`]: timestamp sources
//! - [`tag`]: the tag color palette
//! - [`seed`]: the board every session starts from
//! - [`message`]: TUI event messages
//! - [`error`]: Error types for protocol operations
//!
//! # Examples
//!
//! ```
//! use taskflow_protocol::{ColumnId, TaskDraft};
//! use taskflow_protocol::seed::seeded_store;
//!
//! let mut store = seeded_store();
//!
//! // New tasks go to the end of their column.
//! let id = store.add_task(&ColumnId::TODO, TaskDraft::new("Ship it")).unwrap();
//! assert_eq!(store.find_task(id), Some((ColumnId::TODO, 3)));
//!
//! // Drag it to the top of "In Progress".
//! store.move_task(&ColumnId::TODO, &ColumnId::IN_PROGRESS, 3, 0);
//! assert_eq!(store.find_task(id), Some((ColumnId::IN_PROGRESS, 0)));
//! ```

pub mod board;
pub mod clock;
pub mod error;
pub mod ids;
pub mod message;
pub mod seed;
pub mod store;
pub mod tag;
pub mod task;

// Re-export primary types at crate root for convenience
pub use board::{Board, Column, TaskLocation};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ProtocolError, Result};
pub use ids::{ColumnId, IdGenerator, RandomIds, SequentialIds, SubtaskId, TaskId};
pub use message::Message;
pub use store::KanbanStore;
pub use task::{Priority, Subtask, SubtaskDraft, Task, TaskDraft};
