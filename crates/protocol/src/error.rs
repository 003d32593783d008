//! Error types for the taskflow-protocol crate.
//!
//! Store mutations never fail; they report no-ops through their return
//! types. The errors here cover form validation, strict lookups, and
//! serialization of snapshots.

use thiserror::Error;

use crate::ids::{ColumnId, TaskId};

/// Errors that can occur during protocol operations.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// A task title was empty or whitespace only.
    #[error("invalid task title: title cannot be empty")]
    InvalidTaskTitle,

    /// The specified column does not exist on the board.
    #[error("column not found: {0}")]
    ColumnNotFound(ColumnId),

    /// A task with the given ID was not found.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// Failed to serialize a protocol type to JSON.
    #[error("failed to serialize to JSON: {0}")]
    SerializationFailed(#[source] serde_json::Error),
}

/// A specialized Result type for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;
