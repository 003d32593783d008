//! Task-related types for the Kanban board.
//!
//! This module defines tasks, their subtasks, priorities, and the drafts used
//! to describe a task before the store assigns it an identity.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{SubtaskId, TaskId};
use crate::tag::{DEFAULT_TAG, tag_color};

/// How urgent a task is.
///
/// # Examples
///
/// ```
/// use taskflow_protocol::Priority;
///
/// assert_eq!(Priority::default(), Priority::Medium);
/// assert_eq!(Priority::High.display_name(), "High");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Can wait.
    Low,
    /// The default priority.
    #[default]
    Medium,
    /// Should be picked up first.
    High,
}

impl Priority {
    /// Returns all priorities from lowest to highest.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Low, Self::Medium, Self::High]
    }

    /// Returns a human-readable name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Returns the next priority, wrapping from `High` back to `Low`.
    ///
    /// # Examples
    ///
    /// ```
    /// use taskflow_protocol::Priority;
    ///
    /// assert_eq!(Priority::Low.cycle_up(), Priority::Medium);
    /// assert_eq!(Priority::High.cycle_up(), Priority::Low);
    /// ```
    #[must_use]
    pub const fn cycle_up(self) -> Self {
        match self {
            Self::Low => Self::Medium,
            Self::Medium => Self::High,
            Self::High => Self::Low,
        }
    }

    /// Returns the previous priority, wrapping from `Low` back to `High`.
    #[must_use]
    pub const fn cycle_down(self) -> Self {
        match self {
            Self::Low => Self::High,
            Self::Medium => Self::Low,
            Self::High => Self::Medium,
        }
    }
}

/// A checklist item owned by a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    /// Identifier, unique within the owning task.
    pub id: SubtaskId,
    /// What needs doing.
    pub title: String,
    /// Whether the item is done.
    pub completed: bool,
}

/// A subtask that has not been assigned an identifier yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtaskDraft {
    /// What needs doing.
    pub title: String,
    /// Whether the item starts out done.
    #[serde(default)]
    pub completed: bool,
}

impl SubtaskDraft {
    /// Creates an open subtask draft.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            completed: false,
        }
    }

    /// Creates a subtask draft that is already completed.
    #[must_use]
    pub fn done(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            completed: true,
        }
    }
}

/// Everything needed to create a task except its identity.
///
/// The store assigns the task id, the subtask ids, and the creation
/// timestamp when the draft is committed with
/// [`KanbanStore::add_task`](crate::KanbanStore::add_task).
///
/// # Examples
///
/// ```
/// use taskflow_protocol::{Priority, TaskDraft};
///
/// let draft = TaskDraft::new("Write release notes")
///     .priority(Priority::High)
///     .tag("Marketing")
///     .subtask("Collect changes");
/// assert_eq!(draft.tag_color, "30 80% 50%");
/// assert_eq!(draft.subtasks.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    /// Short summary.
    pub title: String,
    /// Longer free-form description.
    pub description: String,
    /// Free-form tag.
    pub tag: String,
    /// HSL color triple for the tag.
    pub tag_color: String,
    /// Checklist items, in order.
    pub subtasks: Vec<SubtaskDraft>,
    /// Urgency.
    pub priority: Priority,
    /// Free-form due date (`"3d"`, `"2024-03-15"`); `None` means unset.
    pub due_date: Option<String>,
}

impl TaskDraft {
    /// Creates a draft with the given title and default values for every
    /// other field.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            tag: DEFAULT_TAG.to_string(),
            tag_color: tag_color(DEFAULT_TAG).to_string(),
            subtasks: Vec::new(),
            priority: Priority::default(),
            due_date: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the tag and derives its color from the palette.
    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self.tag_color = tag_color(&self.tag).to_string();
        self
    }

    /// Sets the priority.
    #[must_use]
    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the due date. An empty string leaves it unset.
    #[must_use]
    pub fn due_date(mut self, due: impl Into<String>) -> Self {
        let due = due.into();
        self.due_date = (!due.is_empty()).then_some(due);
        self
    }

    /// Appends an open subtask.
    #[must_use]
    pub fn subtask(mut self, title: impl Into<String>) -> Self {
        self.subtasks.push(SubtaskDraft::new(title));
        self
    }

    /// Appends a completed subtask.
    #[must_use]
    pub fn done_subtask(mut self, title: impl Into<String>) -> Self {
        self.subtasks.push(SubtaskDraft::done(title));
        self
    }
}

/// A task on the Kanban board.
///
/// Tasks are created by the store from a [`TaskDraft`]. After creation only
/// the completion flags of their subtasks change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier for this task.
    pub id: TaskId,
    /// Short summary of the task.
    pub title: String,
    /// Detailed description of what needs to be done.
    pub description: String,
    /// Free-form tag.
    pub tag: String,
    /// HSL color triple for the tag.
    pub tag_color: String,
    /// Checklist items, in order.
    pub subtasks: Vec<Subtask>,
    /// Urgency.
    pub priority: Priority,
    /// Free-form due date, if any.
    pub due_date: Option<String>,
    /// When this task was created.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Builds a task from a draft and the identity assigned by the store.
    ///
    /// `subtask_ids` must yield one id per draft subtask, in order.
    pub(crate) fn from_draft(
        id: TaskId,
        created_at: DateTime<Utc>,
        draft: TaskDraft,
        subtask_ids: impl IntoIterator<Item = SubtaskId>,
    ) -> Self {
        let subtasks = draft
            .subtasks
            .into_iter()
            .zip(subtask_ids)
            .map(|(sub, id)| Subtask {
                id,
                title: sub.title,
                completed: sub.completed,
            })
            .collect();

        Self {
            id,
            title: draft.title,
            description: draft.description,
            tag: draft.tag,
            tag_color: draft.tag_color,
            subtasks,
            priority: draft.priority,
            due_date: draft.due_date,
            created_at,
        }
    }

    /// Returns a subtask by id.
    #[must_use]
    pub fn subtask(&self, id: SubtaskId) -> Option<&Subtask> {
        self.subtasks.iter().find(|s| s.id == id)
    }

    /// Returns `(completed, total)` subtask counts, or `None` when the task
    /// has no subtasks.
    #[must_use]
    pub fn subtask_progress(&self) -> Option<(usize, usize)> {
        let total = self.subtasks.len();
        if total == 0 {
            return None;
        }
        let done = self.subtasks.iter().filter(|s| s.completed).count();
        Some((done, total))
    }

    /// Returns the completion percentage (0-100), or `None` without subtasks.
    #[must_use]
    pub fn progress_percent(&self) -> Option<u16> {
        let (done, total) = self.subtask_progress()?;
        u16::try_from(done * 100 / total).ok()
    }

    /// Returns the creation time as an ISO-8601 string.
    #[must_use]
    pub fn created_at_iso(&self) -> String {
        self.created_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Flips the completion flag of a subtask and returns the new value.
    pub(crate) fn toggle_subtask(&mut self, id: SubtaskId) -> Option<bool> {
        let subtask = self.subtasks.iter_mut().find(|s| s.id == id)?;
        subtask.completed = !subtask.completed;
        Some(subtask.completed)
    }
}
