//! Add-task dialog state.
//!
//! The form collects a draft for one target column. Nothing reaches the
//! store until [`AddTaskForm::submit`] produces a [`TaskDraft`]; dropping the
//! form discards everything typed so far.

use taskflow_protocol::tag::{TAG_COLORS, tag_at, tag_index};
use taskflow_protocol::{ColumnId, Priority, ProtocolError, TaskDraft};

/// Fields of the add-task dialog, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    /// Task title (required).
    #[default]
    Title,
    /// Free-form description.
    Description,
    /// Tag selector.
    Tag,
    /// Priority selector.
    Priority,
    /// Free-form due date.
    DueDate,
    /// Pending subtask input and the staged subtasks.
    Subtasks,
}

impl FormField {
    /// Returns the next field (wrapping around).
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Title => Self::Description,
            Self::Description => Self::Tag,
            Self::Tag => Self::Priority,
            Self::Priority => Self::DueDate,
            Self::DueDate => Self::Subtasks,
            Self::Subtasks => Self::Title,
        }
    }

    /// Returns the previous field (wrapping around).
    #[must_use]
    pub fn prev(self) -> Self {
        match self {
            Self::Title => Self::Subtasks,
            Self::Description => Self::Title,
            Self::Tag => Self::Description,
            Self::Priority => Self::Tag,
            Self::DueDate => Self::Priority,
            Self::Subtasks => Self::DueDate,
        }
    }

    /// Returns the label shown next to the field.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Description => "Description",
            Self::Tag => "Tag",
            Self::Priority => "Priority",
            Self::DueDate => "Due date",
            Self::Subtasks => "Subtasks",
        }
    }

    /// Returns all fields in order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[
            Self::Title,
            Self::Description,
            Self::Tag,
            Self::Priority,
            Self::DueDate,
            Self::Subtasks,
        ]
    }

    /// Returns `true` for fields that take typed text.
    #[must_use]
    pub fn is_text(self) -> bool {
        !matches!(self, Self::Tag | Self::Priority)
    }
}

/// State of the add-task dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddTaskForm {
    column: ColumnId,
    focus: FormField,
    title: String,
    description: String,
    tag: usize,
    priority: Priority,
    due_date: String,
    subtask_input: String,
    subtasks: Vec<String>,
    selected_subtask: Option<usize>,
}

impl AddTaskForm {
    /// Creates an empty form that will add to `column`.
    ///
    /// # Examples
    ///
    /// ```
    /// use taskflow_protocol::{ColumnId, Priority};
    /// use taskflow_tui::form::AddTaskForm;
    ///
    /// let form = AddTaskForm::new(ColumnId::TODO);
    /// assert_eq!(form.tag(), "Design");
    /// assert_eq!(form.priority(), Priority::Medium);
    /// assert!(!form.can_submit());
    /// ```
    #[must_use]
    pub fn new(column: ColumnId) -> Self {
        Self {
            column,
            focus: FormField::default(),
            title: String::new(),
            description: String::new(),
            tag: tag_index(taskflow_protocol::tag::DEFAULT_TAG).unwrap_or(0),
            priority: Priority::default(),
            due_date: String::new(),
            subtask_input: String::new(),
            subtasks: Vec::new(),
            selected_subtask: None,
        }
    }

    /// Column the task will be added to.
    #[must_use]
    pub fn column(&self) -> &ColumnId {
        &self.column
    }

    /// Currently focused field.
    #[must_use]
    pub const fn focus(&self) -> FormField {
        self.focus
    }

    /// Title as typed.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Description as typed.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Selected tag.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        tag_at(self.tag)
    }

    /// Selected priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Due date as typed.
    #[must_use]
    pub fn due_date(&self) -> &str {
        &self.due_date
    }

    /// Pending subtask text, not yet staged.
    #[must_use]
    pub fn subtask_input(&self) -> &str {
        &self.subtask_input
    }

    /// Staged subtask titles.
    #[must_use]
    pub fn subtasks(&self) -> &[String] {
        &self.subtasks
    }

    /// Index of the highlighted staged subtask, if any.
    #[must_use]
    pub fn selected_subtask(&self) -> Option<usize> {
        self.selected_subtask
    }

    /// Returns `true` when the form can be committed.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.title.trim().is_empty()
    }

    /// Focuses the next field.
    pub fn next_field(&mut self) {
        self.focus = self.focus.next();
    }

    /// Focuses the previous field.
    pub fn prev_field(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Types a character into the focused text field.
    pub fn input(&mut self, ch: char) {
        if let Some(value) = self.focused_text_mut() {
            value.push(ch);
        }
    }

    /// Deletes the last character of the focused text field.
    ///
    /// On an empty subtask input, removes the highlighted staged subtask
    /// instead, or the last one when nothing is highlighted.
    pub fn backspace(&mut self) {
        if self.focus == FormField::Subtasks && self.subtask_input.is_empty() {
            let index = self
                .selected_subtask
                .unwrap_or_else(|| self.subtasks.len().saturating_sub(1));
            self.remove_subtask(index);
            return;
        }
        if let Some(value) = self.focused_text_mut() {
            value.pop();
        }
    }

    /// Moves the focused selector forward (`true`) or backward.
    ///
    /// On the subtasks field this moves the highlight over the staged
    /// subtasks. Has no effect on other text fields.
    pub fn cycle(&mut self, forward: bool) {
        match self.focus {
            FormField::Tag => {
                let len = TAG_COLORS.len();
                self.tag = if forward {
                    (self.tag + 1) % len
                } else {
                    (self.tag + len - 1) % len
                };
            }
            FormField::Priority => {
                self.priority = if forward {
                    self.priority.cycle_up()
                } else {
                    self.priority.cycle_down()
                };
            }
            FormField::Subtasks => {
                let len = self.subtasks.len();
                if len == 0 {
                    return;
                }
                self.selected_subtask = Some(match (self.selected_subtask, forward) {
                    (None, true) => 0,
                    (None, false) => len - 1,
                    (Some(i), true) => (i + 1) % len,
                    (Some(i), false) => (i + len - 1) % len,
                });
            }
            _ => {}
        }
    }

    /// Stages the pending subtask input.
    ///
    /// The input is trimmed; blank input is ignored. Returns `true` if a
    /// subtask was staged.
    pub fn stage_subtask(&mut self) -> bool {
        let title = self.subtask_input.trim();
        if title.is_empty() {
            return false;
        }
        self.subtasks.push(title.to_string());
        self.subtask_input.clear();
        true
    }

    /// Removes a staged subtask. Out-of-range indices are ignored.
    ///
    /// The highlight stays on the same position, clamped to the remaining
    /// subtasks.
    pub fn remove_subtask(&mut self, index: usize) -> Option<String> {
        if index >= self.subtasks.len() {
            return None;
        }
        let removed = self.subtasks.remove(index);
        let remaining = self.subtasks.len();
        self.selected_subtask = self
            .selected_subtask
            .filter(|_| remaining > 0)
            .map(|i| i.min(remaining - 1));
        Some(removed)
    }

    /// Builds the draft for the store.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidTaskTitle`] if the title is blank.
    pub fn submit(&self) -> Result<TaskDraft, ProtocolError> {
        if !self.can_submit() {
            return Err(ProtocolError::InvalidTaskTitle);
        }

        let draft = TaskDraft::new(self.title.trim())
            .description(self.description.trim())
            .tag(self.tag())
            .priority(self.priority)
            .due_date(self.due_date.trim());

        Ok(self
            .subtasks
            .iter()
            .fold(draft, |draft, title| draft.subtask(title.as_str())))
    }

    fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Title => Some(&mut self.title),
            FormField::Description => Some(&mut self.description),
            FormField::DueDate => Some(&mut self.due_date),
            FormField::Subtasks => Some(&mut self.subtask_input),
            FormField::Tag | FormField::Priority => None,
        }
    }
}
