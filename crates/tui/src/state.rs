//! Application state management.
//!
//! This module defines the core state structures for the TUI application,
//! including focus management, selection tracking, and the store-facing
//! actions that keep the selection consistent with the board.

use taskflow_config::UiConfig;
use taskflow_protocol::{Column, ColumnId, KanbanStore, Task, TaskDraft};
use tracing::info;

use crate::drag::MoveRequest;

/// The current focus area in the UI.
///
/// Determines which UI component receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Focus is on the Kanban board columns.
    #[default]
    Board,
    /// Focus is on the task detail panel.
    Detail,
    /// Focus is on the add-task dialog.
    Dialog,
    /// Focus is on the chat input.
    Chat,
}

/// Entries of the sidebar navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavItem {
    /// The Kanban board.
    #[default]
    Board,
    /// The assistant chat panel.
    AiChat,
    /// Read-only configuration summary.
    Settings,
}

impl NavItem {
    /// Returns all entries in display order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[Self::Board, Self::AiChat, Self::Settings]
    }

    /// Returns the entry at a sidebar position.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::all().get(index).copied()
    }

    /// Returns the label shown in the expanded sidebar.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Board => "Board",
            Self::AiChat => "AI Chat",
            Self::Settings => "Settings",
        }
    }

    /// Returns the icon shown in both sidebar modes.
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::Board => "▦",
            Self::AiChat => "✦",
            Self::Settings => "⚙",
        }
    }
}

/// Sidebar view state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sidebar {
    /// Whether only icons are shown.
    pub collapsed: bool,
    /// Highlighted navigation entry.
    pub active: NavItem,
}

/// The application state.
///
/// Contains all mutable state for the TUI application including
/// the task store, focus state, and selection tracking.
#[derive(Debug)]
pub struct AppState {
    /// The task store.
    pub store: KanbanStore,
    /// Current focus area.
    pub focus: Focus,
    /// Index of the currently selected column.
    pub selected_column: usize,
    /// Index of the selected task within the current column, if any.
    pub selected_task: Option<usize>,
    /// Whether the detail panel is visible.
    pub detail_visible: bool,
    /// Subtask under the cursor in the detail panel.
    pub detail_cursor: usize,
    /// Whether the help overlay is visible.
    pub help_visible: bool,
    /// Sidebar state.
    pub sidebar: Sidebar,
    /// Whether the chat panel is shown.
    pub chat_open: bool,
    /// Outcome of the last action, shown in the status bar.
    pub status: Option<String>,
}

impl AppState {
    /// Creates a new application state over the given store.
    ///
    /// Initializes with focus on the board, selecting the first column.
    ///
    /// # Examples
    ///
    /// ```
    /// use taskflow_protocol::seed::seeded_store;
    /// use taskflow_tui::AppState;
    ///
    /// let state = AppState::new(seeded_store());
    /// assert_eq!(state.selected_column, 0);
    /// assert!(state.selected_task.is_none());
    /// ```
    #[must_use]
    pub fn new(store: KanbanStore) -> Self {
        Self {
            store,
            focus: Focus::default(),
            selected_column: 0,
            selected_task: None,
            detail_visible: false,
            detail_cursor: 0,
            help_visible: false,
            sidebar: Sidebar::default(),
            chat_open: false,
            status: None,
        }
    }

    /// Applies the startup UI preferences.
    #[must_use]
    pub fn with_ui(mut self, ui: &UiConfig) -> Self {
        self.sidebar.collapsed = ui.sidebar_collapsed;
        self.chat_open = ui.chat_open;
        self
    }

    /// Number of columns on the board.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.store.board().columns.len()
    }

    /// Returns the currently selected column.
    #[must_use]
    pub fn selected_column_ref(&self) -> Option<&Column> {
        self.store.board().columns.get(self.selected_column)
    }

    /// Returns the id of the currently selected column.
    #[must_use]
    pub fn selected_column_id(&self) -> Option<ColumnId> {
        self.selected_column_ref().map(|c| c.id.clone())
    }

    /// Toggles the help overlay visibility.
    ///
    /// When help is shown, other interactions are blocked until
    /// help is dismissed.
    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }

    /// Dismisses the help overlay if it is visible.
    ///
    /// Returns `true` if help was visible and has been dismissed.
    #[must_use]
    pub fn dismiss_help(&mut self) -> bool {
        if self.help_visible {
            self.help_visible = false;
            true
        } else {
            false
        }
    }

    /// Moves the column selection to the left, wrapping around if needed.
    pub fn navigate_left(&mut self) {
        let count = self.column_count();
        if count == 0 {
            return;
        }
        self.selected_column = if self.selected_column > 0 {
            self.selected_column - 1
        } else {
            count - 1
        };
        self.clamp_task_selection();
    }

    /// Moves the column selection to the right, wrapping around if needed.
    pub fn navigate_right(&mut self) {
        let count = self.column_count();
        if count == 0 {
            return;
        }
        self.selected_column = (self.selected_column + 1) % count;
        self.clamp_task_selection();
    }

    /// Moves the task selection up within the current column.
    pub fn navigate_up(&mut self) {
        let len = self.selected_column_ref().map_or(0, Column::len);
        if len == 0 {
            self.selected_task = None;
            return;
        }

        self.selected_task = match self.selected_task {
            Some(idx) if idx > 0 => Some(idx - 1),
            Some(_) => Some(len - 1),
            None => Some(0),
        };
    }

    /// Moves the task selection down within the current column.
    pub fn navigate_down(&mut self) {
        let len = self.selected_column_ref().map_or(0, Column::len);
        if len == 0 {
            self.selected_task = None;
            return;
        }

        self.selected_task = match self.selected_task {
            Some(idx) if idx + 1 < len => Some(idx + 1),
            Some(_) | None => Some(0),
        };
    }

    /// Selects a card directly, as a click does.
    pub fn select(&mut self, column: usize, task: Option<usize>) {
        if column < self.column_count() {
            self.selected_column = column;
            self.selected_task = task;
            self.clamp_task_selection();
        }
    }

    /// Opens the detail panel for the selected task.
    ///
    /// Does nothing when no task is selected.
    pub fn open_detail(&mut self) {
        if self.selected_task().is_none() {
            return;
        }
        self.detail_visible = true;
        self.detail_cursor = 0;
        self.focus = Focus::Detail;
    }

    /// Closes the detail panel and returns focus to the board.
    pub fn close_detail(&mut self) {
        self.detail_visible = false;
        self.detail_cursor = 0;
        if self.focus == Focus::Detail {
            self.focus = Focus::Board;
        }
    }

    /// Moves the subtask cursor in the detail panel, wrapping around.
    pub fn move_detail_cursor(&mut self, down: bool) {
        let len = self.selected_task().map_or(0, |t| t.subtasks.len());
        if len == 0 {
            self.detail_cursor = 0;
            return;
        }
        self.detail_cursor = if down {
            (self.detail_cursor + 1) % len
        } else {
            (self.detail_cursor + len - 1) % len
        };
    }

    /// Returns a reference to the currently selected task, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use taskflow_protocol::seed::seeded_store;
    /// use taskflow_tui::AppState;
    ///
    /// let mut state = AppState::new(seeded_store());
    /// assert!(state.selected_task().is_none());
    ///
    /// state.navigate_down(); // Select first task
    /// assert!(state.selected_task().is_some());
    /// ```
    #[must_use]
    pub fn selected_task(&self) -> Option<&Task> {
        let task_idx = self.selected_task?;
        self.selected_column_ref()?.tasks.get(task_idx)
    }

    /// Clears the current task selection.
    pub fn clear_selection(&mut self) {
        self.selected_task = None;
    }

    /// Collapses or expands the sidebar.
    pub fn toggle_sidebar(&mut self) {
        self.sidebar.collapsed = !self.sidebar.collapsed;
    }

    /// Opens or closes the chat panel.
    ///
    /// Opening moves focus to the chat input.
    pub fn toggle_chat(&mut self) {
        if self.chat_open {
            self.close_chat();
        } else {
            self.chat_open = true;
            self.sidebar.active = NavItem::AiChat;
            self.focus = Focus::Chat;
        }
    }

    /// Closes the chat panel.
    pub fn close_chat(&mut self) {
        self.chat_open = false;
        if self.sidebar.active == NavItem::AiChat {
            self.sidebar.active = NavItem::Board;
        }
        if self.focus == Focus::Chat {
            self.focus = Focus::Board;
        }
    }

    /// Activates a sidebar navigation entry.
    pub fn activate_nav(&mut self, item: NavItem) {
        match item {
            NavItem::Board => {
                self.sidebar.active = NavItem::Board;
                self.focus = Focus::Board;
            }
            NavItem::AiChat => {
                self.chat_open = true;
                self.sidebar.active = NavItem::AiChat;
                self.focus = Focus::Chat;
            }
            NavItem::Settings => {
                self.close_detail();
                self.sidebar.active = NavItem::Settings;
                self.focus = Focus::Board;
            }
        }
    }

    /// Returns `true` while the settings summary replaces the board.
    #[must_use]
    pub fn showing_settings(&self) -> bool {
        self.sidebar.active == NavItem::Settings
    }

    /// Records the outcome of an action for the status bar.
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }

    /// Adds a task to a column and selects it.
    pub fn add_task(&mut self, column: &ColumnId, draft: TaskDraft) -> bool {
        let title = draft.title.clone();
        let Some(id) = self.store.add_task(column, draft) else {
            self.set_status(format!("No column \"{column}\""));
            return false;
        };

        if let Ok(location) = self.store.board().locate(id) {
            self.select(location.column_index, Some(location.index));
            let column_title = self.store.board().columns[location.column_index].title.clone();
            self.set_status(format!("Added \"{title}\" to {column_title}"));
        }
        info!(task = %id.short(), %column, "task created");
        true
    }

    /// Deletes the selected task.
    pub fn delete_selected(&mut self) -> bool {
        let (Some(column), Some(task)) = (
            self.selected_column_id(),
            self.selected_task().map(|t| t.id),
        ) else {
            self.set_status("No task selected");
            return false;
        };

        let Some(removed) = self.store.delete_task(&column, task) else {
            return false;
        };
        self.close_detail();
        self.clamp_task_selection();
        self.set_status(format!("Deleted \"{}\"", removed.title));
        info!(task = %task.short(), %column, "task deleted");
        true
    }

    /// Toggles a subtask of the selected task by position.
    pub fn toggle_subtask_at(&mut self, index: usize) -> Option<bool> {
        let column = self.selected_column_id()?;
        let task = self.selected_task()?;
        let (task_id, subtask) = (task.id, task.subtasks.get(index)?.id);

        let completed = self.store.toggle_subtask(&column, task_id, subtask)?;
        self.detail_cursor = index;
        self.set_status(if completed {
            "Subtask completed"
        } else {
            "Subtask reopened"
        });
        Some(completed)
    }

    /// Applies a resolved drag and selects the moved card.
    pub fn apply_move(&mut self, request: &MoveRequest) -> bool {
        let moved = self.store.move_task(
            &request.source,
            &request.dest,
            request.source_index,
            request.dest_index,
        );
        if !moved {
            self.set_status("Nothing to move");
            return false;
        }

        let board = self.store.board();
        if let Some(dest) = board.column_index(&request.dest) {
            let title = board.columns[dest]
                .tasks
                .get(request.dest_index)
                .map(|t| t.title.clone())
                .unwrap_or_default();
            let column_title = board.columns[dest].title.clone();
            self.select(dest, Some(request.dest_index));
            self.set_status(format!("Moved \"{title}\" to {column_title}"));
        }
        true
    }

    /// Ensures the task selection is valid for the current column.
    pub fn clamp_task_selection(&mut self) {
        let count = self.column_count();
        if count == 0 {
            self.selected_column = 0;
            self.selected_task = None;
            return;
        }
        if self.selected_column >= count {
            self.selected_column = count - 1;
        }

        let len = self.selected_column_ref().map_or(0, Column::len);
        if len == 0 {
            self.selected_task = None;
        } else if let Some(idx) = self.selected_task
            && idx >= len
        {
            self.selected_task = Some(len - 1);
        }
    }
}
