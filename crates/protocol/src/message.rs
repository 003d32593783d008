//! TUI message types for event handling.
//!
//! This module defines the message enum used for communication between
//! the TUI input handler and the application state.

use serde::{Deserialize, Serialize};

/// Messages that represent user actions in the TUI.
///
/// These messages are produced by the input handler and consumed by
/// the application state to update the UI. The same message can mean
/// different things depending on what has focus: `NavigateDown` moves the
/// card selection on the board, the drop preview while a card is grabbed,
/// and the subtask cursor in the detail view.
///
/// # Examples
///
/// ```
/// use taskflow_protocol::Message;
///
/// let msg = Message::NavigateRight;
/// assert!(matches!(msg, Message::NavigateRight));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Message {
    /// Move selection to the left column.
    NavigateLeft,
    /// Move selection to the right column.
    NavigateRight,
    /// Move selection up within the current column.
    NavigateUp,
    /// Move selection down within the current column.
    NavigateDown,
    /// Select the highlighted item, or drop a grabbed card.
    Select,
    /// Go back to the previous view.
    Back,
    /// Escape: close a panel or cancel the current gesture (contextual).
    Escape,
    /// Quit the application.
    Quit,
    /// Toggle help overlay.
    ToggleHelp,

    // --- Pointer messages ---
    /// Left mouse button pressed at coordinates (column, row).
    PressAt {
        /// Column (x coordinate) of the press.
        column: u16,
        /// Row (y coordinate) of the press.
        row: u16,
    },
    /// Mouse moved with the left button held.
    DragTo {
        /// Column (x coordinate) of the pointer.
        column: u16,
        /// Row (y coordinate) of the pointer.
        row: u16,
    },
    /// Left mouse button released.
    ReleaseAt {
        /// Column (x coordinate) of the release.
        column: u16,
        /// Row (y coordinate) of the release.
        row: u16,
    },

    // --- Board actions ---
    /// Pick up the selected card for a keyboard move.
    GrabTask,
    /// Open the add-task dialog for the selected column.
    OpenAddTask,
    /// Delete the selected task.
    DeleteTask,
    /// Toggle the subtask under the cursor in the detail view.
    ToggleSubtask,
    /// Toggle the subtask at a zero-based position in the detail view.
    ToggleSubtaskAt {
        /// Position of the subtask in its task.
        index: usize,
    },
    /// Show or hide the assistant chat panel.
    ToggleChat,
    /// Collapse or expand the sidebar.
    ToggleSidebar,
    /// Activate a sidebar navigation entry.
    SelectNavItem {
        /// Position of the entry in the sidebar.
        index: usize,
    },

    // --- Text entry ---
    /// A character typed into the focused input.
    Input {
        /// The character that was input.
        ch: char,
    },
    /// Delete the last character of the focused input.
    Backspace,
    /// Move focus to the next form field.
    NextField,
    /// Move focus to the previous form field.
    PrevField,
    /// Submit the focused form or input line.
    Submit,
}

impl Message {
    /// Returns `true` if this message is a navigation action.
    ///
    /// # Examples
    ///
    /// ```
    /// use taskflow_protocol::Message;
    ///
    /// assert!(Message::NavigateLeft.is_navigation());
    /// assert!(Message::NavigateUp.is_navigation());
    /// assert!(!Message::Select.is_navigation());
    /// ```
    #[must_use]
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Self::NavigateLeft | Self::NavigateRight | Self::NavigateUp | Self::NavigateDown
        )
    }

    /// Returns `true` if this message should terminate the application.
    ///
    /// # Examples
    ///
    /// ```
    /// use taskflow_protocol::Message;
    ///
    /// assert!(Message::Quit.is_terminating());
    /// assert!(!Message::Back.is_terminating());
    /// ```
    #[must_use]
    pub fn is_terminating(&self) -> bool {
        matches!(self, Self::Quit)
    }

    /// Returns `true` if this message comes from the mouse.
    #[must_use]
    pub fn is_pointer(&self) -> bool {
        matches!(
            self,
            Self::PressAt { .. } | Self::DragTo { .. } | Self::ReleaseAt { .. }
        )
    }

    /// Returns `true` if this message edits a text input.
    ///
    /// # Examples
    ///
    /// ```
    /// use taskflow_protocol::Message;
    ///
    /// assert!(Message::Input { ch: 'a' }.is_text_edit());
    /// assert!(Message::Backspace.is_text_edit());
    /// assert!(!Message::Submit.is_text_edit());
    /// ```
    #[must_use]
    pub fn is_text_edit(&self) -> bool {
        matches!(self, Self::Input { .. } | Self::Backspace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_navigation_detection() {
        assert!(Message::NavigateLeft.is_navigation());
        assert!(Message::NavigateRight.is_navigation());
        assert!(Message::NavigateUp.is_navigation());
        assert!(Message::NavigateDown.is_navigation());
        assert!(!Message::Select.is_navigation());
        assert!(!Message::Back.is_navigation());
        assert!(!Message::DragTo { column: 0, row: 0 }.is_navigation());
    }

    #[test]
    fn message_terminating_detection() {
        assert!(Message::Quit.is_terminating());
        assert!(!Message::Back.is_terminating());
        assert!(!Message::Escape.is_terminating());
    }

    #[test]
    fn message_pointer_detection() {
        assert!(Message::PressAt { column: 1, row: 2 }.is_pointer());
        assert!(Message::DragTo { column: 1, row: 2 }.is_pointer());
        assert!(Message::ReleaseAt { column: 1, row: 2 }.is_pointer());
        assert!(!Message::GrabTask.is_pointer());
    }

    #[test]
    fn message_serialization_roundtrip() {
        let messages = vec![
            Message::NavigateLeft,
            Message::Select,
            Message::Escape,
            Message::ToggleHelp,
            Message::PressAt { column: 10, row: 5 },
            Message::ReleaseAt { column: 3, row: 4 },
            Message::GrabTask,
            Message::ToggleSubtaskAt { index: 2 },
            Message::SelectNavItem { index: 1 },
            Message::Input { ch: 'x' },
            Message::Submit,
        ];

        for msg in messages {
            let json = serde_json::to_string(&msg).expect("serialize");
            let parsed: Message = serde_json::from_str(&json).expect("deserialize");
            assert_eq!(msg, parsed);
        }
    }

    #[test]
    fn message_json_format() {
        let json = serde_json::to_string(&Message::NavigateLeft).expect("serialize");
        assert_eq!(json, r#""navigate_left""#);

        let json = serde_json::to_string(&Message::OpenAddTask).expect("serialize");
        assert_eq!(json, r#""open_add_task""#);

        let json = serde_json::to_string(&Message::DragTo { column: 1, row: 2 }).expect("serialize");
        assert_eq!(json, r#"{"drag_to":{"column":1,"row":2}}"#);
    }
}
