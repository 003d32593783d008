//! Event handling and key mappings.
//!
//! This module provides event polling and conversion from terminal events
//! to application messages. The same key means different things depending
//! on what has focus, so each input mode has its own key map.

use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use taskflow_protocol::Message;

/// Default poll timeout for events.
const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Which key map applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Board navigation and actions.
    #[default]
    Board,
    /// Task detail panel.
    Detail,
    /// A card is grabbed.
    Dragging,
    /// Typing into the add-task dialog or the chat input.
    Text,
}

/// Polls for a terminal event with the default timeout.
///
/// Returns `Some(Event)` if an event is available within the timeout,
/// or `None` if the timeout expires without an event.
///
/// # Errors
///
/// Returns an error if polling the terminal fails.
pub fn poll_event() -> std::io::Result<Option<Event>> {
    if event::poll(POLL_TIMEOUT)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Converts an event (keyboard or mouse) to an application message.
///
/// Returns `Some(Message)` if the event maps to an action,
/// or `None` if the event is not handled.
#[must_use]
pub fn event_to_message(event: &Event, mode: InputMode) -> Option<Message> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => match mode {
            InputMode::Board => key_to_message(*key),
            InputMode::Detail => key_to_detail_message(*key),
            InputMode::Dragging => key_to_drag_message(*key),
            InputMode::Text => key_to_text_message(*key),
        },
        Event::Mouse(mouse) => mouse_to_message(mouse),
        _ => None,
    }
}

/// Converts a mouse event to an application message.
///
/// Left-button press, drag, and release become pointer messages; the
/// wheel moves the selection.
#[must_use]
fn mouse_to_message(mouse: &MouseEvent) -> Option<Message> {
    let (column, row) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(Message::PressAt { column, row }),
        MouseEventKind::Drag(MouseButton::Left) => Some(Message::DragTo { column, row }),
        MouseEventKind::Up(MouseButton::Left) => Some(Message::ReleaseAt { column, row }),
        MouseEventKind::ScrollUp => Some(Message::NavigateUp),
        MouseEventKind::ScrollDown => Some(Message::NavigateDown),
        _ => None,
    }
}

fn is_quit(key: KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

fn arrow(code: KeyCode) -> Option<Message> {
    match code {
        KeyCode::Left => Some(Message::NavigateLeft),
        KeyCode::Right => Some(Message::NavigateRight),
        KeyCode::Up => Some(Message::NavigateUp),
        KeyCode::Down => Some(Message::NavigateDown),
        _ => None,
    }
}

/// Converts a terminal key event to a board message.
///
/// # Key Bindings
///
/// | Key | Action |
/// |-----|--------|
/// | `Ctrl+C` | Quit |
/// | `Esc` | Escape (close panel or clear selection) |
/// | Arrows | Navigate |
/// | `Enter` or `Space` | Open task detail |
/// | `Backspace` | Back |
/// | `n` | Add a task to the selected column |
/// | `d` | Delete the selected task |
/// | `m` | Grab the selected task for moving |
/// | `c` | Toggle the chat panel |
/// | `b` | Collapse or expand the sidebar |
/// | `1`-`3` | Sidebar navigation |
/// | `?` | Toggle help |
#[must_use]
pub fn key_to_message(key: KeyEvent) -> Option<Message> {
    if is_quit(key) {
        return Some(Message::Quit);
    }

    if let Some(msg) = arrow(key.code) {
        return Some(msg);
    }

    match key.code {
        KeyCode::Esc => Some(Message::Escape),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Message::Select),
        KeyCode::Backspace => Some(Message::Back),

        KeyCode::Char('n') => Some(Message::OpenAddTask),
        KeyCode::Char('d') => Some(Message::DeleteTask),
        KeyCode::Char('m') => Some(Message::GrabTask),
        KeyCode::Char('c') => Some(Message::ToggleChat),
        KeyCode::Char('b') => Some(Message::ToggleSidebar),
        KeyCode::Char(ch @ '1'..='3') => nav_index(ch).map(|index| Message::SelectNavItem { index }),
        KeyCode::Char('?') => Some(Message::ToggleHelp),

        _ => None,
    }
}

/// Converts a key event to a detail-panel message.
///
/// # Key Bindings (Detail)
///
/// | Key | Action |
/// |-----|--------|
/// | `Up` / `Down` | Move the subtask cursor |
/// | `Space` | Toggle the subtask under the cursor |
/// | `1`-`9` | Toggle the subtask at that position |
/// | `d` | Delete the task |
/// | `Esc` / `Backspace` | Close the panel |
#[must_use]
pub fn key_to_detail_message(key: KeyEvent) -> Option<Message> {
    if is_quit(key) {
        return Some(Message::Quit);
    }

    match key.code {
        KeyCode::Esc => Some(Message::Escape),
        KeyCode::Backspace => Some(Message::Back),
        KeyCode::Up => Some(Message::NavigateUp),
        KeyCode::Down => Some(Message::NavigateDown),
        KeyCode::Char(' ') | KeyCode::Enter => Some(Message::ToggleSubtask),
        KeyCode::Char(ch @ '1'..='9') => nav_index(ch).map(|index| Message::ToggleSubtaskAt { index }),
        KeyCode::Char('d') => Some(Message::DeleteTask),
        KeyCode::Char('?') => Some(Message::ToggleHelp),
        _ => None,
    }
}

/// Converts a key event while a card is grabbed.
///
/// Arrows move the drop preview, `Enter`/`Space` drop, `Esc` cancels.
#[must_use]
pub fn key_to_drag_message(key: KeyEvent) -> Option<Message> {
    if is_quit(key) {
        return Some(Message::Quit);
    }

    if let Some(msg) = arrow(key.code) {
        return Some(msg);
    }

    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('m') => Some(Message::Select),
        KeyCode::Esc => Some(Message::Escape),
        _ => None,
    }
}

/// Converts a key event while typing into a text input.
///
/// Printable characters become [`Message::Input`]; `Tab`/`Shift+Tab` move
/// between form fields; arrows change selectors.
#[must_use]
pub fn key_to_text_message(key: KeyEvent) -> Option<Message> {
    if is_quit(key) {
        return Some(Message::Quit);
    }

    if let Some(msg) = arrow(key.code) {
        return Some(msg);
    }

    match key.code {
        KeyCode::Esc => Some(Message::Escape),
        KeyCode::Enter => Some(Message::Submit),
        KeyCode::Tab => Some(Message::NextField),
        KeyCode::BackTab => Some(Message::PrevField),
        KeyCode::Backspace => Some(Message::Backspace),
        KeyCode::Char(ch)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(Message::Input { ch })
        }
        _ => None,
    }
}

fn nav_index(ch: char) -> Option<usize> {
    ch.to_digit(10)
        .and_then(|d| usize::try_from(d).ok())
        .and_then(|d| d.checked_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, MouseEvent};
    use proptest::prelude::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn ctrl_c_quits_in_every_mode() {
        for mode in [
            InputMode::Board,
            InputMode::Detail,
            InputMode::Dragging,
            InputMode::Text,
        ] {
            assert_eq!(
                event_to_message(&Event::Key(ctrl('c')), mode),
                Some(Message::Quit)
            );
        }
    }

    #[test]
    fn board_keys() {
        assert_eq!(key_to_message(key(KeyCode::Char('n'))), Some(Message::OpenAddTask));
        assert_eq!(key_to_message(key(KeyCode::Char('d'))), Some(Message::DeleteTask));
        assert_eq!(key_to_message(key(KeyCode::Char('m'))), Some(Message::GrabTask));
        assert_eq!(key_to_message(key(KeyCode::Char('c'))), Some(Message::ToggleChat));
        assert_eq!(key_to_message(key(KeyCode::Char('b'))), Some(Message::ToggleSidebar));
        assert_eq!(key_to_message(key(KeyCode::Enter)), Some(Message::Select));
        assert_eq!(key_to_message(key(KeyCode::Left)), Some(Message::NavigateLeft));
        assert_eq!(
            key_to_message(key(KeyCode::Char('3'))),
            Some(Message::SelectNavItem { index: 2 })
        );
        assert_eq!(key_to_message(key(KeyCode::Char('4'))), None);
        assert_eq!(key_to_message(key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn plain_c_is_not_quit() {
        assert_eq!(key_to_message(key(KeyCode::Char('c'))), Some(Message::ToggleChat));
        assert_eq!(
            key_to_text_message(key(KeyCode::Char('c'))),
            Some(Message::Input { ch: 'c' })
        );
    }

    #[test]
    fn detail_keys() {
        assert_eq!(
            key_to_detail_message(key(KeyCode::Char(' '))),
            Some(Message::ToggleSubtask)
        );
        assert_eq!(
            key_to_detail_message(key(KeyCode::Char('1'))),
            Some(Message::ToggleSubtaskAt { index: 0 })
        );
        assert_eq!(key_to_detail_message(key(KeyCode::Char('0'))), None);
        assert_eq!(key_to_detail_message(key(KeyCode::Backspace)), Some(Message::Back));
        assert_eq!(key_to_detail_message(key(KeyCode::Left)), None);
    }

    #[test]
    fn drag_keys() {
        assert_eq!(key_to_drag_message(key(KeyCode::Enter)), Some(Message::Select));
        assert_eq!(key_to_drag_message(key(KeyCode::Esc)), Some(Message::Escape));
        assert_eq!(key_to_drag_message(key(KeyCode::Down)), Some(Message::NavigateDown));
        assert_eq!(key_to_drag_message(key(KeyCode::Char('d'))), None);
    }

    #[test]
    fn text_keys() {
        assert_eq!(key_to_text_message(key(KeyCode::Tab)), Some(Message::NextField));
        assert_eq!(key_to_text_message(key(KeyCode::BackTab)), Some(Message::PrevField));
        assert_eq!(key_to_text_message(key(KeyCode::Enter)), Some(Message::Submit));
        assert_eq!(key_to_text_message(key(KeyCode::Backspace)), Some(Message::Backspace));
        assert_eq!(key_to_text_message(ctrl('x')), None);
    }

    #[test]
    fn key_release_is_ignored() {
        let mut release = key(KeyCode::Char('n'));
        release.kind = KeyEventKind::Release;
        release.state = KeyEventState::NONE;
        assert_eq!(event_to_message(&Event::Key(release), InputMode::Board), None);
    }

    #[test]
    fn mouse_gestures_map_to_pointer_messages() {
        let press = mouse(MouseEventKind::Down(MouseButton::Left), 3, 4);
        let drag = mouse(MouseEventKind::Drag(MouseButton::Left), 5, 6);
        let release = mouse(MouseEventKind::Up(MouseButton::Left), 7, 8);
        let right = mouse(MouseEventKind::Down(MouseButton::Right), 1, 1);

        assert_eq!(
            event_to_message(&press, InputMode::Board),
            Some(Message::PressAt { column: 3, row: 4 })
        );
        assert_eq!(
            event_to_message(&drag, InputMode::Dragging),
            Some(Message::DragTo { column: 5, row: 6 })
        );
        assert_eq!(
            event_to_message(&release, InputMode::Dragging),
            Some(Message::ReleaseAt { column: 7, row: 8 })
        );
        assert_eq!(event_to_message(&right, InputMode::Board), None);
    }

    #[test]
    fn resize_is_not_a_message() {
        assert_eq!(event_to_message(&Event::Resize(80, 24), InputMode::Board), None);
    }

    proptest! {
        #[test]
        fn printable_chars_are_input_in_text_mode(ch in proptest::char::range('!', '~')) {
            prop_assert_eq!(
                key_to_text_message(key(KeyCode::Char(ch))),
                Some(Message::Input { ch })
            );
        }
    }
}
