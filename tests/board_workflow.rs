//! End-to-end board workflows driven through the public message API.

use taskflow_protocol::seed::seeded_store;
use taskflow_protocol::{ColumnId, Message};
use taskflow_tui::App;

fn send(app: &mut App, messages: impl IntoIterator<Item = Message>) {
    for msg in messages {
        app.update(msg);
    }
}

fn type_text(app: &mut App, text: &str) {
    send(app, text.chars().map(|ch| Message::Input { ch }));
}

fn titles(app: &App, column: &ColumnId) -> Vec<String> {
    app.state()
        .store
        .column(column)
        .unwrap()
        .tasks
        .iter()
        .map(|t| t.title.clone())
        .collect()
}

#[test]
fn create_move_and_finish_a_task() {
    let mut app = App::new(seeded_store());

    send(&mut app, [Message::OpenAddTask]);
    type_text(&mut app, "Write launch post");
    send(&mut app, (0..5).map(|_| Message::NextField));
    type_text(&mut app, "Draft");
    send(&mut app, [Message::Submit]);
    type_text(&mut app, "Publish");
    send(&mut app, [Message::Submit, Message::Submit]);

    assert_eq!(app.state().store.total_tasks(), 6);
    assert_eq!(titles(&app, &ColumnId::TODO)[3], "Write launch post");

    // Carry it to the top of "In Progress".
    send(
        &mut app,
        [
            Message::GrabTask,
            Message::NavigateRight,
            Message::NavigateUp,
            Message::NavigateUp,
            Message::Select,
        ],
    );
    assert_eq!(titles(&app, &ColumnId::IN_PROGRESS)[0], "Write launch post");
    assert_eq!(titles(&app, &ColumnId::TODO).len(), 3);

    // Tick off both subtasks from the detail view.
    send(
        &mut app,
        [
            Message::Select,
            Message::ToggleSubtaskAt { index: 0 },
            Message::ToggleSubtaskAt { index: 1 },
        ],
    );
    let task = app.state().selected_task().unwrap();
    assert_eq!(task.subtask_progress(), Some((2, 2)));
    assert_eq!(task.progress_percent(), Some(100));

    send(&mut app, [Message::DeleteTask]);
    assert_eq!(app.state().store.total_tasks(), 5);
    assert!(!titles(&app, &ColumnId::IN_PROGRESS).contains(&"Write launch post".to_string()));
}

#[test]
fn every_mutation_bumps_revision_once() {
    let mut app = App::new(seeded_store());
    let start = app.state().store.revision();

    send(
        &mut app,
        [
            Message::NavigateDown,
            Message::GrabTask,
            Message::NavigateDown,
            Message::Select,
        ],
    );
    assert_eq!(app.state().store.revision(), start + 1);

    // A grab dropped where it started is not a mutation.
    send(&mut app, [Message::GrabTask, Message::Select]);
    assert_eq!(app.state().store.revision(), start + 1);
}

#[test]
fn board_snapshot_serializes_to_json() {
    let app = App::new(seeded_store());
    let json = app.state().store.board().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let columns = value["columns"].as_array().unwrap();
    assert_eq!(columns.len(), 2);
    assert_eq!(columns[0]["id"], "todo");
    assert_eq!(columns[1]["title"], "In Progress");
    assert_eq!(
        columns[0]["tasks"][0]["title"],
        "Create wireframes for landing page"
    );
    assert_eq!(columns[0]["tasks"][0]["priority"], "high");
}
