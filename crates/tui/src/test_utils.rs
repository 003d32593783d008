//! Shared helpers for the TUI test modules.

use ratatui::buffer::Buffer;
use taskflow_protocol::KanbanStore;
use taskflow_protocol::seed::seeded_store;

/// Renders a buffer as text, one line per row, with trailing spaces
/// trimmed so inline snapshots stay readable.
#[must_use]
pub(crate) fn buffer_to_string(buf: &Buffer) -> String {
    let mut result = String::new();
    for y in 0..buf.area.height {
        for x in 0..buf.area.width {
            if let Some(cell) = buf.cell((x, y)) {
                result.push_str(cell.symbol());
            }
        }
        let trimmed = result.trim_end_matches(' ');
        result.truncate(trimmed.len());
        result.push('\n');
    }
    result
}

/// The seed board, as every session starts.
#[must_use]
pub(crate) fn test_store() -> KanbanStore {
    seeded_store()
}
