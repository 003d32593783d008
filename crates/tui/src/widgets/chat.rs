//! Assistant chat panel widget.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::chat::{ChatPanel, ChatRole};

/// Renders the chat panel: conversation, typing indicator, and input line.
///
/// The conversation is bottom-anchored; older messages scroll out of view
/// at the top.
///
/// # Examples
///
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use taskflow_tui::chat::ChatPanel;
/// use taskflow_tui::widgets::render_chat_panel;
///
/// let area = Rect::new(0, 0, 40, 20);
/// let mut buf = Buffer::empty(area);
/// render_chat_panel(&ChatPanel::new(), true, area, &mut buf);
/// ```
pub fn render_chat_panel(chat: &ChatPanel, focused: bool, area: Rect, buf: &mut Buffer) {
    let border_color = if focused { Color::Magenta } else { Color::DarkGray };
    let block = Block::default()
        .title(Span::styled(
            " ✦ AI Assistant ",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    block.render(area, buf);

    if inner.height < 3 || inner.width < 4 {
        return;
    }

    let [history_area, typing_area, input_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(2),
    ])
    .areas(inner);

    let width = usize::from(history_area.width.saturating_sub(1)).max(1);
    let lines = history_lines(chat, width);
    let visible = usize::from(history_area.height);
    let start = lines.len().saturating_sub(visible);
    Paragraph::new(lines[start..].to_vec()).render(history_area, buf);

    if chat.is_composing() {
        Paragraph::new(Line::from(Span::styled(
            " Assistant is typing…",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )))
        .render(typing_area, buf);
    }

    render_input(chat.input(), focused, input_area, buf);
}

fn history_lines(chat: &ChatPanel, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for message in chat.messages() {
        let (author, color) = match message.role {
            ChatRole::User => ("You", Color::Cyan),
            ChatRole::Assistant => ("Assistant", Color::Magenta),
        };
        lines.push(Line::from(Span::styled(
            format!(" {author}"),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
        lines.extend(
            wrap_text(&message.text, width.saturating_sub(1).max(1))
                .into_iter()
                .map(|l| Line::from(format!(" {l}"))),
        );
        lines.push(Line::default());
    }
    lines
}

fn render_input(input: &str, focused: bool, area: Rect, buf: &mut Buffer) {
    let separator = "─".repeat(usize::from(area.width));
    buf.set_string(
        area.x,
        area.y,
        separator,
        Style::default().fg(Color::DarkGray),
    );

    let line = if input.is_empty() && !focused {
        Line::from(Span::styled(
            "> Ask anything (2 to focus)",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        // Show the tail of long input so the cursor stays visible.
        let room = usize::from(area.width).saturating_sub(3);
        let shown: String = {
            let count = input.chars().count();
            input.chars().skip(count.saturating_sub(room)).collect()
        };
        let mut spans = vec![
            Span::styled("> ", Style::default().fg(Color::Magenta)),
            Span::raw(shown),
        ];
        if focused {
            spans.push(Span::styled("▏", Style::default().fg(Color::Magenta)));
        }
        Line::from(spans)
    };
    Paragraph::new(line).render(
        Rect {
            y: area.y + 1,
            height: 1,
            ..area
        },
        buf,
    );
}

/// Greedy word wrap. Words longer than `width` are split.
///
/// # Examples
///
/// ```
/// use taskflow_tui::widgets::chat::wrap_text;
///
/// assert_eq!(wrap_text("hello big world", 9), ["hello big", "world"]);
/// ```
#[must_use]
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if current_len == 0 {
            word.len()
        } else {
            current_len + 1 + word.len()
        };
        if needed > width && current_len > 0 {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current_len += word.len();
        current.extend(word);
    }

    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;

    #[test]
    fn wrap_text_breaks_on_words() {
        insta::assert_snapshot!(
            wrap_text("the quick brown fox jumps over the lazy dog", 10).join("\n"),
            @r"
        the quick
        brown fox
        jumps over
        the lazy
        dog
        "
        );
    }

    #[test]
    fn wrap_text_splits_long_words() {
        assert_eq!(wrap_text("abcdefgh ij", 3), ["abc", "def", "gh", "ij"]);
        assert_eq!(wrap_text("", 5), [""]);
    }

    #[test]
    fn render_shows_welcome_and_placeholder() {
        let area = Rect::new(0, 0, 40, 20);
        let mut buf = Buffer::empty(area);
        render_chat_panel(&ChatPanel::new(), false, area, &mut buf);

        let content = buffer_to_string(&buf);
        assert!(content.contains("AI Assistant"));
        assert!(content.contains("Assistant"));
        assert!(content.contains("Hi! I'm your AI"));
        assert!(content.contains("Ask anything"));
        assert!(!content.contains("typing"));
    }

    #[test]
    fn render_shows_typing_indicator_and_input() {
        let mut chat = ChatPanel::new();
        "help".chars().for_each(|ch| chat.push_char(ch));
        chat.send();
        "draft".chars().for_each(|ch| chat.push_char(ch));

        let area = Rect::new(0, 0, 40, 20);
        let mut buf = Buffer::empty(area);
        render_chat_panel(&chat, true, area, &mut buf);

        let content = buffer_to_string(&buf);
        assert!(content.contains("You"));
        assert!(content.contains(" help"));
        assert!(content.contains("Assistant is typing…"));
        assert!(content.contains("> draft▏"));
    }
}
