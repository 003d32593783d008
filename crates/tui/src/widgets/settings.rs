//! Settings view widget.
//!
//! Shows the effective configuration, read-only, in place of the board
//! while the Settings navigation entry is active.

use std::path::Path;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};
use taskflow_config::Config;
use taskflow_config::persistence::{CONFIG_ENV_VAR, default_user_config_path};

const LABEL_WIDTH: usize = 20;

/// Renders the configuration summary.
///
/// `source` is the file the configuration was loaded from, if any.
///
/// # Examples
///
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use taskflow_config::Config;
/// use taskflow_tui::widgets::render_settings_summary;
///
/// let area = Rect::new(0, 0, 72, 20);
/// let mut buf = Buffer::empty(area);
///
/// render_settings_summary(&Config::default(), None, area, &mut buf);
/// ```
pub fn render_settings_summary(
    config: &Config,
    source: Option<&Path>,
    area: Rect,
    buf: &mut Buffer,
) {
    let block = Block::default()
        .title(Span::styled(
            " Settings ",
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));

    let source = source.map_or_else(
        || "built-in defaults".to_string(),
        |path| path.display().to_string(),
    );
    let user_file = default_user_config_path().map_or_else(
        |_| "unavailable".to_string(),
        |path| path.display().to_string(),
    );
    let log_file = config.logging.log_file().map_or_else(
        |_| "unavailable".to_string(),
        |path| path.display().to_string(),
    );

    let mut lines = vec![
        Line::default(),
        section("General"),
        row("Loaded from", source),
        row("User config file", user_file),
        Line::default(),
        section("Assistant"),
        row(
            "Reply delay",
            format!("{} ms", config.assistant.reply_delay_ms),
        ),
        Line::default(),
        section("Interface"),
        row("Sidebar collapsed", on_off(config.ui.sidebar_collapsed)),
        row("Chat open", on_off(config.ui.chat_open)),
        Line::default(),
        section("Logging"),
        row("Level", config.logging.level.clone()),
        row("File", log_file),
        Line::default(),
    ];
    lines.push(Line::from(Span::styled(
        format!(" Edit the config file or set {CONFIG_ENV_VAR} to change these values."),
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )));

    Paragraph::new(lines).block(block).render(area, buf);
}

fn section(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        format!(" {title}"),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))
}

fn row(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("   {label:<width$}", width = LABEL_WIDTH),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

fn on_off(value: bool) -> String {
    if value { "yes" } else { "no" }.to_string()
}
