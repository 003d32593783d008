//! Main application struct and run loop.
//!
//! This module provides the `App` struct which orchestrates the TUI
//! application lifecycle including event handling, state updates, and rendering.

use std::path::{Path, PathBuf};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use taskflow_config::Config;
use taskflow_protocol::{KanbanStore, Message};
use tracing::{debug, info};

use crate::{
    AppState, Focus, NavItem,
    chat::{ChatPanel, ReplyScheduler},
    drag::{DragGesture, DragSource},
    event::{InputMode, event_to_message, poll_event},
    form::{AddTaskForm, FormField},
    layout::{Hit, MIN_HEIGHT, MIN_WIDTH, ScreenLayout, Selection, drop_slot_at, hit_test},
    terminal::AppTerminal,
    widgets::{
        StatusContext, render_add_task_dialog, render_board, render_chat_panel,
        render_detail_panel, render_help_overlay, render_settings_summary, render_sidebar,
        render_status_bar,
    },
};

/// The main application struct.
///
/// Manages the application state and provides the main event loop.
#[derive(Debug)]
pub struct App {
    state: AppState,
    /// Add-task dialog, if open.
    dialog: Option<AddTaskForm>,
    chat: ChatPanel,
    replies: ReplyScheduler,
    /// Card being dragged, by mouse or keyboard.
    drag: Option<DragGesture>,
    config: Config,
    /// File the configuration was loaded from.
    config_source: Option<PathBuf>,
    should_quit: bool,
    /// Screen regions of the last render, used for pointer hit-testing.
    layout: ScreenLayout,
}

impl App {
    /// Creates a new application over the given store with the default
    /// configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use taskflow_protocol::seed::seeded_store;
    /// use taskflow_tui::App;
    ///
    /// let app = App::new(seeded_store());
    /// assert!(!app.should_quit());
    /// ```
    #[must_use]
    pub fn new(store: KanbanStore) -> Self {
        Self::with_config(store, Config::default(), None)
    }

    /// Creates a new application with the given store and configuration.
    ///
    /// `source` is the file the configuration came from, shown in the
    /// settings view.
    ///
    /// # Examples
    ///
    /// ```
    /// use taskflow_config::{Config, UiConfig};
    /// use taskflow_protocol::seed::seeded_store;
    /// use taskflow_tui::App;
    ///
    /// let config = Config {
    ///     ui: UiConfig { sidebar_collapsed: true, chat_open: true },
    ///     ..Config::default()
    /// };
    /// let app = App::with_config(seeded_store(), config, None);
    /// assert!(app.state().chat_open);
    /// assert!(app.state().sidebar.collapsed);
    /// ```
    #[must_use]
    pub fn with_config(store: KanbanStore, config: Config, source: Option<PathBuf>) -> Self {
        Self {
            state: AppState::new(store).with_ui(&config.ui),
            dialog: None,
            chat: ChatPanel::new(),
            replies: ReplyScheduler::new(config.assistant.reply_delay()),
            drag: None,
            config,
            config_source: source,
            should_quit: false,
            layout: ScreenLayout::default(),
        }
    }

    /// Returns a reference to the application state.
    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Returns a reference to the application configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the configuration file path, if one was loaded.
    #[must_use]
    pub fn config_source(&self) -> Option<&Path> {
        self.config_source.as_deref()
    }

    /// Returns the chat panel.
    #[must_use]
    pub fn chat(&self) -> &ChatPanel {
        &self.chat
    }

    /// Returns the add-task dialog, if open.
    #[must_use]
    pub fn dialog(&self) -> Option<&AddTaskForm> {
        self.dialog.as_ref()
    }

    /// Returns the drag in flight, if any.
    #[must_use]
    pub fn drag(&self) -> Option<&DragGesture> {
        self.drag.as_ref()
    }

    /// Returns `true` once the user asked to quit.
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Key map for the next event.
    #[must_use]
    pub fn input_mode(&self) -> InputMode {
        if self.drag.is_some() {
            InputMode::Dragging
        } else if self.dialog.is_some() || self.state.focus == Focus::Chat {
            InputMode::Text
        } else if self.state.focus == Focus::Detail {
            InputMode::Detail
        } else {
            InputMode::Board
        }
    }

    fn status_context(&self) -> StatusContext {
        if self.drag.is_some() {
            StatusContext::Dragging
        } else if self.dialog.is_some() {
            StatusContext::Dialog
        } else if self.state.focus == Focus::Chat {
            StatusContext::Chat
        } else if self.state.detail_visible {
            StatusContext::Detail
        } else if self.state.showing_settings() {
            StatusContext::Settings
        } else {
            StatusContext::Board
        }
    }

    fn selection(&self) -> Selection {
        Selection {
            column: self.state.selected_column,
            task: self.state.selected_task,
        }
    }

    fn board_visible(&self) -> bool {
        !self.state.detail_visible && !self.state.showing_settings()
    }

    /// Updates the application state based on a message.
    ///
    /// When the help overlay is visible, any message other than `Quit`
    /// dismisses it instead of taking its normal action. An open dialog
    /// or a drag in flight captures the keyboard until it ends.
    pub fn update(&mut self, msg: Message) {
        if msg.is_terminating() {
            self.should_quit = true;
            return;
        }

        // When help is visible, any key dismisses it
        if self.state.help_visible {
            let _ = self.state.dismiss_help();
            return;
        }

        if msg.is_pointer() {
            self.handle_pointer(msg);
            return;
        }

        if self.drag.is_some() {
            self.update_drag(msg);
        } else if self.dialog.is_some() {
            self.update_dialog(msg);
        } else {
            match self.state.focus {
                Focus::Chat => self.update_chat(msg),
                Focus::Detail => self.update_detail(msg),
                Focus::Board | Focus::Dialog => self.update_board(msg),
            }
        }
    }

    fn update_board(&mut self, msg: Message) {
        match msg {
            Message::ToggleHelp => self.state.toggle_help(),
            Message::ToggleChat => self.state.toggle_chat(),
            Message::ToggleSidebar => self.state.toggle_sidebar(),
            Message::SelectNavItem { index } => {
                if let Some(item) = NavItem::from_index(index) {
                    self.state.activate_nav(item);
                }
            }
            Message::Escape | Message::Back if self.state.showing_settings() => {
                self.state.activate_nav(NavItem::Board);
            }
            _ if self.state.showing_settings() => {}

            Message::Escape => self.state.clear_selection(),
            Message::NavigateLeft => self.state.navigate_left(),
            Message::NavigateRight => self.state.navigate_right(),
            Message::NavigateUp => self.state.navigate_up(),
            Message::NavigateDown => self.state.navigate_down(),
            Message::Select => self.state.open_detail(),
            Message::OpenAddTask => self.open_dialog(self.state.selected_column),
            Message::DeleteTask => {
                let _ = self.state.delete_selected();
            }
            Message::GrabTask => self.grab_selected(),
            _ => {}
        }
    }

    fn update_detail(&mut self, msg: Message) {
        match msg {
            Message::Escape | Message::Back => self.state.close_detail(),
            Message::NavigateUp => self.state.move_detail_cursor(false),
            Message::NavigateDown => self.state.move_detail_cursor(true),
            Message::ToggleSubtask => {
                let _ = self.state.toggle_subtask_at(self.state.detail_cursor);
            }
            Message::ToggleSubtaskAt { index } => {
                let _ = self.state.toggle_subtask_at(index);
            }
            Message::DeleteTask => {
                let _ = self.state.delete_selected();
            }
            Message::ToggleHelp => self.state.toggle_help(),
            _ => {}
        }
    }

    fn update_chat(&mut self, msg: Message) {
        match msg {
            Message::Escape => self.state.focus = Focus::Board,
            Message::Input { ch } => self.chat.push_char(ch),
            Message::Backspace => self.chat.backspace(),
            Message::Submit => {
                if let Some(ticket) = self.chat.send() {
                    self.replies.schedule(ticket);
                }
            }
            _ => {}
        }
    }

    fn update_dialog(&mut self, msg: Message) {
        let Some(form) = self.dialog.as_mut() else {
            return;
        };
        match msg {
            Message::Escape => {
                self.close_dialog();
                self.state.set_status("Cancelled");
            }
            Message::Input { ch } => form.input(ch),
            Message::Backspace => form.backspace(),
            Message::NextField | Message::NavigateDown => form.next_field(),
            Message::PrevField | Message::NavigateUp => form.prev_field(),
            Message::NavigateLeft => form.cycle(false),
            Message::NavigateRight => form.cycle(true),
            Message::Submit => self.submit_dialog(),
            _ => {}
        }
    }

    fn update_drag(&mut self, msg: Message) {
        match msg {
            Message::Select => self.drop_gesture(),
            Message::Escape => {
                self.drag = None;
                self.state.set_status("Move cancelled");
            }
            Message::ToggleHelp => self.state.toggle_help(),
            msg if msg.is_navigation() => {
                let Some(gesture) = self.drag.as_mut() else {
                    return;
                };
                let board = self.state.store.board();
                match msg {
                    Message::NavigateUp => gesture.step_up(),
                    Message::NavigateDown => gesture.step_down(board),
                    Message::NavigateLeft => gesture.step_left(board),
                    Message::NavigateRight => gesture.step_right(board),
                    _ => {}
                }
            }
            // Board actions wait until the card is dropped.
            _ => {}
        }
    }

    /// Routes a mouse message.
    fn handle_pointer(&mut self, msg: Message) {
        match msg {
            Message::PressAt { column, row } => self.press_at(column, row),
            Message::DragTo { column, row } => {
                if self.drag.as_ref().is_none_or(|g| g.source() != DragSource::Mouse) {
                    return;
                }
                let slot = drop_slot_at(
                    &self.layout,
                    self.state.store.board(),
                    self.selection(),
                    column,
                    row,
                );
                if let Some(gesture) = self.drag.as_mut() {
                    gesture.hover_slot(slot);
                }
            }
            Message::ReleaseAt { column, row } => self.release_at(column, row),
            _ => {}
        }
    }

    fn press_at(&mut self, column: u16, row: u16) {
        // The dialog is modal and a keyboard drag owns the board.
        if self.dialog.is_some() || self.drag.is_some() {
            return;
        }

        let hit = hit_test(
            &self.layout,
            self.state.store.board(),
            self.selection(),
            NavItem::all().len(),
            column,
            row,
        );
        debug!(?hit, column, row, "pointer press");

        match hit {
            Hit::NavItem(index) => {
                if let Some(item) = NavItem::from_index(index) {
                    self.state.activate_nav(item);
                }
            }
            Hit::SidebarToggle => self.state.toggle_sidebar(),
            Hit::Chat => self.state.focus = Focus::Chat,
            _ if !self.board_visible() => {}
            Hit::AddTask { column } => self.open_dialog(column),
            Hit::Card { column, index } => {
                self.state.focus = Focus::Board;
                self.state.select(column, Some(index));
                self.drag = DragGesture::grab(
                    self.state.store.board(),
                    column,
                    index,
                    DragSource::Mouse,
                );
            }
            Hit::Column { column } => {
                self.state.focus = Focus::Board;
                self.state.select(column, None);
            }
            Hit::Nothing => {}
        }
    }

    /// Ends a mouse gesture. Releasing where the card was picked up is a
    /// click and opens the task.
    fn release_at(&mut self, column: u16, row: u16) {
        let slot = drop_slot_at(
            &self.layout,
            self.state.store.board(),
            self.selection(),
            column,
            row,
        );
        let Some(mut gesture) = self.drag.take_if(|g| g.source() == DragSource::Mouse) else {
            return;
        };
        gesture.hover_slot(slot);

        if gesture.is_at_origin() {
            let origin = gesture.origin();
            self.state.select(origin.column, Some(origin.index));
            self.state.open_detail();
            return;
        }
        self.drag = Some(gesture);
        self.drop_gesture();
    }

    fn grab_selected(&mut self) {
        let Some(index) = self.state.selected_task else {
            self.state.set_status("No task selected");
            return;
        };
        self.drag = DragGesture::grab(
            self.state.store.board(),
            self.state.selected_column,
            index,
            DragSource::Keyboard,
        );
        if let Some(task) = self.state.selected_task() {
            let status = format!("Moving \"{}\"", task.title);
            self.state.set_status(status);
        }
    }

    /// Resolves the drag in flight into at most one store move.
    fn drop_gesture(&mut self) {
        let Some(gesture) = self.drag.take() else {
            return;
        };
        if gesture.preview().is_none() {
            self.state.set_status("Move cancelled");
            return;
        }
        match gesture.finish(self.state.store.board()) {
            Some(request) => {
                info!(
                    source = %request.source,
                    dest = %request.dest,
                    dest_index = request.dest_index,
                    "moving task"
                );
                let _ = self.state.apply_move(&request);
            }
            None => self.state.set_status("Nothing to move"),
        }
    }

    fn open_dialog(&mut self, column: usize) {
        let Some(id) = self.state.store.board().columns.get(column).map(|c| c.id.clone()) else {
            return;
        };
        self.state.close_detail();
        self.state.focus = Focus::Dialog;
        self.dialog = Some(AddTaskForm::new(id));
    }

    fn close_dialog(&mut self) {
        self.dialog = None;
        self.state.focus = Focus::Board;
    }

    /// Commits the dialog. `Enter` on a non-empty subtask input stages the
    /// subtask instead.
    fn submit_dialog(&mut self) {
        let Some(form) = self.dialog.as_mut() else {
            return;
        };
        if form.focus() == FormField::Subtasks && form.stage_subtask() {
            return;
        }

        match form.submit() {
            Ok(draft) => {
                let column = form.column().clone();
                self.close_dialog();
                let _ = self.state.add_task(&column, draft);
            }
            Err(err) => {
                debug!(%err, "add-task form rejected");
                self.state.set_status(err.to_string());
            }
        }
    }

    /// Moves delivered assistant replies into the chat panel.
    ///
    /// Returns the number of replies received.
    pub fn drain_replies(&mut self) -> usize {
        let mut received = 0;
        while let Some(reply) = self.replies.try_next() {
            self.chat.receive_reply(reply);
            received += 1;
        }
        received
    }

    /// Renders the application UI to the given frame.
    ///
    /// Implements graceful degradation for small terminal sizes:
    /// - If terminal is below minimum dimensions, shows a "terminal too small" message.
    /// - If terminal is tight (below `MIN_HEIGHT_WITH_HEADER`), hides the header to reclaim space.
    /// - Otherwise, renders normally with header.
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();

        if area.height < MIN_HEIGHT || area.width < MIN_WIDTH {
            self.layout = ScreenLayout::default();
            render_terminal_too_small(frame, area);
            return;
        }

        let layout = ScreenLayout::compute(area, self.state.sidebar.collapsed, self.state.chat_open);
        self.layout = layout;

        if let Some(header) = layout.header {
            self.render_header(frame, header);
        }

        let buf = frame.buffer_mut();
        render_sidebar(&self.state.sidebar, layout.sidebar, buf);

        // Settings, detail, and board are mutually exclusive views
        if self.state.showing_settings() {
            render_settings_summary(&self.config, self.config_source(), layout.main, buf);
        } else if self.state.detail_visible
            && let (Some(task), Some(column)) =
                (self.state.selected_task(), self.state.selected_column_ref())
        {
            render_detail_panel(task, &column.title, self.state.detail_cursor, layout.main, buf);
        } else {
            render_board(
                self.state.store.board(),
                self.selection(),
                self.state.focus == Focus::Board,
                self.drag.as_ref(),
                layout.main,
                buf,
            );
        }

        if let Some(chat_area) = layout.chat {
            render_chat_panel(&self.chat, self.state.focus == Focus::Chat, chat_area, buf);
        }

        render_status_bar(
            self.state.status.as_deref(),
            self.status_context(),
            layout.status,
            buf,
        );

        if let Some(form) = &self.dialog {
            let column_title = self
                .state
                .store
                .column(form.column())
                .map_or("", |c| c.title.as_str());
            render_add_task_dialog(form, column_title, area, buf);
        }

        // Render help overlay on top if visible
        if self.state.help_visible {
            render_help_overlay(area, buf);
        }
    }

    /// Runs the main application loop.
    ///
    /// This function returns when the user quits the application.
    /// Each tick it delivers pending assistant replies, renders, then
    /// waits briefly for one terminal event.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal operations fail.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use taskflow_protocol::seed::seeded_store;
    /// use taskflow_tui::{App, terminal};
    ///
    /// #[tokio::main]
    /// async fn main() -> anyhow::Result<()> {
    ///     let mut terminal = terminal::setup_terminal()?;
    ///     let mut app = App::new(seeded_store());
    ///     app.run(&mut terminal).await?;
    ///     terminal::restore_terminal(&mut terminal)?;
    ///     Ok(())
    /// }
    /// ```
    pub async fn run(&mut self, terminal: &mut AppTerminal) -> anyhow::Result<()> {
        info!(tasks = self.state.store.total_tasks(), "starting event loop");

        loop {
            self.drain_replies();

            terminal.draw(|frame| self.view(frame))?;

            if let Some(event) = poll_event()?
                && let Some(msg) = event_to_message(&event, self.input_mode())
            {
                self.update(msg);
            }

            if self.should_quit {
                break;
            }
        }

        info!(revision = self.state.store.revision(), "event loop finished");
        Ok(())
    }

    /// Renders the header bar with title and help cue.
    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [title_area, help_area] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(17), // "Press ? for help" = 16 chars + padding
        ])
        .areas(inner);

        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                "TaskFlow",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" - "),
            Span::styled("Kanban Board", Style::default().fg(Color::White)),
            Span::styled(
                format!("  {} tasks", self.state.store.total_tasks()),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        frame.render_widget(title, title_area);

        let help_cue = Paragraph::new(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("?", Style::default().fg(Color::Yellow)),
            Span::styled(" for help", Style::default().fg(Color::DarkGray)),
        ]))
        .alignment(Alignment::Right);
        frame.render_widget(help_cue, help_area);
    }
}

/// Renders a message indicating the terminal is too small.
fn render_terminal_too_small(frame: &mut Frame, area: Rect) {
    let message = format!(
        "Terminal too small ({}×{})\nMinimum: {}×{} (w×h)",
        area.width, area.height, MIN_WIDTH, MIN_HEIGHT
    );

    let paragraph = Paragraph::new(message)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .wrap(ratatui::widgets::Wrap { trim: false });

    // Center the message vertically
    let vertical_offset = area.height.saturating_sub(2) / 2;
    let centered_area = Rect {
        x: area.x,
        y: area.y + vertical_offset,
        width: area.width,
        height: area.height.saturating_sub(vertical_offset),
    };

    frame.render_widget(paragraph, centered_area);
}
