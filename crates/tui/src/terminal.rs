//! Terminal lifecycle.
//!
//! The board runs on the alternate screen in raw mode with mouse capture on,
//! since dragging cards needs press, drag, and release events. Everything
//! enabled here must be undone on every exit path: normal quit, error
//! return, and panic.

use std::io::{self, Stdout};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{debug, warn};

/// The terminal type used by the application.
pub type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Error type for terminal operations.
#[derive(Debug, thiserror::Error)]
pub enum TerminalError {
    /// Failed to initialize the terminal.
    #[error("failed to setup terminal: {0}")]
    Setup(#[source] io::Error),

    /// Failed to restore the terminal.
    #[error("failed to restore terminal: {0}")]
    Restore(#[source] io::Error),
}

/// Switches the terminal into board mode.
///
/// Enables raw mode, enters the alternate screen, and turns on mouse
/// capture. If a later step fails, the earlier ones are rolled back before
/// the error is returned.
///
/// # Errors
///
/// Returns [`TerminalError::Setup`] if any step fails.
pub fn setup_terminal() -> Result<AppTerminal, TerminalError> {
    enable_raw_mode().map_err(TerminalError::Setup)?;

    let mut stdout = io::stdout();
    if let Err(err) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
        leave_board_mode();
        return Err(TerminalError::Setup(err));
    }

    Terminal::new(CrosstermBackend::new(stdout)).map_err(|err| {
        leave_board_mode();
        TerminalError::Setup(err)
    })
}

/// Returns the terminal to its normal state and shows the cursor.
///
/// # Errors
///
/// Returns [`TerminalError::Restore`] if any step fails.
pub fn restore_terminal(terminal: &mut AppTerminal) -> Result<(), TerminalError> {
    disable_raw_mode().map_err(TerminalError::Restore)?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )
    .map_err(TerminalError::Restore)?;
    terminal.show_cursor().map_err(TerminalError::Restore)?;
    debug!("terminal restored");
    Ok(())
}

/// Best-effort restore for paths that cannot report errors.
fn leave_board_mode() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
}

/// Installs a panic hook that restores the terminal before the original
/// hook prints the panic message.
///
/// Call once at startup, before [`setup_terminal`].
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        leave_board_mode();
        original_hook(panic_info);
    }));
}

/// Owns the terminal for the lifetime of the board.
///
/// Dropping the session restores the terminal, so an early `?` return in
/// the caller still leaves a usable shell. Call [`TerminalSession::finish`]
/// to restore explicitly and see the error.
///
/// # Examples
///
/// ```no_run
/// use taskflow_protocol::seed::seeded_store;
/// use taskflow_tui::{App, terminal::TerminalSession};
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let mut session = TerminalSession::start()?;
///     let mut app = App::new(seeded_store());
///     app.run(session.terminal()).await?;
///     session.finish()?;
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct TerminalSession {
    terminal: AppTerminal,
    restored: bool,
}

impl TerminalSession {
    /// Sets up the terminal and takes ownership of it.
    ///
    /// # Errors
    ///
    /// Returns [`TerminalError::Setup`] if the terminal cannot be prepared.
    pub fn start() -> Result<Self, TerminalError> {
        let terminal = setup_terminal()?;
        debug!("terminal session started");
        Ok(Self {
            terminal,
            restored: false,
        })
    }

    /// The terminal to draw on.
    pub fn terminal(&mut self) -> &mut AppTerminal {
        &mut self.terminal
    }

    /// Restores the terminal and ends the session.
    ///
    /// # Errors
    ///
    /// Returns [`TerminalError::Restore`] if restoring fails.
    pub fn finish(mut self) -> Result<(), TerminalError> {
        self.restored = true;
        restore_terminal(&mut self.terminal)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if self.restored {
            return;
        }
        if let Err(err) = restore_terminal(&mut self.terminal) {
            warn!(%err, "failed to restore terminal on drop");
        }
    }
}
