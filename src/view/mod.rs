//! TUI rendering and terminal management (impure shell)

pub mod help;
pub mod render;
pub mod styles;

pub use styles::{ColorConfig, StyleTable};

use crate::config::KeyBindings;
use crate::state::dispatch::{self, Flow};
use crate::state::AppState;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::Backend, backend::CrosstermBackend, layout::Rect, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;

/// Input poll timeout while some view is loading.
const LOADING_POLL: Duration = Duration::from_millis(25);
/// Input poll timeout when idle; titles of long loads still tick once a second.
const IDLE_POLL: Duration = Duration::from_secs(1);
/// How often titles are refreshed while loading, for the elapsed time.
const TITLE_TICK: Duration = Duration::from_secs(1);

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    state: AppState,
    key_bindings: KeyBindings,
    /// Something changed since the last frame.
    dirty: bool,
    last_title_tick: Instant,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(state: AppState, key_bindings: KeyBindings) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Self::with_terminal(terminal, state, key_bindings)
    }

    /// Run the main event loop
    ///
    /// Returns when the user quits. Waits for input with a short timeout
    /// while views are loading and a long one otherwise, and redraws only
    /// when something changed.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            let timeout = if self.state.any_loading() {
                LOADING_POLL
            } else {
                IDLE_POLL
            };

            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        match self.handle_key(key) {
                            Flow::Quit => return Ok(()),
                            Flow::Redraw => self.terminal.clear()?,
                            Flow::Continue => {}
                        }
                    }
                    Event::Resize(width, height) => self.handle_resize(width, height),
                    _ => {}
                }
            }

            self.tick();
            if self.dirty {
                self.draw()?;
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Wrap an already set up terminal and load the base view.
    pub fn with_terminal(
        terminal: Terminal<B>,
        state: AppState,
        key_bindings: KeyBindings,
    ) -> Result<Self, TuiError> {
        let mut app = Self {
            terminal,
            state,
            key_bindings,
            dirty: true,
            last_title_tick: Instant::now(),
        };

        let size = app.terminal.size()?;
        app.handle_resize(size.width, size.height);
        dispatch::start(&mut app.state);
        Ok(app)
    }

    /// Handle a single keyboard event
    fn handle_key(&mut self, key: KeyEvent) -> Flow {
        self.dirty = true;

        // Ctrl+C always quits, even if not in bindings
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Flow::Quit;
        }

        if self.state.prompt.is_some() {
            return dispatch::handle_prompt_key(&mut self.state, key);
        }

        self.state.clear_report();
        match self.key_bindings.get(key) {
            Some(request) => dispatch::handle_request(&mut self.state, request),
            None => {
                debug!(?key, "Unbound key");
                self.state.report("Unknown key, press 'h' for help");
                Flow::Continue
            }
        }
    }

    fn handle_resize(&mut self, width: u16, height: u16) {
        debug!("Handling resize to {}x{}", width, height);
        if let Err(err) = self.state.display.resize(Rect::new(0, 0, width, height)) {
            self.state.report(err.to_string());
        }
        self.dirty = true;
    }

    /// Pump loading views and refresh titles of long loads.
    fn tick(&mut self) {
        if dispatch::pump_views(&mut self.state) {
            self.dirty = true;
        }
        if self.state.any_loading() && self.last_title_tick.elapsed() >= TITLE_TICK {
            self.last_title_tick = Instant::now();
            self.dirty = true;
        }
    }

    /// Render the current frame
    fn draw(&mut self) -> Result<(), TuiError> {
        let state = &self.state;
        self.terminal.draw(|frame| render::render(frame, state))?;
        self.dirty = false;
        Ok(())
    }
}

// ===== Test Helpers =====

#[cfg(test)]
impl<B> TuiApp<B>
where
    B: Backend,
{
    pub(crate) fn state(&self) -> &AppState {
        &self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    /// Handle a key and pump once, as one loop iteration would.
    pub(crate) fn handle_key_test(&mut self, key: KeyEvent) -> Flow {
        let flow = self.handle_key(key);
        self.tick();
        flow
    }

    pub(crate) fn tick_test(&mut self) {
        self.tick();
    }

    pub(crate) fn render_test(&mut self) -> Result<(), TuiError> {
        self.draw()
    }

    pub(crate) fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

#[cfg(test)]
impl TuiApp<ratatui::backend::TestBackend> {
    pub(crate) fn resize_test(&mut self, width: u16, height: u16) {
        self.terminal.backend_mut().resize(width, height);
        self.handle_resize(width, height);
    }
}

/// Initialize and run the TUI application
///
/// Terminal state is restored even when the loop fails.
pub fn run(state: AppState, key_bindings: KeyBindings) -> Result<(), TuiError> {
    let result = TuiApp::new(state, key_bindings).and_then(|mut app| app.run());
    restore_terminal()?;
    result
}

/// Restore terminal to normal state
///
/// Disables raw mode and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tui_error_from_io_error() {
        let io_err = io::Error::other("test error");
        let tui_err: TuiError = io_err.into();
        assert!(matches!(tui_err, TuiError::Io(_)));
        assert!(tui_err.to_string().contains("test error"));
    }
}
