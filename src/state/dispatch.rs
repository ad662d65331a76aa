//! Request dispatch (pure state transitions).
//!
//! Turns [`Request`]s into view, display and status changes. Nothing here
//! touches the terminal: the event loop feeds requests in, pumps loading
//! views through [`pump_views`] and redraws when told to.

use super::app_state::AppState;
use super::prompt::{Prompt, PromptKind, PromptOutcome};
use super::search::{self, Direction, SearchQuery};
use crate::model::{LoadError, Request};
use crate::source::command;
use crate::source::{LoadStatus, Loader};
use crate::view_state::{EnterAction, LoadState, Movement, Scroll, ViewId, ViewSource};
use crossterm::event::KeyEvent;
use tracing::{debug, info};

/// What the event loop should do after a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep going; draw if anything changed.
    Continue,
    /// Clear the terminal and repaint everything.
    Redraw,
    /// Leave the event loop.
    Quit,
}

/// Load and show the base view.
pub fn start(state: &mut AppState) {
    let base = state.display.base();
    open_view(state, base, None, false, false);
}

/// Apply one request.
pub fn handle_request(state: &mut AppState, request: Request) -> Flow {
    debug!(?request, "Request");
    let flow = match request {
        Request::ViewMain => switch_to(state, ViewId::Main),
        Request::ViewDiff => switch_to(state, ViewId::Diff),
        Request::ViewLog => switch_to(state, ViewId::Log),
        Request::ViewHelp => switch_to(state, ViewId::Help),
        Request::ViewPager => switch_to(state, ViewId::Pager),

        Request::Enter => {
            let id = state.display.focused();
            enter(state, id);
            Flow::Continue
        }
        Request::Next => navigate(state, Movement::Down),
        Request::Previous => navigate(state, Movement::Up),
        Request::ViewNext => {
            state.display.cycle_focus();
            Flow::Continue
        }
        Request::ViewClose => {
            if let Err(err) = state.display.close_focused() {
                state.report(err.to_string());
            }
            Flow::Continue
        }
        Request::Quit => Flow::Quit,

        Request::MoveUp => move_focused(state, Movement::Up),
        Request::MoveDown => move_focused(state, Movement::Down),
        Request::MovePageUp => move_focused(state, Movement::PageUp),
        Request::MovePageDown => move_focused(state, Movement::PageDown),
        Request::MoveFirstLine => move_focused(state, Movement::FirstLine),
        Request::MoveLastLine => move_focused(state, Movement::LastLine),

        Request::ScrollLineUp => scroll_focused(state, Scroll::LineUp),
        Request::ScrollLineDown => scroll_focused(state, Scroll::LineDown),
        Request::ScrollPageUp => scroll_focused(state, Scroll::PageUp),
        Request::ScrollPageDown => scroll_focused(state, Scroll::PageDown),

        Request::Search => {
            state.prompt = Some(Prompt::new(PromptKind::Search));
            Flow::Continue
        }
        Request::FindNext => find(state, Direction::Forward),
        Request::FindPrevious => find(state, Direction::Backward),

        Request::Prompt => {
            state.prompt = Some(Prompt::new(PromptKind::Command));
            Flow::Continue
        }
        Request::StopLoading => {
            stop_loading(state);
            Flow::Continue
        }
        Request::Reload => {
            let id = state.display.focused();
            reload(state, id);
            Flow::Continue
        }
        Request::ShowVersion => {
            state.report(version_string());
            Flow::Continue
        }
        Request::ToggleLineNumbers => {
            let options = &mut state.env.options;
            options.line_numbers = !options.line_numbers;
            Flow::Continue
        }
        Request::ScreenRedraw => Flow::Redraw,
    };
    sync_commit_ref(state);
    flow
}

/// Apply a key press while the prompt is open.
pub fn handle_prompt_key(state: &mut AppState, key: KeyEvent) -> Flow {
    let Some(prompt) = state.prompt.as_mut() else {
        return Flow::Continue;
    };

    match prompt.handle_key(key) {
        PromptOutcome::Editing => {}
        PromptOutcome::Cancelled => state.prompt = None,
        PromptOutcome::Submitted(kind, input) => {
            state.prompt = None;
            match kind {
                PromptKind::Search => match SearchQuery::new(input) {
                    Some(query) => {
                        state.search.set_query(query);
                        find(state, Direction::Forward);
                    }
                    None => state.clear_report(),
                },
                PromptKind::Command => run_command(state, &input),
            }
        }
    }
    sync_commit_ref(state);
    Flow::Continue
}

/// Parse available output of every loading view.
///
/// Returns `true` if any view changed and the screen needs a redraw.
pub fn pump_views(state: &mut AppState) -> bool {
    let mut changed = false;
    let mut reports = Vec::new();

    for view in state.display.views_mut() {
        if !view.is_loading() {
            continue;
        }
        let before = view.line_count();
        match view.pump() {
            LoadStatus::Pending => {}
            LoadStatus::Exhausted => {
                let elapsed = view.elapsed().as_secs();
                view.end();
                info!(view = view.name(), lines = view.line_count(), elapsed, "Load complete");
                reports.push(format!(
                    "{}: loaded {} lines in {}s",
                    view.name(),
                    view.line_count(),
                    elapsed
                ));
                changed = true;
            }
            LoadStatus::Failed(err) => {
                view.end();
                reports.push(format!("{}: {}", view.name(), err));
                changed = true;
            }
        }
        changed |= view.line_count() != before;
    }

    for message in reports {
        state.report(message);
    }
    state.flush_deferred_report();
    sync_commit_ref(state);
    changed
}

/// Text reported by the version request.
pub fn version_string() -> String {
    format!("gitscope v{}", env!("CARGO_PKG_VERSION"))
}

// ===== Opening views =====

fn switch_to(state: &mut AppState, id: ViewId) -> Flow {
    let from = state.display.focused();
    open_view(state, id, Some(from), false, false);
    Flow::Continue
}

/// Show view `id`, loading it first if its content is stale.
///
/// `from` becomes the parent; with `split` it stays visible above `id`.
/// With `reload` the content is loaded again even if it is current.
pub fn open_view(
    state: &mut AppState,
    id: ViewId,
    from: Option<ViewId>,
    split: bool,
    reload: bool,
) {
    let needs_load = reload || needs_load(state, id);
    let display = &state.display;
    if !needs_load && display.focused() == id && display.visible().len() == 1 {
        state.report(format!("Already in {} view", id.name()));
        return;
    }

    let mut load_error = None;
    if needs_load {
        if id == ViewId::Pager
            && state.pager_input.is_none()
            && state.display.view(id).source() == &ViewSource::Empty
        {
            state.report("No pager content, press ':' to run a command");
            return;
        }
        if let Err(err) = begin_load(state, id) {
            state.display.view_mut(id).fail();
            load_error = Some(err);
        }
    }

    // A view that failed to load is still shown, empty.
    let shown = state.display.show(id, from, split);
    if let Some(err) = load_error {
        state.report(format!("Failed to load {} view: {}", id.name(), err));
    } else if let Err(err) = shown {
        state.report(err.to_string());
    } else if state.display.view(id).is_loading() && state.display.view(id).line_count() == 0 {
        state.report("Loading...");
    }
}

fn needs_load(state: &AppState, id: ViewId) -> bool {
    let view = state.display.view(id);
    match id {
        ViewId::Main | ViewId::Log => view.loaded_ref() != Some(state.head_ref.as_str()),
        ViewId::Diff => view.loaded_ref() != Some(state.commit_ref.as_str()),
        ViewId::Help => view.load_state() == LoadState::Empty,
        ViewId::Pager => state.pager_input.is_some() || view.load_state() == LoadState::Empty,
    }
}

/// Start loading view `id` from its source.
fn begin_load(state: &mut AppState, id: ViewId) -> Result<(), LoadError> {
    let reference = match id {
        ViewId::Main | ViewId::Log => state.head_ref.clone(),
        ViewId::Diff => state.commit_ref.clone(),
        ViewId::Help | ViewId::Pager => String::new(),
    };

    let loader = match state.display.view(id).source() {
        ViewSource::Command(template) => Loader::spawn(&command::expand(template, &reference))?,
        ViewSource::Text(text) => Loader::from_bytes(id.name(), text.clone().into_bytes()),
        ViewSource::Empty => match state.pager_input.take() {
            Some(loader) => loader,
            None => Loader::from_bytes(id.name(), Vec::new()),
        },
    };
    state.display.view_mut(id).begin(loader, &reference);
    Ok(())
}

/// Load the focused view again in place.
fn reload(state: &mut AppState, id: ViewId) {
    if state.display.view(id).source() == &ViewSource::Empty {
        state.report(format!("The {} view cannot be reloaded", id.name()));
        return;
    }
    if let Err(err) = begin_load(state, id) {
        state.display.view_mut(id).fail();
        state.report(format!("Failed to load {} view: {}", id.name(), err));
    }
}

/// Run a command typed at the `:` prompt into the pager view.
fn run_command(state: &mut AppState, input: &str) {
    let command_line = input.trim();
    if command_line.is_empty() {
        return;
    }
    info!(command = command_line, "Run command in pager");
    let from = state.display.focused();
    state
        .display
        .view_mut(ViewId::Pager)
        .set_source(ViewSource::Command(command_line.to_string()));
    let from = (from != ViewId::Pager).then_some(from);
    open_view(state, ViewId::Pager, from, false, true);
}

// ===== Navigation =====

/// Act on the line under the cursor of view `id`.
pub fn enter(state: &mut AppState, id: ViewId) {
    let view = state.display.view(id);
    let Some(line) = view.cursor_line() else {
        state.report("Nothing to enter");
        return;
    };

    match view.kind().enter(id, line) {
        EnterAction::ScrollDown => {
            if let Err(err) = state.display.view_mut(id).scroll(Scroll::LineDown) {
                state.report(err.to_string());
            }
        }
        EnterAction::OpenDiff {
            id: commit,
            scroll_after,
        } => {
            state.commit_ref = commit;
            open_view(state, ViewId::Diff, Some(id), state.split_view, false);
            if scroll_after {
                // Enter keeps walking a log while the diff follows.
                let _ = state.display.view_mut(id).scroll(Scroll::LineDown);
            }
        }
    }
}

/// Up/Down: in a diff opened from the main or log view, step through the
/// parent's commits and show each one; elsewhere move the cursor.
fn navigate(state: &mut AppState, movement: Movement) -> Flow {
    let focused = state.display.focused();
    let parent = match state.display.view(focused).parent() {
        Some(parent @ (ViewId::Main | ViewId::Log)) if focused == ViewId::Diff => parent,
        _ => return move_focused(state, movement),
    };

    if let Err(err) = state.display.view_mut(parent).move_cursor(movement) {
        state.report(err.to_string());
        return Flow::Continue;
    }

    if let Some(commit) = state.display.view(parent).cursor_ref() {
        if commit != state.commit_ref {
            state.commit_ref = commit;
            let split = state.display.is_visible(parent);
            open_view(state, ViewId::Diff, Some(parent), split, false);
        }
    }
    Flow::Continue
}

fn move_focused(state: &mut AppState, movement: Movement) -> Flow {
    if let Err(err) = state.display.focused_view_mut().move_cursor(movement) {
        state.report(err.to_string());
    }
    Flow::Continue
}

fn scroll_focused(state: &mut AppState, scroll: Scroll) -> Flow {
    if let Err(err) = state.display.focused_view_mut().scroll(scroll) {
        state.report(err.to_string());
    }
    Flow::Continue
}

fn find(state: &mut AppState, direction: Direction) -> Flow {
    let Some(query) = state.search.query().cloned() else {
        state.report("No previous search");
        return Flow::Continue;
    };

    let view = state.display.focused_view();
    match search::find(view, &query, view.cursor(), direction) {
        Some(found) => {
            state.display.focused_view_mut().select(found.index);
            if found.wrapped {
                let message = match direction {
                    Direction::Forward => "Search hit bottom, continuing at top",
                    Direction::Backward => "Search hit top, continuing at bottom",
                };
                state.report(message);
            }
        }
        None => state.report(format!("No match found for '{}'", query.as_str())),
    }
    Flow::Continue
}

fn stop_loading(state: &mut AppState) {
    let mut stopped = Vec::new();
    for view in state.display.views_mut() {
        if view.end() {
            stopped.push(view.name());
        }
    }
    for name in stopped {
        state.report(format!("Stopped loading the {name} view"));
    }
}

/// The diff view follows the commit under the cursor of a history view.
fn sync_commit_ref(state: &mut AppState) {
    let view = state.display.focused_view();
    if matches!(view.id(), ViewId::Main | ViewId::Log | ViewId::Pager) {
        if let Some(commit) = view.cursor_ref() {
            state.commit_ref = commit;
        }
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
