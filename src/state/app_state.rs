//! Application state.
//!
//! Everything the event loop mutates lives here: the display with its
//! views, the drawing environment, the status line and the prompt. The
//! terminal is not part of it, so all transitions are testable without one.

use super::display::DisplayManager;
use super::prompt::Prompt;
use super::search::SearchState;
use crate::config::{KeyBindings, ResolvedConfig, ViewOptions};
use crate::model::RefSet;
use crate::source::command::{self, DEFAULT_REF};
use crate::source::Loader;
use crate::view::help::help_text;
use crate::view::styles::StyleTable;
use crate::view_state::{Env, ViewId, ViewSource};
use tracing::{debug, info, warn};

/// All mutable application state.
#[derive(Debug)]
pub struct AppState {
    /// Views and their arrangement.
    pub display: DisplayManager,
    /// Styles, refs and options shared by drawing.
    pub env: Env,
    /// Open views from Enter split below their opener.
    pub split_view: bool,
    status: Option<String>,
    /// Open prompt, if the user is typing one.
    pub prompt: Option<Prompt>,
    /// Last search query.
    pub search: SearchState,
    /// Revision the main and log views list.
    pub head_ref: String,
    /// Commit the diff view shows; follows the cursor of the main and log views.
    pub commit_ref: String,
    /// Piped stdin, consumed by the first load of the pager view.
    pub pager_input: Option<Loader>,
    deferred: Option<String>,
}

impl AppState {
    /// Build the state with `base` as the view shown first.
    ///
    /// Command templates come from `config`; the help view gets text
    /// generated from `bindings`.
    pub fn from_config(
        config: &ResolvedConfig,
        bindings: &KeyBindings,
        styles: StyleTable,
        utf8: bool,
        base: ViewId,
        head_ref: impl Into<String>,
    ) -> Self {
        let commands = &config.commands;
        let display = DisplayManager::new(base, |id| match id {
            ViewId::Main => ViewSource::Command(commands.main.clone()),
            ViewId::Diff => ViewSource::Command(commands.diff.clone()),
            ViewId::Log => ViewSource::Command(commands.log.clone()),
            ViewId::Help => ViewSource::Text(help_text(bindings)),
            ViewId::Pager => ViewSource::Empty,
        });

        let head_ref = head_ref.into();
        let head_ref = if head_ref.trim().is_empty() {
            DEFAULT_REF.to_string()
        } else {
            head_ref
        };

        Self {
            display,
            env: Env {
                styles,
                refs: RefSet::default(),
                options: ViewOptions::from_config(config, utf8),
            },
            split_view: config.split_view,
            status: None,
            prompt: None,
            search: SearchState::default(),
            commit_ref: head_ref.clone(),
            head_ref,
            pager_input: None,
            deferred: None,
        }
    }

    /// Show `message` on the status line, replacing any previous one.
    pub fn report(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!(status = %message, "Report");
        self.status = Some(message);
    }

    /// Report `message` once no view is loading any more, so the load
    /// reports of startup do not hide it.
    pub fn defer_report(&mut self, message: impl Into<String>) {
        self.deferred = Some(message.into());
    }

    /// Show the deferred message, if any, when loading has settled.
    pub fn flush_deferred_report(&mut self) {
        if self.any_loading() {
            return;
        }
        if let Some(message) = self.deferred.take() {
            self.report(message);
        }
    }

    /// Empty the status line.
    pub fn clear_report(&mut self) {
        self.status = None;
    }

    /// Current status message.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Whether any view is still reading its source.
    pub fn any_loading(&self) -> bool {
        self.display.views().any(|view| view.is_loading())
    }

    /// Read the reference listing produced by `command_line`.
    ///
    /// Failures leave the set empty; commits are then shown without labels.
    pub fn load_refs(&mut self, command_line: &str) {
        let listing = match command::run_to_string(command_line) {
            Ok(listing) => listing,
            Err(err) => {
                warn!(error = %err, "Failed to read references");
                return;
            }
        };

        let (refs, errors) = RefSet::from_listing(&listing);
        for error in &errors {
            warn!(error = %error, "Skipping reference entry");
        }
        info!(refs = refs.len(), "Loaded references");
        self.env.refs = refs;
    }
}
