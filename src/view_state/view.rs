//! A scrollable, incrementally loaded view.

use super::buffer::LineBuffer;
use super::env::Env;
use super::kind::ContentKind;
use crate::model::Line;
use crate::source::{LoadStatus, Loader};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use std::time::{Duration, Instant};
use tracing::debug;

/// Identity of each view in the fixed registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewId {
    /// Commit list.
    Main,
    /// Diff of one commit.
    Diff,
    /// Log with stats.
    Log,
    /// Key binding reference.
    Help,
    /// Piped input or command output.
    Pager,
}

impl ViewId {
    /// Every view, in registry order.
    pub const ALL: [ViewId; 5] = [
        ViewId::Main,
        ViewId::Diff,
        ViewId::Log,
        ViewId::Help,
        ViewId::Pager,
    ];

    /// Lower-case name used in titles and messages.
    pub fn name(self) -> &'static str {
        match self {
            ViewId::Main => "main",
            ViewId::Diff => "diff",
            ViewId::Log => "log",
            ViewId::Help => "help",
            ViewId::Pager => "pager",
        }
    }

    /// Position in [`ViewId::ALL`].
    pub fn index(self) -> usize {
        match self {
            ViewId::Main => 0,
            ViewId::Diff => 1,
            ViewId::Log => 2,
            ViewId::Help => 3,
            ViewId::Pager => 4,
        }
    }

    /// Content kind of the view.
    pub fn kind(self) -> ContentKind {
        match self {
            ViewId::Main => ContentKind::Main,
            _ => ContentKind::Pager,
        }
    }

    /// View with the given name.
    pub fn from_name(name: &str) -> Option<Self> {
        ViewId::ALL.into_iter().find(|id| id.name() == name)
    }
}

/// Where a view's content comes from when it is (re)loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewSource {
    /// Command template; `%s` becomes the reference.
    Command(String),
    /// Fixed text, e.g. the help page.
    Text(String),
    /// Nothing to load until a command is assigned.
    Empty,
}

/// Progress of a view's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Never loaded.
    Empty,
    /// Reading from its source.
    Loading,
    /// Source exhausted or loading stopped.
    Complete,
    /// Source failed; lines read so far are kept.
    Failed,
}

/// One view: its lines, viewport and loading state.
///
/// While loaded, `offset <= cursor < offset + height` and
/// `cursor < line_count`; the scroll operations keep it that way.
#[derive(Debug)]
pub struct View {
    id: ViewId,
    kind: ContentKind,
    source: ViewSource,
    pub(super) lines: LineBuffer,
    pub(super) offset: usize,
    pub(super) cursor: usize,
    pub(super) height: usize,
    pub(super) width: usize,
    loader: Option<Loader>,
    state: LoadState,
    started: Option<Instant>,
    loaded_ref: Option<String>,
    parent: Option<ViewId>,
    closed: bool,
}

/// Elapsed load time after which the title starts showing it.
const SHOW_ELAPSED_AFTER: Duration = Duration::from_secs(2);

impl View {
    /// An empty view that loads from `source`.
    pub fn new(id: ViewId, source: ViewSource) -> Self {
        Self {
            id,
            kind: id.kind(),
            source,
            lines: LineBuffer::new(),
            offset: 0,
            cursor: 0,
            height: 0,
            width: 0,
            loader: None,
            state: LoadState::Empty,
            started: None,
            loaded_ref: None,
            parent: None,
            closed: false,
        }
    }

    /// Which view this is.
    pub fn id(&self) -> ViewId {
        self.id
    }

    /// Name of the view.
    pub fn name(&self) -> &'static str {
        self.id.name()
    }

    /// How lines are parsed and drawn.
    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    /// Where content is loaded from.
    pub fn source(&self) -> &ViewSource {
        &self.source
    }

    /// Change where the next load reads from.
    pub fn set_source(&mut self, source: ViewSource) {
        self.source = source;
    }

    /// Lines loaded so far.
    pub fn lines(&self) -> &LineBuffer {
        &self.lines
    }

    /// Number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// First visible line.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Selected line.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Body rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Body columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Loading progress.
    pub fn load_state(&self) -> LoadState {
        self.state
    }

    /// Whether a loader is attached.
    pub fn is_loading(&self) -> bool {
        self.loader.is_some()
    }

    /// Reference the current content was loaded for.
    pub fn loaded_ref(&self) -> Option<&str> {
        self.loaded_ref.as_deref()
    }

    /// View to return to when this one closes.
    pub fn parent(&self) -> Option<ViewId> {
        self.parent
    }

    /// Set the view to return to.
    pub fn set_parent(&mut self, parent: Option<ViewId>) {
        self.parent = parent;
    }

    /// Whether the view was closed since it was last shown.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Mark the view closed or open.
    pub fn set_closed(&mut self, closed: bool) {
        self.closed = closed;
    }

    /// Time since the current load started.
    pub fn elapsed(&self) -> Duration {
        self.started.map(|t| t.elapsed()).unwrap_or_default()
    }

    // ===== Loading =====

    /// Start loading from `loader`, discarding previous content.
    ///
    /// A load still in progress is ended first.
    pub fn begin(&mut self, loader: Loader, reference: &str) {
        self.end();
        debug!(view = self.name(), source = loader.label(), "Begin load");
        self.lines.clear();
        self.offset = 0;
        self.cursor = 0;
        self.loader = Some(loader);
        self.state = LoadState::Loading;
        self.started = Some(Instant::now());
        self.loaded_ref = Some(reference.to_string());
    }

    /// Reset to an empty, failed view after a source could not be started.
    pub fn fail(&mut self) {
        self.end();
        self.lines.clear();
        self.offset = 0;
        self.cursor = 0;
        self.state = LoadState::Failed;
        self.loaded_ref = None;
    }

    /// Parse whatever output is available without waiting.
    pub fn pump(&mut self) -> LoadStatus {
        let Some(loader) = self.loader.as_mut() else {
            return LoadStatus::Exhausted;
        };

        let mut raw = Vec::new();
        let status = loader.read_available(&mut raw);
        for text in &raw {
            self.kind.parse_line(&mut self.lines, text);
        }

        match status {
            LoadStatus::Pending => {}
            LoadStatus::Exhausted => self.state = LoadState::Complete,
            LoadStatus::Failed(_) => self.state = LoadState::Failed,
        }
        status
    }

    /// Stop loading, keeping the lines read so far.
    ///
    /// Returns `true` if a load was in progress. Safe to call repeatedly.
    pub fn end(&mut self) -> bool {
        let Some(loader) = self.loader.take() else {
            return false;
        };
        debug!(view = self.name(), lines = self.lines.len(), "End load");
        drop(loader);
        if self.state == LoadState::Loading {
            self.state = LoadState::Complete;
        }
        true
    }

    /// End a load because the view is going away.
    ///
    /// Unlike [`View::end`], an interrupted load forgets its reference so
    /// that opening the view again reads the content afresh.
    pub fn abandon(&mut self) -> bool {
        if !self.end() {
            return false;
        }
        self.loaded_ref = None;
        true
    }

    // ===== Cursor =====

    /// Line under the cursor.
    pub fn cursor_line(&self) -> Option<&Line> {
        self.lines.get(self.cursor)
    }

    /// Commit id under the cursor, if the line refers to one.
    pub fn cursor_ref(&self) -> Option<String> {
        self.cursor_line().and_then(|line| self.kind.line_ref(line))
    }

    /// Move the cursor to `index` and scroll it into view.
    pub fn select(&mut self, index: usize) {
        if self.lines.is_empty() {
            return;
        }
        self.cursor = index.min(self.lines.len() - 1);
        self.ensure_cursor_visible();
    }

    /// Set the body size, keeping the cursor visible.
    pub fn set_size(&mut self, height: usize, width: usize) {
        self.height = height;
        self.width = width;
        self.ensure_cursor_visible();
    }

    // ===== Rendering =====

    /// Title bar text: `[name] ref - type N of M (P%)`, plus elapsed
    /// seconds for long loads.
    pub fn title(&self) -> String {
        let mut title = format!("[{}]", self.name());

        let reference = self.cursor_ref().or_else(|| self.loaded_ref.clone());
        if let Some(reference) = reference.filter(|r| !r.is_empty()) {
            title.push(' ');
            title.push_str(&reference);
        }

        let count = self.lines.len();
        if count > 0 || self.is_loading() {
            let position = self.cursor + 1;
            let percent = if count > 0 { position * 100 / count } else { 0 };
            title.push_str(&format!(
                " - {} {} of {} ({}%)",
                self.kind.type_name(),
                position,
                count,
                percent
            ));
        }

        if self.is_loading() {
            let elapsed = self.elapsed();
            if elapsed > SHOW_ELAPSED_AFTER {
                title.push_str(&format!(" {}s", elapsed.as_secs()));
            }
        }
        title
    }

    /// Draw body row `row` (relative to the top of the viewport).
    ///
    /// Returns `false` past the last line.
    pub fn draw_row(&self, row: usize, area: Rect, buf: &mut Buffer, env: &Env) -> bool {
        let lineno = self.offset + row;
        let Some(line) = self.lines.get(lineno) else {
            return false;
        };
        let selected = lineno == self.cursor;
        self.kind
            .draw(line, lineno, self.lines.len(), area, buf, env, selected)
    }
}
