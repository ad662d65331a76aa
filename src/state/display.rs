//! Display arrangement: which views are visible, which has focus and how
//! the terminal rows are divided between them.
//!
//! At most two views are visible. With two, the first one is the view the
//! second was opened from and keeps the upper third of the rows; the split
//! view below gets the remaining two thirds. Each pane ends in a title row
//! and the last terminal row is the status line.

use crate::model::error::LayoutError;
use crate::view_state::{View, ViewId, ViewSource};
use ratatui::layout::Rect;
use thiserror::Error;
use tracing::debug;

/// Rows reserved below all panes for the status line.
pub const STATUS_ROWS: u16 = 1;
/// Smallest pane: one body row and its title row.
pub const MIN_PANE_ROWS: u16 = 2;

/// Screen regions of one visible view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pane {
    /// View shown in the pane.
    pub id: ViewId,
    /// Rows for the view's lines.
    pub body: Rect,
    /// Title row below the body.
    pub title: Rect,
}

/// Why the focused view could not be closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CloseError {
    /// The base view stays open; the payload is its name.
    #[error("Cannot close the {0} view, press 'Q' to quit")]
    BaseView(&'static str),
}

/// Owns every view and arranges the visible ones.
#[derive(Debug)]
pub struct DisplayManager {
    views: Vec<View>,
    visible: Vec<ViewId>,
    focus: usize,
    base: ViewId,
    area: Rect,
}

impl DisplayManager {
    /// Create all views, showing only `base`.
    pub fn new(base: ViewId, mut source_for: impl FnMut(ViewId) -> ViewSource) -> Self {
        Self {
            views: ViewId::ALL
                .into_iter()
                .map(|id| View::new(id, source_for(id)))
                .collect(),
            visible: vec![base],
            focus: 0,
            base,
            area: Rect::default(),
        }
    }

    /// View `id`.
    pub fn view(&self, id: ViewId) -> &View {
        &self.views[id.index()]
    }

    /// Mutable view `id`.
    pub fn view_mut(&mut self, id: ViewId) -> &mut View {
        &mut self.views[id.index()]
    }

    /// Every view, visible or not.
    pub fn views(&self) -> impl Iterator<Item = &View> {
        self.views.iter()
    }

    /// Every view, mutably.
    pub fn views_mut(&mut self) -> impl Iterator<Item = &mut View> {
        self.views.iter_mut()
    }

    /// View shown first, which cannot be closed.
    pub fn base(&self) -> ViewId {
        self.base
    }

    /// View that receives keys.
    pub fn focused(&self) -> ViewId {
        self.visible[self.focus]
    }

    /// The focused view.
    pub fn focused_view(&self) -> &View {
        self.view(self.focused())
    }

    /// The focused view, mutably.
    pub fn focused_view_mut(&mut self) -> &mut View {
        let id = self.focused();
        self.view_mut(id)
    }

    /// Visible views from top to bottom.
    pub fn visible(&self) -> &[ViewId] {
        &self.visible
    }

    /// Whether `id` has a pane.
    pub fn is_visible(&self, id: ViewId) -> bool {
        self.visible.contains(&id)
    }

    /// Terminal area last given to [`DisplayManager::resize`].
    pub fn area(&self) -> Rect {
        self.area
    }

    /// Make `id` visible and focused.
    ///
    /// With `split` and a different `from`, `from` stays visible above it;
    /// otherwise `id` takes the whole screen. `from` becomes the parent `id`
    /// returns to when closed.
    ///
    /// If the terminal is too small for the split, only `id` is shown and
    /// the layout error is returned for reporting.
    pub fn show(
        &mut self,
        id: ViewId,
        from: Option<ViewId>,
        split: bool,
    ) -> Result<(), LayoutError> {
        match from {
            Some(from) if split && from != id => {
                self.visible = vec![from, id];
                self.focus = 1;
            }
            _ => {
                self.visible = vec![id];
                self.focus = 0;
            }
        }

        if let Some(from) = from {
            if from != id {
                self.view_mut(id).set_parent(Some(from));
            }
        }
        self.view_mut(id).set_closed(false);
        debug!(view = id.name(), visible = ?self.visible, "Show view");
        self.relayout()
    }

    /// Close the focused view and show its nearest open ancestor.
    ///
    /// Falls back to the base view when no ancestor is open. The base view
    /// itself cannot be closed. A load still running in the closed view is
    /// ended. Returns the view that is shown instead.
    pub fn close_focused(&mut self) -> Result<ViewId, CloseError> {
        let id = self.focused();
        if id == self.base {
            return Err(CloseError::BaseView(id.name()));
        }

        let target = self.open_ancestor(id).unwrap_or(self.base);
        let view = self.view_mut(id);
        if view.abandon() {
            debug!(view = id.name(), "Ended load of closed view");
        }
        view.set_closed(true);
        self.visible = vec![target];
        self.focus = 0;
        // A single pane always fits.
        let _ = self.relayout();
        debug!(closed = id.name(), shown = target.name(), "Close view");
        Ok(target)
    }

    fn open_ancestor(&self, id: ViewId) -> Option<ViewId> {
        let mut next = self.view(id).parent();
        // Each view can appear at most once on a chain without cycles.
        for _ in 0..ViewId::ALL.len() {
            let candidate = next?;
            if candidate != id && !self.view(candidate).is_closed() {
                return Some(candidate);
            }
            next = self.view(candidate).parent();
        }
        None
    }

    /// Move focus to the next visible view. Returns `false` with one view.
    pub fn cycle_focus(&mut self) -> bool {
        if self.visible.len() < 2 {
            return false;
        }
        self.focus = (self.focus + 1) % self.visible.len();
        true
    }

    /// Adopt a new terminal size and resize the visible views to it.
    pub fn resize(&mut self, area: Rect) -> Result<(), LayoutError> {
        self.area = area;
        self.relayout()
    }

    fn relayout(&mut self) -> Result<(), LayoutError> {
        match self.compute_panes() {
            Ok(panes) => {
                self.apply(&panes);
                Ok(())
            }
            Err(err) => {
                debug!(error = %err, "Split does not fit, showing focused view only");
                let focused = self.focused();
                self.visible = vec![focused];
                self.focus = 0;
                let panes = self.single_pane(focused);
                self.apply(&panes);
                Err(err)
            }
        }
    }

    fn apply(&mut self, panes: &[Pane]) {
        for pane in panes {
            let (height, width) = (pane.body.height as usize, pane.body.width as usize);
            self.view_mut(pane.id).set_size(height, width);
        }
    }

    /// Current panes for rendering.
    pub fn panes(&self) -> Vec<Pane> {
        self.compute_panes()
            .unwrap_or_else(|_| self.single_pane(self.focused()))
    }

    /// The status line row.
    pub fn status_area(&self) -> Rect {
        let area = self.area;
        let rows = STATUS_ROWS.min(area.height);
        Rect::new(area.x, area.y + area.height - rows, area.width, rows)
    }

    fn content_rows(&self) -> u16 {
        self.area.height.saturating_sub(STATUS_ROWS)
    }

    fn compute_panes(&self) -> Result<Vec<Pane>, LayoutError> {
        match self.visible.as_slice() {
            &[upper, lower] => {
                let rows = self.content_rows();
                let lower_rows = rows * 2 / 3;
                let upper_rows = rows - lower_rows;
                if upper_rows < MIN_PANE_ROWS || lower_rows < MIN_PANE_ROWS {
                    return Err(LayoutError::TooSmall {
                        rows,
                        needed: 2 * MIN_PANE_ROWS,
                    });
                }
                Ok(vec![
                    self.pane(upper, self.area.y, upper_rows),
                    self.pane(lower, self.area.y + upper_rows, lower_rows),
                ])
            }
            _ => Ok(self.single_pane(self.focused())),
        }
    }

    fn single_pane(&self, id: ViewId) -> Vec<Pane> {
        vec![self.pane(id, self.area.y, self.content_rows())]
    }

    fn pane(&self, id: ViewId, y: u16, rows: u16) -> Pane {
        let body_rows = rows.saturating_sub(1);
        Pane {
            id,
            body: Rect::new(self.area.x, y, self.area.width, body_rows),
            title: Rect::new(self.area.x, y + body_rows, self.area.width, rows.min(1)),
        }
    }
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
