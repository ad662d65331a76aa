//! Append-only storage for a view's lines.

use crate::model::Line;

/// Ordered lines of one view.
///
/// Lines are only ever appended, except that the most recent line may be
/// updated in place while a multi-line record (a commit) is being assembled.
/// Clearing happens only when a view starts a fresh load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineBuffer {
    lines: Vec<Line>,
}

impl LineBuffer {
    /// An empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// No lines yet.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line at `index`.
    pub fn get(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    /// Last line.
    pub fn last(&self) -> Option<&Line> {
        self.lines.last()
    }

    /// Last line, mutably; records still being assembled live here.
    pub fn last_mut(&mut self) -> Option<&mut Line> {
        self.lines.last_mut()
    }

    /// Append a line.
    pub fn push(&mut self, line: Line) {
        self.lines.push(line);
    }

    /// Drop every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Line> {
        self.lines.iter()
    }
}

impl<'a> IntoIterator for &'a LineBuffer {
    type Item = &'a Line;
    type IntoIter = std::slice::Iter<'a, Line>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
