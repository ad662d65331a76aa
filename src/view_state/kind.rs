//! Content kinds and their per-kind operations.
//!
//! A view's kind decides how raw lines are parsed, how a line is drawn and
//! what Enter does on it. The set of kinds is closed, so this is an enum
//! with a `match` per operation rather than a trait object.

use super::buffer::LineBuffer;
use super::env::Env;
use super::view::ViewId;
use super::{main_view, pager};
use crate::model::{Line, LineType};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;

/// How a view turns raw output into lines and draws them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// Classified text lines.
    Pager,
    /// One commit record per line, built from raw commit headers.
    Main,
}

/// What Enter on a line asks the display to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnterAction {
    /// Scroll the view one line down.
    ScrollDown,
    /// Open the diff for commit `id`; scroll the entered view afterwards if asked.
    OpenDiff {
        /// Commit to show.
        id: String,
        /// Scroll the entered view one line down afterwards.
        scroll_after: bool,
    },
}

impl ContentKind {
    /// Name of one line as shown in the title, e.g. `commit 3 of 10`.
    pub fn type_name(self) -> &'static str {
        match self {
            ContentKind::Pager => "line",
            ContentKind::Main => "commit",
        }
    }

    /// Absorb one raw line, returning how many lines were appended.
    pub fn parse_line(self, buffer: &mut LineBuffer, text: &str) -> usize {
        match self {
            ContentKind::Pager => pager::parse_line(buffer, text),
            ContentKind::Main => main_view::parse_line(buffer, text),
        }
    }

    /// Draw `line` into the one-row `area`.
    ///
    /// Returns `false` if the line does not belong to this kind.
    #[allow(clippy::too_many_arguments)]
    pub fn draw(
        self,
        line: &Line,
        lineno: usize,
        line_count: usize,
        area: Rect,
        buf: &mut Buffer,
        env: &Env,
        selected: bool,
    ) -> bool {
        match self {
            ContentKind::Pager => pager::draw(line, lineno, line_count, area, buf, env, selected),
            ContentKind::Main => main_view::draw(line, area, buf, env, selected),
        }
    }

    /// Decide what Enter on `line` of view `view` does.
    pub fn enter(self, view: ViewId, line: &Line) -> EnterAction {
        match self {
            ContentKind::Main => match line.as_commit() {
                Some(commit) => EnterAction::OpenDiff {
                    id: commit.id.clone(),
                    scroll_after: false,
                },
                None => EnterAction::ScrollDown,
            },
            ContentKind::Pager => {
                let opens_diff = matches!(view, ViewId::Log | ViewId::Pager);
                match self.line_ref(line) {
                    Some(id) if opens_diff => EnterAction::OpenDiff {
                        id,
                        scroll_after: true,
                    },
                    _ => EnterAction::ScrollDown,
                }
            }
        }
    }

    /// Commit id a line refers to, if any.
    pub fn line_ref(self, line: &Line) -> Option<String> {
        match self {
            ContentKind::Main => line.as_commit().map(|commit| commit.id.clone()),
            ContentKind::Pager => {
                if line.kind != LineType::Commit {
                    return None;
                }
                line.as_text()?
                    .strip_prefix("commit ")?
                    .split_whitespace()
                    .next()
                    .map(str::to_string)
            }
        }
    }
}

/// Write `text` at column `col` of a one-row area, clipped to its width.
///
/// Returns the number of columns written.
pub(super) fn put(buf: &mut Buffer, area: Rect, col: usize, text: &str, style: Style) -> usize {
    let width = area.width as usize;
    if col >= width || text.is_empty() {
        return 0;
    }
    let x = area.x + col as u16;
    let (end, _) = buf.set_stringn(x, area.y, text, width - col, style);
    end.saturating_sub(x) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Commit;

    #[test]
    fn enter_on_commit_in_main_opens_diff_without_scrolling() {
        let line = Line::commit(Commit::new("abc"));
        assert_eq!(
            ContentKind::Main.enter(ViewId::Main, &line),
            EnterAction::OpenDiff {
                id: "abc".to_string(),
                scroll_after: false
            }
        );
    }

    #[test]
    fn enter_on_commit_line_in_log_opens_diff_and_scrolls() {
        let line = Line::text(LineType::Commit, "commit def (from abc)");
        assert_eq!(
            ContentKind::Pager.enter(ViewId::Log, &line),
            EnterAction::OpenDiff {
                id: "def".to_string(),
                scroll_after: true
            }
        );
    }

    #[test]
    fn enter_in_diff_view_only_scrolls() {
        let line = Line::text(LineType::Commit, "commit def");
        assert_eq!(
            ContentKind::Pager.enter(ViewId::Diff, &line),
            EnterAction::ScrollDown
        );
        let text = Line::text(LineType::Default, "plain");
        assert_eq!(
            ContentKind::Pager.enter(ViewId::Log, &text),
            EnterAction::ScrollDown
        );
    }

    #[test]
    fn put_clips_and_reports_width() {
        let area = Rect::new(2, 0, 6, 1);
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 1));
        assert_eq!(put(&mut buf, area, 0, "abc", Style::default()), 3);
        assert_eq!(put(&mut buf, area, 4, "xyz", Style::default()), 2);
        assert_eq!(put(&mut buf, area, 6, "never", Style::default()), 0);
        assert_eq!(buf[(2, 0)].symbol(), "a");
        assert_eq!(buf[(7, 0)].symbol(), "y");
    }
}
