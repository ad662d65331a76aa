//! Cursor movement and viewport scrolling.
//!
//! Moving changes the cursor and drags the viewport along when the cursor
//! would leave it. Scrolling changes the viewport and drags the cursor
//! along. Both refuse with a [`ScrollError`] at the ends of the content
//! instead of clamping silently, so the refusal can be reported.

use super::view::View;
use thiserror::Error;

/// Cursor movements; the viewport follows the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    /// One line up.
    Up,
    /// One line down.
    Down,
    /// One page up.
    PageUp,
    /// One page down.
    PageDown,
    /// To the first line.
    FirstLine,
    /// To the last line.
    LastLine,
}

/// Viewport scrolls; the cursor stays on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scroll {
    /// One line up.
    LineUp,
    /// One line down.
    LineDown,
    /// One page up.
    PageUp,
    /// One page down.
    PageDown,
}

/// A movement or scroll that would leave the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScrollError {
    /// Cursor already on the first line.
    #[error("Cannot move beyond the first line")]
    MoveBeyondFirst,
    /// Cursor already on the last line.
    #[error("Cannot move beyond the last line")]
    MoveBeyondLast,
    /// Viewport already at the top.
    #[error("Cannot scroll beyond the first line")]
    ScrollBeyondFirst,
    /// Viewport already at the bottom.
    #[error("Cannot scroll beyond the last line")]
    ScrollBeyondLast,
}

impl View {
    /// Rows usable for content; a view not laid out yet counts as one row.
    fn page(&self) -> usize {
        self.height.max(1)
    }

    /// Move the cursor, scrolling the viewport when it leaves it.
    pub fn move_cursor(&mut self, movement: Movement) -> Result<(), ScrollError> {
        let count = self.lines.len() as isize;
        let cursor = self.cursor as isize;
        let height = self.page() as isize;
        let offset = self.offset as isize;

        let steps: isize = match movement {
            Movement::FirstLine => -cursor,
            Movement::LastLine => count - cursor - 1,
            Movement::PageUp => -height.min(cursor),
            Movement::PageDown => {
                if cursor + height >= count {
                    count - cursor - 1
                } else {
                    height
                }
            }
            Movement::Up => -1,
            Movement::Down => 1,
        };

        if steps <= 0 && cursor == 0 {
            return Err(ScrollError::MoveBeyondFirst);
        }
        if steps >= 0 && cursor + 1 >= count {
            return Err(ScrollError::MoveBeyondLast);
        }

        let target = cursor + steps;
        self.cursor = target as usize;

        if target < offset || target >= offset + height {
            let scroll = if steps < 0 && -steps > offset {
                -offset
            } else if steps > 0 && target == count - 1 && count > height {
                // Land with the last line at the bottom of the viewport.
                let to_end = count - offset - 1;
                if to_end >= height {
                    to_end - (height - 1)
                } else {
                    to_end
                }
            } else {
                steps
            };
            self.shift_viewport(scroll);
        }
        Ok(())
    }

    /// Scroll the viewport, dragging the cursor along when it leaves it.
    pub fn scroll(&mut self, scroll: Scroll) -> Result<(), ScrollError> {
        let count = self.lines.len();
        let height = self.page();

        match scroll {
            Scroll::LineDown | Scroll::PageDown => {
                let wanted = if scroll == Scroll::PageDown { height } else { 1 };
                let lines = wanted.min(count.saturating_sub(self.offset));
                if lines == 0 || self.offset + height >= count {
                    return Err(ScrollError::ScrollBeyondLast);
                }
                self.shift_viewport(lines as isize);
            }
            Scroll::LineUp | Scroll::PageUp => {
                let wanted = if scroll == Scroll::PageUp { height } else { 1 };
                let lines = wanted.min(self.offset);
                if lines == 0 {
                    return Err(ScrollError::ScrollBeyondFirst);
                }
                self.shift_viewport(-(lines as isize));
            }
        }
        Ok(())
    }

    /// Shift the viewport by `lines` and pull the cursor back inside it.
    fn shift_viewport(&mut self, lines: isize) {
        let count = self.lines.len();
        let height = self.page();
        let last_line = count.saturating_sub(1);

        let offset = self.offset as isize + lines;
        self.offset = (offset.max(0) as usize).min(last_line);

        if self.cursor < self.offset {
            self.cursor = self.offset;
        } else if self.cursor >= self.offset + height {
            self.cursor = self.offset + height - 1;
        }
        self.cursor = self.cursor.min(last_line);
    }

    /// Restore the viewport invariant after a resize or external cursor change.
    pub fn ensure_cursor_visible(&mut self) {
        let count = self.lines.len();
        if count == 0 {
            self.offset = 0;
            self.cursor = 0;
            return;
        }
        let height = self.page();
        self.cursor = self.cursor.min(count - 1);
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + height {
            self.offset = self.cursor + 1 - height;
        }
    }
}

#[cfg(test)]
#[path = "scroll_tests.rs"]
mod tests;
