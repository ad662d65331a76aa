//! User requests independent of key bindings.

/// Domain-level requests that keys map to.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `Request` is handled by `KeyBindings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Request {
    // View switching
    /// Show the main (commit list) view. Default: m
    ViewMain,
    /// Show the diff view for the selected commit. Default: d
    ViewDiff,
    /// Show the log view. Default: l
    ViewLog,
    /// Show the help view. Default: h/?
    ViewHelp,
    /// Show the pager view. Default: p
    ViewPager,

    // View manipulation
    /// Open the selected line in the next view, or scroll a pager. Default: Enter
    Enter,
    /// Move the cursor down, re-entering the parent from a diff. Default: Down
    Next,
    /// Move the cursor up, re-entering the parent from a diff. Default: Up
    Previous,
    /// Cycle focus between displayed views. Default: Tab
    ViewNext,
    /// Close the focused view. Default: q
    ViewClose,
    /// Exit the program. Default: Q
    Quit,

    // Cursor navigation
    /// Default: k
    MoveUp,
    /// Default: j
    MoveDown,
    /// Default: PgUp/b/-
    MovePageUp,
    /// Default: PgDn/Space
    MovePageDown,
    /// Default: Home
    MoveFirstLine,
    /// Default: End
    MoveLastLine,

    // Scrolling
    /// Scroll one line up without moving the cursor unless it leaves the view. Default: Insert
    ScrollLineUp,
    /// Default: Delete
    ScrollLineDown,
    /// Default: w
    ScrollPageUp,
    /// Default: s
    ScrollPageDown,

    // Searching
    /// Start a search prompt. Default: /
    Search,
    /// Jump to the next match. Default: n
    FindNext,
    /// Jump to the previous match. Default: N
    FindPrevious,

    // Misc
    /// Prompt for a command to run in the pager view. Default: :
    Prompt,
    /// Stop all loading views. Default: z
    StopLoading,
    /// Reload the focused view. Default: R
    Reload,
    /// Show version information. Default: v
    ShowVersion,
    /// Toggle line numbers in pager views. Default: .
    ToggleLineNumbers,
    /// Redraw the whole screen. Default: Ctrl-L/r
    ScreenRedraw,
}

/// Section heading a request is listed under in the help view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestGroup {
    /// Opening the views.
    ViewSwitching,
    /// Entering, closing and cycling views.
    ViewManipulation,
    /// Moving the cursor.
    Cursor,
    /// Scrolling without the cursor.
    Scrolling,
    /// Searching.
    Searching,
    /// Everything else.
    Misc,
}

impl RequestGroup {
    /// Groups in help page order.
    pub const ALL: [RequestGroup; 6] = [
        RequestGroup::ViewSwitching,
        RequestGroup::ViewManipulation,
        RequestGroup::Cursor,
        RequestGroup::Scrolling,
        RequestGroup::Searching,
        RequestGroup::Misc,
    ];

    /// Heading shown in the help view.
    pub fn title(self) -> &'static str {
        match self {
            RequestGroup::ViewSwitching => "View switching",
            RequestGroup::ViewManipulation => "View manipulation",
            RequestGroup::Cursor => "Cursor navigation",
            RequestGroup::Scrolling => "Scrolling",
            RequestGroup::Searching => "Searching",
            RequestGroup::Misc => "Misc",
        }
    }
}

impl Request {
    /// Help section the request belongs to.
    pub fn group(self) -> RequestGroup {
        use Request::*;
        match self {
            ViewMain | ViewDiff | ViewLog | ViewHelp | ViewPager => RequestGroup::ViewSwitching,
            Enter | Next | Previous | ViewNext | ViewClose | Quit => RequestGroup::ViewManipulation,
            MoveUp | MoveDown | MovePageUp | MovePageDown | MoveFirstLine | MoveLastLine => {
                RequestGroup::Cursor
            }
            ScrollLineUp | ScrollLineDown | ScrollPageUp | ScrollPageDown => RequestGroup::Scrolling,
            Search | FindNext | FindPrevious => RequestGroup::Searching,
            Prompt | StopLoading | Reload | ShowVersion | ToggleLineNumbers | ScreenRedraw => {
                RequestGroup::Misc
            }
        }
    }

    /// One-line description shown in the help view.
    pub fn description(self) -> &'static str {
        use Request::*;
        match self {
            ViewMain => "Show main view",
            ViewDiff => "Show diff view",
            ViewLog => "Show log view",
            ViewHelp => "Show help page",
            ViewPager => "Show pager view",
            Enter => "Open selected line in the next view or scroll a pager",
            Next => "Move to next line, updating an open diff",
            Previous => "Move to previous line, updating an open diff",
            ViewNext => "Switch focus to the next displayed view",
            ViewClose => "Close the focused view",
            Quit => "Quit",
            MoveUp => "Move cursor one line up",
            MoveDown => "Move cursor one line down",
            MovePageUp => "Move cursor one page up",
            MovePageDown => "Move cursor one page down",
            MoveFirstLine => "Move cursor to the first line",
            MoveLastLine => "Move cursor to the last line",
            ScrollLineUp => "Scroll view one line up",
            ScrollLineDown => "Scroll view one line down",
            ScrollPageUp => "Scroll view one page up",
            ScrollPageDown => "Scroll view one page down",
            Search => "Search the focused view",
            FindNext => "Jump to the next search match",
            FindPrevious => "Jump to the previous search match",
            Prompt => "Run a command and show its output in the pager",
            StopLoading => "Stop all loading views",
            Reload => "Reload the focused view",
            ShowVersion => "Show version information",
            ToggleLineNumbers => "Toggle line numbers",
            ScreenRedraw => "Redraw the screen",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_group_has_a_distinct_title() {
        let mut titles: Vec<_> = RequestGroup::ALL.iter().map(|g| g.title()).collect();
        titles.sort_unstable();
        titles.dedup();
        assert_eq!(titles.len(), RequestGroup::ALL.len());
    }

    #[test]
    fn navigation_requests_are_grouped_together() {
        assert_eq!(Request::MoveUp.group(), RequestGroup::Cursor);
        assert_eq!(Request::ScrollPageDown.group(), RequestGroup::Scrolling);
        assert_eq!(Request::ViewLog.group(), RequestGroup::ViewSwitching);
    }
}
