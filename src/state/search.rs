//! Search within a view.
//!
//! Matching is a case-sensitive substring test against each line's
//! rendered text. Stepping past the last (or first) line wraps around.

use crate::view_state::View;

// ===== SearchQuery =====

/// Validated search query. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Returns None if `raw` is empty or whitespace-only.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let s = raw.into();
        if s.trim().is_empty() {
            None
        } else {
            Some(Self(s))
        }
    }

    /// The query text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The last submitted query, shared by all views.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    query: Option<SearchQuery>,
}

impl SearchState {
    /// Last submitted query.
    pub fn query(&self) -> Option<&SearchQuery> {
        self.query.as_ref()
    }

    /// Replace the last query.
    pub fn set_query(&mut self, query: SearchQuery) {
        self.query = Some(query);
    }
}

/// Which way a search moves from the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the end.
    Forward,
    /// Towards the start.
    Backward,
}

/// A matching line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchMatch {
    /// Index of the line.
    pub index: usize,
    /// The search passed the end (or start) of the view to get here.
    pub wrapped: bool,
}

/// Find the next line matching `query`, starting after (or before) `from`.
///
/// The line at `from` itself is checked last, so repeating a search with
/// a single match lands on it again as a wrapped match.
pub fn find(view: &View, query: &SearchQuery, from: usize, direction: Direction) -> Option<SearchMatch> {
    let count = view.line_count();
    if count == 0 {
        return None;
    }
    let from = from.min(count - 1);
    let needle = query.as_str();

    (1..=count).find_map(|step| {
        let (index, wrapped) = match direction {
            Direction::Forward => {
                let index = (from + step) % count;
                (index, from + step >= count)
            }
            Direction::Backward => {
                let index = (from + count - step) % count;
                (index, step > from)
            }
        };
        let line = view.lines().get(index)?;
        line.search_text()
            .contains(needle)
            .then_some(SearchMatch { index, wrapped })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Loader;
    use crate::view_state::{ViewId, ViewSource};

    fn pager(text: &str) -> View {
        let mut view = View::new(ViewId::Pager, ViewSource::Empty);
        view.begin(Loader::from_bytes("test", text.as_bytes().to_vec()), "");
        view.pump();
        view.end();
        view
    }

    fn query(s: &str) -> SearchQuery {
        SearchQuery::new(s).expect("valid query")
    }

    #[test]
    fn search_query_rejects_blank_input() {
        assert!(SearchQuery::new("").is_none());
        assert!(SearchQuery::new("  \t").is_none());
        assert_eq!(query(" x ").as_str(), " x ");
    }

    #[test]
    fn forward_search_skips_the_current_line() {
        let view = pager("foo\nbar\nfoo\n");
        assert_eq!(
            find(&view, &query("foo"), 0, Direction::Forward),
            Some(SearchMatch {
                index: 2,
                wrapped: false
            })
        );
    }

    #[test]
    fn forward_search_wraps_to_the_top() {
        let view = pager("foo\nbar\nbaz\n");
        assert_eq!(
            find(&view, &query("foo"), 1, Direction::Forward),
            Some(SearchMatch {
                index: 0,
                wrapped: true
            })
        );
    }

    #[test]
    fn backward_search_wraps_to_the_bottom() {
        let view = pager("foo\nbar\nbaz\n");
        assert_eq!(
            find(&view, &query("baz"), 1, Direction::Backward),
            Some(SearchMatch {
                index: 2,
                wrapped: true
            })
        );
        assert_eq!(
            find(&view, &query("foo"), 1, Direction::Backward),
            Some(SearchMatch {
                index: 0,
                wrapped: false
            })
        );
    }

    #[test]
    fn single_match_is_found_again_as_wrapped() {
        let view = pager("foo\nbar\n");
        assert_eq!(
            find(&view, &query("foo"), 0, Direction::Forward),
            Some(SearchMatch {
                index: 0,
                wrapped: true
            })
        );
    }

    #[test]
    fn search_is_case_sensitive() {
        let view = pager("Foo\nbar\n");
        assert_eq!(find(&view, &query("foo"), 0, Direction::Forward), None);
    }

    #[test]
    fn search_in_empty_view_finds_nothing() {
        let view = pager("");
        assert_eq!(find(&view, &query("x"), 0, Direction::Forward), None);
    }

    #[test]
    fn main_view_search_matches_subject_and_author() {
        let mut view = View::new(ViewId::Main, ViewSource::Empty);
        let raw = "commit aaa\nauthor Ann <a@x> 1 +0000\n\n    First change\n\
                   commit bbb\nauthor Bob <b@x> 1 +0000\n\n    Second change\n";
        view.begin(Loader::from_bytes("test", raw.as_bytes().to_vec()), "HEAD");
        view.pump();

        let hit = find(&view, &query("Second"), 0, Direction::Forward).map(|m| m.index);
        assert_eq!(hit, Some(1));
        let hit = find(&view, &query("Ann"), 1, Direction::Forward).map(|m| m.index);
        assert_eq!(hit, Some(0));
    }
}
