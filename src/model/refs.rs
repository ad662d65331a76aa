//! Branch and tag names keyed by the commit they point at.
//!
//! The listing comes from `git ls-remote .`, one `<id>\t<name>` pair per line.
//! Annotated tags appear twice: once for the tag object and once, suffixed
//! with `^{}`, for the commit it peels to. Only the peeled entry is kept so
//! the tag decorates the commit shown in the main view.

use super::error::ParseError;
use std::collections::HashMap;

const TAG_PREFIX: &str = "refs/tags/";
const HEAD_PREFIX: &str = "refs/heads/";

/// A named reference to a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ref {
    /// Commit the ref points at.
    pub id: String,
    /// Short name, without `refs/heads/` or `refs/tags/`.
    pub name: String,
    /// Whether the ref came from `refs/tags/`.
    pub is_tag: bool,
}

/// Mapping from commit id to the refs pointing at it, in listing order.
#[derive(Debug, Clone, Default)]
pub struct RefSet {
    by_id: HashMap<String, Vec<Ref>>,
}

impl RefSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from a full listing.
    ///
    /// Malformed lines are skipped and returned alongside the set so callers
    /// can log them; they never abort the read.
    pub fn from_listing(listing: &str) -> (Self, Vec<ParseError>) {
        let mut refs = Self::new();
        let mut errors = Vec::new();
        for line in listing.lines() {
            if let Err(err) = refs.read_entry(line) {
                errors.push(err);
            }
        }
        (refs, errors)
    }

    /// Add one listing line.
    ///
    /// Blank lines, `HEAD`, non-peeled tag objects and refs outside
    /// `refs/heads/` and `refs/tags/` keep their full name or are skipped
    /// as described in the module docs.
    pub fn read_entry(&mut self, line: &str) -> Result<(), ParseError> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return Ok(());
        }

        let malformed = || ParseError::MalformedRef {
            line: line.to_string(),
        };
        let (id, name) = line.split_once('\t').ok_or_else(malformed)?;
        let id = id.trim();
        let name = name.trim();
        if id.is_empty() || name.is_empty() {
            return Err(malformed());
        }

        let mut name = name;
        let mut peeled = false;
        if name.ends_with('}') {
            if let Some(caret) = name.rfind('^') {
                if caret > 0 {
                    peeled = true;
                    name = &name[..caret];
                }
            }
        }

        let (name, is_tag) = if let Some(tag) = name.strip_prefix(TAG_PREFIX) {
            if !peeled {
                return Ok(());
            }
            (tag, true)
        } else if let Some(branch) = name.strip_prefix(HEAD_PREFIX) {
            (branch, false)
        } else if name == "HEAD" {
            return Ok(());
        } else {
            (name, false)
        };

        let entries = self.by_id.entry(id.to_string()).or_default();
        if !entries.iter().any(|r| r.name == name && r.is_tag == is_tag) {
            entries.push(Ref {
                id: id.to_string(),
                name: name.to_string(),
                is_tag,
            });
        }
        Ok(())
    }

    /// Refs pointing at `id`, empty when there are none.
    pub fn get(&self, id: &str) -> &[Ref] {
        self.by_id.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of refs across all commits.
    pub fn len(&self) -> usize {
        self.by_id.values().map(Vec::len).sum()
    }

    /// No refs at all.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
