//! Classified lines and the prefix classifier.
//!
//! Every line a view holds carries a [`LineType`], which selects its style at
//! render time. Raw text from the history tool is classified by [`classify`],
//! a pure first-match lookup over a fixed, ordered prefix table.

use super::commit::Commit;
use std::fmt;

// ===== LineType =====

/// Semantic classification of a line, used to pick its style.
///
/// The first group of variants is produced by [`classify`]; the remaining
/// ones have no prefix and are only used while rendering (cursor, titles,
/// status line and the columns of the main view).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LineType {
    /// `diff --git` file header.
    DiffHeader,
    /// `@@` hunk header.
    DiffChunk,
    /// Added line.
    DiffAdd,
    /// Removed line.
    DiffDel,
    /// `index` line.
    DiffIndex,
    /// `old mode` line.
    DiffOldMode,
    /// `new mode` line.
    DiffNewMode,
    /// `copy from` line.
    DiffCopyFrom,
    /// `copy to` line.
    DiffCopyTo,
    /// `rename from` line.
    DiffRenameFrom,
    /// `rename to` line.
    DiffRenameTo,
    /// `similarity` line.
    DiffSimilarity,
    /// `dissimilarity` line.
    DiffDissimilarity,
    /// `diff-tree` line.
    DiffTree,
    /// Pretty-printed `Author:` line.
    PpAuthor,
    /// Pretty-printed `Commit:` line.
    PpCommit,
    /// Pretty-printed `Merge:` line.
    PpMerge,
    /// Pretty-printed `Date:` line.
    PpDate,
    /// Pretty-printed `AuthorDate:` line.
    PpAdate,
    /// Pretty-printed `CommitDate:` line.
    PpCdate,
    /// Raw `commit` header.
    Commit,
    /// Raw `parent` header.
    Parent,
    /// Raw `tree` header.
    Tree,
    /// Raw `author` header.
    Author,
    /// Raw `committer` header.
    Committer,
    /// `Signed-off-by:` trailer.
    Signoff,
    /// Anything unclassified.
    Default,
    /// The line under the cursor.
    Cursor,
    /// Status line.
    Status,
    /// Title of an unfocused view.
    TitleBlur,
    /// Title of the focused view.
    TitleFocus,
    /// Date column of the main view.
    MainDate,
    /// Author column of the main view.
    MainAuthor,
    /// Subject column of the main view.
    MainCommit,
    /// Column delimiter of the main view.
    MainDelim,
    /// Tag labels in the main view.
    MainTag,
    /// Branch and other ref labels in the main view.
    MainRef,
}

impl LineType {
    /// Every line type, in declaration order.
    pub const ALL: &'static [LineType] = &[
        LineType::DiffHeader,
        LineType::DiffChunk,
        LineType::DiffAdd,
        LineType::DiffDel,
        LineType::DiffIndex,
        LineType::DiffOldMode,
        LineType::DiffNewMode,
        LineType::DiffCopyFrom,
        LineType::DiffCopyTo,
        LineType::DiffRenameFrom,
        LineType::DiffRenameTo,
        LineType::DiffSimilarity,
        LineType::DiffDissimilarity,
        LineType::DiffTree,
        LineType::PpAuthor,
        LineType::PpCommit,
        LineType::PpMerge,
        LineType::PpDate,
        LineType::PpAdate,
        LineType::PpCdate,
        LineType::Commit,
        LineType::Parent,
        LineType::Tree,
        LineType::Author,
        LineType::Committer,
        LineType::Signoff,
        LineType::Default,
        LineType::Cursor,
        LineType::Status,
        LineType::TitleBlur,
        LineType::TitleFocus,
        LineType::MainDate,
        LineType::MainAuthor,
        LineType::MainCommit,
        LineType::MainDelim,
        LineType::MainTag,
        LineType::MainRef,
    ];

    /// Area name used by the colour configuration, e.g. `diff-header`.
    pub fn name(self) -> &'static str {
        match self {
            LineType::DiffHeader => "diff-header",
            LineType::DiffChunk => "diff-chunk",
            LineType::DiffAdd => "diff-add",
            LineType::DiffDel => "diff-del",
            LineType::DiffIndex => "diff-index",
            LineType::DiffOldMode => "diff-oldmode",
            LineType::DiffNewMode => "diff-newmode",
            LineType::DiffCopyFrom => "diff-copy-from",
            LineType::DiffCopyTo => "diff-copy-to",
            LineType::DiffRenameFrom => "diff-rename-from",
            LineType::DiffRenameTo => "diff-rename-to",
            LineType::DiffSimilarity => "diff-similarity",
            LineType::DiffDissimilarity => "diff-dissimilarity",
            LineType::DiffTree => "diff-tree",
            LineType::PpAuthor => "pp-author",
            LineType::PpCommit => "pp-commit",
            LineType::PpMerge => "pp-merge",
            LineType::PpDate => "pp-date",
            LineType::PpAdate => "pp-adate",
            LineType::PpCdate => "pp-cdate",
            LineType::Commit => "commit",
            LineType::Parent => "parent",
            LineType::Tree => "tree",
            LineType::Author => "author",
            LineType::Committer => "committer",
            LineType::Signoff => "signoff",
            LineType::Default => "default",
            LineType::Cursor => "cursor",
            LineType::Status => "status",
            LineType::TitleBlur => "title-blur",
            LineType::TitleFocus => "title-focus",
            LineType::MainDate => "main-date",
            LineType::MainAuthor => "main-author",
            LineType::MainCommit => "main-commit",
            LineType::MainDelim => "main-delim",
            LineType::MainTag => "main-tag",
            LineType::MainRef => "main-ref",
        }
    }

    /// Look up a line type by its area name.
    ///
    /// Matching ignores ASCII case and accepts `_` or `.` in place of `-`,
    /// so `Diff_Header` and `diff.header` both resolve to [`LineType::DiffHeader`].
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized: String = name
            .trim()
            .chars()
            .map(|c| match c {
                '_' | '.' => '-',
                c => c.to_ascii_lowercase(),
            })
            .collect();

        LineType::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == normalized)
    }
}

impl fmt::Display for LineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ===== Classifier =====

/// Ordered prefix rules. The first matching prefix wins.
const RULES: &[(&str, LineType)] = &[
    ("diff --git ", LineType::DiffHeader),
    ("@@", LineType::DiffChunk),
    ("+", LineType::DiffAdd),
    ("-", LineType::DiffDel),
    ("index ", LineType::DiffIndex),
    ("old file mode ", LineType::DiffOldMode),
    ("new file mode ", LineType::DiffNewMode),
    ("copy from", LineType::DiffCopyFrom),
    ("copy to", LineType::DiffCopyTo),
    ("rename from", LineType::DiffRenameFrom),
    ("rename to", LineType::DiffRenameTo),
    ("similarity ", LineType::DiffSimilarity),
    ("dissimilarity ", LineType::DiffDissimilarity),
    ("diff-tree ", LineType::DiffTree),
    ("Author: ", LineType::PpAuthor),
    ("Commit: ", LineType::PpCommit),
    ("Merge: ", LineType::PpMerge),
    ("Date:   ", LineType::PpDate),
    ("AuthorDate: ", LineType::PpAdate),
    ("CommitDate: ", LineType::PpCdate),
    ("commit ", LineType::Commit),
    ("parent ", LineType::Parent),
    ("tree ", LineType::Tree),
    ("author ", LineType::Author),
    ("committer ", LineType::Committer),
    ("    Signed-off-by", LineType::Signoff),
];

/// Classify a raw line of history-tool output.
///
/// Total and deterministic: unmatched input falls back to [`LineType::Default`].
pub fn classify(text: &str) -> LineType {
    RULES
        .iter()
        .find(|(prefix, _)| text.starts_with(prefix))
        .map(|(_, kind)| *kind)
        .unwrap_or(LineType::Default)
}

/// The prefix that [`classify`] matched for `kind`, if it has one.
pub fn prefix_of(kind: LineType) -> Option<&'static str> {
    RULES
        .iter()
        .find(|(_, rule_kind)| *rule_kind == kind)
        .map(|(prefix, _)| *prefix)
}

// ===== Line =====

/// Content-kind specific payload of a line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineData {
    /// Raw text of a pager line.
    Text(String),
    /// Assembled commit record of a main-view line.
    Commit(Box<Commit>),
}

/// A classified unit of content owned by a line buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Classification used for styling.
    pub kind: LineType,
    /// Text or commit record.
    pub data: LineData,
}

impl Line {
    /// Create a text line with the given classification.
    pub fn text(kind: LineType, text: impl Into<String>) -> Self {
        Self {
            kind,
            data: LineData::Text(text.into()),
        }
    }

    /// Create a main-view line holding a commit record.
    pub fn commit(commit: Commit) -> Self {
        Self {
            kind: LineType::MainCommit,
            data: LineData::Commit(Box::new(commit)),
        }
    }

    /// Raw text, for pager lines.
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            LineData::Text(text) => Some(text),
            LineData::Commit(_) => None,
        }
    }

    /// Commit record, for main-view lines.
    pub fn as_commit(&self) -> Option<&Commit> {
        match &self.data {
            LineData::Commit(commit) => Some(commit),
            LineData::Text(_) => None,
        }
    }

    /// Mutable commit record, while its headers are still arriving.
    pub fn as_commit_mut(&mut self) -> Option<&mut Commit> {
        match &mut self.data {
            LineData::Commit(commit) => Some(commit),
            LineData::Text(_) => None,
        }
    }

    /// Text searched by `/`: the raw text, or id, author and subject of a commit.
    pub fn search_text(&self) -> String {
        match &self.data {
            LineData::Text(text) => text.clone(),
            LineData::Commit(commit) => {
                format!("{} {} {}", commit.id, commit.author, commit.subject)
            }
        }
    }
}
