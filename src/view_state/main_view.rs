//! Main view content: one commit per line.
//!
//! Raw `git log --pretty=raw` output is folded into commit records. A
//! `commit` header starts a record, `parent` and `author` headers fill it
//! and the first message line becomes its subject. Everything else is
//! consumed without producing lines.

use super::buffer::LineBuffer;
use super::env::Env;
use super::kind::put;
use crate::model::{classify, Commit, Line, LineType};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use unicode_width::UnicodeWidthChar;

/// Width of the date column, including the gap after it.
pub const DATE_COLS: usize = 17;
/// Width of the author column, including the gap after it.
pub const AUTHOR_COLS: usize = 20;
/// chrono format of the date column.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

const DELIMITER: &str = "├";
const TRIM_MARKER: &str = "~";

/// Absorb one raw `--pretty=raw` line, returning how many lines were appended.
pub fn parse_line(buffer: &mut LineBuffer, text: &str) -> usize {
    match classify(text) {
        LineType::Commit => {
            let id = text["commit ".len()..]
                .split_whitespace()
                .next()
                .unwrap_or_default();
            buffer.push(Line::commit(Commit::new(id)));
            1
        }
        LineType::Parent => {
            if let Some(commit) = last_commit(buffer) {
                let parent = text["parent ".len()..].trim();
                commit.parents.push(parent.to_string());
            }
            0
        }
        LineType::Author => {
            if let Some(commit) = last_commit(buffer) {
                commit.set_author(&text["author ".len()..]);
            }
            0
        }
        _ if is_message_line(text) => {
            if let Some(commit) = last_commit(buffer) {
                commit.offer_subject(text);
            }
            0
        }
        _ => 0,
    }
}

/// Message lines are indented by four spaces; headers like `tree` and
/// `committer` are not indented at all.
fn is_message_line(text: &str) -> bool {
    text.strip_prefix("    ")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| !c.is_whitespace())
}

fn last_commit(buffer: &mut LineBuffer) -> Option<&mut Commit> {
    buffer.last_mut().and_then(Line::as_commit_mut)
}

/// Draw date, author, refs and subject columns.
pub fn draw(line: &Line, area: Rect, buf: &mut Buffer, env: &Env, selected: bool) -> bool {
    let Some(commit) = line.as_commit() else {
        return false;
    };

    let cursor = env.styles.lookup(LineType::Cursor);
    if selected {
        buf.set_style(area, cursor);
    }
    let style_for = |kind: LineType| -> Style {
        if selected {
            cursor
        } else {
            env.styles.lookup(kind)
        }
    };

    let mut col = 0;
    if let Some(date) = commit.date {
        let text = date.format(DATE_FORMAT).to_string();
        put(buf, area, col, &text, style_for(LineType::MainDate));
    }
    col += DATE_COLS;

    let (author, trimmed) = truncate_author(&commit.author, AUTHOR_COLS - 2, env.options.utf8);
    let written = put(buf, area, col, author, style_for(LineType::MainAuthor));
    if trimmed {
        put(buf, area, col + written, TRIM_MARKER, style_for(LineType::MainDelim));
    }
    col += AUTHOR_COLS;

    put(buf, area, col, DELIMITER, style_for(LineType::MainDelim));
    col += 2;

    for reference in env.refs.get(&commit.id) {
        let kind = if reference.is_tag {
            LineType::MainTag
        } else {
            LineType::MainRef
        };
        let label = format!("[{}]", reference.name);
        col += put(buf, area, col, &label, style_for(kind));
        col += put(buf, area, col, " ", style_for(LineType::Default));
    }

    put(buf, area, col, &commit.subject, style_for(LineType::MainCommit));
    true
}

/// Cut `name` to at most `max` columns.
///
/// With `utf8` the display width of each character counts; otherwise the
/// byte length does. Returns the kept prefix and whether anything was cut.
pub fn truncate_author(name: &str, max: usize, utf8: bool) -> (&str, bool) {
    if utf8 {
        let mut width = 0;
        for (index, c) in name.char_indices() {
            width += c.width().unwrap_or(0);
            if width > max {
                return (&name[..index], true);
            }
        }
        (name, false)
    } else if name.len() > max {
        let mut end = max;
        while !name.is_char_boundary(end) {
            end -= 1;
        }
        (&name[..end], true)
    } else {
        (name, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RefSet;

    fn parse_all(text: &str) -> LineBuffer {
        let mut buffer = LineBuffer::new();
        for line in text.lines() {
            parse_line(&mut buffer, line);
        }
        buffer
    }

    fn row_text(buf: &Buffer) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, 0)].symbol())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    const TWO_COMMITS: &str = "\
commit aaaa
tree 1111
parent bbbb
author A U Thor <a@x> 1136000000 +0100
committer A U Thor <a@x> 1136000000 +0100

    Fix crash on resize

    Long explanation.
commit bbbb
tree 2222
author Jürgen <j@x> 1135000000 +0000
committer Jürgen <j@x> 1135000000 +0000

    Initial import
";

    #[test]
    fn assembles_one_line_per_commit() {
        let buffer = parse_all(TWO_COMMITS);
        assert_eq!(buffer.len(), 2);

        let first = buffer.get(0).and_then(Line::as_commit).unwrap();
        assert_eq!(first.id, "aaaa");
        assert_eq!(first.parents, ["bbbb"]);
        assert_eq!(first.author, "A U Thor");
        assert_eq!(first.subject, "Fix crash on resize");
        assert!(first.date.is_some());

        let second = buffer.get(1).and_then(Line::as_commit).unwrap();
        assert_eq!(second.author, "Jürgen");
        assert_eq!(second.subject, "Initial import");
        assert!(second.parents.is_empty());
    }

    #[test]
    fn header_lines_before_first_commit_are_ignored() {
        let buffer = parse_all("author X <x> 1 +0000\n    stray\ncommit cccc\n");
        assert_eq!(buffer.len(), 1);
        let commit = buffer.get(0).and_then(Line::as_commit).unwrap();
        assert_eq!(commit.author, "");
        assert_eq!(commit.subject, "");
    }

    #[test]
    fn subject_needs_four_space_indent() {
        let buffer = parse_all("commit abc\n  two spaces\n     five spaces\n    Real subject\n");
        let commit = buffer.get(0).and_then(Line::as_commit).unwrap();
        assert_eq!(commit.subject, "Real subject");
    }

    #[test]
    fn parse_reports_added_lines() {
        let mut buffer = LineBuffer::new();
        assert_eq!(parse_line(&mut buffer, "commit abc"), 1);
        assert_eq!(parse_line(&mut buffer, "parent def"), 0);
        assert_eq!(parse_line(&mut buffer, "    subject"), 0);
    }

    #[test]
    fn truncate_author_by_display_width() {
        assert_eq!(truncate_author("Short", 18, true), ("Short", false));
        assert_eq!(
            truncate_author("Bartholomew Montgomery", 18, true),
            ("Bartholomew Montgo", true)
        );
        // Each CJK character is two columns wide.
        assert_eq!(truncate_author("山田太郎山田太郎山田太郎", 5, true), ("山田", true));
    }

    #[test]
    fn truncate_author_by_bytes_without_utf8() {
        assert_eq!(truncate_author("abcdef", 4, false), ("abcd", true));
        // "é" is two bytes; never split it.
        assert_eq!(truncate_author("aéb", 2, false), ("a", true));
    }

    #[test]
    fn draw_lays_out_columns_with_refs() {
        let buffer = parse_all(TWO_COMMITS);
        let line = buffer.get(0).unwrap();
        let (refs, _) = RefSet::from_listing("aaaa\trefs/heads/master\naaaa\trefs/tags/v1^{}\n");
        let env = Env {
            refs,
            ..Env::default()
        };

        let area = Rect::new(0, 0, 80, 1);
        let mut buf = Buffer::empty(area);
        assert!(draw(line, area, &mut buf, &env, false));

        let text = row_text(&buf);
        assert!(text.starts_with("2005-12-31 04:33"), "{text}");
        assert_eq!(&text[DATE_COLS..DATE_COLS + 8], "A U Thor");
        assert!(text.contains("[master] [v1] Fix crash on resize"), "{text}");
    }

    #[test]
    fn draw_marks_truncated_author() {
        let mut commit = Commit::new("abc");
        commit.author = "Bartholomew Montgomery".to_string();
        let line = Line::commit(commit);
        let area = Rect::new(0, 0, 60, 1);
        let mut buf = Buffer::empty(area);
        draw(&line, area, &mut buf, &Env::default(), false);

        let author: String = (DATE_COLS..DATE_COLS + 19)
            .map(|x| buf[(x as u16, 0)].symbol().to_string())
            .collect();
        assert_eq!(author, "Bartholomew Montgo~");
    }
}
