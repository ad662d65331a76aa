//! Pager content: one classified line per raw line.
//!
//! Used by the diff, log, help and pager views.

use super::buffer::LineBuffer;
use super::env::Env;
use super::kind::put;
use crate::model::{classify, Line, LineType};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use unicode_width::UnicodeWidthChar;

/// Minimum width of the line number column.
const MIN_NUMBER_DIGITS: usize = 3;

/// Append one raw line, returning how many lines were added.
///
/// Runs of empty lines collapse to one.
pub fn parse_line(buffer: &mut LineBuffer, text: &str) -> usize {
    if text.is_empty() && buffer.last().and_then(Line::as_text) == Some("") {
        return 0;
    }
    buffer.push(Line::text(classify(text), text));
    1
}

/// Draw one pager line into a single-row `area`.
pub fn draw(
    line: &Line,
    lineno: usize,
    line_count: usize,
    area: Rect,
    buf: &mut Buffer,
    env: &Env,
    selected: bool,
) -> bool {
    let Some(text) = line.as_text() else {
        return false;
    };

    let style = if selected {
        let cursor = env.styles.lookup(LineType::Cursor);
        buf.set_style(area, cursor);
        cursor
    } else {
        env.styles.lookup(line.kind)
    };

    let mut col = 0;
    if env.options.line_numbers {
        let number_style = if selected {
            style
        } else {
            env.styles.lookup(LineType::Default)
        };
        let label = line_number_label(
            lineno,
            digits(line_count).max(MIN_NUMBER_DIGITS),
            env.options.line_number_interval,
        );
        col += put(buf, area, col, &label, number_style);
        col += put(buf, area, col, ": ", number_style);
    }

    put(buf, area, col, &expand_tabs(text, env.options.tab_size), style);
    true
}

/// Number column for zero-based `lineno`: the first line and every
/// `interval`th line get their number, the rest are blank.
pub fn line_number_label(lineno: usize, width: usize, interval: usize) -> String {
    let number = lineno + 1;
    if number == 1 || number % interval.max(1) == 0 {
        format!("{number:>width$}")
    } else {
        " ".repeat(width)
    }
}

fn digits(mut n: usize) -> usize {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}

/// Replace tabs with spaces up to the next multiple of `tab_size`.
pub fn expand_tabs(text: &str, tab_size: usize) -> String {
    if !text.contains('\t') {
        return text.to_string();
    }
    let tab_size = tab_size.max(1);
    let mut out = String::with_capacity(text.len() + tab_size);
    let mut col = 0;
    for c in text.chars() {
        if c == '\t' {
            let spaces = tab_size - col % tab_size;
            out.extend(std::iter::repeat(' ').take(spaces));
            col += spaces;
        } else {
            out.push(c);
            col += c.width().unwrap_or(0);
        }
    }
    out
}
