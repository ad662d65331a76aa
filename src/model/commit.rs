//! Commit records assembled by the main view.

use chrono::{DateTime, FixedOffset};

/// Placeholder used when an ident line carries no name.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// A commit as shown on one line of the main view.
///
/// Records are built incrementally from `--pretty=raw` output: the `commit`
/// header creates the record, `author` fills in name and date, and the first
/// message line becomes the subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Full commit id.
    pub id: String,
    /// Parent ids in header order.
    pub parents: Vec<String>,
    /// Author name without the email.
    pub author: String,
    /// Author date in the author's time zone.
    pub date: Option<DateTime<FixedOffset>>,
    /// First line of the message.
    pub subject: String,
}

impl Commit {
    /// A record with only its id known.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parents: Vec::new(),
            author: String::new(),
            date: None,
            subject: String::new(),
        }
    }

    /// Apply the text following `author ` on a raw header line.
    pub fn set_author(&mut self, ident: &str) {
        let (name, date) = parse_ident(ident);
        self.author = name;
        self.date = date;
    }

    /// Offer a message line as subject.
    ///
    /// Only the first non-blank line after the headers is taken; leading
    /// whitespace is stripped. Returns `true` if the line became the subject.
    pub fn offer_subject(&mut self, line: &str) -> bool {
        if !self.subject.is_empty() {
            return false;
        }
        let trimmed = line.trim_start();
        if trimmed.is_empty() {
            return false;
        }
        self.subject = trimmed.to_string();
        true
    }
}

/// Split an ident such as `A U Thor <a@x> 1136000000 +0100` into name and date.
///
/// The name is everything before `<`, trimmed, or [`UNKNOWN_AUTHOR`] when that is
/// empty. The date is the epoch seconds after `>` shifted into the given zone;
/// it is `None` when either part is missing or malformed.
pub fn parse_ident(ident: &str) -> (String, Option<DateTime<FixedOffset>>) {
    let (name_part, rest) = match ident.find('<') {
        Some(open) => (&ident[..open], Some(&ident[open..])),
        None => (ident, None),
    };

    let name = name_part.trim();
    let name = if name.is_empty() {
        UNKNOWN_AUTHOR.to_string()
    } else {
        name.to_string()
    };

    let date = rest
        .and_then(|rest| rest.find('>').map(|close| &rest[close + 1..]))
        .and_then(parse_timestamp);

    (name, date)
}

fn parse_timestamp(text: &str) -> Option<DateTime<FixedOffset>> {
    let mut fields = text.split_whitespace();
    let seconds: i64 = fields.next()?.parse().ok()?;
    let offset = fields.next().and_then(parse_zone).unwrap_or(0);

    let zone = FixedOffset::east_opt(offset)?;
    let utc = DateTime::from_timestamp(seconds, 0)?;
    Some(utc.with_timezone(&zone))
}

/// Parse `+hhmm` / `-hhmm` into seconds east of UTC.
fn parse_zone(zone: &str) -> Option<i32> {
    let (sign, digits) = match zone.as_bytes().first()? {
        b'+' => (1, &zone[1..]),
        b'-' => (-1, &zone[1..]),
        _ => return None,
    };
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    Some(sign * (hours * 3600 + minutes * 60))
}
