//! Line type styling.
//!
//! Every [`LineType`] maps to a foreground, background and attribute set.
//! The table starts from built-in defaults and `[[color]]` config entries
//! override single areas.

use crate::config::ColorEntry;
use crate::model::error::ParseError;
use crate::model::LineType;
use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// A fixed setting, for tests and callers that know better.
    pub fn enabled(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Whether colours are used at all.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== StyleEntry =====

/// Colours and attributes for one line type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleEntry {
    /// Foreground colour.
    pub fg: Color,
    /// Background colour.
    pub bg: Color,
    /// Text attributes.
    pub attr: Modifier,
}

impl StyleEntry {
    /// An entry from its parts.
    pub const fn new(fg: Color, bg: Color, attr: Modifier) -> Self {
        Self { fg, bg, attr }
    }

    const fn foreground(fg: Color) -> Self {
        Self::new(fg, Color::Reset, Modifier::empty())
    }

    /// As a ratatui style.
    pub fn style(self) -> Style {
        Style::default()
            .fg(self.fg)
            .bg(self.bg)
            .add_modifier(self.attr)
    }
}

fn default_entry(kind: LineType) -> StyleEntry {
    use LineType::*;
    match kind {
        DiffHeader => StyleEntry::foreground(Color::Yellow),
        DiffChunk => StyleEntry::foreground(Color::Magenta),
        DiffAdd => StyleEntry::foreground(Color::Green),
        DiffDel => StyleEntry::foreground(Color::Red),
        DiffIndex | DiffTree => StyleEntry::foreground(Color::Blue),
        DiffOldMode | DiffNewMode | DiffCopyFrom | DiffCopyTo | DiffRenameFrom
        | DiffRenameTo | DiffSimilarity | DiffDissimilarity => StyleEntry::foreground(Color::Yellow),
        PpAuthor => StyleEntry::foreground(Color::Cyan),
        PpCommit => StyleEntry::foreground(Color::Magenta),
        PpMerge => StyleEntry::foreground(Color::Blue),
        PpDate | PpAdate | PpCdate => StyleEntry::foreground(Color::Yellow),
        Commit => StyleEntry::foreground(Color::Green),
        Parent | Tree => StyleEntry::foreground(Color::Blue),
        Author => StyleEntry::foreground(Color::Cyan),
        Committer => StyleEntry::foreground(Color::Magenta),
        Signoff => StyleEntry::foreground(Color::Yellow),
        Default => StyleEntry::foreground(Color::Reset),
        Cursor => StyleEntry::new(Color::White, Color::Green, Modifier::BOLD),
        Status => StyleEntry::foreground(Color::Green),
        TitleBlur => StyleEntry::new(Color::White, Color::Blue, Modifier::empty()),
        TitleFocus => StyleEntry::new(Color::White, Color::Blue, Modifier::BOLD),
        MainDate => StyleEntry::foreground(Color::Blue),
        MainAuthor => StyleEntry::foreground(Color::Green),
        MainCommit => StyleEntry::foreground(Color::Reset),
        MainDelim => StyleEntry::foreground(Color::Magenta),
        MainTag => StyleEntry::new(Color::Magenta, Color::Reset, Modifier::BOLD),
        MainRef => StyleEntry::new(Color::Cyan, Color::Reset, Modifier::BOLD),
    }
}

/// Without colours the cursor and titles still need to stand out.
fn monochrome_entry(kind: LineType) -> StyleEntry {
    let attr = match kind {
        LineType::Cursor | LineType::TitleFocus => Modifier::REVERSED | Modifier::BOLD,
        LineType::TitleBlur => Modifier::REVERSED,
        _ => Modifier::empty(),
    };
    StyleEntry::new(Color::Reset, Color::Reset, attr)
}

// ===== StyleTable =====

/// Style for every line type.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleTable {
    entries: HashMap<LineType, StyleEntry>,
}

impl StyleTable {
    /// Table with the built-in colour scheme.
    pub fn new() -> Self {
        Self::from_fn(default_entry)
    }

    /// Table using attributes only.
    pub fn monochrome() -> Self {
        Self::from_fn(monochrome_entry)
    }

    /// Default colours, or attributes only when colours are disabled.
    pub fn with_color_config(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self::new()
        } else {
            Self::monochrome()
        }
    }

    fn from_fn(entry: fn(LineType) -> StyleEntry) -> Self {
        Self {
            entries: LineType::ALL.iter().map(|&kind| (kind, entry(kind))).collect(),
        }
    }

    /// Apply colour entries in order.
    ///
    /// Each entry is validated on its own; invalid ones are returned and
    /// leave their area untouched.
    pub fn load(&mut self, entries: &[ColorEntry]) -> Vec<ParseError> {
        entries
            .iter()
            .filter_map(|entry| self.apply(entry).err())
            .collect()
    }

    fn apply(&mut self, entry: &ColorEntry) -> Result<(), ParseError> {
        let kind = LineType::from_name(&entry.area).ok_or_else(|| ParseError::UnknownArea {
            area: entry.area.clone(),
        })?;
        let unknown_color = |color: &str| ParseError::UnknownColor {
            area: entry.area.clone(),
            color: color.to_string(),
        };
        let fg = parse_color(&entry.fg).ok_or_else(|| unknown_color(&entry.fg))?;
        let bg = parse_color(&entry.bg).ok_or_else(|| unknown_color(&entry.bg))?;

        let mut attr = Modifier::empty();
        for name in &entry.attributes {
            attr |= parse_attribute(name).ok_or_else(|| ParseError::UnknownAttribute {
                area: entry.area.clone(),
                attribute: name.clone(),
            })?;
        }

        self.entries.insert(kind, StyleEntry::new(fg, bg, attr));
        Ok(())
    }

    /// Entry for `kind`, falling back to the default style.
    pub fn entry(&self, kind: LineType) -> StyleEntry {
        self.entries
            .get(&kind)
            .copied()
            .unwrap_or_else(|| default_entry(kind))
    }

    /// Render style for a line type.
    pub fn lookup(&self, kind: LineType) -> Style {
        self.entry(kind).style()
    }
}

impl Default for StyleTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a colour name.
///
/// Accepts `default`, the eight basic names, `bright-<name>` and palette
/// indices `0`-`255` (optionally written `color<N>`).
pub fn parse_color(name: &str) -> Option<Color> {
    let name = name.trim().to_ascii_lowercase().replace('_', "-");
    let color = match name.as_str() {
        "default" => Color::Reset,
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::Gray,
        "bright-black" => Color::DarkGray,
        "bright-red" => Color::LightRed,
        "bright-green" => Color::LightGreen,
        "bright-yellow" => Color::LightYellow,
        "bright-blue" => Color::LightBlue,
        "bright-magenta" => Color::LightMagenta,
        "bright-cyan" => Color::LightCyan,
        "bright-white" => Color::White,
        other => {
            let index = other.strip_prefix("color").unwrap_or(other);
            return index.parse::<u8>().ok().map(Color::Indexed);
        }
    };
    Some(color)
}

/// Parse an attribute name. `normal` adds nothing.
pub fn parse_attribute(name: &str) -> Option<Modifier> {
    let attr = match name.trim().to_ascii_lowercase().as_str() {
        "normal" => Modifier::empty(),
        "bold" => Modifier::BOLD,
        "dim" => Modifier::DIM,
        "italic" => Modifier::ITALIC,
        "underline" => Modifier::UNDERLINED,
        "reverse" | "standout" => Modifier::REVERSED,
        "blink" => Modifier::SLOW_BLINK,
        _ => return None,
    };
    Some(attr)
}

// ===== Tests =====
