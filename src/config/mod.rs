//! Configuration module.

pub mod keybindings;
pub mod loader;

pub use keybindings::{KeyBindings, KeySpec};
pub use loader::{ColorEntry, ConfigError, ResolvedConfig, ViewCommands};

/// Rendering options shared by all views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    /// Columns per tab stop in pager views.
    pub tab_size: usize,
    /// Whether pager views show line numbers.
    pub line_numbers: bool,
    /// Every Nth line is numbered; the others get blank padding.
    pub line_number_interval: usize,
    /// Commit metadata is UTF-8, so author names are truncated by display width.
    pub utf8: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            tab_size: loader::DEFAULT_TAB_SIZE,
            line_numbers: false,
            line_number_interval: loader::DEFAULT_LINE_NUMBER_INTERVAL,
            utf8: true,
        }
    }
}

impl ViewOptions {
    /// Options from a resolved config. `utf8` is decided separately.
    pub fn from_config(config: &ResolvedConfig, utf8: bool) -> Self {
        Self {
            tab_size: config.tab_size.max(1),
            line_numbers: config.line_numbers,
            line_number_interval: config.line_number_interval.max(1),
            utf8,
        }
    }
}

/// Whether an encoding name denotes UTF-8.
///
/// An unset or empty encoding counts as UTF-8, which is git's default.
pub fn is_utf8_encoding(encoding: Option<&str>) -> bool {
    match encoding.map(str::trim) {
        None | Some("") => true,
        Some(name) => name.eq_ignore_ascii_case("utf-8") || name.eq_ignore_ascii_case("utf8"),
    }
}
