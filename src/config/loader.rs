//! Configuration file loading with precedence handling.

use crate::source::command::{DEFAULT_DIFF_CMD, DEFAULT_LOG_CMD, DEFAULT_MAIN_CMD, DEFAULT_REFS_CMD};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal problems with an existing config file.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a regular file).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// Contents of `config.toml`. Every key is optional:
///
/// ```toml
/// tab_size = 4
/// line_numbers = true
///
/// [commands]
/// main = "git log --topo-order --pretty=raw --all %s"
///
/// [[color]]
/// area = "diff-add"
/// fg = "blue"
/// attributes = ["bold"]
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Columns per tab stop in pager views.
    #[serde(default)]
    pub tab_size: Option<usize>,

    /// Show line numbers in pager views.
    #[serde(default)]
    pub line_numbers: Option<bool>,

    /// Print a number on every Nth line when line numbers are on.
    #[serde(default)]
    pub line_number_interval: Option<usize>,

    /// Open diffs from the main and log views in a split pane.
    #[serde(default)]
    pub split_view: Option<bool>,

    /// Commit message encoding; overrides `i18n.commitencoding`.
    #[serde(default)]
    pub encoding: Option<String>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Command templates.
    #[serde(default)]
    pub commands: Option<CommandsSection>,

    /// Colour overrides, one table per area.
    #[serde(default)]
    pub color: Option<Vec<ColorEntry>>,
}

/// `[commands]` section. `%s` in a template is replaced by the reference.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct CommandsSection {
    /// Main view command template.
    #[serde(default)]
    pub main: Option<String>,
    /// Diff view command template.
    #[serde(default)]
    pub diff: Option<String>,
    /// Log view command template.
    #[serde(default)]
    pub log: Option<String>,
    /// Ref listing command, run once at startup.
    #[serde(default)]
    pub refs: Option<String>,
}

/// One `[[color]]` entry.
///
/// Names are validated when the entries are applied to the style table, so
/// one bad entry never prevents the others from loading.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ColorEntry {
    /// Line type area name, e.g. `diff-header` or `title-focus`.
    pub area: String,
    /// Foreground colour name.
    pub fg: String,
    /// Background colour name, `default` if omitted.
    #[serde(default = "default_background")]
    pub bg: String,
    /// Attribute names such as `bold` or `reverse`.
    #[serde(default)]
    pub attributes: Vec<String>,
}

fn default_background() -> String {
    "default".to_string()
}

/// Command templates after resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewCommands {
    /// Commit list, `git log --pretty=raw` style output.
    pub main: String,
    /// Diff of one commit.
    pub diff: String,
    /// Log view output.
    pub log: String,
    /// Ref listing as `<id>\t<name>` lines.
    pub refs: String,
}

impl Default for ViewCommands {
    fn default() -> Self {
        Self {
            main: DEFAULT_MAIN_CMD.to_string(),
            diff: DEFAULT_DIFF_CMD.to_string(),
            log: DEFAULT_LOG_CMD.to_string(),
            refs: DEFAULT_REFS_CMD.to_string(),
        }
    }
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Columns a tab expands to.
    pub tab_size: usize,
    /// Show line numbers in pager views.
    pub line_numbers: bool,
    /// Every how many lines a number is shown.
    pub line_number_interval: usize,
    /// Open views from Enter below their opener.
    pub split_view: bool,
    /// Explicit encoding; `None` asks git.
    pub encoding: Option<String>,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Command templates of the views.
    pub commands: ViewCommands,
    /// Colour overrides, applied in order.
    pub colors: Vec<ColorEntry>,
}

/// Tab width when none is configured.
pub const DEFAULT_TAB_SIZE: usize = 8;
/// Line number interval when none is configured.
pub const DEFAULT_LINE_NUMBER_INTERVAL: usize = 5;

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            tab_size: DEFAULT_TAB_SIZE,
            line_numbers: false,
            line_number_interval: DEFAULT_LINE_NUMBER_INTERVAL,
            split_view: true,
            encoding: None,
            log_file_path: default_log_path(),
            commands: ViewCommands::default(),
            colors: Vec::new(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/gitscope/gitscope.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("gitscope").join("gitscope.log")
    } else {
        PathBuf::from("gitscope.log")
    }
}

/// Read and parse the config file at `path`.
///
/// A missing file yields `Ok(None)`; an unreadable or invalid one is an error.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// `~/.config/gitscope/config.toml`, or the platform equivalent.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("gitscope").join("config.toml"))
}

/// Find and load the config file.
///
/// The first of `--config`, `GITSCOPE_CONFIG` and the default path that is
/// set decides which file is read; later candidates are not consulted.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("GITSCOPE_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Command templates from `GITSCOPE_MAIN_CMD`, `GITSCOPE_DIFF_CMD`,
/// `GITSCOPE_LOG_CMD` and `GITSCOPE_LS_REMOTE`. Blank values are ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    let overrides = [
        ("GITSCOPE_MAIN_CMD", &mut config.commands.main),
        ("GITSCOPE_DIFF_CMD", &mut config.commands.diff),
        ("GITSCOPE_LOG_CMD", &mut config.commands.log),
        ("GITSCOPE_LS_REMOTE", &mut config.commands.refs),
    ];
    for (var, slot) in overrides {
        if let Ok(value) = std::env::var(var) {
            if !value.trim().is_empty() {
                *slot = value;
            }
        }
    }

    config
}

/// Fill every unset file field from the defaults.
///
/// A zero tab size or line number interval is ignored.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    let commands = config.commands.unwrap_or_default();

    ResolvedConfig {
        tab_size: config
            .tab_size
            .filter(|&n| n > 0)
            .unwrap_or(defaults.tab_size),
        line_numbers: config.line_numbers.unwrap_or(defaults.line_numbers),
        line_number_interval: config
            .line_number_interval
            .filter(|&n| n > 0)
            .unwrap_or(defaults.line_number_interval),
        split_view: config.split_view.unwrap_or(defaults.split_view),
        encoding: config.encoding.or(defaults.encoding),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        commands: ViewCommands {
            main: commands.main.unwrap_or(defaults.commands.main),
            diff: commands.diff.unwrap_or(defaults.commands.diff),
            log: commands.log.unwrap_or(defaults.commands.log),
            refs: commands.refs.unwrap_or(defaults.commands.refs),
        },
        colors: config.color.unwrap_or_default(),
    }
}

/// Apply flags given on the command line; `None` leaves the value alone.
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    tab_size_override: Option<usize>,
    line_numbers_override: Option<bool>,
) -> ResolvedConfig {
    if let Some(tab_size) = tab_size_override.filter(|&n| n > 0) {
        config.tab_size = tab_size;
    }

    if let Some(line_numbers) = line_numbers_override {
        config.line_numbers = line_numbers;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
