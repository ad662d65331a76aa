//! gitscope - Entry Point

use clap::{Parser, ValueEnum};
use gitscope::config::{self, is_utf8_encoding, KeyBindings, ResolvedConfig};
use gitscope::model::AppError;
use gitscope::source::{command, stdin};
use gitscope::state::AppState;
use gitscope::view::{self, ColorConfig, StyleTable};
use gitscope::view_state::ViewId;
use std::path::PathBuf;
use tracing::{info, warn};

/// gitscope - browse git history in the terminal
#[derive(Parser, Debug)]
#[command(name = "gitscope")]
#[command(version)]
#[command(about = "Terminal browser for git history, diffs and command output")]
pub struct Args {
    /// Revisions to browse, passed to the history commands (default: HEAD)
    pub revisions: Vec<String>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Tab width in the pager views
    #[arg(short = 'b', long, value_parser = clap::value_parser!(u16).range(1..))]
    pub tab_size: Option<u16>,

    /// Show line numbers in the pager views
    #[arg(short = 'n', long)]
    pub line_numbers: bool,

    /// View to start in
    #[arg(long, value_enum, default_value_t = StartView::Main)]
    pub view: StartView,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum StartView {
    Main,
    Log,
    Diff,
}

impl From<StartView> for ViewId {
    fn from(view: StartView) -> Self {
        match view {
            StartView::Main => ViewId::Main,
            StartView::Log => ViewId::Log,
            StartView::Diff => ViewId::Diff,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    run(args)?;
    Ok(())
}

fn run(args: Args) -> Result<(), AppError> {
    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = resolve_config(&args)?;

    gitscope::logging::init(&config.log_file_path)?;
    info!(config = ?config, "Configuration loaded and resolved");

    let utf8 = match config.encoding.as_deref() {
        Some(encoding) => is_utf8_encoding(Some(encoding)),
        None => is_utf8_encoding(command::run_to_string(command::ENCODING_CMD).ok().as_deref()),
    };

    let color_config = ColorConfig::from_env_and_args(args.no_color);
    let mut styles = StyleTable::with_color_config(color_config);
    let mut style_errors = Vec::new();
    if color_config.colors_enabled() {
        style_errors = styles.load(&config.colors);
        for error in &style_errors {
            warn!(error = %error, "Ignoring colour entry");
        }
    }

    let pager_input = match stdin::piped_stdin() {
        Ok(input) => input,
        Err(err) => {
            warn!(error = %err, "Failed to read piped input");
            None
        }
    };
    let base = if pager_input.is_some() {
        ViewId::Pager
    } else {
        args.view.into()
    };

    let key_bindings = KeyBindings::default();
    let head_ref = args.revisions.join(" ");
    let mut state = AppState::from_config(&config, &key_bindings, styles, utf8, base, head_ref);
    state.pager_input = pager_input;
    state.load_refs(&config.commands.refs);
    if !style_errors.is_empty() {
        state.defer_report(format!(
            "{} colour entries were ignored, see the log for details",
            style_errors.len()
        ));
    }

    info!(view = base.name(), head = %state.head_ref, "Starting");
    view::run(state, key_bindings)?;
    Ok(())
}

fn resolve_config(args: &Args) -> Result<ResolvedConfig, AppError> {
    let config_file = config::loader::load_config_with_precedence(args.config.clone())?;
    let merged = config::loader::merge_config(config_file);
    let with_env = config::loader::apply_env_overrides(merged);
    let line_numbers = args.line_numbers.then_some(true);
    Ok(config::loader::apply_cli_overrides(
        with_env,
        args.tab_size.map(usize::from),
        line_numbers,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_help_does_not_error() {
        let result = Args::try_parse_from(["gitscope", "--help"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["gitscope", "--version"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_args_defaults() {
        let args = Args::parse_from(["gitscope"]);
        assert!(args.revisions.is_empty());
        assert_eq!(args.config, None);
        assert_eq!(args.tab_size, None);
        assert!(!args.line_numbers);
        assert_eq!(args.view, StartView::Main);
        assert!(!args.no_color);
    }

    #[test]
    fn test_revisions_are_collected_in_order() {
        let args = Args::parse_from(["gitscope", "v1.0..v2.0", "--", "src"]);
        assert_eq!(args.revisions, ["v1.0..v2.0", "src"]);
    }

    #[test]
    fn test_tab_size_short_flag() {
        let args = Args::parse_from(["gitscope", "-b", "4"]);
        assert_eq!(args.tab_size, Some(4));
    }

    #[test]
    fn test_tab_size_rejects_zero() {
        let err = Args::try_parse_from(["gitscope", "--tab-size", "0"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_line_numbers_flag() {
        assert!(Args::parse_from(["gitscope", "-n"]).line_numbers);
        assert!(Args::parse_from(["gitscope", "--line-numbers"]).line_numbers);
    }

    #[test]
    fn test_view_flag() {
        let args = Args::parse_from(["gitscope", "--view", "log"]);
        assert_eq!(ViewId::from(args.view), ViewId::Log);

        let err = Args::try_parse_from(["gitscope", "--view", "help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn test_cli_overrides_win_over_defaults() {
        let args = Args::parse_from([
            "gitscope",
            "--config",
            "/nonexistent/gitscope/config.toml",
            "-b",
            "2",
            "-n",
        ]);
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.tab_size, 2);
        assert!(config.line_numbers);
    }
}
