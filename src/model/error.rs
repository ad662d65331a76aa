//! Error types for gitscope.
//!
//! Errors are split by how far they travel:
//!
//! - [`AppError`] - Top-level startup and terminal failures, fatal.
//!   - `ConfigError` - Unreadable or invalid configuration file
//!   - `LoggingError` - Log file could not be set up
//!   - `std::io::Error` - Terminal setup failures
//!   - `TuiError` - Failures inside the event loop
//! - [`LoadError`] - A view's source failed to start or broke mid-stream.
//!   Reported on the status line; the view stays usable.
//! - [`ParseError`] - A colour entry or ref listing line was rejected.
//!   Logged and skipped; the rest of the input still applies.
//! - [`LayoutError`] - The terminal is too small for a split.
//!   The display falls back to a single pane.

use std::process::ExitStatus;
use thiserror::Error;

use crate::config::ConfigError;
use crate::logging::LoggingError;
use crate::view::TuiError;

/// Top-level application error, returned from startup and the event loop.
#[derive(Debug, Error)]
pub enum AppError {
    /// The configuration file could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The log file could not be opened.
    #[error("Logging setup failed: {0}")]
    Logging(#[from] LoggingError),

    /// Terminal I/O failed outside the event loop.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// The event loop stopped with an error.
    #[error(transparent)]
    Tui(#[from] TuiError),
}

/// Failure to produce a view's content.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The shell running the command could not be started.
    #[error("Failed to run `{command}`: {source}")]
    Spawn {
        /// Command line handed to the shell.
        command: String,
        /// Why the process could not be started.
        #[source]
        source: std::io::Error,
    },

    /// Reading from the source failed after it started.
    #[error("Failed to read output: {0}")]
    Stream(#[from] std::io::Error),

    /// The command ran but exited unsuccessfully.
    #[error("`{command}` exited with {status}")]
    Exited {
        /// Command line that was run.
        command: String,
        /// Exit status it reported.
        status: ExitStatus,
    },
}

/// A rejected piece of configuration or ref listing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A colour entry names an area that has no style.
    #[error("Unknown colour area `{area}`")]
    UnknownArea {
        /// Area name as written.
        area: String,
    },

    /// A colour entry uses a colour name that is not recognised.
    #[error("Unknown colour `{color}` for area `{area}`")]
    UnknownColor {
        /// Area the colour was meant for.
        area: String,
        /// Colour name as written.
        color: String,
    },

    /// A colour entry uses an attribute that is not recognised.
    #[error("Unknown attribute `{attribute}` for area `{area}`")]
    UnknownAttribute {
        /// Area the attribute was meant for.
        area: String,
        /// Attribute name as written.
        attribute: String,
    },

    /// A ref listing line without a `<id>\t<name>` shape.
    #[error("Malformed ref line: {line:?}")]
    MalformedRef {
        /// The offending line.
        line: String,
    },
}

/// The terminal cannot fit the requested arrangement of views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// Fewer content rows than two minimal panes need.
    #[error("Terminal too small to split: {rows} rows available, {needed} needed")]
    TooSmall {
        /// Rows available above the status line.
        rows: u16,
        /// Rows the split needs.
        needed: u16,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_error_messages_name_the_command() {
        let err = LoadError::Spawn {
            command: "git log".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().contains("`git log`"));
    }

    #[test]
    fn parse_errors_name_the_offending_value() {
        let err = ParseError::UnknownColor {
            area: "diff-add".to_string(),
            color: "chartreuse".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unknown colour `chartreuse` for area `diff-add`"
        );
    }

    #[test]
    fn io_errors_convert_into_app_errors() {
        fn fails() -> Result<(), AppError> {
            let draw: Result<(), std::io::Error> = Err(std::io::Error::other("tty gone"));
            draw?;
            Ok(())
        }
        assert!(matches!(fails(), Err(AppError::Terminal(_))));
    }
}
