//! Piped standard input as pager content.
//!
//! `git show | gitscope` starts in the pager view fed from stdin. Keyboard
//! input is still read from the terminal because crossterm falls back to
//! `/dev/tty` when stdin is not one.

use super::Loader;
use crate::model::error::LoadError;
use std::io::{self, IsTerminal};

/// Label shown for stdin content in logs and error messages.
pub const STDIN_LABEL: &str = "stdin";

/// Whether standard input is redirected from a pipe or file.
pub fn is_piped() -> bool {
    !io::stdin().is_terminal()
}

/// A loader over stdin, or `None` when stdin is an interactive terminal.
pub fn piped_stdin() -> Result<Option<Loader>, LoadError> {
    if !is_piped() {
        return Ok(None);
    }
    Loader::from_reader(STDIN_LABEL, io::stdin()).map(Some)
}
