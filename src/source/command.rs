//! Command templates for the history tool.
//!
//! Templates are shell command lines; every `%s` is replaced by the
//! reference the view is opened for before the line is handed to `sh -c`.

use crate::model::error::LoadError;
use std::process::{Command, Stdio};

/// Commit list of the main view.
pub const DEFAULT_MAIN_CMD: &str = "git log --topo-order --pretty=raw %s";
/// Diff of one commit.
pub const DEFAULT_DIFF_CMD: &str = "git show --patch-with-stat --find-copies-harder -B -C %s";
/// Log view: recent commits with stats.
pub const DEFAULT_LOG_CMD: &str = "git log --cc --stat -n100 %s";
/// Ref listing read once at startup.
pub const DEFAULT_REFS_CMD: &str = "git ls-remote . 2>/dev/null";
/// Query for the repository's commit encoding.
pub const ENCODING_CMD: &str = "git config --get i18n.commitencoding 2>/dev/null";

/// Reference used when none is given on the command line.
pub const DEFAULT_REF: &str = "HEAD";

/// Substitute `reference` for every `%s` in `template`.
pub fn expand(template: &str, reference: &str) -> String {
    template.replace("%s", reference)
}

/// Build the `sh -c` invocation for a command line.
pub fn shell(command_line: &str) -> Command {
    let mut command = Command::new("sh");
    command.arg("-c").arg(command_line);
    command
}

/// Run a command to completion and return its standard output.
///
/// Used for the small one-shot queries made at startup (refs, encoding).
/// A non-zero exit is reported as [`LoadError::Exited`].
pub fn run_to_string(command_line: &str) -> Result<String, LoadError> {
    let output = shell(command_line)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .map_err(|source| LoadError::Spawn {
            command: command_line.to_string(),
            source,
        })?;

    if !output.status.success() {
        return Err(LoadError::Exited {
            command: command_line.to_string(),
            status: output.status,
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_replaces_every_placeholder() {
        assert_eq!(
            expand("git log %s -- %s", "v1.0"),
            "git log v1.0 -- v1.0"
        );
    }

    #[test]
    fn expand_without_placeholder_is_identity() {
        assert_eq!(expand("git status", "HEAD"), "git status");
    }

    #[test]
    fn default_templates_take_the_reference() {
        for template in [DEFAULT_MAIN_CMD, DEFAULT_DIFF_CMD, DEFAULT_LOG_CMD] {
            assert!(expand(template, "abc123").ends_with("abc123"), "{template}");
        }
    }

    #[cfg(unix)]
    #[test]
    fn run_to_string_captures_stdout() {
        assert_eq!(run_to_string("printf 'a\\nb\\n'").unwrap(), "a\nb\n");
    }

    #[cfg(unix)]
    #[test]
    fn run_to_string_reports_failed_exit() {
        let err = run_to_string("exit 3").unwrap_err();
        assert!(matches!(err, LoadError::Exited { status, .. } if status.code() == Some(3)));
    }
}
