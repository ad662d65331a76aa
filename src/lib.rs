//! gitscope
//!
//! Terminal browser for git history: a commit list, per-commit diffs, a
//! log view and a pager for arbitrary command output.
//!
//! The pure core (`model`, `view_state`, `state`) holds all behaviour and
//! is testable without a terminal; `source` runs the history commands and
//! `view` owns the terminal.

pub mod config;
pub mod logging;
pub mod model;
pub mod source;
pub mod state;
pub mod view;
pub mod view_state;

#[cfg(test)]
mod test_harness;

#[cfg(test)]
mod tests;
