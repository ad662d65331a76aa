//! Status-line prompt input.
//!
//! The prompt replaces the status line while the user types a search
//! query (`/`) or a command to run into the pager view (`:`).

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What the submitted input is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// A search query, `/`.
    Search,
    /// A command for the pager view, `:`.
    Command,
}

impl PromptKind {
    /// Leader shown before the input.
    pub fn leader(self) -> &'static str {
        match self {
            PromptKind::Search => "/",
            PromptKind::Command => ":",
        }
    }
}

/// Text being typed. `cursor` counts characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    kind: PromptKind,
    input: String,
    cursor: usize,
}

/// Result of one key press in the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    /// Still typing.
    Editing,
    /// Escape was pressed.
    Cancelled,
    /// Enter was pressed with this input.
    Submitted(PromptKind, String),
}

impl Prompt {
    /// An empty prompt.
    pub fn new(kind: PromptKind) -> Self {
        Self {
            kind,
            input: String::new(),
            cursor: 0,
        }
    }

    /// What the input is for.
    pub fn kind(&self) -> PromptKind {
        self.kind
    }

    /// Input typed so far.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Prompt as displayed, leader included.
    pub fn display(&self) -> String {
        format!("{}{}", self.kind.leader(), self.input)
    }

    fn byte_index(&self, chars: usize) -> usize {
        self.input
            .char_indices()
            .nth(chars)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }

    fn char_count(&self) -> usize {
        self.input.chars().count()
    }

    /// Apply one key press.
    ///
    /// Esc cancels, as does Backspace on empty input. Enter submits.
    pub fn handle_key(&mut self, key: KeyEvent) -> PromptOutcome {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => PromptOutcome::Cancelled,
            KeyCode::Enter => PromptOutcome::Submitted(self.kind, self.input.clone()),
            KeyCode::Char('c') if ctrl => PromptOutcome::Cancelled,
            KeyCode::Char('u') if ctrl => {
                self.input.clear();
                self.cursor = 0;
                PromptOutcome::Editing
            }
            KeyCode::Char(ch) if !ctrl => {
                let at = self.byte_index(self.cursor);
                self.input.insert(at, ch);
                self.cursor += 1;
                PromptOutcome::Editing
            }
            KeyCode::Backspace => {
                if self.input.is_empty() {
                    return PromptOutcome::Cancelled;
                }
                if self.cursor > 0 {
                    let at = self.byte_index(self.cursor - 1);
                    self.input.remove(at);
                    self.cursor -= 1;
                }
                PromptOutcome::Editing
            }
            KeyCode::Delete => {
                if self.cursor < self.char_count() {
                    let at = self.byte_index(self.cursor);
                    self.input.remove(at);
                }
                PromptOutcome::Editing
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                PromptOutcome::Editing
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.char_count());
                PromptOutcome::Editing
            }
            KeyCode::Home => {
                self.cursor = 0;
                PromptOutcome::Editing
            }
            KeyCode::End => {
                self.cursor = self.char_count();
                PromptOutcome::Editing
            }
            _ => PromptOutcome::Editing,
        }
    }
}
