//! Keyboard bindings configuration.

use crate::model::request::Request;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// A key as matched against the binding table.
///
/// Shift is folded into the character for printable keys, so `Q` matches
/// whether or not the terminal reports the SHIFT modifier with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySpec {
    /// Key code, with shift folded into characters.
    pub code: KeyCode,
    /// Modifiers other than shift on character keys.
    pub modifiers: KeyModifiers,
}

impl KeySpec {
    /// A key without modifiers.
    pub const fn plain(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// Control plus a character.
    pub const fn ctrl(c: char) -> Self {
        Self {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
        }
    }

    /// Normalise a terminal key event for lookup.
    pub fn from_event(key: KeyEvent) -> Self {
        let modifiers = match key.code {
            KeyCode::Char(_) => key.modifiers.difference(KeyModifiers::SHIFT),
            _ => key.modifiers,
        };
        Self {
            code: key.code,
            modifiers,
        }
    }

    /// Human-readable name used in the help view, e.g. `Ctrl-L` or `PgDn`.
    pub fn display_name(&self) -> String {
        let base = match self.code {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) if self.modifiers.contains(KeyModifiers::CONTROL) => {
                c.to_ascii_uppercase().to_string()
            }
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::Up => "Up".to_string(),
            KeyCode::Down => "Down".to_string(),
            KeyCode::Left => "Left".to_string(),
            KeyCode::Right => "Right".to_string(),
            KeyCode::Home => "Home".to_string(),
            KeyCode::End => "End".to_string(),
            KeyCode::PageUp => "PgUp".to_string(),
            KeyCode::PageDown => "PgDn".to_string(),
            KeyCode::Insert => "Insert".to_string(),
            KeyCode::Delete => "Delete".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            other => format!("{other:?}"),
        };
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            format!("Ctrl-{base}")
        } else {
            base
        }
    }
}

/// Maps keyboard events to requests.
///
/// Keeps the order bindings were added in so the help view lists them the
/// same way every time.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeySpec, Request>,
    order: Vec<KeySpec>,
}

impl KeyBindings {
    /// An empty table.
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Bind `key` to `request`, replacing any earlier binding of that key.
    pub fn bind(&mut self, key: KeySpec, request: Request) {
        if self.bindings.insert(key, request).is_none() {
            self.order.push(key);
        }
    }

    /// Look up the request for a key event.
    pub fn get(&self, key: KeyEvent) -> Option<Request> {
        self.bindings.get(&KeySpec::from_event(key)).copied()
    }

    /// Keys bound to `request`, in binding order.
    pub fn keys_for(&self, request: Request) -> Vec<KeySpec> {
        self.order
            .iter()
            .filter(|key| self.bindings.get(key) == Some(&request))
            .copied()
            .collect()
    }

    /// Bound requests, each once, in the order they were first bound.
    pub fn requests(&self) -> Vec<Request> {
        let mut requests: Vec<Request> = Vec::new();
        for key in &self.order {
            if let Some(&request) = self.bindings.get(key) {
                if !requests.contains(&request) {
                    requests.push(request);
                }
            }
        }
        requests
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        use KeyCode::*;

        let table = [
            // View switching
            (KeySpec::plain(Char('m')), Request::ViewMain),
            (KeySpec::plain(Char('d')), Request::ViewDiff),
            (KeySpec::plain(Char('l')), Request::ViewLog),
            (KeySpec::plain(Char('p')), Request::ViewPager),
            (KeySpec::plain(Char('h')), Request::ViewHelp),
            (KeySpec::plain(Char('?')), Request::ViewHelp),
            // View manipulation
            (KeySpec::plain(Enter), Request::Enter),
            (KeySpec::plain(Down), Request::Next),
            (KeySpec::plain(Up), Request::Previous),
            (KeySpec::plain(Tab), Request::ViewNext),
            (KeySpec::plain(Char('q')), Request::ViewClose),
            (KeySpec::plain(Char('Q')), Request::Quit),
            // Cursor navigation
            (KeySpec::plain(Char('k')), Request::MoveUp),
            (KeySpec::plain(Char('j')), Request::MoveDown),
            (KeySpec::plain(Home), Request::MoveFirstLine),
            (KeySpec::plain(End), Request::MoveLastLine),
            (KeySpec::plain(PageDown), Request::MovePageDown),
            (KeySpec::plain(Char(' ')), Request::MovePageDown),
            (KeySpec::plain(PageUp), Request::MovePageUp),
            (KeySpec::plain(Char('b')), Request::MovePageUp),
            (KeySpec::plain(Char('-')), Request::MovePageUp),
            // Scrolling
            (KeySpec::plain(Insert), Request::ScrollLineUp),
            (KeySpec::plain(Delete), Request::ScrollLineDown),
            (KeySpec::plain(Char('w')), Request::ScrollPageUp),
            (KeySpec::plain(Char('s')), Request::ScrollPageDown),
            // Searching
            (KeySpec::plain(Char('/')), Request::Search),
            (KeySpec::plain(Char('n')), Request::FindNext),
            (KeySpec::plain(Char('N')), Request::FindPrevious),
            // Misc
            (KeySpec::plain(Char(':')), Request::Prompt),
            (KeySpec::plain(Char('z')), Request::StopLoading),
            (KeySpec::plain(Char('R')), Request::Reload),
            (KeySpec::plain(Char('v')), Request::ShowVersion),
            (KeySpec::plain(Char('.')), Request::ToggleLineNumbers),
            (KeySpec::ctrl('l'), Request::ScreenRedraw),
            (KeySpec::plain(Char('r')), Request::ScreenRedraw),
        ];

        let mut bindings = Self::empty();
        for (key, request) in table {
            bindings.bind(key, request);
        }
        bindings
    }
}
