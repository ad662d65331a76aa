//! Test harness for state and TUI tests
//!
//! Provides fixture content for the history views and a wrapper around
//! `TuiApp<TestBackend>` for simulating user interactions. Fixture views
//! use fixed text sources, so no git repository is needed.

use crate::config::{KeyBindings, ResolvedConfig};
use crate::state::{AppState, Flow};
use crate::view::{StyleTable, TuiApp, TuiError};
use crate::view_state::{ViewId, ViewSource};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::Terminal;

/// Three commits in `git log --pretty=raw` form.
pub const MAIN_FIXTURE: &str = "\
commit 1111111111111111111111111111111111111111
tree aaaa
parent 2222222222222222222222222222222222222222
author Ann Author <ann@example.com> 1136000000 +0100
committer Ann Author <ann@example.com> 1136000000 +0100

    Add search to the pager

    Longer description.
commit 2222222222222222222222222222222222222222
tree bbbb
parent 3333333333333333333333333333333333333333
author Bob Builder <bob@example.com> 1135000000 +0000
committer Bob Builder <bob@example.com> 1135000000 +0000

    Fix resize crash
commit 3333333333333333333333333333333333333333
tree cccc
author Ann Author <ann@example.com> 1134000000 +0000
committer Ann Author <ann@example.com> 1134000000 +0000

    Initial import
";

/// Two commits in `git log --stat` form.
pub const LOG_FIXTURE: &str = "\
commit 1111111111111111111111111111111111111111
Author: Ann Author <ann@example.com>
Date:   Sat Dec 31 04:33:20 2005 +0100

    Add search to the pager

 src/search.rs | 10 ++++++++++
 1 file changed, 10 insertions(+)

commit 2222222222222222222222222222222222222222
Author: Bob Builder <bob@example.com>
Date:   Sun Dec 18 12:46:40 2005 +0000

    Fix resize crash
";

/// A small patch in `git show` form.
pub const DIFF_FIXTURE: &str = "\
commit 1111111111111111111111111111111111111111
Author: Ann Author <ann@example.com>
Date:   Sat Dec 31 04:33:20 2005 +0100

    Add search to the pager
---
 src/search.rs | 2 +-
diff --git a/src/search.rs b/src/search.rs
index 123..456 100644
--- a/src/search.rs
+++ b/src/search.rs
@@ -1,3 +1,3 @@
 fn find() {
-    todo
+    done
 }
";

/// App state whose history views load the fixtures above.
pub fn fixture_state(base: ViewId) -> AppState {
    let mut state = AppState::from_config(
        &ResolvedConfig::default(),
        &KeyBindings::default(),
        StyleTable::default(),
        true,
        base,
        "HEAD",
    );
    for (id, text) in [
        (ViewId::Main, MAIN_FIXTURE),
        (ViewId::Log, LOG_FIXTURE),
        (ViewId::Diff, DIFF_FIXTURE),
    ] {
        state
            .display
            .view_mut(id)
            .set_source(ViewSource::Text(text.to_string()));
    }
    state
}

/// Convert a ratatui buffer to a string, one line per row.
///
/// Trailing spaces are trimmed from each row; trailing empty rows are kept
/// so the layout stays visible.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    (area.top()..area.bottom())
        .map(|y| {
            (area.left()..area.right())
                .map(|x| buffer[(x, y)].symbol())
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Test harness wrapping a `TuiApp<TestBackend>`.
pub struct TestApp {
    app: TuiApp<TestBackend>,
    running: bool,
}

impl TestApp {
    /// Fixture app showing the main view on an 80x24 terminal.
    pub fn new() -> Self {
        Self::with_size(ViewId::Main, 80, 24)
    }

    pub fn with_size(base: ViewId, width: u16, height: u16) -> Self {
        Self::from_state(fixture_state(base), width, height)
    }

    pub fn from_state(state: AppState, width: u16, height: u16) -> Self {
        let terminal = Terminal::new(TestBackend::new(width, height)).expect("test terminal");
        let mut app = TuiApp::with_terminal(terminal, state, KeyBindings::default())
            .expect("test app");
        // Text sources complete on the first pump.
        app.tick_test();
        Self { app, running: true }
    }

    /// Send a single key; returns `true` once the app has quit.
    pub fn send_key(&mut self, code: KeyCode) -> bool {
        self.send_key_with_mods(code, KeyModifiers::NONE)
    }

    pub fn send_key_with_mods(&mut self, code: KeyCode, mods: KeyModifiers) -> bool {
        if !self.running {
            return true;
        }
        if self.app.handle_key_test(KeyEvent::new(code, mods)) == Flow::Quit {
            self.running = false;
        }
        !self.running
    }

    /// Send each character of `keys` as a key press.
    pub fn send_keys(&mut self, keys: &str) -> bool {
        for c in keys.chars() {
            if self.send_key(KeyCode::Char(c)) {
                return true;
            }
        }
        false
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.app.resize_test(width, height);
    }

    /// Render and return the screen contents.
    pub fn screen(&mut self) -> Result<String, TuiError> {
        self.app.render_test()?;
        Ok(buffer_to_string(self.app.terminal().backend().buffer()))
    }

    /// Render and return the raw buffer, for style assertions.
    pub fn buffer(&mut self) -> Result<Buffer, TuiError> {
        self.app.render_test()?;
        Ok(self.app.terminal().backend().buffer().clone())
    }

    pub fn state(&self) -> &AppState {
        self.app.state()
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        self.app.state_mut()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_dirty(&self) -> bool {
        self.app.is_dirty()
    }

    pub fn tick(&mut self) {
        self.app.tick_test();
    }
}
