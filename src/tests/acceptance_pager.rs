//! Acceptance tests for the pager fed from piped input.

use crate::source::Loader;
use crate::test_harness::{fixture_state, TestApp};
use crate::view_state::ViewId;
use crossterm::event::KeyCode;

fn piped(text: &str, width: u16, height: u16) -> TestApp {
    let mut state = fixture_state(ViewId::Pager);
    state.pager_input = Some(Loader::from_bytes("stdin", text.as_bytes().to_vec()));
    TestApp::from_state(state, width, height)
}

#[test]
fn snapshot_piped_pager_expands_tabs() {
    let mut app = piped("one\ttwo\nthree\n", 40, 5);
    let screen = app.screen().unwrap();

    insta::assert_snapshot!(screen, @r"
    one     two
    three

    [pager] - line 1 of 2 (50%)
    pager: loaded 2 lines in 0s
    ");
}

#[test]
fn line_numbers_toggle() {
    let mut app = piped("one\ttwo\nthree\n", 40, 5);
    app.send_key(KeyCode::Char('.'));
    let screen = app.screen().unwrap();
    let rows: Vec<&str> = screen.split('\n').collect();

    // Only the first line and every fifth line carry a number.
    assert_eq!(rows[0], "  1: one     two");
    assert_eq!(rows[1], "   : three");

    app.send_key(KeyCode::Char('.'));
    let screen = app.screen().unwrap();
    assert!(screen.starts_with("one     two\nthree"), "{screen}");
}

#[test]
fn enter_on_a_commit_line_opens_its_diff() {
    let mut app = piped("commit abcdef\nsome output\n", 80, 24);
    app.send_key(KeyCode::Enter);

    assert_eq!(app.state().display.visible(), &[ViewId::Pager, ViewId::Diff]);
    assert_eq!(
        app.state().display.view(ViewId::Diff).loaded_ref(),
        Some("abcdef")
    );
    let screen = app.screen().unwrap();
    assert!(screen.contains("[pager] abcdef"), "{screen}");

    app.send_key(KeyCode::Char('q'));
    assert_eq!(app.state().display.visible(), &[ViewId::Pager]);
}

#[test]
fn piped_pager_cannot_be_reloaded() {
    let mut app = piped("only once\n", 80, 24);
    app.send_key(KeyCode::Char('R'));

    let screen = app.screen().unwrap();
    assert!(screen.starts_with("only once"), "{screen}");
    assert!(
        screen.ends_with("The pager view cannot be reloaded"),
        "{screen}"
    );
}
