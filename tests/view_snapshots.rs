//! Snapshot tests for view rows
//!
//! Uses insta and a plain ratatui Buffer to verify row rendering doesn't
//! regress.

use gitscope::model::RefSet;
use gitscope::source::Loader;
use gitscope::view_state::{Env, View, ViewId, ViewSource};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

// ===== Test Helpers =====

fn loaded(id: ViewId, text: &str, height: usize, width: usize) -> View {
    let mut view = View::new(id, ViewSource::Empty);
    view.begin(Loader::from_bytes("snapshot", text.as_bytes().to_vec()), "HEAD");
    view.pump();
    view.end();
    view.set_size(height, width);
    view
}

/// Draw every visible row of `view` and return the text, one line per row.
fn render(view: &View, env: &Env) -> String {
    let width = view.width() as u16;
    let height = view.height() as u16;
    let mut buf = Buffer::empty(Rect::new(0, 0, width, height));
    for row in 0..height {
        if !view.draw_row(row as usize, Rect::new(0, row, width, 1), &mut buf, env) {
            break;
        }
    }

    (0..height)
        .map(|y| {
            (0..width)
                .map(|x| buf[(x, y)].symbol())
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

const RAW_LOG: &str = "\
commit aaaa
tree 1
author A U Thor <author@example.com> 1136000000 +0100
committer A U Thor <author@example.com> 1136000000 +0100

    Fix crash on resize
commit bbbb
author Someone With A Very Long Name <long@example.com> 1135000000 +0000

    Add the pager
";

// ===== Snapshots =====

#[test]
fn snapshot_main_rows_with_refs() {
    let (refs, errors) = RefSet::from_listing("aaaa\trefs/heads/master\n");
    assert!(errors.is_empty());
    let env = Env {
        refs,
        ..Env::default()
    };
    let view = loaded(ViewId::Main, RAW_LOG, 2, 80);

    insta::assert_snapshot!(render(&view, &env), @r"
    2005-12-31 04:33 A U Thor            ├ [master] Fix crash on resize
    2005-12-19 13:46 Someone With A Ver~ ├ Add the pager
    ");
}

#[test]
fn snapshot_main_rows_clip_to_width() {
    let view = loaded(ViewId::Main, RAW_LOG, 2, 30);

    insta::assert_snapshot!(render(&view, &Env::default()), @r"
    2005-12-31 04:33 A U Thor
    2005-12-19 13:46 Someone With
    ");
}

#[test]
fn snapshot_diff_rows() {
    let text = "diff --git a/x b/x\n@@ -1,2 +1,2 @@\n-old\n+new\n\tctx\n tail\n";
    let view = loaded(ViewId::Diff, text, 6, 40);

    insta::assert_snapshot!(render(&view, &Env::default()), @r"
    diff --git a/x b/x
    @@ -1,2 +1,2 @@
    -old
    +new
            ctx
     tail
    ");
}

#[test]
fn rows_past_the_end_are_not_drawn() {
    let view = loaded(ViewId::Pager, "only\n", 3, 10);
    let mut buf = Buffer::empty(Rect::new(0, 0, 10, 3));
    let env = Env::default();

    assert!(view.draw_row(0, Rect::new(0, 0, 10, 1), &mut buf, &env));
    assert!(!view.draw_row(1, Rect::new(0, 1, 10, 1), &mut buf, &env));
}
