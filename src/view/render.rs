//! Frame rendering.
//!
//! Each visible view draws its body rows and then its title bar below
//! them; the last row shows the prompt or the status message. ratatui
//! diffs the finished buffer against the previous frame, so only changed
//! cells reach the terminal.

use crate::model::LineType;
use crate::state::AppState;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::Frame;

/// Render the whole screen for `state`.
pub fn render(frame: &mut Frame, state: &AppState) {
    let cursor = render_buffer(frame.buffer_mut(), state);
    if let Some(position) = cursor {
        frame.set_cursor_position(position);
    }
}

/// Draw into `buf`, returning where the terminal cursor belongs while the
/// prompt is open.
pub fn render_buffer(buf: &mut Buffer, state: &AppState) -> Option<(u16, u16)> {
    let display = &state.display;
    let focused = display.focused();

    for pane in display.panes() {
        let view = display.view(pane.id);
        for row in 0..pane.body.height {
            let area = Rect::new(pane.body.x, pane.body.y + row, pane.body.width, 1);
            if !view.draw_row(row as usize, area, buf, &state.env) {
                break;
            }
        }

        let kind = if pane.id == focused {
            LineType::TitleFocus
        } else {
            LineType::TitleBlur
        };
        draw_bar(buf, pane.title, &view.title(), state.env.styles.lookup(kind));
    }

    render_status(buf, state)
}

fn render_status(buf: &mut Buffer, state: &AppState) -> Option<(u16, u16)> {
    let area = state.display.status_area();
    if area.height == 0 {
        return None;
    }

    let style = state.env.styles.lookup(LineType::Status);
    match &state.prompt {
        Some(prompt) => {
            let text = prompt.display();
            draw_bar(buf, area, &text, style);
            let leader = prompt.kind().leader().len();
            let column = prompt
                .input()
                .chars()
                .take(prompt.cursor())
                .map(|c| unicode_width::UnicodeWidthChar::width(c).unwrap_or(0))
                .sum::<usize>()
                + leader;
            let x = area.x + (column as u16).min(area.width.saturating_sub(1));
            Some((x, area.y))
        }
        None => {
            if let Some(message) = state.status() {
                draw_bar(buf, area, message, style);
            }
            None
        }
    }
}

/// Fill a one-row area with `style` and write `text` clipped to it.
fn draw_bar(buf: &mut Buffer, area: Rect, text: &str, style: ratatui::style::Style) {
    if area.height == 0 || area.width == 0 {
        return;
    }
    buf.set_style(area, style);
    buf.set_stringn(area.x, area.y, text, area.width as usize, style);
}
