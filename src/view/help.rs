//! Help page generated from the active key bindings.
//!
//! The text is loaded into the help view like any other pager content, so
//! it scrolls and searches the same way.

use crate::config::KeyBindings;
use crate::model::RequestGroup;

/// Column the request descriptions start at.
const KEY_COLUMN_WIDTH: usize = 16;

/// Build the help page, one section per request group.
pub fn help_text(bindings: &KeyBindings) -> String {
    let requests = bindings.requests();
    let mut text = String::from("Quick reference for gitscope keybindings:\n");

    for group in RequestGroup::ALL {
        let in_group: Vec<_> = requests.iter().filter(|r| r.group() == group).collect();
        if in_group.is_empty() {
            continue;
        }

        text.push('\n');
        text.push_str(group.title());
        text.push_str(":\n");

        for &request in in_group {
            let keys = bindings
                .keys_for(request)
                .iter()
                .map(|key| key.display_name())
                .collect::<Vec<_>>()
                .join(", ");
            text.push_str(&format!(
                "    {keys:<width$} {}\n",
                request.description(),
                width = KEY_COLUMN_WIDTH
            ));
        }
    }
    text
}
