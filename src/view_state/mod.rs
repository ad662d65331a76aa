//! View-state layer - per-view content, viewport and loading
//!
//! # Module Structure
//!
//! - `buffer`: LineBuffer - append-only line storage
//! - `view`: View - lines, cursor, offset, loader and title of one view
//! - `kind`: ContentKind - parse/draw/enter per content kind
//! - `pager`: classified text lines (diff, log, help, pager views)
//! - `main_view`: commit records (main view)
//! - `scroll`: cursor movement and viewport scrolling
//! - `env`: Env - styles, refs and options shared while drawing

pub mod buffer;
pub mod env;
pub mod kind;
pub mod main_view;
pub mod pager;
pub mod scroll;
pub mod view;

pub use buffer::LineBuffer;
pub use env::Env;
pub use kind::{ContentKind, EnterAction};
pub use scroll::{Movement, Scroll, ScrollError};
pub use view::{LoadState, View, ViewId, ViewSource};
