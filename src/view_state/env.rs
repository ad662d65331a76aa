//! Shared rendering context.

use crate::config::ViewOptions;
use crate::model::RefSet;
use crate::view::styles::StyleTable;

/// Everything views read while drawing but never own.
///
/// Passed by reference to draw routines so each view stays a plain value.
#[derive(Debug, Clone, Default)]
pub struct Env {
    /// Style for each line type.
    pub styles: StyleTable,
    /// Refs labelled in the main view.
    pub refs: RefSet,
    /// Tab size and line number settings.
    pub options: ViewOptions,
}
