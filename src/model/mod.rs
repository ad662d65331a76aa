//! Domain model types (pure).
//!
//! Lines, commit records, refs and requests carry no terminal or process state.

pub mod commit;
pub mod error;
pub mod line;
pub mod refs;
pub mod request;

// Re-export for convenience
pub use commit::Commit;
pub use error::{AppError, LayoutError, LoadError, ParseError};
pub use line::{classify, prefix_of, Line, LineData, LineType};
pub use refs::{Ref, RefSet};
pub use request::{Request, RequestGroup};
