//! UI state machine (pure).
//!
//! All state transitions are pure functions testable without TUI.

pub mod app_state;
pub mod dispatch;
pub mod display;
pub mod prompt;
pub mod search;

// Re-export for convenience
pub use app_state::AppState;
pub use dispatch::{handle_request, pump_views, Flow};
pub use display::{CloseError, DisplayManager, Pane};
pub use prompt::{Prompt, PromptKind, PromptOutcome};
pub use search::{Direction, SearchMatch, SearchQuery, SearchState};
