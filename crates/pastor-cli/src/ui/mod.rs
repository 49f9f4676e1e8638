//! UI primitives for the Pastor CLI.
//!
//! - **Context**: Environment detection (TTY, color, unicode)
//! - **Theme**: Badge tokens and the color palette
//! - **Render**: Badges, hints and error messages

mod context;
pub mod render;
pub mod theme;

pub use context::UiContext;
pub use render::{print_error, print_status};
pub use theme::Badge;
