//! # Views Module
//!
//! Contains all view-related components for rendering the terminal interface.

pub mod layout;
pub mod terminal_renderer;

// Re-export main types for convenience
pub use layout::RowLayout;
pub use terminal_renderer::{RowView, StatusLine, TerminalRenderer};
