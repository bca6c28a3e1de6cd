//! # Row Editor Implementation
//!
//! MVVM layout: models hold the rows, commands hold the edit rules, the
//! view model dispatches input, views draw, and the controller runs the
//! event loop.

pub mod commands;
pub mod controllers;
pub mod events;
pub mod io;
pub mod models;
pub mod view_models;
pub mod views;

// Re-export core types
pub use controllers::{AppController, SessionStats};
pub use events::*;
pub use models::{EditError, EditOutcome, EditStatus, Row, RowBuffer, SkipReason};
pub use view_models::RowEditor;
pub use views::{RowView, StatusLine, TerminalRenderer};

// Re-export specific items from commands to avoid conflicts
pub use commands::{Command, CommandContext, CommandRegistry};
