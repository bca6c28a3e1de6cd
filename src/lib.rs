//! # rowline - Numbered, Row-Bounded Text Input
//!
//! A multiline input made of rows. Each row holds at most a fixed number of
//! characters and the input holds at most a fixed number of rows. Typing
//! past the end of a row continues on the next one, Enter splits a row,
//! and Backspace / Delete at a row boundary merge rows back together.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    Events    ┌──────────────┐    Outcome   ┌───────────┐
//! │    View     │◄─────────────│  RowEditor   │◄─────────────│ RowBuffer │
//! │             │              │              │              │           │
//! │ - Rows      │              │ - Validation │              │ - Rows    │
//! │ - Status    │              │ - Dispatch   │              │ - Limits  │
//! │ - Caret     │              │ - Cursor     │              │           │
//! └─────────────┘              └──────────────┘              └───────────┘
//!                                      ▲
//!                                      │ RowInput
//!                                      ▼
//!                               ┌──────────────┐
//!                               │  Controller  │
//!                               │              │
//!                               │ - Input      │
//!                               │   Mapping    │
//!                               │ - Event Loop │
//!                               └──────────────┘
//! ```
//!
//! The core is usable without a terminal:
//!
//! ```
//! use rowline::config::RowLimits;
//! use rowline::{EditKey, RowEditor};
//!
//! let limits = RowLimits::new(Some(5), Some(3)).unwrap();
//! let mut editor = RowEditor::new(limits);
//! editor.handle_key(EditKey::Insert("abcdef".to_string())).unwrap();
//!
//! assert_eq!(editor.buffer().lines(), vec!["abcde", "f"]);
//! ```

pub mod cmd_args;
pub mod config;
pub mod editor;

// Re-export main types for easy access
pub use editor::*;
