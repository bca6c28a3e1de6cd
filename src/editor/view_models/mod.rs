//! # ViewModel Module
//!
//! Coordinates the row buffer, the command registry and the events the
//! view consumes.

mod row_editor;

pub use row_editor::RowEditor;
