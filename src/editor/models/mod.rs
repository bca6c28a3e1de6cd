//! # Models
//!
//! Pure row data and the buffer that owns it. Nothing here knows about
//! terminals or key codes.

pub mod row;
pub mod row_buffer;

pub use row::Row;
pub use row_buffer::{EditError, EditOutcome, EditStatus, RowBuffer, SkipReason};
