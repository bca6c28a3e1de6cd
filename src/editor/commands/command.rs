//! # Command Pattern Infrastructure
//!
//! Commands own one edit rule each: `is_relevant` holds the key binding and
//! boundary guard, `handle` runs the matching [`RowBuffer`] operation.

use crate::editor::{
    events::RowInput,
    models::{EditError, EditOutcome, RowBuffer},
};

/// Command trait for row editing
///
/// Only one registered command should return true from `is_relevant` for
/// any given input; the registry executes the first match.
pub trait Command: Send + Sync {
    /// Check if this command should handle the given input
    fn is_relevant(&self, input: &RowInput, context: &CommandContext) -> bool;

    /// Run the command against the buffer
    fn handle(&self, input: &RowInput, buffer: &mut RowBuffer) -> Result<EditOutcome, EditError>;

    /// Get command name for debugging and logging
    fn name(&self) -> &'static str;
}

/// Read-only facts about the buffer that guards consult
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandContext {
    pub row_count: usize,
    pub row_length: usize,
    pub at_row_limit: bool,
}

impl CommandContext {
    pub fn from_buffer(buffer: &RowBuffer, input: &RowInput) -> Self {
        Self {
            row_count: buffer.row_count(),
            row_length: buffer.row_length(input.row_index),
            at_row_limit: buffer.is_at_row_limit(),
        }
    }

    pub fn at_row_start(&self, input: &RowInput) -> bool {
        input.caret_column == 0
    }

    pub fn at_row_end(&self, input: &RowInput) -> bool {
        input.caret_column == self.row_length
    }

    pub fn has_row_above(&self, input: &RowInput) -> bool {
        input.row_index > 0
    }

    pub fn has_row_below(&self, input: &RowInput) -> bool {
        input.row_index + 1 < self.row_count
    }
}
