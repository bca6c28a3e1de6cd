//! # Text Editing Commands
//!
//! Insert with overflow wrap, Enter split, and the Backspace / Delete merges
//! that fire at row boundaries.

use crate::editor::{
    events::{EditKey, RowInput},
    models::{EditError, EditOutcome, RowBuffer},
};

use super::{Command, CommandContext};

/// Insert typed or pasted text at the caret
pub struct InsertTextCommand;

impl Command for InsertTextCommand {
    fn is_relevant(&self, input: &RowInput, _context: &CommandContext) -> bool {
        matches!(input.key, EditKey::Insert(_))
    }

    fn handle(&self, input: &RowInput, buffer: &mut RowBuffer) -> Result<EditOutcome, EditError> {
        match &input.key {
            EditKey::Insert(text) => buffer.insert_text(input.cursor(), text),
            _ => buffer.insert_text(input.cursor(), ""),
        }
    }

    fn name(&self) -> &'static str {
        "InsertText"
    }
}

/// Split the row at the caret (Enter)
///
/// Relevant even at the row limit so that the rejection is reported.
pub struct SplitRowCommand;

impl Command for SplitRowCommand {
    fn is_relevant(&self, input: &RowInput, _context: &CommandContext) -> bool {
        matches!(input.key, EditKey::Enter)
    }

    fn handle(&self, input: &RowInput, buffer: &mut RowBuffer) -> Result<EditOutcome, EditError> {
        buffer.split_at_cursor(input.cursor())
    }

    fn name(&self) -> &'static str {
        "SplitRow"
    }
}

/// Backspace at column 0 of any row but the first
pub struct MergeBackwardCommand;

impl Command for MergeBackwardCommand {
    fn is_relevant(&self, input: &RowInput, context: &CommandContext) -> bool {
        matches!(input.key, EditKey::Backspace)
            && context.at_row_start(input)
            && context.has_row_above(input)
    }

    fn handle(&self, input: &RowInput, buffer: &mut RowBuffer) -> Result<EditOutcome, EditError> {
        buffer.merge_backward(input.cursor())
    }

    fn name(&self) -> &'static str {
        "MergeBackward"
    }
}

/// Delete at the end of any row but the last
pub struct MergeForwardCommand;

impl Command for MergeForwardCommand {
    fn is_relevant(&self, input: &RowInput, context: &CommandContext) -> bool {
        matches!(input.key, EditKey::Delete)
            && context.at_row_end(input)
            && context.has_row_below(input)
    }

    fn handle(&self, input: &RowInput, buffer: &mut RowBuffer) -> Result<EditOutcome, EditError> {
        buffer.merge_forward(input.cursor())
    }

    fn name(&self) -> &'static str {
        "MergeForward"
    }
}
