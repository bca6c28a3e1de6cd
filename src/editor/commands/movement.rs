//! # Movement Commands
//!
//! Vertical moves and the arrow keys that cross row boundaries. Arrow
//! presses that stay inside a row are handled by the native commands.

use crate::editor::{
    events::{EditKey, RowInput},
    models::{EditError, EditOutcome, RowBuffer},
};

use super::{Command, CommandContext};

/// Move cursor up one row
pub struct MoveUpCommand;

impl Command for MoveUpCommand {
    fn is_relevant(&self, input: &RowInput, context: &CommandContext) -> bool {
        matches!(input.key, EditKey::ArrowUp) && context.has_row_above(input)
    }

    fn handle(&self, input: &RowInput, buffer: &mut RowBuffer) -> Result<EditOutcome, EditError> {
        buffer.move_up(input.cursor())
    }

    fn name(&self) -> &'static str {
        "MoveUp"
    }
}

/// Move cursor down one row
pub struct MoveDownCommand;

impl Command for MoveDownCommand {
    fn is_relevant(&self, input: &RowInput, context: &CommandContext) -> bool {
        matches!(input.key, EditKey::ArrowDown) && context.has_row_below(input)
    }

    fn handle(&self, input: &RowInput, buffer: &mut RowBuffer) -> Result<EditOutcome, EditError> {
        buffer.move_down(input.cursor())
    }

    fn name(&self) -> &'static str {
        "MoveDown"
    }
}

/// Left arrow at column 0 wraps to the end of the previous row
pub struct MoveLeftAcrossBoundaryCommand;

impl Command for MoveLeftAcrossBoundaryCommand {
    fn is_relevant(&self, input: &RowInput, context: &CommandContext) -> bool {
        matches!(input.key, EditKey::ArrowLeft)
            && context.at_row_start(input)
            && context.has_row_above(input)
    }

    fn handle(&self, input: &RowInput, buffer: &mut RowBuffer) -> Result<EditOutcome, EditError> {
        buffer.move_left_across_boundary(input.cursor())
    }

    fn name(&self) -> &'static str {
        "MoveLeftAcrossBoundary"
    }
}

/// Right arrow at the row end wraps to the start of the next row
pub struct MoveRightAcrossBoundaryCommand;

impl Command for MoveRightAcrossBoundaryCommand {
    fn is_relevant(&self, input: &RowInput, context: &CommandContext) -> bool {
        matches!(input.key, EditKey::ArrowRight)
            && context.at_row_end(input)
            && context.has_row_below(input)
    }

    fn handle(&self, input: &RowInput, buffer: &mut RowBuffer) -> Result<EditOutcome, EditError> {
        buffer.move_right_across_boundary(input.cursor())
    }

    fn name(&self) -> &'static str {
        "MoveRightAcrossBoundary"
    }
}
