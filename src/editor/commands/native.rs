//! # Native Row Commands
//!
//! What a single-line text field does on its own: delete around the caret
//! and move the caret inside the row. Registered after the boundary
//! commands, whose guards are the exact complement of these.

use crate::editor::{
    events::{EditKey, RowInput},
    models::{EditError, EditOutcome, RowBuffer},
};

use super::{Command, CommandContext};

/// Backspace inside a row
pub struct DeleteBackwardCommand;

impl Command for DeleteBackwardCommand {
    fn is_relevant(&self, input: &RowInput, context: &CommandContext) -> bool {
        matches!(input.key, EditKey::Backspace) && !context.at_row_start(input)
    }

    fn handle(&self, input: &RowInput, buffer: &mut RowBuffer) -> Result<EditOutcome, EditError> {
        buffer.delete_backward(input.cursor())
    }

    fn name(&self) -> &'static str {
        "DeleteBackward"
    }
}

/// Delete inside a row
pub struct DeleteForwardCommand;

impl Command for DeleteForwardCommand {
    fn is_relevant(&self, input: &RowInput, context: &CommandContext) -> bool {
        matches!(input.key, EditKey::Delete) && !context.at_row_end(input)
    }

    fn handle(&self, input: &RowInput, buffer: &mut RowBuffer) -> Result<EditOutcome, EditError> {
        buffer.delete_forward(input.cursor())
    }

    fn name(&self) -> &'static str {
        "DeleteForward"
    }
}

pub struct MoveLeftCommand;

impl Command for MoveLeftCommand {
    fn is_relevant(&self, input: &RowInput, context: &CommandContext) -> bool {
        matches!(input.key, EditKey::ArrowLeft) && !context.at_row_start(input)
    }

    fn handle(&self, input: &RowInput, buffer: &mut RowBuffer) -> Result<EditOutcome, EditError> {
        buffer.move_left(input.cursor())
    }

    fn name(&self) -> &'static str {
        "MoveLeft"
    }
}

pub struct MoveRightCommand;

impl Command for MoveRightCommand {
    fn is_relevant(&self, input: &RowInput, context: &CommandContext) -> bool {
        matches!(input.key, EditKey::ArrowRight) && !context.at_row_end(input)
    }

    fn handle(&self, input: &RowInput, buffer: &mut RowBuffer) -> Result<EditOutcome, EditError> {
        buffer.move_right(input.cursor())
    }

    fn name(&self) -> &'static str {
        "MoveRight"
    }
}

pub struct MoveHomeCommand;

impl Command for MoveHomeCommand {
    fn is_relevant(&self, input: &RowInput, _context: &CommandContext) -> bool {
        matches!(input.key, EditKey::Home)
    }

    fn handle(&self, input: &RowInput, buffer: &mut RowBuffer) -> Result<EditOutcome, EditError> {
        buffer.move_home(input.cursor())
    }

    fn name(&self) -> &'static str {
        "MoveHome"
    }
}

pub struct MoveEndCommand;

impl Command for MoveEndCommand {
    fn is_relevant(&self, input: &RowInput, _context: &CommandContext) -> bool {
        matches!(input.key, EditKey::End)
    }

    fn handle(&self, input: &RowInput, buffer: &mut RowBuffer) -> Result<EditOutcome, EditError> {
        buffer.move_end(input.cursor())
    }

    fn name(&self) -> &'static str {
        "MoveEnd"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RowLimits;
    use crate::editor::events::Cursor;

    fn run(
        command: &dyn Command,
        lines: &[&str],
        key: EditKey,
        cursor: Cursor,
    ) -> (RowBuffer, Option<EditOutcome>) {
        let mut buffer =
            RowBuffer::from_lines(RowLimits::unbounded(), lines.iter().copied()).unwrap();
        let text = buffer.row(cursor.row_index).unwrap().text().to_string();
        let input = RowInput::new(key, cursor, text);
        let context = CommandContext::from_buffer(&buffer, &input);

        if !command.is_relevant(&input, &context) {
            return (buffer, None);
        }
        let outcome = command.handle(&input, &mut buffer).unwrap();
        (buffer, Some(outcome))
    }

    #[test]
    fn delete_backward_should_remove_char_inside_row() {
        let (buffer, outcome) = run(
            &DeleteBackwardCommand,
            &["abc"],
            EditKey::Backspace,
            Cursor::new(0, 3),
        );
        assert_eq!(buffer.lines(), vec!["ab"]);
        assert_eq!(outcome.unwrap().cursor, Cursor::new(0, 2));
    }

    #[test]
    fn delete_backward_should_yield_to_merge_at_column_zero() {
        let (_, outcome) = run(
            &DeleteBackwardCommand,
            &["ab", "cd"],
            EditKey::Backspace,
            Cursor::new(1, 0),
        );
        assert!(outcome.is_none());
    }

    #[test]
    fn delete_forward_should_yield_to_merge_at_row_end() {
        let (_, outcome) = run(
            &DeleteForwardCommand,
            &["ab", "cd"],
            EditKey::Delete,
            Cursor::new(0, 2),
        );
        assert!(outcome.is_none());
    }

    #[test]
    fn move_left_and_right_should_step_one_column() {
        let (_, left) = run(&MoveLeftCommand, &["abc"], EditKey::ArrowLeft, Cursor::new(0, 2));
        assert_eq!(left.unwrap().cursor, Cursor::new(0, 1));

        let (_, right) = run(
            &MoveRightCommand,
            &["abc"],
            EditKey::ArrowRight,
            Cursor::new(0, 2),
        );
        assert_eq!(right.unwrap().cursor, Cursor::new(0, 3));
    }

    #[test]
    fn home_and_end_should_jump_to_row_edges() {
        let (_, home) = run(&MoveHomeCommand, &["abc"], EditKey::Home, Cursor::new(0, 2));
        assert_eq!(home.unwrap().cursor, Cursor::zero());

        let (_, end) = run(&MoveEndCommand, &["abc"], EditKey::End, Cursor::new(0, 0));
        assert_eq!(end.unwrap().cursor, Cursor::new(0, 3));
    }
}
