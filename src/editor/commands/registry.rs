//! # Command Registry
//!
//! Holds every Command and picks the first one whose `is_relevant` accepts
//! the input. Boundary commands are registered before the in-row ones.

use std::sync::Arc;

use crate::editor::events::RowInput;

use super::{
    editing::{InsertTextCommand, MergeBackwardCommand, MergeForwardCommand, SplitRowCommand},
    movement::{
        MoveDownCommand, MoveLeftAcrossBoundaryCommand, MoveRightAcrossBoundaryCommand,
        MoveUpCommand,
    },
    native::{
        DeleteBackwardCommand, DeleteForwardCommand, MoveEndCommand, MoveHomeCommand,
        MoveLeftCommand, MoveRightCommand,
    },
    Command, CommandContext,
};

// Type alias for complex Command type
type CommandArc = Arc<dyn Command>;

pub struct CommandRegistry {
    commands: Vec<CommandArc>,
}

impl CommandRegistry {
    /// Create a new registry with default commands
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register_default_commands();
        registry
    }

    /// Create a registry with no commands registered
    pub fn empty() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    fn register_default_commands(&mut self) {
        // Editing
        self.add_command(Arc::new(InsertTextCommand));
        self.add_command(Arc::new(SplitRowCommand));
        self.add_command(Arc::new(MergeBackwardCommand));
        self.add_command(Arc::new(MergeForwardCommand));

        // Navigation across rows
        self.add_command(Arc::new(MoveUpCommand));
        self.add_command(Arc::new(MoveDownCommand));
        self.add_command(Arc::new(MoveLeftAcrossBoundaryCommand));
        self.add_command(Arc::new(MoveRightAcrossBoundaryCommand));

        // In-row fallbacks
        self.add_command(Arc::new(DeleteBackwardCommand));
        self.add_command(Arc::new(DeleteForwardCommand));
        self.add_command(Arc::new(MoveLeftCommand));
        self.add_command(Arc::new(MoveRightCommand));
        self.add_command(Arc::new(MoveHomeCommand));
        self.add_command(Arc::new(MoveEndCommand));
    }

    pub fn add_command(&mut self, command: CommandArc) {
        self.commands.push(command);
    }

    /// Find the first command relevant to this input
    pub fn find(&self, input: &RowInput, context: &CommandContext) -> Option<CommandArc> {
        for command in &self.commands {
            if command.is_relevant(input, context) {
                tracing::debug!(
                    "Found relevant command: {} for {:?} at {:?}",
                    command.name(),
                    input.key,
                    input.cursor()
                );
                return Some(Arc::clone(command));
            }
        }

        tracing::debug!(
            "No relevant command found for {:?} at {:?}",
            input.key,
            input.cursor()
        );
        None
    }

    /// Get all registered commands (for testing/debugging)
    pub fn get_all_commands(&self) -> &[CommandArc] {
        &self.commands
    }

    pub fn command_count(&self) -> usize {
        self.commands.len()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
