//! # Row Editor
//!
//! The single writer of a [`RowBuffer`]. Each input is checked against the
//! buffer, routed through the [`CommandRegistry`] to at most one command,
//! and the outcome is turned into model events for subscribers and view
//! events for whoever renders.

use crate::config::RowLimits;
use crate::editor::commands::{CommandContext, CommandRegistry};
use crate::editor::events::{Cursor, EditKey, EventBus, ModelEvent, RowInput, ViewEvent};
use crate::editor::models::{EditError, EditOutcome, Row, RowBuffer};

/// Type alias for event bus option to reduce complexity
type EventBusOption = Option<Box<dyn EventBus>>;

pub struct RowEditor {
    buffer: RowBuffer,
    cursor: Cursor,
    registry: CommandRegistry,
    event_bus: EventBusOption,
    pending_view_events: Vec<ViewEvent>,
    last_truncation: Option<String>,
}

impl RowEditor {
    /// Create an editor over one empty row
    pub fn new(limits: RowLimits) -> Self {
        Self::with_buffer(RowBuffer::new(limits))
    }

    /// Create an editor over an existing buffer, caret at the end of the last row
    pub fn with_buffer(buffer: RowBuffer) -> Self {
        let cursor = buffer.end_cursor();
        Self {
            buffer,
            cursor,
            registry: CommandRegistry::new(),
            event_bus: None,
            pending_view_events: Vec::new(),
            last_truncation: None,
        }
    }

    pub fn set_event_bus(&mut self, event_bus: Box<dyn EventBus>) {
        self.event_bus = Some(event_bus);
        tracing::debug!("Event bus set for RowEditor");
    }

    pub fn buffer(&self) -> &RowBuffer {
        &self.buffer
    }

    pub fn rows(&self) -> &[Row] {
        self.buffer.rows()
    }

    pub fn limits(&self) -> RowLimits {
        self.buffer.limits()
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Text of the row holding the caret
    pub fn current_row_text(&self) -> &str {
        self.buffer
            .row(self.cursor.row_index)
            .map_or("", Row::text)
    }

    /// Text dropped by the most recent truncating insert, if any.
    ///
    /// Cleared by the next edit that changes content without dropping text.
    pub fn last_truncation(&self) -> Option<&str> {
        self.last_truncation.as_deref()
    }

    /// Build the input the view would report for `key` at the current caret
    pub fn input(&self, key: EditKey) -> RowInput {
        RowInput::new(key, self.cursor, self.current_row_text())
    }

    /// Handle a key at the current caret position
    pub fn handle_key(&mut self, key: EditKey) -> Result<Option<EditOutcome>, EditError> {
        let input = self.input(key);
        self.handle_input(input)
    }

    /// Dispatch one input reported by the view.
    ///
    /// Returns `Ok(None)` when no command's guard accepts the input. The
    /// buffer is left untouched when the input is rejected with an error.
    pub fn handle_input(&mut self, input: RowInput) -> Result<Option<EditOutcome>, EditError> {
        self.buffer.validate(input.cursor())?;

        let buffer_text = self.buffer.row(input.row_index).map_or("", Row::text);
        if buffer_text != input.row_text {
            tracing::warn!(
                "rejecting {:?}: view reported stale text for row {}",
                input.key,
                input.row_index
            );
            return Err(EditError::StaleRowText {
                row_index: input.row_index,
            });
        }

        let context = CommandContext::from_buffer(&self.buffer, &input);
        let Some(command) = self.registry.find(&input, &context) else {
            return Ok(None);
        };

        let outcome = command.handle(&input, &mut self.buffer)?;
        tracing::debug!(
            "{} -> {:?}, cursor {:?}",
            command.name(),
            outcome.status,
            outcome.cursor
        );

        if input.cursor() != self.cursor {
            // The view moved the caret on its own before reporting this input
            self.cursor = input.cursor();
        }
        self.apply_outcome(&outcome);
        Ok(Some(outcome))
    }

    /// Focus the end of the last row
    pub fn focus_last_row(&mut self) -> Cursor {
        let target = self.buffer.end_cursor();
        self.move_cursor_to(target);
        target
    }

    /// Focus an arbitrary position, clamped into the buffer
    pub fn focus_at(&mut self, cursor: Cursor) -> Cursor {
        let target = self.buffer.clamp(cursor);
        self.move_cursor_to(target);
        target
    }

    /// Collect and clear pending view events
    pub fn collect_pending_view_events(&mut self) -> Vec<ViewEvent> {
        std::mem::take(&mut self.pending_view_events)
    }

    fn apply_outcome(&mut self, outcome: &EditOutcome) {
        for event in &outcome.events {
            self.publish_model_event(event.clone());
        }

        let content_changed = outcome.content_changed();
        if content_changed {
            self.emit_view_event(ViewEvent::FullRedrawRequired);
        }

        if let Some(dropped) = outcome.dropped_text() {
            self.last_truncation = Some(dropped.to_string());
            self.emit_view_event(ViewEvent::StatusBarUpdateRequired);
        } else if content_changed && self.last_truncation.take().is_some() {
            self.emit_view_event(ViewEvent::StatusBarUpdateRequired);
        }

        if outcome.cursor != self.cursor {
            self.move_cursor_to(outcome.cursor);
        } else if content_changed {
            // Rows were redrawn, so the caret has to be placed again
            self.emit_view_event(ViewEvent::FocusRequested {
                cursor: self.cursor,
            });
        }
    }

    fn move_cursor_to(&mut self, target: Cursor) {
        let old_pos = self.cursor;
        self.cursor = target;
        if old_pos != target {
            self.publish_model_event(ModelEvent::CursorMoved {
                old_pos,
                new_pos: target,
            });
        }
        self.emit_view_event(ViewEvent::FocusRequested { cursor: target });
    }

    fn publish_model_event(&mut self, event: ModelEvent) {
        if let Some(bus) = self.event_bus.as_mut() {
            bus.publish_model_event(event);
        }
    }

    fn emit_view_event(&mut self, event: ViewEvent) {
        self.pending_view_events.push(event);
        tracing::trace!("View event emitted: {:?}", self.pending_view_events.last());
    }
}
