//! # Model Events
//!
//! Events emitted when the row buffer or the cursor changes.
//! Every mutating buffer operation reports what it did through these.

use super::types::Cursor;

/// Events emitted when models change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelEvent {
    /// A row was inserted at this 0-based position
    RowInserted { row_index: usize },

    /// The row at this 0-based position was removed
    RowRemoved { row_index: usize },

    /// A row's text changed; `char_count` is its new length
    RowTextChanged { row_index: usize, char_count: usize },

    /// Line labels were recomputed for every row from `from_row` to the end
    RowsRenumbered { from_row: usize },

    /// Overflow text was discarded because the row limit was reached
    TextTruncated { row_index: usize, dropped: String },

    /// The caret moved
    CursorMoved { old_pos: Cursor, new_pos: Cursor },
}

impl ModelEvent {
    /// Whether the event describes a change to row structure or text
    pub fn is_content_change(&self) -> bool {
        matches!(
            self,
            Self::RowInserted { .. }
                | Self::RowRemoved { .. }
                | Self::RowTextChanged { .. }
                | Self::RowsRenumbered { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_moved_event_should_carry_position_data() {
        let old_pos = Cursor::new(1, 2);
        let new_pos = Cursor::new(3, 4);
        let event = ModelEvent::CursorMoved { old_pos, new_pos };

        match event {
            ModelEvent::CursorMoved {
                old_pos: o,
                new_pos: n,
            } => {
                assert_eq!(o, old_pos);
                assert_eq!(n, new_pos);
            }
            _ => panic!("Expected CursorMoved event"),
        }
    }

    #[test]
    fn structural_events_should_count_as_content_changes() {
        assert!(ModelEvent::RowInserted { row_index: 1 }.is_content_change());
        assert!(ModelEvent::RowRemoved { row_index: 1 }.is_content_change());
        assert!(ModelEvent::RowsRenumbered { from_row: 0 }.is_content_change());
        assert!(ModelEvent::RowTextChanged {
            row_index: 0,
            char_count: 3
        }
        .is_content_change());
    }

    #[test]
    fn cursor_and_truncation_events_should_not_count_as_content_changes() {
        let moved = ModelEvent::CursorMoved {
            old_pos: Cursor::zero(),
            new_pos: Cursor::new(0, 1),
        };
        let truncated = ModelEvent::TextTruncated {
            row_index: 2,
            dropped: "xyz".to_string(),
        };

        assert!(!moved.is_content_change());
        assert!(!truncated.is_content_change());
    }
}
