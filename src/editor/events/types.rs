//! # Core Event Types
//!
//! Caret positions and the discrete input vocabulary that the view
//! delivers to the dispatcher.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Caret position: 0-based row index and a column inside that row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cursor {
    pub row_index: usize,
    pub column: usize,
}

impl Cursor {
    pub fn new(row_index: usize, column: usize) -> Self {
        Self { row_index, column }
    }

    pub fn zero() -> Self {
        Self::new(0, 0)
    }
}

/// Input kinds the editor understands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditKey {
    /// One typed character or a pasted run of text
    Insert(String),
    Enter,
    Backspace,
    Delete,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
}

impl EditKey {
    /// Map a terminal key press onto an edit key.
    ///
    /// Chords with Control or Alt are not edits and map to `None`.
    pub fn from_key_event(event: KeyEvent) -> Option<Self> {
        if event
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return None;
        }

        match event.code {
            KeyCode::Char(ch) if !ch.is_control() => Some(Self::Insert(ch.to_string())),
            KeyCode::Enter => Some(Self::Enter),
            KeyCode::Backspace => Some(Self::Backspace),
            KeyCode::Delete => Some(Self::Delete),
            KeyCode::Up => Some(Self::ArrowUp),
            KeyCode::Down => Some(Self::ArrowDown),
            KeyCode::Left => Some(Self::ArrowLeft),
            KeyCode::Right => Some(Self::ArrowRight),
            KeyCode::Home => Some(Self::Home),
            KeyCode::End => Some(Self::End),
            _ => None,
        }
    }
}

/// One input event as reported by the view: the key plus where the caret
/// was and what the focused row showed at the time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowInput {
    pub key: EditKey,
    pub row_index: usize,
    pub caret_column: usize,
    pub row_text: String,
}

impl RowInput {
    pub fn new(key: EditKey, cursor: Cursor, row_text: impl Into<String>) -> Self {
        Self {
            key,
            row_index: cursor.row_index,
            caret_column: cursor.column,
            row_text: row_text.into(),
        }
    }

    pub fn cursor(&self) -> Cursor {
        Cursor::new(self.row_index, self.caret_column)
    }

    /// Length of the reported row text in characters
    pub fn row_length(&self) -> usize {
        self.row_text.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_should_create_correctly() {
        let cursor = Cursor::new(2, 7);
        assert_eq!(cursor.row_index, 2);
        assert_eq!(cursor.column, 7);
        assert_eq!(Cursor::zero(), Cursor::new(0, 0));
    }

    #[test]
    fn cursor_should_order_by_row_then_column() {
        assert!(Cursor::new(0, 9) < Cursor::new(1, 0));
        assert!(Cursor::new(1, 2) < Cursor::new(1, 3));
    }

    #[test]
    fn printable_chars_should_map_to_insert() {
        let event = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(
            EditKey::from_key_event(event),
            Some(EditKey::Insert("a".to_string()))
        );
    }

    #[test]
    fn shifted_chars_should_map_to_insert() {
        let event = KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT);
        assert_eq!(
            EditKey::from_key_event(event),
            Some(EditKey::Insert("G".to_string()))
        );
    }

    #[test]
    fn control_chords_should_not_map() {
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(EditKey::from_key_event(event), None);
    }

    #[test]
    fn navigation_keys_should_map() {
        let cases = [
            (KeyCode::Enter, EditKey::Enter),
            (KeyCode::Backspace, EditKey::Backspace),
            (KeyCode::Delete, EditKey::Delete),
            (KeyCode::Up, EditKey::ArrowUp),
            (KeyCode::Down, EditKey::ArrowDown),
            (KeyCode::Left, EditKey::ArrowLeft),
            (KeyCode::Right, EditKey::ArrowRight),
            (KeyCode::Home, EditKey::Home),
            (KeyCode::End, EditKey::End),
        ];

        for (code, expected) in cases {
            let event = KeyEvent::new(code, KeyModifiers::NONE);
            assert_eq!(EditKey::from_key_event(event), Some(expected));
        }
    }

    #[test]
    fn row_input_should_expose_cursor_and_length() {
        let input = RowInput::new(EditKey::Backspace, Cursor::new(1, 0), "héllo");
        assert_eq!(input.cursor(), Cursor::new(1, 0));
        assert_eq!(input.row_length(), 5);
    }
}
