//! # View Events
//!
//! Events related to view updates and raw terminal input.

use super::types::Cursor;
use crossterm::event::{Event, KeyEvent, KeyEventKind, MouseButton, MouseEventKind};

/// Events emitted when view updates are needed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// Re-render every row from the current snapshot
    FullRedrawRequired,

    /// Status line (row count, truncation notice) needs updating
    StatusBarUpdateRequired,

    /// Move input focus to this caret position
    FocusRequested { cursor: Cursor },
}

/// Input events from the terminal
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Key pressed
    KeyPressed(KeyEvent),

    /// Bracketed paste delivered as one piece of text
    Pasted(String),

    /// Left mouse button pressed at a screen cell
    Clicked { column: u16, row: u16 },

    /// Terminal resized
    TerminalResized { width: u16, height: u16 },
}

impl InputEvent {
    /// Translate a crossterm event, dropping the ones the editor ignores
    pub fn from_terminal_event(event: Event) -> Option<Self> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => Some(Self::KeyPressed(key)),
            Event::Paste(text) => Some(Self::Pasted(text)),
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => Some(Self::Clicked {
                    column: mouse.column,
                    row: mouse.row,
                }),
                _ => None,
            },
            Event::Resize(width, height) => Some(Self::TerminalResized { width, height }),
            _ => None,
        }
    }
}
