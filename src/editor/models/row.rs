//! A single bounded text cell and its derived display artifacts.

/// One row of the buffer.
///
/// `index` is the 1-based line label and always equals the row's position
/// in its buffer plus one. `char_count` mirrors `text` and is what the view
/// shows next to the row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    index: usize,
    text: String,
    char_count: usize,
}

impl Row {
    pub(crate) fn new(index: usize, text: impl Into<String>) -> Self {
        let text = text.into();
        let char_count = text.chars().count();
        Self {
            index,
            text,
            char_count,
        }
    }

    /// 1-based line number
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Live character count for the row
    pub fn char_count(&self) -> usize {
        self.char_count
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub(crate) fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    pub(crate) fn set_text(&mut self, text: String) {
        self.char_count = text.chars().count();
        self.text = text;
    }
}
