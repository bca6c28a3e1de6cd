//! # Row Buffer
//!
//! Owns the ordered rows of one input widget and implements the edit
//! operations over them. After every operation the buffer holds at least
//! one row, never more than the row limit, no row longer than capacity, and
//! line labels run 1..=n without gaps.
//!
//! Columns are measured in `char`s. Operations never panic on bad
//! coordinates: they return [`EditError`]. A precondition that does not
//! hold (Backspace at the very first column, Enter at the row limit, ...)
//! is not an error but an [`EditStatus::Skipped`] outcome.

use thiserror::Error;

use super::row::Row;
use crate::config::RowLimits;
use crate::editor::events::{Cursor, ModelEvent};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("row {row_index} is out of range (buffer has {row_count} rows)")]
    RowOutOfRange { row_index: usize, row_count: usize },

    #[error("column {column} is out of range for row {row_index} of length {row_length}")]
    ColumnOutOfRange {
        row_index: usize,
        column: usize,
        row_length: usize,
    },

    #[error("text reported for row {row_index} does not match the buffer")]
    StaleRowText { row_index: usize },

    #[error("row {row_index} holds {length} characters but capacity is {capacity}")]
    RowTooLong {
        row_index: usize,
        length: usize,
        capacity: usize,
    },

    #[error("{row_count} rows exceed the row limit of {limit}")]
    TooManyRows { row_count: usize, limit: usize },
}

/// Why an operation left the buffer untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    EmptyInsert,
    RowLimitReached,
    /// Boundary operation requested with the caret away from column 0
    NotAtRowStart,
    /// Boundary operation requested with the caret away from the row end
    NotAtRowEnd,
    /// In-row operation requested at column 0
    AtRowStart,
    /// In-row operation requested at the row end
    AtRowEnd,
    NoRowAbove,
    NoRowBelow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditStatus {
    Applied,
    /// Applied, but `dropped` did not fit under the row limit and was discarded
    Truncated { dropped: String },
    Skipped(SkipReason),
}

/// Result of one buffer operation: where the caret goes next, what
/// happened, and the model events describing the change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    pub cursor: Cursor,
    pub status: EditStatus,
    pub events: Vec<ModelEvent>,
}

impl EditOutcome {
    fn applied(cursor: Cursor, events: Vec<ModelEvent>) -> Self {
        Self {
            cursor,
            status: EditStatus::Applied,
            events,
        }
    }

    fn skipped(cursor: Cursor, reason: SkipReason) -> Self {
        Self {
            cursor,
            status: EditStatus::Skipped(reason),
            events: Vec::new(),
        }
    }

    pub fn is_applied(&self) -> bool {
        !matches!(self.status, EditStatus::Skipped(_))
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self.status {
            EditStatus::Skipped(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn dropped_text(&self) -> Option<&str> {
        match &self.status {
            EditStatus::Truncated { dropped } => Some(dropped),
            _ => None,
        }
    }

    pub fn content_changed(&self) -> bool {
        self.events.iter().any(ModelEvent::is_content_change)
    }
}

/// Byte offset of the `column`-th char, or the text length past the end
fn byte_offset(text: &str, column: usize) -> usize {
    text.char_indices()
        .nth(column)
        .map_or(text.len(), |(offset, _)| offset)
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn split_at_column(text: &str, column: usize) -> (&str, &str) {
    text.split_at(byte_offset(text, column))
}

/// The ordered rows of one widget plus its limits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowBuffer {
    rows: Vec<Row>,
    limits: RowLimits,
}

impl RowBuffer {
    /// Create a buffer holding exactly one empty row
    pub fn new(limits: RowLimits) -> Self {
        Self {
            rows: vec![Row::new(1, String::new())],
            limits,
        }
    }

    /// Create a buffer from existing row texts, checking them against `limits`
    pub fn from_lines<I, S>(limits: RowLimits, lines: I) -> Result<Self, EditError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let texts: Vec<String> = lines.into_iter().map(Into::into).collect();
        if texts.is_empty() {
            return Ok(Self::new(limits));
        }

        if let Some(limit) = limits.max_row_count() {
            if texts.len() > limit {
                return Err(EditError::TooManyRows {
                    row_count: texts.len(),
                    limit,
                });
            }
        }

        if let Some(capacity) = limits.max_char_count_in_row() {
            for (row_index, text) in texts.iter().enumerate() {
                let length = char_len(text);
                if length > capacity {
                    return Err(EditError::RowTooLong {
                        row_index,
                        length,
                        capacity,
                    });
                }
            }
        }

        let rows = texts
            .into_iter()
            .enumerate()
            .map(|(position, text)| Row::new(position + 1, text))
            .collect();

        Ok(Self { rows, limits })
    }

    pub fn limits(&self) -> RowLimits {
        self.limits
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, row_index: usize) -> Option<&Row> {
        self.rows.get(row_index)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Length of a row in chars; 0 for a row that does not exist
    pub fn row_length(&self, row_index: usize) -> usize {
        self.rows.get(row_index).map_or(0, Row::char_count)
    }

    pub fn lines(&self) -> Vec<&str> {
        self.rows.iter().map(Row::text).collect()
    }

    /// Owned copy of the current rows for a view to render from
    pub fn snapshot(&self) -> Vec<Row> {
        self.rows.clone()
    }

    pub fn is_at_row_limit(&self) -> bool {
        self.limits
            .max_row_count()
            .is_some_and(|limit| self.rows.len() >= limit)
    }

    /// Caret position at the end of the last row
    pub fn end_cursor(&self) -> Cursor {
        let last = self.rows.len() - 1;
        Cursor::new(last, self.row_length(last))
    }

    /// Clamp an arbitrary position into the buffer
    pub fn clamp(&self, cursor: Cursor) -> Cursor {
        let row_index = cursor.row_index.min(self.rows.len() - 1);
        Cursor::new(row_index, cursor.column.min(self.row_length(row_index)))
    }

    pub fn validate(&self, cursor: Cursor) -> Result<(), EditError> {
        let Some(row) = self.rows.get(cursor.row_index) else {
            return Err(EditError::RowOutOfRange {
                row_index: cursor.row_index,
                row_count: self.rows.len(),
            });
        };

        if cursor.column > row.char_count() {
            return Err(EditError::ColumnOutOfRange {
                row_index: cursor.row_index,
                column: cursor.column,
                row_length: row.char_count(),
            });
        }

        Ok(())
    }

    fn has_room_for_row(&self) -> bool {
        !self.is_at_row_limit()
    }

    fn fits(&self, length: usize) -> bool {
        self.limits
            .max_char_count_in_row()
            .map_or(true, |capacity| length <= capacity)
    }

    fn set_row_text(&mut self, row_index: usize, text: String, events: &mut Vec<ModelEvent>) {
        let row = &mut self.rows[row_index];
        if row.text() == text {
            return;
        }
        row.set_text(text);
        events.push(ModelEvent::RowTextChanged {
            row_index,
            char_count: row.char_count(),
        });
    }

    fn insert_row(&mut self, row_index: usize, text: String, events: &mut Vec<ModelEvent>) {
        self.rows.insert(row_index, Row::new(row_index + 1, text));
        events.push(ModelEvent::RowInserted { row_index });
    }

    fn remove_row(&mut self, row_index: usize, events: &mut Vec<ModelEvent>) {
        self.rows.remove(row_index);
        events.push(ModelEvent::RowRemoved { row_index });
    }

    /// Recompute line labels from `from_row` to the end
    fn renumber_from(&mut self, from_row: usize, events: &mut Vec<ModelEvent>) {
        for (position, row) in self.rows.iter_mut().enumerate().skip(from_row) {
            row.set_index(position + 1);
        }
        events.push(ModelEvent::RowsRenumbered { from_row });
    }

    fn debug_check_invariants(&self) {
        debug_assert!(!self.rows.is_empty(), "buffer must never be empty");
        if let Some(limit) = self.limits.max_row_count() {
            debug_assert!(self.rows.len() <= limit, "row limit exceeded");
        }
        for (position, row) in self.rows.iter().enumerate() {
            debug_assert_eq!(row.index(), position + 1, "line labels must be contiguous");
            debug_assert_eq!(row.char_count(), char_len(row.text()));
            debug_assert!(self.fits(row.char_count()), "row {} over capacity", position);
        }
    }

    /// Insert `text` at `at`, wrapping overflow into new rows directly below.
    ///
    /// Text after the caret travels with the overflow. New rows are created
    /// until the text is placed or the row limit is hit; whatever is left is
    /// dropped and reported as [`EditStatus::Truncated`]. The cursor lands
    /// right after the last inserted character that was kept.
    ///
    /// Control characters, line breaks included, are stripped first; rows
    /// are single-line.
    pub fn insert_text(&mut self, at: Cursor, text: &str) -> Result<EditOutcome, EditError> {
        self.validate(at)?;
        let text: String = text.chars().filter(|ch| !ch.is_control()).collect();
        let text = text.as_str();
        if text.is_empty() {
            return Ok(EditOutcome::skipped(at, SkipReason::EmptyInsert));
        }

        let (before, after) = split_at_column(self.rows[at.row_index].text(), at.column);
        let combined = [before, text, after].concat();
        let insert_end = at.column + char_len(text);
        let mut events = Vec::new();

        tracing::debug!(
            "insert_text at {:?}: {} chars, row becomes {} chars",
            at,
            char_len(text),
            char_len(&combined)
        );

        let capacity = match self.limits.max_char_count_in_row() {
            Some(capacity) if char_len(&combined) > capacity => capacity,
            _ => {
                self.set_row_text(at.row_index, combined, &mut events);
                self.debug_check_invariants();
                return Ok(EditOutcome::applied(
                    Cursor::new(at.row_index, insert_end),
                    events,
                ));
            }
        };

        let chars: Vec<char> = combined.chars().collect();
        let chunks: Vec<String> = chars
            .chunks(capacity)
            .map(|chunk| chunk.iter().collect())
            .collect();

        let free_rows = self
            .limits
            .max_row_count()
            .map_or(usize::MAX, |limit| limit.saturating_sub(self.rows.len()));
        let kept = chunks.len().min(free_rows.saturating_add(1));
        let dropped: String = chunks[kept..].concat();
        let kept_len = chars.len() - char_len(&dropped);

        let mut chunks = chunks.into_iter().take(kept);
        if let Some(first) = chunks.next() {
            self.set_row_text(at.row_index, first, &mut events);
        }
        for (offset, chunk) in chunks.enumerate() {
            self.insert_row(at.row_index + 1 + offset, chunk, &mut events);
        }
        if kept > 1 {
            self.renumber_from(at.row_index + 1, &mut events);
        }

        let cursor = if insert_end <= kept_len {
            let row_offset = (insert_end - 1) / capacity;
            Cursor::new(at.row_index + row_offset, insert_end - row_offset * capacity)
        } else {
            Cursor::new(at.row_index + kept - 1, capacity)
        };

        self.debug_check_invariants();

        if dropped.is_empty() {
            return Ok(EditOutcome::applied(cursor, events));
        }

        tracing::warn!(
            "row limit reached, dropped {} chars of overflow",
            char_len(&dropped)
        );
        events.push(ModelEvent::TextTruncated {
            row_index: at.row_index + kept - 1,
            dropped: dropped.clone(),
        });
        Ok(EditOutcome {
            cursor,
            status: EditStatus::Truncated { dropped },
            events,
        })
    }

    /// Enter: split the row at the caret, moving the tail into a new row below
    pub fn split_at_cursor(&mut self, at: Cursor) -> Result<EditOutcome, EditError> {
        self.validate(at)?;
        if !self.has_room_for_row() {
            tracing::debug!("split at {:?} rejected: row limit reached", at);
            return Ok(EditOutcome::skipped(at, SkipReason::RowLimitReached));
        }

        let (head, tail) = split_at_column(self.rows[at.row_index].text(), at.column);
        let (head, tail) = (head.to_string(), tail.to_string());
        let mut events = Vec::new();

        self.set_row_text(at.row_index, head, &mut events);
        self.insert_row(at.row_index + 1, tail, &mut events);
        self.renumber_from(at.row_index + 1, &mut events);
        self.debug_check_invariants();

        Ok(EditOutcome::applied(Cursor::new(at.row_index + 1, 0), events))
    }

    /// Backspace at column 0: pull this row into the previous one.
    ///
    /// If the joined text fits, the current row disappears. Otherwise the
    /// joined text is redistributed at the capacity boundary and both rows
    /// stay. Either way the cursor sits at the old end of the previous row.
    pub fn merge_backward(&mut self, at: Cursor) -> Result<EditOutcome, EditError> {
        self.validate(at)?;
        if at.column != 0 {
            return Ok(EditOutcome::skipped(at, SkipReason::NotAtRowStart));
        }
        if at.row_index == 0 {
            return Ok(EditOutcome::skipped(at, SkipReason::NoRowAbove));
        }

        let previous = at.row_index - 1;
        let boundary = self.row_length(previous);
        let sum = [self.rows[previous].text(), self.rows[at.row_index].text()].concat();
        let mut events = Vec::new();

        self.merge_pair(previous, sum, &mut events);
        self.debug_check_invariants();

        Ok(EditOutcome::applied(Cursor::new(previous, boundary), events))
    }

    /// Delete at the row end: pull the next row into this one.
    ///
    /// Mirror image of [`merge_backward`](Self::merge_backward); the cursor
    /// stays where it was. With the caret exactly at capacity the split point
    /// is the caret itself, so neither row changes.
    pub fn merge_forward(&mut self, at: Cursor) -> Result<EditOutcome, EditError> {
        self.validate(at)?;
        if at.column != self.row_length(at.row_index) {
            return Ok(EditOutcome::skipped(at, SkipReason::NotAtRowEnd));
        }
        if at.row_index + 1 >= self.rows.len() {
            return Ok(EditOutcome::skipped(at, SkipReason::NoRowBelow));
        }

        let next = at.row_index + 1;
        let sum = [self.rows[at.row_index].text(), self.rows[next].text()].concat();
        let mut events = Vec::new();

        self.merge_pair(at.row_index, sum, &mut events);
        self.debug_check_invariants();

        Ok(EditOutcome::applied(at, events))
    }

    /// Store `sum` (the text of `upper` and the row below it) back into the
    /// pair, removing the lower row when everything fits in `upper`.
    fn merge_pair(&mut self, upper: usize, sum: String, events: &mut Vec<ModelEvent>) {
        let lower = upper + 1;
        match self.limits.max_char_count_in_row() {
            Some(capacity) if char_len(&sum) > capacity => {
                let (head, tail) = split_at_column(&sum, capacity);
                tracing::debug!(
                    "merge of rows {} and {} overflows, redistributing at {}",
                    upper,
                    lower,
                    capacity
                );
                let (head, tail) = (head.to_string(), tail.to_string());
                self.set_row_text(upper, head, events);
                self.set_row_text(lower, tail, events);
            }
            _ => {
                self.set_row_text(upper, sum, events);
                self.remove_row(lower, events);
                self.renumber_from(lower, events);
            }
        }
    }

    /// Move to the same column of the row above, clamped to its length
    pub fn move_up(&self, at: Cursor) -> Result<EditOutcome, EditError> {
        self.validate(at)?;
        if at.row_index == 0 {
            return Ok(EditOutcome::skipped(at, SkipReason::NoRowAbove));
        }

        let target = at.row_index - 1;
        let column = at.column.min(self.row_length(target));
        Ok(EditOutcome::applied(Cursor::new(target, column), Vec::new()))
    }

    /// Move to the same column of the row below, clamped to its length
    pub fn move_down(&self, at: Cursor) -> Result<EditOutcome, EditError> {
        self.validate(at)?;
        if at.row_index + 1 >= self.rows.len() {
            return Ok(EditOutcome::skipped(at, SkipReason::NoRowBelow));
        }

        let target = at.row_index + 1;
        let column = at.column.min(self.row_length(target));
        Ok(EditOutcome::applied(Cursor::new(target, column), Vec::new()))
    }

    /// Left arrow at column 0: jump to the end of the previous row
    pub fn move_left_across_boundary(&self, at: Cursor) -> Result<EditOutcome, EditError> {
        self.validate(at)?;
        if at.column != 0 {
            return Ok(EditOutcome::skipped(at, SkipReason::NotAtRowStart));
        }
        if at.row_index == 0 {
            return Ok(EditOutcome::skipped(at, SkipReason::NoRowAbove));
        }

        let target = at.row_index - 1;
        Ok(EditOutcome::applied(
            Cursor::new(target, self.row_length(target)),
            Vec::new(),
        ))
    }

    /// Right arrow at the row end: jump to column 0 of the next row.
    /// On the last row this is a no-op.
    pub fn move_right_across_boundary(&self, at: Cursor) -> Result<EditOutcome, EditError> {
        self.validate(at)?;
        if at.column != self.row_length(at.row_index) {
            return Ok(EditOutcome::skipped(at, SkipReason::NotAtRowEnd));
        }
        if at.row_index + 1 >= self.rows.len() {
            return Ok(EditOutcome::skipped(at, SkipReason::NoRowBelow));
        }

        Ok(EditOutcome::applied(
            Cursor::new(at.row_index + 1, 0),
            Vec::new(),
        ))
    }

    /// Remove the char before the caret within the row
    pub fn delete_backward(&mut self, at: Cursor) -> Result<EditOutcome, EditError> {
        self.validate(at)?;
        if at.column == 0 {
            return Ok(EditOutcome::skipped(at, SkipReason::AtRowStart));
        }

        let text = self.rows[at.row_index].text();
        let start = byte_offset(text, at.column - 1);
        let end = byte_offset(text, at.column);
        let updated = [&text[..start], &text[end..]].concat();
        let mut events = Vec::new();

        self.set_row_text(at.row_index, updated, &mut events);
        self.debug_check_invariants();

        Ok(EditOutcome::applied(
            Cursor::new(at.row_index, at.column - 1),
            events,
        ))
    }

    /// Remove the char at the caret within the row
    pub fn delete_forward(&mut self, at: Cursor) -> Result<EditOutcome, EditError> {
        self.validate(at)?;
        if at.column == self.row_length(at.row_index) {
            return Ok(EditOutcome::skipped(at, SkipReason::AtRowEnd));
        }

        let text = self.rows[at.row_index].text();
        let start = byte_offset(text, at.column);
        let end = byte_offset(text, at.column + 1);
        let updated = [&text[..start], &text[end..]].concat();
        let mut events = Vec::new();

        self.set_row_text(at.row_index, updated, &mut events);
        self.debug_check_invariants();

        Ok(EditOutcome::applied(at, events))
    }

    pub fn move_left(&self, at: Cursor) -> Result<EditOutcome, EditError> {
        self.validate(at)?;
        if at.column == 0 {
            return Ok(EditOutcome::skipped(at, SkipReason::AtRowStart));
        }
        Ok(EditOutcome::applied(
            Cursor::new(at.row_index, at.column - 1),
            Vec::new(),
        ))
    }

    pub fn move_right(&self, at: Cursor) -> Result<EditOutcome, EditError> {
        self.validate(at)?;
        if at.column == self.row_length(at.row_index) {
            return Ok(EditOutcome::skipped(at, SkipReason::AtRowEnd));
        }
        Ok(EditOutcome::applied(
            Cursor::new(at.row_index, at.column + 1),
            Vec::new(),
        ))
    }

    pub fn move_home(&self, at: Cursor) -> Result<EditOutcome, EditError> {
        self.validate(at)?;
        Ok(EditOutcome::applied(
            Cursor::new(at.row_index, 0),
            Vec::new(),
        ))
    }

    pub fn move_end(&self, at: Cursor) -> Result<EditOutcome, EditError> {
        self.validate(at)?;
        Ok(EditOutcome::applied(
            Cursor::new(at.row_index, self.row_length(at.row_index)),
            Vec::new(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits(max_chars: usize, max_rows: usize) -> RowLimits {
        RowLimits::new(Some(max_chars), Some(max_rows)).unwrap()
    }

    fn buffer(lines: &[&str]) -> RowBuffer {
        RowBuffer::from_lines(limits(5, 3), lines.iter().copied()).unwrap()
    }

    fn assert_bookkeeping(buffer: &RowBuffer) {
        assert!(buffer.row_count() >= 1);
        for (position, row) in buffer.rows().iter().enumerate() {
            assert_eq!(row.index(), position + 1);
            assert_eq!(row.char_count(), row.text().chars().count());
        }
    }

    #[test]
    fn new_buffer_should_hold_one_empty_row() {
        let buffer = RowBuffer::new(limits(5, 3));
        assert_eq!(buffer.lines(), vec![""]);
        assert_eq!(buffer.rows()[0].index(), 1);
    }

    #[test]
    fn from_lines_should_reject_rows_over_capacity() {
        let err = RowBuffer::from_lines(limits(5, 3), ["abcdef"]).unwrap_err();
        assert_eq!(
            err,
            EditError::RowTooLong {
                row_index: 0,
                length: 6,
                capacity: 5
            }
        );
    }

    #[test]
    fn from_lines_should_reject_too_many_rows() {
        let err = RowBuffer::from_lines(limits(5, 2), ["a", "b", "c"]).unwrap_err();
        assert_eq!(
            err,
            EditError::TooManyRows {
                row_count: 3,
                limit: 2
            }
        );
    }

    #[test]
    fn from_lines_should_accept_row_exactly_at_capacity() {
        let buffer = RowBuffer::from_lines(limits(5, 3), ["abcde"]).unwrap();
        assert_eq!(buffer.row_length(0), 5);
    }

    #[test]
    fn insert_should_wrap_overflow_into_new_row() {
        let mut buffer = RowBuffer::new(limits(5, 3));
        let outcome = buffer.insert_text(Cursor::zero(), "abcdef").unwrap();

        assert_eq!(buffer.lines(), vec!["abcde", "f"]);
        assert_eq!(buffer.rows()[0].char_count(), 5);
        assert_eq!(buffer.rows()[1].char_count(), 1);
        assert_eq!(outcome.cursor, Cursor::new(1, 1));
        assert_eq!(outcome.status, EditStatus::Applied);
        assert_bookkeeping(&buffer);
    }

    #[test]
    fn insert_filling_row_exactly_should_not_wrap() {
        let mut buffer = buffer(&["abcd"]);
        let outcome = buffer.insert_text(Cursor::new(0, 4), "e").unwrap();

        assert_eq!(buffer.lines(), vec!["abcde"]);
        assert_eq!(outcome.cursor, Cursor::new(0, 5));
    }

    #[test]
    fn insert_one_past_capacity_should_wrap_one_char() {
        let mut buffer = buffer(&["abcde"]);
        let outcome = buffer.insert_text(Cursor::new(0, 5), "f").unwrap();

        assert_eq!(buffer.lines(), vec!["abcde", "f"]);
        assert_eq!(outcome.cursor, Cursor::new(1, 1));
    }

    #[test]
    fn insert_mid_row_should_push_tail_into_new_row() {
        let mut buffer = buffer(&["abcde", "zz"]);
        let outcome = buffer.insert_text(Cursor::new(0, 2), "x").unwrap();

        assert_eq!(buffer.lines(), vec!["abxcd", "e", "zz"]);
        assert_eq!(outcome.cursor, Cursor::new(0, 3));
        assert_bookkeeping(&buffer);
    }

    #[test]
    fn insert_should_truncate_at_row_limit() {
        let mut buffer = RowBuffer::new(limits(5, 3));
        let outcome = buffer
            .insert_text(Cursor::zero(), "abcdefghijklmnopq")
            .unwrap();

        assert_eq!(buffer.lines(), vec!["abcde", "fghij", "klmno"]);
        assert_eq!(outcome.dropped_text(), Some("pq"));
        assert_eq!(outcome.cursor, Cursor::new(2, 5));
        assert!(outcome.events.contains(&ModelEvent::TextTruncated {
            row_index: 2,
            dropped: "pq".to_string()
        }));
    }

    #[test]
    fn insert_into_full_buffer_should_drop_overflow() {
        let mut buffer = buffer(&["abcde", "fghij", "klmno"]);
        let outcome = buffer.insert_text(Cursor::new(2, 5), "p").unwrap();

        assert_eq!(buffer.lines(), vec!["abcde", "fghij", "klmno"]);
        assert_eq!(outcome.dropped_text(), Some("p"));
        assert_eq!(outcome.cursor, Cursor::new(2, 5));
    }

    #[test]
    fn insert_empty_text_should_be_noop() {
        let mut buffer = buffer(&["ab"]);
        let outcome = buffer.insert_text(Cursor::new(0, 1), "").unwrap();

        assert_eq!(outcome.skip_reason(), Some(SkipReason::EmptyInsert));
        assert_eq!(buffer.lines(), vec!["ab"]);
        assert!(outcome.events.is_empty());
    }

    #[test]
    fn insert_should_reject_column_past_row_end() {
        let mut buffer = buffer(&["ab"]);
        let err = buffer.insert_text(Cursor::new(0, 3), "x").unwrap_err();
        assert_eq!(
            err,
            EditError::ColumnOutOfRange {
                row_index: 0,
                column: 3,
                row_length: 2
            }
        );
    }

    #[test]
    fn insert_should_handle_multibyte_chars_by_column() {
        let mut buffer = buffer(&["héll"]);
        buffer.insert_text(Cursor::new(0, 2), "ö").unwrap();
        assert_eq!(buffer.lines(), vec!["héöll"]);
    }

    #[test]
    fn insert_should_strip_control_chars() {
        let mut buffer = RowBuffer::new(limits(5, 3));

        let outcome = buffer.insert_text(Cursor::zero(), "a\nb\tc\r").unwrap();

        assert_eq!(buffer.lines(), vec!["abc"]);
        assert_eq!(outcome.cursor, Cursor::new(0, 3));

        let outcome = buffer.insert_text(Cursor::new(0, 3), "\n\u{7}").unwrap();
        assert_eq!(outcome.skip_reason(), Some(SkipReason::EmptyInsert));
        assert_eq!(buffer.lines(), vec!["abc"]);
    }

    #[test]
    fn insert_without_capacity_should_never_wrap() {
        let mut buffer = RowBuffer::new(RowLimits::unbounded());
        let long = "x".repeat(500);
        let outcome = buffer.insert_text(Cursor::zero(), &long).unwrap();

        assert_eq!(buffer.row_count(), 1);
        assert_eq!(outcome.cursor, Cursor::new(0, 500));
    }

    #[test]
    fn enter_should_split_and_renumber() {
        let mut buffer = buffer(&["hello", "world"]);
        let outcome = buffer.split_at_cursor(Cursor::new(0, 5)).unwrap();

        assert_eq!(buffer.lines(), vec!["hello", "", "world"]);
        let labels: Vec<usize> = buffer.rows().iter().map(Row::index).collect();
        assert_eq!(labels, vec![1, 2, 3]);
        assert_eq!(outcome.cursor, Cursor::new(1, 0));
    }

    #[test]
    fn enter_mid_row_should_move_tail_down() {
        let mut buffer = buffer(&["hello"]);
        buffer.split_at_cursor(Cursor::new(0, 2)).unwrap();

        assert_eq!(buffer.lines(), vec!["he", "llo"]);
        assert_eq!(buffer.rows()[0].char_count(), 2);
        assert_eq!(buffer.rows()[1].char_count(), 3);
    }

    #[test]
    fn enter_at_row_limit_should_be_rejected() {
        let mut buffer = buffer(&["a", "b", "c"]);
        let outcome = buffer.split_at_cursor(Cursor::new(1, 1)).unwrap();

        assert_eq!(outcome.skip_reason(), Some(SkipReason::RowLimitReached));
        assert_eq!(buffer.lines(), vec!["a", "b", "c"]);
    }

    #[test]
    fn backspace_should_merge_when_fitting() {
        let mut buffer = buffer(&["ab", "cd", "e"]);
        let outcome = buffer.merge_backward(Cursor::new(1, 0)).unwrap();

        assert_eq!(buffer.lines(), vec!["abcd", "e"]);
        assert_eq!(outcome.cursor, Cursor::new(0, 2));
        assert_bookkeeping(&buffer);
    }

    #[test]
    fn backspace_merge_exactly_at_capacity_should_remove_row() {
        let mut buffer = buffer(&["ab", "cde"]);
        buffer.merge_backward(Cursor::new(1, 0)).unwrap();
        assert_eq!(buffer.lines(), vec!["abcde"]);
    }

    #[test]
    fn backspace_should_redistribute_on_overflow() {
        let mut buffer = buffer(&["ab", "cdef"]);
        let outcome = buffer.merge_backward(Cursor::new(1, 0)).unwrap();

        assert_eq!(buffer.lines(), vec!["abcde", "f"]);
        assert_eq!(buffer.row_count(), 2);
        assert_eq!(outcome.cursor, Cursor::new(0, 2));
    }

    #[test]
    fn backspace_on_first_row_should_be_noop() {
        let mut buffer = buffer(&["ab"]);
        let outcome = buffer.merge_backward(Cursor::new(0, 0)).unwrap();
        assert_eq!(outcome.skip_reason(), Some(SkipReason::NoRowAbove));
    }

    #[test]
    fn backspace_away_from_column_zero_should_not_merge() {
        let mut buffer = buffer(&["ab", "cd"]);
        let outcome = buffer.merge_backward(Cursor::new(1, 1)).unwrap();
        assert_eq!(outcome.skip_reason(), Some(SkipReason::NotAtRowStart));
        assert_eq!(buffer.lines(), vec!["ab", "cd"]);
    }

    #[test]
    fn delete_should_merge_next_row_when_fitting() {
        let mut buffer = buffer(&["ab", "cd"]);
        let outcome = buffer.merge_forward(Cursor::new(0, 2)).unwrap();

        assert_eq!(buffer.lines(), vec!["abcd"]);
        assert_eq!(outcome.cursor, Cursor::new(0, 2));
    }

    #[test]
    fn delete_should_redistribute_on_overflow() {
        let mut buffer = buffer(&["abc", "defg"]);
        let outcome = buffer.merge_forward(Cursor::new(0, 3)).unwrap();

        assert_eq!(buffer.lines(), vec!["abcde", "fg"]);
        assert_eq!(outcome.cursor, Cursor::new(0, 3));
    }

    #[test]
    fn delete_at_capacity_boundary_should_not_duplicate_chars() {
        let mut buffer = buffer(&["abcde", "fg"]);
        let outcome = buffer.merge_forward(Cursor::new(0, 5)).unwrap();

        assert_eq!(buffer.lines(), vec!["abcde", "fg"]);
        assert!(!outcome.content_changed());
        assert_eq!(outcome.cursor, Cursor::new(0, 5));
    }

    #[test]
    fn delete_on_last_row_should_be_noop() {
        let mut buffer = buffer(&["ab", "cd"]);
        let outcome = buffer.merge_forward(Cursor::new(1, 2)).unwrap();
        assert_eq!(outcome.skip_reason(), Some(SkipReason::NoRowBelow));
        assert_eq!(buffer.lines(), vec!["ab", "cd"]);
    }

    #[test]
    fn move_up_and_down_should_clamp_column() {
        let buffer = buffer(&["ab", "cdefg"]);

        let down = buffer.move_down(Cursor::new(0, 2)).unwrap();
        assert_eq!(down.cursor, Cursor::new(1, 2));

        let up = buffer.move_up(Cursor::new(1, 5)).unwrap();
        assert_eq!(up.cursor, Cursor::new(0, 2));
    }

    #[test]
    fn move_up_on_first_row_should_be_noop() {
        let buffer = buffer(&["ab"]);
        let outcome = buffer.move_up(Cursor::new(0, 1)).unwrap();
        assert_eq!(outcome.skip_reason(), Some(SkipReason::NoRowAbove));
        assert_eq!(outcome.cursor, Cursor::new(0, 1));
    }

    #[test]
    fn left_across_boundary_should_land_at_previous_row_end() {
        let buffer = buffer(&["abc", "d"]);
        let outcome = buffer.move_left_across_boundary(Cursor::new(1, 0)).unwrap();
        assert_eq!(outcome.cursor, Cursor::new(0, 3));
    }

    #[test]
    fn left_across_boundary_on_first_row_should_be_noop() {
        let buffer = buffer(&["ab"]);
        let outcome = buffer.move_left_across_boundary(Cursor::zero()).unwrap();
        assert_eq!(outcome.skip_reason(), Some(SkipReason::NoRowAbove));
    }

    #[test]
    fn right_across_boundary_should_land_at_next_row_start() {
        let buffer = buffer(&["abc", "d"]);
        let outcome = buffer
            .move_right_across_boundary(Cursor::new(0, 3))
            .unwrap();
        assert_eq!(outcome.cursor, Cursor::new(1, 0));
    }

    #[test]
    fn right_across_boundary_on_last_row_should_be_noop() {
        let buffer = buffer(&["abc", "d"]);
        let outcome = buffer
            .move_right_across_boundary(Cursor::new(1, 1))
            .unwrap();
        assert_eq!(outcome.skip_reason(), Some(SkipReason::NoRowBelow));
        assert_eq!(outcome.cursor, Cursor::new(1, 1));
    }

    #[test]
    fn delete_backward_should_remove_previous_char() {
        let mut buffer = buffer(&["abc"]);
        let outcome = buffer.delete_backward(Cursor::new(0, 2)).unwrap();
        assert_eq!(buffer.lines(), vec!["ac"]);
        assert_eq!(outcome.cursor, Cursor::new(0, 1));
        assert_eq!(buffer.rows()[0].char_count(), 2);
    }

    #[test]
    fn delete_forward_should_remove_char_at_caret() {
        let mut buffer = buffer(&["abc"]);
        let outcome = buffer.delete_forward(Cursor::new(0, 0)).unwrap();
        assert_eq!(buffer.lines(), vec!["bc"]);
        assert_eq!(outcome.cursor, Cursor::zero());
    }

    #[test]
    fn caret_moves_within_row_should_respect_edges() {
        let buffer = buffer(&["abc"]);
        assert_eq!(
            buffer.move_left(Cursor::zero()).unwrap().skip_reason(),
            Some(SkipReason::AtRowStart)
        );
        assert_eq!(
            buffer.move_right(Cursor::new(0, 3)).unwrap().skip_reason(),
            Some(SkipReason::AtRowEnd)
        );
        assert_eq!(
            buffer.move_end(Cursor::zero()).unwrap().cursor,
            Cursor::new(0, 3)
        );
        assert_eq!(
            buffer.move_home(Cursor::new(0, 2)).unwrap().cursor,
            Cursor::zero()
        );
    }

    #[test]
    fn split_then_backspace_should_restore_row() {
        let mut buffer = buffer(&["hello"]);
        let split = buffer.split_at_cursor(Cursor::new(0, 3)).unwrap();
        let merged = buffer.merge_backward(split.cursor).unwrap();

        assert_eq!(buffer.lines(), vec!["hello"]);
        assert_eq!(merged.cursor, Cursor::new(0, 3));
    }

    #[test]
    fn clamp_should_pull_cursor_into_buffer() {
        let buffer = buffer(&["abc", "d"]);
        assert_eq!(buffer.clamp(Cursor::new(9, 9)), Cursor::new(1, 1));
        assert_eq!(buffer.clamp(Cursor::new(0, 9)), Cursor::new(0, 3));
        assert_eq!(buffer.end_cursor(), Cursor::new(1, 1));
    }
}
