//! # Row Layout
//!
//! Screen geometry of the row list: each row is drawn as
//! `line-number │ text │ count`, rows fill the screen top-down and the
//! last terminal line is the status line.

use crate::config::RowLimits;
use crate::editor::events::Cursor;
use crate::editor::models::Row;

const MIN_NUMBER_WIDTH: usize = 3;
const SEPARATOR: &str = " │ ";
const SEPARATOR_WIDTH: usize = 3;
/// Count column width when rows are unbounded
const UNBOUNDED_COUNT_WIDTH: usize = 4;

fn digits(value: usize) -> usize {
    value.max(1).ilog10() as usize + 1
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowLayout {
    limits: RowLimits,
    terminal_size: (u16, u16),
    row_count: usize,
    scroll_offset: usize,
}

impl RowLayout {
    pub fn new(limits: RowLimits, terminal_size: (u16, u16)) -> Self {
        Self {
            limits,
            terminal_size,
            row_count: 1,
            scroll_offset: 0,
        }
    }

    pub fn update_size(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
    }

    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// Track the row count so the number column and scrolling stay in range
    pub fn set_row_count(&mut self, row_count: usize) {
        self.row_count = row_count.max(1);
        let last_start = self.row_count.saturating_sub(self.visible_rows());
        self.scroll_offset = self.scroll_offset.min(last_start);
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Lines available for rows (everything except the status line)
    pub fn visible_rows(&self) -> usize {
        (self.terminal_size.1 as usize).saturating_sub(1).max(1)
    }

    pub fn status_row(&self) -> u16 {
        self.terminal_size.1.saturating_sub(1)
    }

    pub fn number_width(&self) -> usize {
        let widest = self.limits.max_row_count().unwrap_or(self.row_count);
        digits(widest).max(MIN_NUMBER_WIDTH)
    }

    fn count_width(&self) -> usize {
        self.limits
            .max_char_count_in_row()
            .map_or(UNBOUNDED_COUNT_WIDTH, digits)
    }

    /// Screen column where row text starts
    pub fn text_x(&self) -> usize {
        self.number_width() + SEPARATOR_WIDTH
    }

    /// Columns given to row text: the capacity, or whatever the terminal has left
    pub fn text_width(&self) -> usize {
        let available = (self.terminal_size.0 as usize)
            .saturating_sub(self.text_x() + SEPARATOR_WIDTH + self.count_width())
            .max(1);
        self.limits
            .max_char_count_in_row()
            .map_or(available, |capacity| capacity.min(available))
    }

    /// Scroll so `row_index` is on screen; returns whether the offset changed
    pub fn ensure_visible(&mut self, row_index: usize) -> bool {
        let old_offset = self.scroll_offset;
        let visible = self.visible_rows();

        if row_index < self.scroll_offset {
            self.scroll_offset = row_index;
        } else if row_index >= self.scroll_offset + visible {
            self.scroll_offset = row_index + 1 - visible;
        }

        old_offset != self.scroll_offset
    }

    /// Screen line of a row, if it is currently on screen
    pub fn screen_line(&self, row_index: usize) -> Option<u16> {
        let line = row_index.checked_sub(self.scroll_offset)?;
        (line < self.visible_rows()).then(|| line as u16)
    }

    /// Terminal cell where the caret for `cursor` is drawn
    pub fn screen_position(&self, cursor: Cursor) -> Option<(u16, u16)> {
        let y = self.screen_line(cursor.row_index)?;
        let last_column = (self.terminal_size.0 as usize).saturating_sub(1);
        let x = (self.text_x() + cursor.column.min(self.text_width())).min(last_column);
        Some((x as u16, y))
    }

    /// Map a clicked cell to a caret position.
    ///
    /// `None` means the click missed every row (below the last one or on the
    /// status line). Columns are not clamped to the row length here.
    pub fn hit_test(&self, x: u16, y: u16, rows: &[Row]) -> Option<Cursor> {
        if y as usize >= self.visible_rows() {
            return None;
        }

        let row_index = self.scroll_offset + y as usize;
        if row_index >= rows.len() {
            return None;
        }

        let column = (x as usize).saturating_sub(self.text_x());
        Some(Cursor::new(row_index, column))
    }

    /// One screen line for `row`
    pub fn format_row(&self, row: &Row) -> String {
        let text_width = self.text_width();
        let text: String = row.text().chars().take(text_width).collect();
        let text = if self.limits.max_char_count_in_row().is_some() {
            format!("{text:<text_width$}")
        } else {
            text
        };

        format!(
            "{index:>number_width$}{SEPARATOR}{text}{SEPARATOR}{count}",
            index = row.index(),
            number_width = self.number_width(),
            count = row.char_count(),
        )
    }
}
