//! # View Layer
//!
//! Views draw a row snapshot and place the caret where the editor asks.
//! They never mutate rows; every redraw starts from a fresh snapshot.

use crate::config::RowLimits;
use crate::editor::events::{Cursor, ViewEvent};
use crate::editor::io::RenderStream;
use crate::editor::models::Row;
use crate::editor::view_models::RowEditor;
use anyhow::Result;

use super::layout::RowLayout;

/// Trait for rendering a row editor
pub trait RowView {
    /// Prepare the terminal for drawing
    fn initialize(&mut self) -> Result<()>;

    /// Redraw every visible row from `rows`
    fn render(&mut self, rows: &[Row]) -> Result<()>;

    /// Put the caret on `cursor`, scrolling if the row is off screen
    fn focus(&mut self, cursor: Cursor) -> Result<()>;

    /// Redraw the status line
    fn render_status(&mut self, status: &StatusLine) -> Result<()>;

    /// Handle view events
    fn handle_view_event(&mut self, event: &ViewEvent, editor: &RowEditor) -> Result<()>;

    /// Restore the terminal on exit
    fn cleanup(&mut self) -> Result<()>;
}

/// What the status line shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub row_count: usize,
    pub limits: RowLimits,
    pub cursor: Cursor,
    pub dropped: Option<String>,
}

impl StatusLine {
    pub fn from_editor(editor: &RowEditor) -> Self {
        Self {
            row_count: editor.rows().len(),
            limits: editor.limits(),
            cursor: editor.cursor(),
            dropped: editor.last_truncation().map(str::to_string),
        }
    }

    pub fn text(&self) -> String {
        let row_limit = self
            .limits
            .max_row_count()
            .map_or_else(|| "∞".to_string(), |limit| limit.to_string());

        let mut text = format!(
            "rows {}/{}  {}:{}",
            self.row_count,
            row_limit,
            self.cursor.row_index + 1,
            self.cursor.column + 1
        );

        if let Some(dropped) = &self.dropped {
            text.push_str(&format!(
                "  | row limit reached, {} chars dropped",
                dropped.chars().count()
            ));
        }

        text
    }
}

/// Terminal renderer writing through a [`RenderStream`]
pub struct TerminalRenderer<RS: RenderStream> {
    render_stream: RS,
    layout: RowLayout,
    rows: Vec<Row>,
    cursor: Cursor,
}

impl<RS: RenderStream> TerminalRenderer<RS> {
    pub fn with_render_stream(render_stream: RS, limits: RowLimits) -> Result<Self> {
        let terminal_size = render_stream.get_size()?;
        Ok(Self {
            render_stream,
            layout: RowLayout::new(limits, terminal_size),
            rows: Vec::new(),
            cursor: Cursor::zero(),
        })
    }

    /// Update terminal size
    pub fn update_size(&mut self, width: u16, height: u16) {
        self.layout.update_size(width, height);
    }

    pub fn terminal_size(&self) -> (u16, u16) {
        self.layout.terminal_size()
    }

    pub fn layout(&self) -> &RowLayout {
        &self.layout
    }

    /// Caret position for a click at terminal cell (x, y), if it hit a row
    pub fn hit_test(&self, x: u16, y: u16) -> Option<Cursor> {
        self.layout.hit_test(x, y, &self.rows)
    }

    /// Full redraw: rows, status line, then the caret
    pub fn render_full(&mut self, editor: &RowEditor) -> Result<()> {
        self.render_stream.hide_cursor()?;
        self.render_stream.clear_screen()?;
        self.render(editor.rows())?;
        self.render_status(&StatusLine::from_editor(editor))?;
        self.focus(editor.cursor())
    }

    fn draw_rows(&mut self) -> Result<()> {
        self.render_stream.hide_cursor()?;

        for line in 0..self.layout.visible_rows() {
            self.render_stream.move_cursor(0, line as u16)?;
            if let Some(row) = self.rows.get(self.layout.scroll_offset() + line) {
                let text = self.layout.format_row(row);
                self.render_stream.write_all(text.as_bytes())?;
            }
            self.render_stream.clear_line()?;
        }

        Ok(())
    }
}

impl<RS: RenderStream> RowView for TerminalRenderer<RS> {
    fn initialize(&mut self) -> Result<()> {
        self.render_stream.enable_raw_mode()?;
        self.render_stream.enter_alternate_screen()?;
        self.render_stream.enable_input_capture()?;
        self.render_stream.clear_screen()?;
        self.render_stream.hide_cursor()?;
        Ok(())
    }

    fn render(&mut self, rows: &[Row]) -> Result<()> {
        self.rows = rows.to_vec();
        self.layout.set_row_count(self.rows.len());
        self.draw_rows()?;
        self.render_stream.flush()?;
        Ok(())
    }

    fn focus(&mut self, cursor: Cursor) -> Result<()> {
        self.cursor = cursor;
        if self.layout.ensure_visible(cursor.row_index) {
            tracing::debug!("scrolled to offset {}", self.layout.scroll_offset());
            self.draw_rows()?;
        }

        if let Some((x, y)) = self.layout.screen_position(cursor) {
            self.render_stream.move_cursor(x, y)?;
            self.render_stream.show_cursor()?;
        }
        self.render_stream.flush()?;
        Ok(())
    }

    fn render_status(&mut self, status: &StatusLine) -> Result<()> {
        let width = self.layout.terminal_size().0 as usize;
        let text: String = status.text().chars().take(width).collect();

        self.render_stream.move_cursor(0, self.layout.status_row())?;
        self.render_stream.write_all(text.as_bytes())?;
        self.render_stream.clear_line()?;
        Ok(())
    }

    fn handle_view_event(&mut self, event: &ViewEvent, editor: &RowEditor) -> Result<()> {
        match event {
            ViewEvent::FullRedrawRequired => {
                self.render(editor.rows())?;
                self.render_status(&StatusLine::from_editor(editor))?;
            }
            ViewEvent::StatusBarUpdateRequired => {
                self.render_status(&StatusLine::from_editor(editor))?;
            }
            ViewEvent::FocusRequested { cursor } => {
                self.render_status(&StatusLine::from_editor(editor))?;
                self.focus(*cursor)?;
            }
        }
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        self.render_stream.show_cursor()?;
        self.render_stream.disable_input_capture()?;
        self.render_stream.leave_alternate_screen()?;
        self.render_stream.disable_raw_mode()?;
        self.render_stream.flush()?;
        Ok(())
    }
}
