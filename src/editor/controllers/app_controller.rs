//! # Application Controller
//!
//! Owns the event loop: reads terminal events, turns them into editor
//! input, and forwards the resulting view events to the renderer. Each
//! event runs to completion before the next one is read.

use crate::config::RowLimits;
use crate::editor::{
    events::{Cursor, EditKey, EventBus, InputEvent, ModelEvent, SimpleEventBus, ViewEvent},
    io::{EventStream, RenderStream, TerminalEventStream, TerminalRenderStream},
    view_models::RowEditor,
    views::{RowView, TerminalRenderer},
};
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Running totals gathered from the editor's model events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub content_changes: usize,
    pub dropped_chars: usize,
}

impl SessionStats {
    fn record(&mut self, event: &ModelEvent) {
        match event {
            ModelEvent::TextTruncated { dropped, .. } => {
                self.dropped_chars += dropped.chars().count();
            }
            event if event.is_content_change() => self.content_changes += 1,
            _ => {}
        }
    }
}

/// The main application controller that orchestrates the MVVM pattern
pub struct AppController<ES: EventStream, RS: RenderStream> {
    editor: RowEditor,
    view_renderer: TerminalRenderer<RS>,
    event_stream: ES,
    stats: Arc<Mutex<SessionStats>>,
    should_quit: bool,
}

impl AppController<TerminalEventStream, TerminalRenderStream<io::Stdout>> {
    /// Create a controller bound to the real terminal
    pub fn new(limits: RowLimits) -> Result<Self> {
        Self::with_io_streams(
            limits,
            TerminalEventStream::new(),
            TerminalRenderStream::new(),
        )
    }
}

impl<ES: EventStream, RS: RenderStream> AppController<ES, RS> {
    /// Create new application controller with injected I/O streams
    pub fn with_io_streams(limits: RowLimits, event_stream: ES, render_stream: RS) -> Result<Self> {
        let view_renderer = TerminalRenderer::with_render_stream(render_stream, limits)?;
        tracing::info!(
            "starting editor: capacity {:?}, row limit {:?}",
            limits.max_char_count_in_row(),
            limits.max_row_count()
        );

        let stats = Arc::new(Mutex::new(SessionStats::default()));
        let sink = Arc::clone(&stats);
        let mut event_bus = SimpleEventBus::new();
        event_bus.subscribe_to_model_events(Box::new(move |event| {
            tracing::trace!("model event: {:?}", event);
            sink.lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .record(event);
        }));

        let mut editor = RowEditor::new(limits);
        editor.set_event_bus(Box::new(event_bus));

        Ok(Self {
            editor,
            view_renderer,
            event_stream,
            stats,
            should_quit: false,
        })
    }

    /// Run the main application loop until a quit key is pressed.
    ///
    /// The terminal is restored even when the loop fails.
    pub fn run(&mut self) -> Result<()> {
        let result = match self.view_renderer.initialize() {
            Ok(()) => self.event_loop(),
            Err(e) => {
                tracing::error!("terminal setup failed: {}", e);
                Err(e)
            }
        };
        let cleanup = self.view_renderer.cleanup();

        let stats = self.session_stats();
        tracing::info!(
            "editor loop finished: {} content changes, {} chars dropped",
            stats.content_changes,
            stats.dropped_chars
        );

        result.and(cleanup)
    }

    fn event_loop(&mut self) -> Result<()> {
        self.view_renderer.render_full(&self.editor)?;
        while !self.should_quit {
            self.step(POLL_INTERVAL)?;
        }
        Ok(())
    }

    /// Wait up to `timeout` for one event and handle it.
    ///
    /// Returns whether an event was handled.
    pub fn step(&mut self, timeout: Duration) -> Result<bool> {
        if !self.event_stream.poll(timeout)? {
            return Ok(false);
        }

        let event = self.event_stream.read()?;
        self.handle_event(event)?;
        Ok(true)
    }

    /// Handle one terminal event and render whatever it changed
    pub fn handle_event(&mut self, event: Event) -> Result<()> {
        let Some(input) = InputEvent::from_terminal_event(event) else {
            return Ok(());
        };
        tracing::debug!("Received input event: {:?}", input);

        match input {
            InputEvent::KeyPressed(key) => {
                if is_quit_key(&key) {
                    self.should_quit = true;
                    return Ok(());
                }
                match EditKey::from_key_event(key) {
                    Some(edit_key) => self.dispatch(edit_key),
                    None => tracing::debug!("ignoring unmapped key {:?}", key.code),
                }
            }
            InputEvent::Pasted(text) => {
                let text: String = text.chars().filter(|ch| !ch.is_control()).collect();
                if !text.is_empty() {
                    self.dispatch(EditKey::Insert(text));
                }
            }
            InputEvent::Clicked { column, row } => {
                let focused = match self.view_renderer.hit_test(column, row) {
                    Some(cursor) => self.editor.focus_at(cursor),
                    None => self.editor.focus_last_row(),
                };
                tracing::debug!("click at ({}, {}) focused {:?}", column, row, focused);
            }
            InputEvent::TerminalResized { width, height } => {
                self.view_renderer.update_size(width, height);
                self.editor.collect_pending_view_events();
                self.view_renderer.render_full(&self.editor)?;
                return Ok(());
            }
        }

        let view_events = self.editor.collect_pending_view_events();
        self.process_view_events(view_events)
    }

    fn dispatch(&mut self, key: EditKey) {
        match self.editor.handle_key(key) {
            Ok(Some(outcome)) => {
                if let Some(reason) = outcome.skip_reason() {
                    tracing::debug!("edit skipped: {:?}", reason);
                }
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("edit rejected: {}", e),
        }
    }

    /// Collapse queued view events into the fewest renderer calls
    fn process_view_events(&mut self, view_events: Vec<ViewEvent>) -> Result<()> {
        let mut needs_full_redraw = false;
        let mut needs_status_bar = false;
        let mut focus: Option<Cursor> = None;

        for event in view_events {
            match event {
                ViewEvent::FullRedrawRequired => needs_full_redraw = true,
                ViewEvent::StatusBarUpdateRequired => needs_status_bar = true,
                ViewEvent::FocusRequested { cursor } => focus = Some(cursor),
            }
        }

        if needs_full_redraw {
            self.view_renderer
                .handle_view_event(&ViewEvent::FullRedrawRequired, &self.editor)?;
        } else if needs_status_bar {
            self.view_renderer
                .handle_view_event(&ViewEvent::StatusBarUpdateRequired, &self.editor)?;
        }

        if let Some(cursor) = focus {
            self.view_renderer
                .handle_view_event(&ViewEvent::FocusRequested { cursor }, &self.editor)?;
        }

        Ok(())
    }

    /// Get reference to the editor (for testing)
    pub fn editor(&self) -> &RowEditor {
        &self.editor
    }

    pub fn renderer(&self) -> &TerminalRenderer<RS> {
        &self.view_renderer
    }

    /// Totals for the session so far
    pub fn session_stats(&self) -> SessionStats {
        *self
            .stats
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Check if the application should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}

fn is_quit_key(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
