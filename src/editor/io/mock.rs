//! # Mock I/O Implementations for Testing
//!
//! Scripted input and recorded output for driving the controller without a
//! terminal. `MockRenderStream` is cheap to clone and all clones share one
//! recording, so a test can keep a handle after moving the stream into the
//! controller.

use super::{EventStream, RenderStream, TerminalSize};
use anyhow::Result;
use crossterm::event::Event;
use std::collections::VecDeque;
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Pre-programmed event source; `poll` is true while events remain
pub struct MockEventStream {
    events: VecDeque<Event>,
}

impl MockEventStream {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn push_event(&mut self, event: Event) {
        self.events.push_back(event);
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl EventStream for MockEventStream {
    fn poll(&mut self, _timeout: Duration) -> Result<bool> {
        Ok(!self.events.is_empty())
    }

    fn read(&mut self) -> Result<Event> {
        self.events
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("No events available"))
    }
}

/// Recorded render command for verification
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    ClearScreen,
    ClearLine,
    MoveCursor(u16, u16),
    HideCursor,
    ShowCursor,
    GetSize,
    EnterAlternateScreen,
    LeaveAlternateScreen,
    EnableRawMode,
    DisableRawMode,
    EnableInputCapture,
    DisableInputCapture,
    Write(Vec<u8>),
    Flush,
}

#[derive(Debug, Default)]
struct Recording {
    commands: Vec<RenderCommand>,
    buffer: Vec<u8>,
    cursor_visible: bool,
    raw_mode: bool,
    alternate_screen: bool,
    input_capture: bool,
    failing: Option<RenderCommand>,
}

impl Recording {
    /// Record `command`, failing if the test scripted it to fail
    fn push_checked(&mut self, command: RenderCommand) -> Result<()> {
        let fails = self.failing.as_ref() == Some(&command);
        self.commands.push(command);
        if fails {
            anyhow::bail!("scripted failure: {:?}", self.commands.last());
        }
        Ok(())
    }
}

/// Render stream that records everything it is asked to do
#[derive(Debug, Clone)]
pub struct MockRenderStream {
    recording: Arc<Mutex<Recording>>,
    terminal_size: TerminalSize,
}

impl MockRenderStream {
    pub fn new() -> Self {
        Self::with_size((80, 24))
    }

    pub fn with_size(size: TerminalSize) -> Self {
        let recording = Recording {
            cursor_visible: true,
            ..Recording::default()
        };
        Self {
            recording: Arc::new(Mutex::new(recording)),
            terminal_size: size,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Recording> {
        // A panicking test thread must not hide the recording from the others
        self.recording
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, command: RenderCommand) {
        self.lock().commands.push(command);
    }

    /// Make every later `command` fail after it is recorded
    pub fn fail_on(&self, command: RenderCommand) {
        self.lock().failing = Some(command);
    }

    pub fn get_commands(&self) -> Vec<RenderCommand> {
        self.lock().commands.clone()
    }

    pub fn clear_commands(&mut self) {
        self.lock().commands.clear();
    }

    pub fn has_command(&self, command: &RenderCommand) -> bool {
        self.lock().commands.contains(command)
    }

    /// Text written since the last clear_screen
    pub fn get_buffer_string(&self) -> String {
        String::from_utf8_lossy(&self.lock().buffer).to_string()
    }

    /// Most recent cursor move, which is where the caret was left
    pub fn last_cursor_position(&self) -> Option<(u16, u16)> {
        self.lock()
            .commands
            .iter()
            .rev()
            .find_map(|command| match command {
                RenderCommand::MoveCursor(x, y) => Some((*x, *y)),
                _ => None,
            })
    }

    pub fn is_cursor_visible(&self) -> bool {
        self.lock().cursor_visible
    }

    pub fn is_raw_mode(&self) -> bool {
        self.lock().raw_mode
    }

    pub fn is_alternate_screen(&self) -> bool {
        self.lock().alternate_screen
    }

    pub fn is_input_captured(&self) -> bool {
        self.lock().input_capture
    }
}

impl Write for MockRenderStream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut recording = self.lock();
        recording.buffer.extend_from_slice(buf);
        recording.commands.push(RenderCommand::Write(buf.to_vec()));
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.record(RenderCommand::Flush);
        Ok(())
    }
}

impl RenderStream for MockRenderStream {
    fn clear_screen(&mut self) -> Result<()> {
        let mut recording = self.lock();
        recording.commands.push(RenderCommand::ClearScreen);
        recording.buffer.clear();
        Ok(())
    }

    fn clear_line(&mut self) -> Result<()> {
        self.record(RenderCommand::ClearLine);
        Ok(())
    }

    fn move_cursor(&mut self, x: u16, y: u16) -> Result<()> {
        self.record(RenderCommand::MoveCursor(x, y));
        Ok(())
    }

    fn hide_cursor(&mut self) -> Result<()> {
        let mut recording = self.lock();
        recording.commands.push(RenderCommand::HideCursor);
        recording.cursor_visible = false;
        Ok(())
    }

    fn show_cursor(&mut self) -> Result<()> {
        let mut recording = self.lock();
        recording.commands.push(RenderCommand::ShowCursor);
        recording.cursor_visible = true;
        Ok(())
    }

    fn get_size(&self) -> Result<TerminalSize> {
        self.record(RenderCommand::GetSize);
        Ok(self.terminal_size)
    }

    fn enter_alternate_screen(&mut self) -> Result<()> {
        let mut recording = self.lock();
        recording.push_checked(RenderCommand::EnterAlternateScreen)?;
        recording.alternate_screen = true;
        Ok(())
    }

    fn leave_alternate_screen(&mut self) -> Result<()> {
        let mut recording = self.lock();
        recording.commands.push(RenderCommand::LeaveAlternateScreen);
        recording.alternate_screen = false;
        Ok(())
    }

    fn enable_raw_mode(&mut self) -> Result<()> {
        let mut recording = self.lock();
        recording.push_checked(RenderCommand::EnableRawMode)?;
        recording.raw_mode = true;
        Ok(())
    }

    fn disable_raw_mode(&mut self) -> Result<()> {
        let mut recording = self.lock();
        recording.commands.push(RenderCommand::DisableRawMode);
        recording.raw_mode = false;
        Ok(())
    }

    fn enable_input_capture(&mut self) -> Result<()> {
        let mut recording = self.lock();
        recording.push_checked(RenderCommand::EnableInputCapture)?;
        recording.input_capture = true;
        Ok(())
    }

    fn disable_input_capture(&mut self) -> Result<()> {
        let mut recording = self.lock();
        recording.commands.push(RenderCommand::DisableInputCapture);
        recording.input_capture = false;
        Ok(())
    }
}

impl Default for MockEventStream {
    fn default() -> Self {
        Self::empty()
    }
}

impl Default for MockRenderStream {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn mock_event_stream_should_provide_events_in_order() {
        let events = vec![
            Event::Key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::empty())),
            Event::Key(KeyEvent::new(KeyCode::Char('b'), KeyModifiers::empty())),
        ];
        let mut stream = MockEventStream::new(events);

        assert!(stream.poll(Duration::from_millis(0)).unwrap());
        match stream.read().unwrap() {
            Event::Key(key) => assert_eq!(key.code, KeyCode::Char('a')),
            _ => panic!("Expected key event"),
        }

        assert!(stream.poll(Duration::from_millis(0)).unwrap());
        match stream.read().unwrap() {
            Event::Key(key) => assert_eq!(key.code, KeyCode::Char('b')),
            _ => panic!("Expected key event"),
        }

        assert!(!stream.poll(Duration::from_millis(0)).unwrap());
        assert!(stream.read().is_err());
    }

    #[test]
    fn mock_render_stream_should_record_commands() {
        let mut stream = MockRenderStream::new();

        stream.clear_screen().unwrap();
        stream.move_cursor(10, 20).unwrap();
        stream.hide_cursor().unwrap();
        stream.write_all(b"Hello").unwrap();
        stream.flush().unwrap();

        let commands = stream.get_commands();
        assert_eq!(commands.len(), 5);
        assert_eq!(commands[0], RenderCommand::ClearScreen);
        assert_eq!(commands[1], RenderCommand::MoveCursor(10, 20));
        assert_eq!(commands[2], RenderCommand::HideCursor);
        assert_eq!(commands[3], RenderCommand::Write(b"Hello".to_vec()));
        assert_eq!(commands[4], RenderCommand::Flush);

        assert_eq!(stream.get_buffer_string(), "Hello");
        assert_eq!(stream.last_cursor_position(), Some((10, 20)));
    }

    #[test]
    fn mock_render_stream_clones_should_share_recording() {
        let mut stream = MockRenderStream::with_size((120, 40));
        let handle = stream.clone();

        stream.enable_raw_mode().unwrap();
        stream.enter_alternate_screen().unwrap();
        stream.enable_input_capture().unwrap();

        assert_eq!(handle.get_size().unwrap(), (120, 40));
        assert!(handle.is_raw_mode());
        assert!(handle.is_alternate_screen());
        assert!(handle.is_input_captured());

        stream.disable_raw_mode().unwrap();
        assert!(!handle.is_raw_mode());
    }
}
