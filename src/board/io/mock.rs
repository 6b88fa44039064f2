//! # Mock I/O Implementations
//!
//! In-memory event and render streams for tests: scripted input events
//! and a recording render target that can be inspected afterwards.

use std::collections::VecDeque;
use std::io::{self, Write};
use std::time::Duration;

use anyhow::Result;
use crossterm::event::Event;

use super::{EventStream, RenderStream, TerminalSize};

/// Scripted input events for tests
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
        Self {
            events: VecDeque::new(),
        }
    }

    pub fn push_event(&mut self, event: Event) {
        self.events.push_back(event);
    }

    pub fn is_exhausted(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventStream for MockEventStream {
    fn poll(&mut self, _timeout: Duration) -> Result<bool> {
        Ok(!self.events.is_empty())
    }

    fn read(&mut self) -> Result<Event> {
        self.events
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("no scripted events left"))
    }
}

/// Recorded render operation for assertions
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    ClearScreen,
    ClearLine,
    MoveCursor(u16, u16),
    HideCursor,
    ShowCursor,
    EnterAlternateScreen,
    LeaveAlternateScreen,
    EnableRawMode,
    DisableRawMode,
    Write(String),
    Flush,
}

/// Recording render target for tests
pub struct MockRenderStream {
    commands: Vec<RenderCommand>,
    size: TerminalSize,
}

impl MockRenderStream {
    pub fn new() -> Self {
        Self::with_size((80, 24))
    }

    pub fn with_size(size: TerminalSize) -> Self {
        Self {
            commands: Vec::new(),
            size,
        }
    }

    /// All recorded commands, in order
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Concatenated text of every `Write` command
    pub fn written_text(&self) -> String {
        self.commands
            .iter()
            .filter_map(|command| match command {
                RenderCommand::Write(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }
}

impl Default for MockRenderStream {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for MockRenderStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.commands
            .push(RenderCommand::Write(String::from_utf8_lossy(buf).into_owned()));
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.commands.push(RenderCommand::Flush);
        Ok(())
    }
}

impl RenderStream for MockRenderStream {
    fn clear_screen(&mut self) -> Result<()> {
        self.commands.push(RenderCommand::ClearScreen);
        Ok(())
    }

    fn clear_line(&mut self) -> Result<()> {
        self.commands.push(RenderCommand::ClearLine);
        Ok(())
    }

    fn move_cursor(&mut self, x: u16, y: u16) -> Result<()> {
        self.commands.push(RenderCommand::MoveCursor(x, y));
        Ok(())
    }

    fn hide_cursor(&mut self) -> Result<()> {
        self.commands.push(RenderCommand::HideCursor);
        Ok(())
    }

    fn show_cursor(&mut self) -> Result<()> {
        self.commands.push(RenderCommand::ShowCursor);
        Ok(())
    }

    fn size(&self) -> Result<TerminalSize> {
        Ok(self.size)
    }

    fn enter_alternate_screen(&mut self) -> Result<()> {
        self.commands.push(RenderCommand::EnterAlternateScreen);
        Ok(())
    }

    fn leave_alternate_screen(&mut self) -> Result<()> {
        self.commands.push(RenderCommand::LeaveAlternateScreen);
        Ok(())
    }

    fn enable_raw_mode(&mut self) -> Result<()> {
        self.commands.push(RenderCommand::EnableRawMode);
        Ok(())
    }

    fn disable_raw_mode(&mut self) -> Result<()> {
        self.commands.push(RenderCommand::DisableRawMode);
        Ok(())
    }
}
