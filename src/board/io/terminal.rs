//! # Terminal I/O Implementations
//!
//! crossterm-backed implementations of the event and render streams.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use anyhow::Result;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event};
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::QueueableCommand;

use super::{EventStream, RenderStream, TerminalSize};

/// Real terminal input via crossterm
pub struct TerminalEventStream;

impl TerminalEventStream {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TerminalEventStream {
    fn default() -> Self {
        Self::new()
    }
}

impl EventStream for TerminalEventStream {
    fn poll(&mut self, timeout: Duration) -> Result<bool> {
        Ok(event::poll(timeout)?)
    }

    fn read(&mut self) -> Result<Event> {
        Ok(event::read()?)
    }
}

/// Real terminal output via crossterm, queued onto stdout
pub struct TerminalRenderStream {
    stdout: Stdout,
}

impl TerminalRenderStream {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
        }
    }
}

impl Default for TerminalRenderStream {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for TerminalRenderStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.stdout.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }
}

impl RenderStream for TerminalRenderStream {
    fn clear_screen(&mut self) -> Result<()> {
        self.stdout.queue(Clear(ClearType::All))?;
        Ok(())
    }

    fn clear_line(&mut self) -> Result<()> {
        self.stdout.queue(Clear(ClearType::CurrentLine))?;
        Ok(())
    }

    fn move_cursor(&mut self, x: u16, y: u16) -> Result<()> {
        self.stdout.queue(MoveTo(x, y))?;
        Ok(())
    }

    fn hide_cursor(&mut self) -> Result<()> {
        self.stdout.queue(Hide)?;
        Ok(())
    }

    fn show_cursor(&mut self) -> Result<()> {
        self.stdout.queue(Show)?;
        Ok(())
    }

    fn size(&self) -> Result<TerminalSize> {
        Ok(terminal::size()?)
    }

    fn enter_alternate_screen(&mut self) -> Result<()> {
        self.stdout.queue(EnterAlternateScreen)?;
        Ok(())
    }

    fn leave_alternate_screen(&mut self) -> Result<()> {
        self.stdout.queue(LeaveAlternateScreen)?;
        Ok(())
    }

    fn enable_raw_mode(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        Ok(())
    }

    fn disable_raw_mode(&mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        Ok(())
    }
}
