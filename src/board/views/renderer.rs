//! # Terminal Painter
//!
//! Flattens the surface tree into display lines and writes them through
//! a [`RenderStream`], diffing against the previously painted frame so
//! only changed rows touch the terminal.
//!
//! [`RenderStream`]: crate::board::io::RenderStream

use anyhow::Result;

use crate::board::io::{RenderStream, TerminalSize};

use super::Surface;

pub struct TerminalRenderer<RS: RenderStream> {
    stream: RS,
    size: TerminalSize,
    last_frame: Vec<String>,
}

impl<RS: RenderStream> TerminalRenderer<RS> {
    pub fn new(stream: RS) -> Result<Self> {
        let size = stream.size()?;
        Ok(Self {
            stream,
            size,
            last_frame: Vec::new(),
        })
    }

    /// Put the terminal into full-screen raw mode
    pub fn initialize(&mut self) -> Result<()> {
        self.stream.enable_raw_mode()?;
        self.stream.enter_alternate_screen()?;
        self.stream.hide_cursor()?;
        self.stream.clear_screen()?;
        self.stream.flush()?;
        Ok(())
    }

    pub fn terminal_size(&self) -> TerminalSize {
        self.size
    }

    /// Adopt a new size and force the next paint to redraw everything
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        self.size = (width, height);
        self.last_frame.clear();
    }

    /// Paint the surface, rewriting only rows that changed
    pub fn paint(&mut self, surface: &Surface) -> Result<()> {
        let (width, height) = self.size;
        let lines = surface.lines();

        let frame: Vec<String> = (0..height as usize)
            .map(|row| lines.get(row).cloned().unwrap_or_default())
            .collect();

        for (row, line) in frame.iter().enumerate() {
            let previous = self.last_frame.get(row).map(String::as_str).unwrap_or("");
            if line == previous {
                continue;
            }
            self.stream.move_cursor(0, row as u16)?;
            self.stream.clear_line()?;
            let visible: String = line.chars().take(width as usize).collect();
            self.stream.write_all(visible.as_bytes())?;
        }

        self.stream.flush()?;
        self.last_frame = frame;
        Ok(())
    }

    /// Restore the terminal on exit
    pub fn cleanup(&mut self) -> Result<()> {
        self.stream.show_cursor()?;
        self.stream.leave_alternate_screen()?;
        self.stream.disable_raw_mode()?;
        self.stream.flush()?;
        Ok(())
    }

    /// The render target, for test inspection
    pub fn stream(&self) -> &RS {
        &self.stream
    }
}
