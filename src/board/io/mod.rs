//! # I/O Abstraction Layer
//!
//! Trait seams for terminal input and output so the controller can be
//! driven by scripted events and a recording render target in tests.
//!
//! - `EventStream` abstracts input events (keys, resize)
//! - `RenderStream` abstracts terminal output (cursor, screen modes,
//!   line writes)
//!
//! Production implementations sit on crossterm; mock implementations
//! keep everything in memory.

use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::Event;

pub mod mock;
pub mod terminal;

pub use mock::{MockEventStream, MockRenderStream, RenderCommand};
pub use terminal::{TerminalEventStream, TerminalRenderStream};

/// Terminal size as (width, height)
pub type TerminalSize = (u16, u16);

/// Source of input events
pub trait EventStream {
    /// Whether an event is ready within the timeout
    fn poll(&mut self, timeout: Duration) -> Result<bool>;

    /// Read the next event; only valid after `poll` returned true
    fn read(&mut self) -> Result<Event>;
}

/// Target for terminal rendering operations
pub trait RenderStream: Write {
    fn clear_screen(&mut self) -> Result<()>;

    /// Clear the row the cursor is on
    fn clear_line(&mut self) -> Result<()>;

    /// Move the cursor to (column, row)
    fn move_cursor(&mut self, x: u16, y: u16) -> Result<()>;

    fn hide_cursor(&mut self) -> Result<()>;

    fn show_cursor(&mut self) -> Result<()>;

    fn size(&self) -> Result<TerminalSize>;

    fn enter_alternate_screen(&mut self) -> Result<()>;

    fn leave_alternate_screen(&mut self) -> Result<()>;

    fn enable_raw_mode(&mut self) -> Result<()>;

    fn disable_raw_mode(&mut self) -> Result<()>;
}
