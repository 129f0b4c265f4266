//! Display sinks for the console.
//!
//! The engine emits plain text lines and input-line redraws; styling is a
//! host concern. [`TerminalOutput`] renders over a raw-mode terminal with
//! crossterm. [`MemoryOutput`] records everything for tests and headless
//! hosts.

use std::io::{self, Write};
use std::panic;
use std::sync::Mutex;

use crossterm::{
    cursor::MoveToColumn,
    execute,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType},
};
use tracing::warn;

use crate::error::{ConsoleError, Result};

/// The write-line capability the engine renders through.
pub trait ConsoleOutput: Send + Sync {
    /// Writes one complete text line (help, errors, command summaries).
    fn write_line(&self, text: &str);

    /// Redraws the visible input line and repositions the displayed cursor.
    fn redraw_input(&self, prompt: &str, buffer: &str, cursor: usize);

    /// Repositions the displayed cursor without a full redraw.
    fn move_cursor(&self, prompt: &str, cursor: usize);

    /// Ends the current input line (after Enter).
    fn finish_input(&self);
}

/// Raw-mode guard for the hosting terminal.
///
/// Enables raw mode on construction and restores the terminal on drop and
/// on panic, so a crashed command never leaves the operator's shell broken.
pub struct RawModeGuard;

impl RawModeGuard {
    /// Enables raw mode and installs the restoring panic hook.
    pub fn new() -> Result<Self> {
        enable_raw_mode()
            .map_err(|e| ConsoleError::terminal(format!("Failed to enable raw mode: {e}")))?;

        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            original_hook(panic_info);
        }));

        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            warn!("failed to disable raw mode: {e}");
        }
    }
}

/// Renders to stdout over a raw-mode terminal.
#[derive(Default)]
pub struct TerminalOutput;

impl TerminalOutput {
    /// Creates a stdout-backed sink.
    pub fn new() -> Self {
        Self
    }

    fn column(prompt: &str, cursor: usize) -> u16 {
        (prompt.chars().count() + cursor).min(u16::MAX as usize) as u16
    }
}

impl ConsoleOutput for TerminalOutput {
    fn write_line(&self, text: &str) {
        let mut stdout = io::stdout();
        if let Err(e) = execute!(
            stdout,
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(text),
            Print("\r\n")
        ) {
            warn!("failed to write console line: {e}");
        }
    }

    fn redraw_input(&self, prompt: &str, buffer: &str, cursor: usize) {
        let mut stdout = io::stdout();
        if let Err(e) = execute!(
            stdout,
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(prompt),
            Print(buffer),
            MoveToColumn(Self::column(prompt, cursor))
        ) {
            warn!("failed to redraw input line: {e}");
        }
    }

    fn move_cursor(&self, prompt: &str, cursor: usize) {
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, MoveToColumn(Self::column(prompt, cursor))) {
            warn!("failed to move cursor: {e}");
        }
    }

    fn finish_input(&self) {
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, Print("\r\n")) {
            warn!("failed to end input line: {e}");
        }
    }
}

/// Recording sink for tests and headless hosts.
#[derive(Default)]
pub struct MemoryOutput {
    lines: Mutex<Vec<String>>,
    input: Mutex<(String, usize)>,
}

impl MemoryOutput {
    /// Creates an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all complete lines written so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("output mutex poisoned").clone()
    }

    /// Returns true if any written line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|l| l.contains(needle))
    }

    /// Returns the most recently redrawn input buffer and cursor.
    pub fn last_input(&self) -> (String, usize) {
        self.input.lock().expect("output mutex poisoned").clone()
    }
}

impl ConsoleOutput for MemoryOutput {
    fn write_line(&self, text: &str) {
        self.lines
            .lock()
            .expect("output mutex poisoned")
            .push(text.to_string());
    }

    fn redraw_input(&self, _prompt: &str, buffer: &str, cursor: usize) {
        *self.input.lock().expect("output mutex poisoned") = (buffer.to_string(), cursor);
    }

    fn move_cursor(&self, _prompt: &str, cursor: usize) {
        self.input.lock().expect("output mutex poisoned").1 = cursor;
    }

    fn finish_input(&self) {}
}
