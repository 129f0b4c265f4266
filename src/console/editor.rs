//! The line-editing state machine.
//!
//! Consumes discrete key events, maintains the edit buffer, cursor, history
//! navigation, and suggestion-cycle state, and produces a completed input
//! line on Enter. One edit session runs per line; history and the pending
//! live-line snapshot persist across sessions.

use super::history::History;
use super::input::Key;
use super::registry::CommandRegistry;

/// What the display should do after a key was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Enter was observed; the session ends with this completed line.
    Submitted(String),
    /// Buffer contents changed; redraw the visible line.
    Redraw,
    /// Only the cursor moved.
    CursorMoved,
    /// The key had no effect.
    Ignored,
}

/// Editor state for the in-progress input line.
pub struct LineEditor {
    /// Characters of the live line.
    buffer: Vec<char>,
    /// Cursor index in `[0, buffer.len()]`.
    cursor: usize,
    /// Previously submitted lines plus the live-line snapshot.
    history: History,
    /// Candidates for the active completion context.
    suggestions: Vec<String>,
    /// Index into `suggestions`; `None` means no active cycle.
    cycle: Option<usize>,
}

impl Default for LineEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl LineEditor {
    /// Creates an editor with empty history.
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            cursor: 0,
            history: History::new(),
            suggestions: Vec::new(),
            cycle: None,
        }
    }

    /// Starts a fresh edit session for the next line.
    pub fn begin_line(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
        self.clear_cycle();
        self.history.reset_index();
    }

    /// Returns the current buffer contents.
    pub fn buffer_string(&self) -> String {
        self.buffer.iter().collect()
    }

    /// Returns the cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns true if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Appends a submitted line to the history.
    pub fn push_history(&mut self, line: &str) {
        self.history.push(line);
    }

    /// Read access to the submitted-line history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Applies one key event and reports the required display effect.
    ///
    /// Tab is not handled here; completion needs registry access and may
    /// suspend, so the dispatch loop routes it to [`Self::complete`].
    pub fn apply_key(&mut self, key: Key) -> KeyOutcome {
        match key {
            Key::Enter => KeyOutcome::Submitted(self.buffer_string()),
            Key::Char(c) => {
                self.buffer.insert(self.cursor, c);
                self.cursor += 1;
                self.clear_cycle();
                KeyOutcome::Redraw
            }
            Key::Backspace => {
                if self.cursor == 0 {
                    return KeyOutcome::Ignored;
                }
                self.buffer.remove(self.cursor - 1);
                self.cursor -= 1;
                self.clear_cycle();
                KeyOutcome::Redraw
            }
            Key::Delete => {
                if self.cursor >= self.buffer.len() {
                    return KeyOutcome::Ignored;
                }
                self.buffer.remove(self.cursor);
                self.clear_cycle();
                KeyOutcome::Redraw
            }
            Key::Left => {
                if self.cursor == 0 {
                    return KeyOutcome::Ignored;
                }
                self.cursor -= 1;
                KeyOutcome::CursorMoved
            }
            Key::Right => {
                if self.cursor >= self.buffer.len() {
                    return KeyOutcome::Ignored;
                }
                self.cursor += 1;
                KeyOutcome::CursorMoved
            }
            Key::Up => {
                let current = self.buffer_string();
                match self.history.up(&current) {
                    Some(entry) => {
                        let entry = entry.to_string();
                        self.set_buffer(&entry);
                        KeyOutcome::Redraw
                    }
                    None => KeyOutcome::Ignored,
                }
            }
            Key::Down => match self.history.down() {
                Some(entry) => {
                    let entry = entry.to_string();
                    self.set_buffer(&entry);
                    KeyOutcome::Redraw
                }
                None => KeyOutcome::Ignored,
            },
            Key::Home => {
                self.cursor = 0;
                self.clear_cycle();
                KeyOutcome::Redraw
            }
            Key::End => {
                self.cursor = self.buffer.len();
                self.clear_cycle();
                KeyOutcome::Redraw
            }
            Key::Tab | Key::Other => KeyOutcome::Ignored,
        }
    }

    /// Handles Tab: context-aware completion with cycling.
    ///
    /// Single-token case: command-name completion from the registry plus the
    /// built-in names. Multi-token case: argument completion through the
    /// matched command's `suggest` capability, filtered by the last token's
    /// prefix on the first press only; subsequent presses cycle the stored
    /// list unfiltered. Returns true if the buffer changed.
    pub async fn complete(&mut self, registry: &CommandRegistry, builtins: &[&str]) -> bool {
        if self.buffer.is_empty() {
            return false;
        }

        // Live-edit heuristic: plain split on spaces, not the quote-aware
        // tokenizer used for submitted lines.
        let line = self.buffer_string();
        let parts: Vec<&str> = line.split(' ').collect();

        if parts.len() == 1 {
            if !self.cycle_active() {
                let token = parts[0].to_lowercase();
                let mut candidates = registry.names_with_prefix(&token);
                for builtin in builtins {
                    if builtin.starts_with(&token) && !candidates.iter().any(|c| c == builtin) {
                        candidates.push((*builtin).to_string());
                    }
                }
                if candidates.is_empty() {
                    return false;
                }
                self.suggestions = candidates;
                self.cycle = Some(0);
            } else {
                self.advance_cycle();
            }

            // Replace the buffer wholesale with the selected suggestion.
            let pick = self.selected().to_string();
            self.set_buffer(&pick);
            true
        } else {
            if !self.cycle_active() {
                let name = parts[0].to_lowercase();
                let Some(command) = registry.lookup(&name) else {
                    return false;
                };
                let args: Vec<String> = parts[1..].iter().map(|s| (*s).to_string()).collect();
                let Some(candidates) = command.suggest(&args).await else {
                    return false;
                };
                let last = parts[parts.len() - 1].to_lowercase();
                let filtered: Vec<String> = candidates
                    .into_iter()
                    .filter(|c| c.to_lowercase().starts_with(&last))
                    .collect();
                if filtered.is_empty() {
                    return false;
                }
                self.suggestions = filtered;
                self.cycle = Some(0);
            } else {
                self.advance_cycle();
            }

            // Replace only the final token and re-join with single spaces.
            let pick = self.selected().to_string();
            let mut joined: Vec<&str> = parts[..parts.len() - 1].to_vec();
            joined.push(&pick);
            let replaced = joined.join(" ");
            self.set_buffer(&replaced);
            true
        }
    }

    fn cycle_active(&self) -> bool {
        self.cycle.is_some() && !self.suggestions.is_empty()
    }

    fn advance_cycle(&mut self) {
        if let Some(i) = self.cycle {
            self.cycle = Some((i + 1) % self.suggestions.len());
        }
    }

    fn selected(&self) -> &str {
        &self.suggestions[self.cycle.unwrap_or(0)]
    }

    fn clear_cycle(&mut self) {
        self.suggestions.clear();
        self.cycle = None;
    }

    fn set_buffer(&mut self, text: &str) {
        self.buffer = text.chars().collect();
        self.cursor = self.buffer.len();
    }
}
