//! Key event acquisition.
//!
//! A dedicated blocking reader thread turns raw crossterm events into
//! discrete [`Key`] events and feeds them to the dispatch loop over a
//! channel, preserving the one-session-at-a-time invariant. The reader
//! polls with a short timeout so a cancelled console does not wait on one
//! more keystroke.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Poll interval for the reader thread; bounds shutdown latency.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A key event as seen by the line editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Tab,
    Home,
    End,
    /// A printable character.
    Char(char),
    /// Anything the editor ignores.
    Other,
}

impl From<event::KeyEvent> for Key {
    fn from(key: event::KeyEvent) -> Self {
        // Control/alt chords are not part of the edit vocabulary.
        if !key.modifiers.difference(KeyModifiers::SHIFT).is_empty() {
            return Key::Other;
        }
        match key.code {
            KeyCode::Enter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Tab => Key::Tab,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::Char(c) => Key::Char(c),
            _ => Key::Other,
        }
    }
}

/// Spawns the blocking stdin reader thread.
///
/// Returns the receiving end of the key channel. The thread exits when the
/// token is cancelled or the receiver is dropped.
pub fn spawn_stdin_reader(cancel: CancellationToken) -> mpsc::Receiver<Key> {
    let (tx, rx) = mpsc::channel(64);

    std::thread::Builder::new()
        .name("console-input".to_string())
        .spawn(move || {
            loop {
                if cancel.is_cancelled() {
                    debug!("input reader stopping: console cancelled");
                    break;
                }
                match event::poll(POLL_INTERVAL) {
                    Ok(false) => continue,
                    Ok(true) => match event::read() {
                        Ok(CrosstermEvent::Key(key)) if key.kind != KeyEventKind::Release => {
                            if tx.blocking_send(Key::from(key)).is_err() {
                                debug!("input reader stopping: key channel closed");
                                break;
                            }
                        }
                        Ok(_) => continue,
                        Err(e) => {
                            warn!("failed to read terminal event: {e}");
                            break;
                        }
                    },
                    Err(e) => {
                        warn!("failed to poll terminal events: {e}");
                        break;
                    }
                }
            }
        })
        .expect("spawning the console input thread cannot fail");

    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    #[test]
    fn test_key_conversion() {
        assert_eq!(Key::from(KeyEvent::from(KeyCode::Enter)), Key::Enter);
        assert_eq!(Key::from(KeyEvent::from(KeyCode::Tab)), Key::Tab);
        assert_eq!(Key::from(KeyEvent::from(KeyCode::Char('x'))), Key::Char('x'));
        assert_eq!(Key::from(KeyEvent::from(KeyCode::Esc)), Key::Other);
    }

    #[test]
    fn test_control_chords_are_ignored() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(Key::from(ctrl_c), Key::Other);
    }

    #[test]
    fn test_shifted_chars_pass_through() {
        let shift_a = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(Key::from(shift_a), Key::Char('A'));
    }
}
