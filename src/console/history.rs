//! Submitted-line history with live-line snapshotting.
//!
//! `index` ranges over `[0, len]`, where `len` denotes the live, uncommitted
//! line. The first Up press away from the live line snapshots the buffer
//! into `pending`; navigating back down past the newest entry restores it.
//! Entries and the pending snapshot persist across edit sessions for the
//! lifetime of the dispatch loop.

const MAX_HISTORY_SIZE: usize = 100;

/// Ordered history of previously submitted non-empty lines.
#[derive(Debug, Default)]
pub struct History {
    /// Stored entries, oldest first.
    entries: Vec<String>,
    /// Navigation position; `entries.len()` means the live line.
    index: usize,
    /// Snapshot of the live line taken when navigation first leaves it.
    pending: String,
}

impl History {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a submitted line.
    ///
    /// Blank lines are skipped, and a line equal to the most recently
    /// appended entry is not appended again (adjacent-duplicate suppression
    /// only). Resets the navigation position to the live line.
    pub fn push(&mut self, line: &str) {
        let line = line.trim();
        if !line.is_empty() && self.entries.last().map(String::as_str) != Some(line) {
            self.entries.push(line.to_string());
            if self.entries.len() > MAX_HISTORY_SIZE {
                self.entries.remove(0);
            }
        }
        self.index = self.entries.len();
    }

    /// Resets the navigation position to the live line.
    pub fn reset_index(&mut self) {
        self.index = self.entries.len();
    }

    /// Moves one entry back in time.
    ///
    /// `current` is the live buffer, snapshotted into `pending` the moment
    /// navigation first leaves the live line. Returns the entry the buffer
    /// should show, or `None` when the history is empty.
    pub fn up(&mut self, current: &str) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        if self.index == self.entries.len() {
            self.pending = current.to_string();
            self.index = self.entries.len() - 1;
        } else {
            self.index = self.index.saturating_sub(1);
        }
        Some(&self.entries[self.index])
    }

    /// Moves one entry forward, back toward the live line.
    ///
    /// Returns the entry the buffer should show; at the live-line position
    /// this is the `pending` snapshot. Returns `None` when the history is
    /// empty.
    pub fn down(&mut self) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        self.index = (self.index + 1).min(self.entries.len());
        if self.index == self.entries.len() {
            Some(&self.pending)
        } else {
            Some(&self.entries[self.index])
        }
    }

    /// Returns all entries, oldest first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no lines have been stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(lines: &[&str]) -> History {
        let mut h = History::new();
        for line in lines {
            h.push(line);
        }
        h
    }

    #[test]
    fn test_push_skips_blank_lines() {
        let h = filled(&["", "   ", "real"]);
        assert_eq!(h.len(), 1);
    }

    #[test]
    fn test_adjacent_duplicates_suppressed() {
        let h = filled(&["same", "same", "other", "same"]);
        assert_eq!(h.entries(), &["same", "other", "same"]);
    }

    #[test]
    fn test_up_walks_back_from_newest() {
        let mut h = filled(&["first", "second", "third"]);
        // After N Up presses the buffer equals history[len - N]
        assert_eq!(h.up("draft"), Some("third"));
        assert_eq!(h.up("draft"), Some("second"));
        assert_eq!(h.up("draft"), Some("first"));
        // Bounded below: stays at the oldest entry
        assert_eq!(h.up("draft"), Some("first"));
    }

    #[test]
    fn test_down_restores_pending_snapshot() {
        let mut h = filled(&["first", "second"]);
        assert_eq!(h.up("my draft"), Some("second"));
        assert_eq!(h.up("my draft"), Some("first"));
        assert_eq!(h.down(), Some("second"));
        assert_eq!(h.down(), Some("my draft"));
        // At the live line, Down keeps restoring the snapshot
        assert_eq!(h.down(), Some("my draft"));
    }

    #[test]
    fn test_snapshot_taken_only_on_first_departure() {
        let mut h = filled(&["old"]);
        assert_eq!(h.up("draft one"), Some("old"));
        // Still browsing: the snapshot must not be overwritten
        assert_eq!(h.up("old"), Some("old"));
        assert_eq!(h.down(), Some("draft one"));
    }

    #[test]
    fn test_navigation_on_empty_history() {
        let mut h = History::new();
        assert_eq!(h.up("draft"), None);
        assert_eq!(h.down(), None);
    }

    #[test]
    fn test_push_resets_index() {
        let mut h = filled(&["first", "second"]);
        h.up("draft");
        h.push("third");
        // Next Up starts from the newest entry again
        assert_eq!(h.up(""), Some("third"));
    }

    #[test]
    fn test_capacity_bound() {
        let mut h = History::new();
        for i in 0..150 {
            h.push(&format!("entry{i}"));
        }
        assert_eq!(h.len(), MAX_HISTORY_SIZE);
        assert_eq!(h.up(""), Some("entry149"));
    }
}
