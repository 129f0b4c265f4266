//! Command registry: the name → descriptor mapping.
//!
//! Owned exclusively by the dispatch loop. Lookup is case-insensitive by
//! construction: names are normalized to lower-case at registration and at
//! lookup. Entries are never removed.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use super::command::Command;

/// Mapping from command name to command descriptor.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Arc<dyn Command>>,
}

impl CommandRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a command, replacing any existing entry with the same name.
    ///
    /// Duplicate names log a warning but still overwrite (last-registered
    /// wins). Names containing whitespace violate the descriptor contract
    /// and are rejected with a warning.
    pub fn register(&mut self, command: Arc<dyn Command>) {
        let name = command.name().to_lowercase();

        if name.is_empty() || name.chars().any(char::is_whitespace) {
            warn!(name = %command.name(), "rejecting command with invalid name");
            return;
        }

        if self.commands.contains_key(&name) {
            warn!(name = %name, "command registered twice, replacing previous entry");
        } else {
            debug!(name = %name, "registered command");
        }
        self.commands.insert(name, command);
    }

    /// Registers every command in the iterator.
    pub fn register_many(&mut self, commands: impl IntoIterator<Item = Arc<dyn Command>>) {
        for command in commands {
            self.register(command);
        }
    }

    /// Looks up a command by name (case-insensitive exact match).
    ///
    /// Returns `None` for unknown names; the caller decides the
    /// unknown-command response.
    pub fn lookup(&self, name: &str) -> Option<&Arc<dyn Command>> {
        self.commands.get(&name.to_lowercase())
    }

    /// Returns all descriptors sorted by name, for help/listing output.
    pub fn sorted(&self) -> Vec<&Arc<dyn Command>> {
        let mut all: Vec<_> = self.commands.values().collect();
        all.sort_by(|a, b| a.name().cmp(b.name()));
        all
    }

    /// Returns the normalized names starting with `prefix` (lower-cased),
    /// lexicographically sorted.
    pub fn names_with_prefix(&self, prefix: &str) -> Vec<String> {
        let prefix = prefix.to_lowercase();
        let mut names: Vec<String> = self
            .commands
            .keys()
            .filter(|n| n.starts_with(&prefix))
            .cloned()
            .collect();
        names.sort();
        names
    }

    /// Returns the number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns true if no commands are registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
