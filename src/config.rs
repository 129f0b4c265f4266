//! Per-host console configuration.
//!
//! The engine is parameterized by the prompt style, an optional command
//! prefix character, and the wording of the built-in responses. The core
//! takes no CLI flags, files, or environment variables; hosts build this
//! struct in code.

/// Configuration for one console instance.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Prompt displayed before the input line.
    pub prompt: String,

    /// Optional prefix character recognized and stripped from the first
    /// token before registry lookup (e.g. `/` for slash-command hosts).
    pub command_prefix: Option<char>,

    /// Optional banner printed once when the console starts.
    pub banner: Option<String>,

    /// Header line above the command summary.
    pub help_header: String,

    /// Line printed when the operator runs `exit`.
    pub exit_message: String,

    /// Hint appended to the unknown-command report.
    pub unknown_hint: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
            command_prefix: None,
            banner: None,
            help_header: "Available commands:".to_string(),
            exit_message: "Bye.".to_string(),
            unknown_hint: "type 'help' for available commands".to_string(),
        }
    }
}

impl ConsoleConfig {
    /// Creates a config with the default wording.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the prompt string.
    pub fn with_prompt(self, prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..self
        }
    }

    /// Sets the command prefix character.
    pub fn with_command_prefix(self, prefix: char) -> Self {
        Self {
            command_prefix: Some(prefix),
            ..self
        }
    }

    /// Sets the startup banner.
    pub fn with_banner(self, banner: impl Into<String>) -> Self {
        Self {
            banner: Some(banner.into()),
            ..self
        }
    }

    /// Sets the exit message.
    pub fn with_exit_message(self, msg: impl Into<String>) -> Self {
        Self {
            exit_message: msg.into(),
            ..self
        }
    }
}
