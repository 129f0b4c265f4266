//! The interactive console engine.
//!
//! A raw-keystroke line editor combined with a command registry, history
//! navigator, context-aware autocompletion, and a dispatch loop. Hosts
//! inject their own commands, prompt style, and built-in wording.

pub mod command;
pub mod dispatch;
pub mod editor;
pub mod history;
pub mod input;
pub mod output;
pub mod registry;
pub mod tokenizer;

pub use command::Command;
pub use dispatch::{Console, ConsoleHandle, BUILTIN_COMMANDS};
pub use editor::LineEditor;
pub use input::{spawn_stdin_reader, Key};
pub use output::{ConsoleOutput, MemoryOutput, RawModeGuard, TerminalOutput};
pub use registry::CommandRegistry;
pub use tokenizer::{split_command, tokenize};
