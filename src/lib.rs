//! Opcon - an embeddable interactive operator console.
//!
//! One reusable console engine (line editor, tokenizer, command registry,
//! dispatch loop) shared by the client and server host binaries.

pub mod config;
pub mod console;
pub mod error;
pub mod logging;

pub use config::ConsoleConfig;
pub use console::command::Command;
pub use console::dispatch::{Console, ConsoleHandle};
pub use console::registry::CommandRegistry;
pub use error::{ConsoleError, Result};
