//! The command dispatch loop.
//!
//! Orchestrates prompt display, line acquisition through the line editor,
//! tokenization, built-in command handling, registry lookup, and command
//! execution with per-command failure isolation. One dispatch loop drives
//! one edit session at a time; nothing here is shared between console
//! instances.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::config::ConsoleConfig;

use super::editor::{KeyOutcome, LineEditor};
use super::input::Key;
use super::output::ConsoleOutput;
use super::registry::CommandRegistry;
use super::tokenizer::split_command;

/// Built-in command names, checked before registry lookup and offered by
/// command-name completion.
pub const BUILTIN_COMMANDS: &[&str] = &["help", "exit"];

/// Handle for stopping a console from outside the dispatch loop.
///
/// Cancellation unblocks the pending line read promptly; callers never wait
/// on the editor ingesting one more key.
#[derive(Clone)]
pub struct ConsoleHandle {
    cancel: CancellationToken,
}

impl ConsoleHandle {
    /// Requests the console to stop.
    pub fn stop(&self) {
        self.cancel.cancel();
    }
}

/// One interactive operator console instance.
pub struct Console {
    config: ConsoleConfig,
    registry: CommandRegistry,
    output: Arc<dyn ConsoleOutput>,
    keys: mpsc::Receiver<Key>,
    cancel: CancellationToken,
    editor: LineEditor,
    running: bool,
}

impl Console {
    /// Creates a console over the given key source and display sink.
    ///
    /// `cancel` is shared with the key source so an external stop tears the
    /// whole console down; see [`super::input::spawn_stdin_reader`].
    pub fn new(
        config: ConsoleConfig,
        registry: CommandRegistry,
        output: Arc<dyn ConsoleOutput>,
        keys: mpsc::Receiver<Key>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            config,
            registry,
            output,
            keys,
            cancel,
            editor: LineEditor::new(),
            running: false,
        }
    }

    /// Returns a handle for stopping this console externally.
    pub fn handle(&self) -> ConsoleHandle {
        ConsoleHandle {
            cancel: self.cancel.clone(),
        }
    }

    /// Read access to the submitted-line history.
    pub fn history(&self) -> &[String] {
        self.editor.history().entries()
    }

    /// Runs the console until `exit` or an external stop.
    ///
    /// No failure inside a command body propagates out of this method; user
    /// input errors are reported inline and execution failures are logged
    /// and surfaced as one error line each.
    pub async fn start(&mut self) {
        if self.running {
            debug!("console already running, ignoring start");
            return;
        }
        self.running = true;
        info!("console started");

        if let Some(banner) = &self.config.banner {
            self.output.write_line(banner);
        }
        self.print_summary();

        while self.running && !self.cancel.is_cancelled() {
            let Some(line) = self.read_line().await else {
                break;
            };
            let line = line.trim().to_string();
            if line.is_empty() {
                continue;
            }
            self.editor.push_history(&line);

            let Some((name, args)) = split_command(&line, self.config.command_prefix) else {
                continue;
            };

            // Built-ins are checked before registry lookup.
            match name.as_str() {
                "exit" => {
                    info!("operator requested exit");
                    self.output.write_line(&self.config.exit_message);
                    self.running = false;
                }
                "help" => self.print_help(&args),
                _ => self.dispatch(&name, &args).await,
            }
        }

        self.running = false;
        info!("console stopped");
    }

    /// Acquires one completed line through the line editor.
    ///
    /// Returns `None` when the console was cancelled or the key source is
    /// gone.
    async fn read_line(&mut self) -> Option<String> {
        self.editor.begin_line();
        self.output.redraw_input(&self.config.prompt, "", 0);

        loop {
            let key = tokio::select! {
                _ = self.cancel.cancelled() => return None,
                key = self.keys.recv() => key?,
            };

            match key {
                Key::Tab => {
                    if !self.editor.is_empty()
                        && self.editor.complete(&self.registry, BUILTIN_COMMANDS).await
                    {
                        self.output.redraw_input(
                            &self.config.prompt,
                            &self.editor.buffer_string(),
                            self.editor.cursor(),
                        );
                    }
                }
                key => match self.editor.apply_key(key) {
                    KeyOutcome::Submitted(line) => {
                        self.output.finish_input();
                        return Some(line);
                    }
                    KeyOutcome::Redraw => {
                        self.output.redraw_input(
                            &self.config.prompt,
                            &self.editor.buffer_string(),
                            self.editor.cursor(),
                        );
                    }
                    KeyOutcome::CursorMoved => {
                        self.output
                            .move_cursor(&self.config.prompt, self.editor.cursor());
                    }
                    KeyOutcome::Ignored => {}
                },
            }
        }
    }

    /// Resolves and executes a registered command, isolating failures.
    async fn dispatch(&self, name: &str, args: &[String]) {
        match self.registry.lookup(name) {
            None => {
                self.output.write_line(&format!(
                    "Unknown command '{name}', {}",
                    self.config.unknown_hint
                ));
            }
            Some(command) => {
                debug!(command = name, "executing command");
                if let Err(e) = command.execute(args).await {
                    error!("command '{name}' failed: {e:#}");
                    self.output.write_line(&format!("Error: {e:#}"));
                }
            }
        }
    }

    /// Prints the full command summary (registry plus built-ins).
    fn print_summary(&self) {
        self.output.write_line(&self.config.help_header);
        for command in self.registry.sorted() {
            self.output.write_line(&format!(
                "  {:<12} - {}",
                command.name(),
                command.description()
            ));
        }
        self.output
            .write_line("  help         - Show this summary, or 'help <command>' for details");
        self.output.write_line("  exit         - Leave the console");
    }

    /// Handles `help` and `help <name>`.
    fn print_help(&self, args: &[String]) {
        let Some(topic) = args.first() else {
            self.print_summary();
            return;
        };

        match self.registry.lookup(topic) {
            Some(command) => {
                self.output
                    .write_line(&format!("{} - {}", command.name(), command.description()));
                if !command.usage().is_empty() {
                    self.output
                        .write_line(&format!("  usage:   {}", command.usage()));
                }
                if !command.example().is_empty() {
                    self.output
                        .write_line(&format!("  example: {}", command.example()));
                }
            }
            None => {
                self.output.write_line(&format!(
                    "Unknown command '{topic}', {}",
                    self.config.unknown_hint
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::command::Command;
    use crate::console::output::MemoryOutput;
    use async_trait::async_trait;

    struct Documented;

    #[async_trait]
    impl Command for Documented {
        fn name(&self) -> &str {
            "kick"
        }

        fn description(&self) -> &str {
            "Disconnect a user"
        }

        fn usage(&self) -> &str {
            "kick <user> [reason]"
        }

        fn example(&self) -> &str {
            "kick user1 \"being rude\""
        }

        async fn execute(&self, _args: &[String]) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn console_with(commands: Vec<Arc<dyn Command>>) -> (Console, Arc<MemoryOutput>) {
        let mut registry = CommandRegistry::new();
        registry.register_many(commands);
        let output = Arc::new(MemoryOutput::new());
        let (_tx, rx) = mpsc::channel(8);
        let console = Console::new(
            ConsoleConfig::default(),
            registry,
            Arc::clone(&output) as Arc<dyn ConsoleOutput>,
            rx,
            CancellationToken::new(),
        );
        (console, output)
    }

    #[test]
    fn test_summary_lists_commands_and_builtins() {
        let (console, output) = console_with(vec![Arc::new(Documented)]);
        console.print_summary();

        assert!(output.contains("kick"));
        assert!(output.contains("Disconnect a user"));
        assert!(output.contains("help"));
        assert!(output.contains("exit"));
    }

    #[test]
    fn test_help_topic_shows_usage_and_example() {
        let (console, output) = console_with(vec![Arc::new(Documented)]);
        console.print_help(&["kick".to_string()]);

        assert!(output.contains("kick - Disconnect a user"));
        assert!(output.contains("usage:   kick <user> [reason]"));
        assert!(output.contains("example: kick user1"));
    }

    #[test]
    fn test_help_unknown_topic() {
        let (console, output) = console_with(vec![Arc::new(Documented)]);
        console.print_help(&["missingcmd".to_string()]);

        assert!(output.contains("Unknown command 'missingcmd'"));
    }
}
