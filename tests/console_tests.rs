//! Integration tests for the console engine.
//!
//! These drive the full dispatch loop through an injected key channel and
//! the recording output sink; no terminal is required.
//!
//! Run with: `cargo test --test console_tests`

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::bail;
use async_trait::async_trait;
use pretty_assertions::assert_eq;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use opcon::console::{Command, CommandRegistry, Console, ConsoleOutput, Key, MemoryOutput};
use opcon::ConsoleConfig;

/// Log of executed commands: (name, args) per invocation.
type CallLog = Arc<Mutex<Vec<(String, Vec<String>)>>>;

struct Recording {
    name: &'static str,
    log: CallLog,
}

#[async_trait]
impl Command for Recording {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        "records invocations"
    }

    async fn execute(&self, args: &[String]) -> anyhow::Result<()> {
        self.log
            .lock()
            .expect("log mutex poisoned")
            .push((self.name.to_string(), args.to_vec()));
        Ok(())
    }
}

struct Failing;

#[async_trait]
impl Command for Failing {
    fn name(&self) -> &str {
        "boom"
    }

    async fn execute(&self, _args: &[String]) -> anyhow::Result<()> {
        bail!("kaboom");
    }
}

struct Harness {
    console: Console,
    keys: mpsc::Sender<Key>,
    output: Arc<MemoryOutput>,
    log: CallLog,
}

fn harness(extra: Vec<Arc<dyn Command>>) -> Harness {
    let log: CallLog = Arc::new(Mutex::new(Vec::new()));
    let mut registry = CommandRegistry::new();
    registry.register(Arc::new(Recording {
        name: "ping",
        log: Arc::clone(&log),
    }));
    registry.register_many(extra);

    let output = Arc::new(MemoryOutput::new());
    let (tx, rx) = mpsc::channel(256);
    let console = Console::new(
        ConsoleConfig::default(),
        registry,
        Arc::clone(&output) as Arc<dyn ConsoleOutput>,
        rx,
        CancellationToken::new(),
    );

    Harness {
        console,
        keys: tx,
        output,
        log,
    }
}

async fn send_keys(tx: &mpsc::Sender<Key>, keys: impl IntoIterator<Item = Key>) {
    for key in keys {
        tx.send(key).await.expect("console dropped key channel");
    }
}

async fn send_line(tx: &mpsc::Sender<Key>, line: &str) {
    send_keys(tx, line.chars().map(Key::Char)).await;
    send_keys(tx, [Key::Enter]).await;
}

fn calls(log: &CallLog) -> Vec<(String, Vec<String>)> {
    log.lock().expect("log mutex poisoned").clone()
}

#[tokio::test]
async fn failing_command_does_not_stop_the_loop() {
    let mut h = harness(vec![Arc::new(Failing)]);

    send_line(&h.keys, "boom").await;
    send_line(&h.keys, "ping").await;
    send_line(&h.keys, "exit").await;
    h.console.start().await;

    assert!(h.output.contains("Error: kaboom"));
    assert_eq!(calls(&h.log), vec![("ping".to_string(), vec![])]);
}

#[tokio::test]
async fn unknown_command_is_reported_inline() {
    let mut h = harness(vec![]);

    send_line(&h.keys, "nosuch").await;
    send_line(&h.keys, "exit").await;
    h.console.start().await;

    assert!(h.output.contains("Unknown command 'nosuch'"));
}

#[tokio::test]
async fn help_with_unknown_topic_leaves_history_intact() {
    let mut h = harness(vec![]);

    send_line(&h.keys, "help missingcmd").await;
    send_line(&h.keys, "exit").await;
    h.console.start().await;

    assert!(h.output.contains("Unknown command 'missingcmd'"));
    assert_eq!(h.console.history(), &["help missingcmd", "exit"]);
}

#[tokio::test]
async fn help_topic_prints_usage_for_registered_command() {
    let mut h = harness(vec![]);

    send_line(&h.keys, "help ping").await;
    send_line(&h.keys, "exit").await;
    h.console.start().await;

    assert!(h.output.contains("ping - records invocations"));
}

#[tokio::test]
async fn startup_prints_banner_and_summary() {
    let mut h = harness(vec![]);
    send_line(&h.keys, "exit").await;
    h.console.start().await;

    let lines = h.output.lines();
    assert!(lines.iter().any(|l| l.starts_with("Available commands")));
    assert!(h.output.contains("ping"));
    assert!(h.output.contains("exit"));
}

#[tokio::test]
async fn blank_lines_are_skipped() {
    let mut h = harness(vec![]);

    send_line(&h.keys, "   ").await;
    send_line(&h.keys, "exit").await;
    h.console.start().await;

    assert_eq!(h.console.history(), &["exit"]);
}

#[tokio::test]
async fn adjacent_duplicate_lines_collapse_in_history() {
    let mut h = harness(vec![]);

    send_line(&h.keys, "ping").await;
    send_line(&h.keys, "ping").await;
    send_line(&h.keys, "exit").await;
    h.console.start().await;

    assert_eq!(h.console.history(), &["ping", "exit"]);
    // Both submissions still executed
    assert_eq!(calls(&h.log).len(), 2);
}

#[tokio::test]
async fn quoted_arguments_reach_the_command_as_one_token() {
    let mut h = harness(vec![]);

    send_line(&h.keys, "ping \"bar baz\" qux").await;
    send_line(&h.keys, "exit").await;
    h.console.start().await;

    assert_eq!(
        calls(&h.log),
        vec![(
            "ping".to_string(),
            vec!["bar baz".to_string(), "qux".to_string()]
        )]
    );
}

#[tokio::test]
async fn command_names_resolve_case_insensitively() {
    let mut h = harness(vec![]);

    send_line(&h.keys, "PING").await;
    send_line(&h.keys, "exit").await;
    h.console.start().await;

    assert_eq!(calls(&h.log).len(), 1);
}

#[tokio::test]
async fn tab_completes_command_name_before_submit() {
    let log: CallLog = Arc::new(Mutex::new(Vec::new()));
    let mut h = harness(vec![Arc::new(Recording {
        name: "header",
        log: Arc::clone(&log),
    })]);

    // "hea" has a single candidate; Tab replaces the buffer wholesale.
    send_keys(&h.keys, "hea".chars().map(Key::Char)).await;
    send_keys(&h.keys, [Key::Tab, Key::Enter]).await;
    send_line(&h.keys, "exit").await;
    h.console.start().await;

    assert_eq!(calls(&log), vec![("header".to_string(), vec![])]);
}

#[tokio::test]
async fn external_stop_unblocks_the_pending_line_read() {
    let h = harness(vec![]);
    let mut console = h.console;
    let handle = console.handle();

    let join = tokio::spawn(async move {
        console.start().await;
    });

    // No keys are ever sent; stop must still return promptly.
    handle.stop();
    tokio::time::timeout(Duration::from_secs(1), join)
        .await
        .expect("console did not stop in time")
        .expect("console task panicked");
}

#[tokio::test]
async fn closed_key_source_ends_the_loop() {
    let h = harness(vec![]);
    let mut console = h.console;
    drop(h.keys);

    tokio::time::timeout(Duration::from_secs(1), console.start())
        .await
        .expect("console did not stop after key source closed");
}

#[tokio::test]
async fn history_navigation_resubmits_previous_line() {
    let mut h = harness(vec![]);

    send_line(&h.keys, "ping one").await;
    // Up recalls "ping one"; Enter submits it again.
    send_keys(&h.keys, [Key::Up, Key::Enter]).await;
    send_line(&h.keys, "exit").await;
    h.console.start().await;

    assert_eq!(calls(&h.log).len(), 2);
    // Adjacent duplicate: stored once
    assert_eq!(h.console.history(), &["ping one", "exit"]);
}

#[tokio::test]
async fn duplicate_registration_dispatches_to_the_last_command() {
    let first: CallLog = Arc::new(Mutex::new(Vec::new()));
    let second: CallLog = Arc::new(Mutex::new(Vec::new()));
    let mut h = harness(vec![
        Arc::new(Recording {
            name: "foo",
            log: Arc::clone(&first),
        }),
        Arc::new(Recording {
            name: "foo",
            log: Arc::clone(&second),
        }),
    ]);

    send_line(&h.keys, "foo").await;
    send_line(&h.keys, "exit").await;
    h.console.start().await;

    assert!(calls(&first).is_empty());
    assert_eq!(calls(&second).len(), 1);
}
