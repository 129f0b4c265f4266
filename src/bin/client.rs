//! Admin console host for the client process.
//!
//! Wires the reusable console engine to a small session service stand-in.
//! The real client talks to the license server here; this host only shows
//! the engine parameterization (prompt, banner, injected registry).

use std::sync::{Arc, Mutex};

use anyhow::bail;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use opcon::console::{
    spawn_stdin_reader, Command, CommandRegistry, Console, ConsoleOutput, RawModeGuard,
    TerminalOutput,
};
use opcon::{logging, ConsoleConfig};

/// In-memory stand-in for the client's session service.
struct SessionService {
    current: Mutex<Option<String>>,
    known_users: Vec<&'static str>,
}

impl SessionService {
    fn new() -> Self {
        Self {
            current: Mutex::new(None),
            known_users: vec!["alice", "bob", "carol"],
        }
    }

    fn login(&self, user: &str) -> anyhow::Result<()> {
        if !self.known_users.contains(&user) {
            bail!("unknown user '{user}'");
        }
        *self.current.lock().expect("session mutex poisoned") = Some(user.to_string());
        Ok(())
    }

    fn logout(&self) -> Option<String> {
        self.current.lock().expect("session mutex poisoned").take()
    }

    fn current(&self) -> Option<String> {
        self.current.lock().expect("session mutex poisoned").clone()
    }
}

struct Login {
    service: Arc<SessionService>,
    output: Arc<dyn ConsoleOutput>,
}

#[async_trait]
impl Command for Login {
    fn name(&self) -> &str {
        "login"
    }

    fn description(&self) -> &str {
        "Start a session for a user"
    }

    fn usage(&self) -> &str {
        "login <user>"
    }

    fn example(&self) -> &str {
        "login alice"
    }

    async fn execute(&self, args: &[String]) -> anyhow::Result<()> {
        let Some(user) = args.first() else {
            bail!("missing user name, see 'help login'");
        };
        self.service.login(user)?;
        self.output.write_line(&format!("Logged in as {user}"));
        Ok(())
    }

    async fn suggest(&self, _args: &[String]) -> Option<Vec<String>> {
        Some(
            self.service
                .known_users
                .iter()
                .map(|u| (*u).to_string())
                .collect(),
        )
    }
}

struct Logout {
    service: Arc<SessionService>,
    output: Arc<dyn ConsoleOutput>,
}

#[async_trait]
impl Command for Logout {
    fn name(&self) -> &str {
        "logout"
    }

    fn description(&self) -> &str {
        "End the current session"
    }

    async fn execute(&self, _args: &[String]) -> anyhow::Result<()> {
        match self.service.logout() {
            Some(user) => self.output.write_line(&format!("Logged out {user}")),
            None => self.output.write_line("No active session"),
        }
        Ok(())
    }
}

struct Status {
    service: Arc<SessionService>,
    output: Arc<dyn ConsoleOutput>,
}

#[async_trait]
impl Command for Status {
    fn name(&self) -> &str {
        "status"
    }

    fn description(&self) -> &str {
        "Show the current session"
    }

    async fn execute(&self, _args: &[String]) -> anyhow::Result<()> {
        match self.service.current() {
            Some(user) => self.output.write_line(&format!("Session active: {user}")),
            None => self.output.write_line("No active session"),
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() {
    logging::init(logging::LogTarget::File(logging::host_log_path("client")));

    if let Err(e) = run().await {
        eprintln!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}

async fn run() -> opcon::Result<()> {
    let service = Arc::new(SessionService::new());
    let output: Arc<dyn ConsoleOutput> = Arc::new(TerminalOutput::new());

    let mut registry = CommandRegistry::new();
    registry.register_many([
        Arc::new(Login {
            service: Arc::clone(&service),
            output: Arc::clone(&output),
        }) as Arc<dyn Command>,
        Arc::new(Logout {
            service: Arc::clone(&service),
            output: Arc::clone(&output),
        }),
        Arc::new(Status {
            service: Arc::clone(&service),
            output: Arc::clone(&output),
        }),
    ]);

    let config = ConsoleConfig::new()
        .with_prompt("client> ")
        .with_banner("Client admin console")
        .with_exit_message("Leaving client console.");

    let cancel = CancellationToken::new();
    let _raw = RawModeGuard::new()?;
    let keys = spawn_stdin_reader(cancel.clone());

    let mut console = Console::new(config, registry, output, keys, cancel);
    console.start().await;

    Ok(())
}
