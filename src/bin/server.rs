//! Admin console host for the server process.
//!
//! Same engine as the client host, parameterized with the server's prompt,
//! wording, and command set. The license store below stands in for the
//! real persistence collaborator.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use anyhow::bail;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use opcon::console::{
    spawn_stdin_reader, Command, CommandRegistry, Console, ConsoleOutput, RawModeGuard,
    TerminalOutput,
};
use opcon::{logging, ConsoleConfig};

/// In-memory stand-in for the server's license store.
struct LicenseStore {
    licenses: Mutex<BTreeMap<String, String>>,
    next_id: Mutex<u32>,
}

impl LicenseStore {
    fn new() -> Self {
        let mut seeded = BTreeMap::new();
        seeded.insert("lic-0001".to_string(), "alice".to_string());
        seeded.insert("lic-0002".to_string(), "bob".to_string());
        Self {
            licenses: Mutex::new(seeded),
            next_id: Mutex::new(3),
        }
    }

    fn issue(&self, holder: &str) -> String {
        let mut next = self.next_id.lock().expect("store mutex poisoned");
        let key = format!("lic-{:04}", *next);
        *next += 1;
        self.licenses
            .lock()
            .expect("store mutex poisoned")
            .insert(key.clone(), holder.to_string());
        key
    }

    fn revoke(&self, key: &str) -> Option<String> {
        self.licenses
            .lock()
            .expect("store mutex poisoned")
            .remove(key)
    }

    fn all(&self) -> Vec<(String, String)> {
        self.licenses
            .lock()
            .expect("store mutex poisoned")
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    fn keys(&self) -> Vec<String> {
        self.licenses
            .lock()
            .expect("store mutex poisoned")
            .keys()
            .cloned()
            .collect()
    }
}

struct Licenses {
    store: Arc<LicenseStore>,
    output: Arc<dyn ConsoleOutput>,
}

#[async_trait]
impl Command for Licenses {
    fn name(&self) -> &str {
        "licenses"
    }

    fn description(&self) -> &str {
        "List issued licenses"
    }

    async fn execute(&self, _args: &[String]) -> anyhow::Result<()> {
        let all = self.store.all();
        if all.is_empty() {
            self.output.write_line("No licenses issued");
            return Ok(());
        }
        for (key, holder) in all {
            self.output.write_line(&format!("  {key} -> {holder}"));
        }
        Ok(())
    }
}

struct Issue {
    store: Arc<LicenseStore>,
    output: Arc<dyn ConsoleOutput>,
}

#[async_trait]
impl Command for Issue {
    fn name(&self) -> &str {
        "issue"
    }

    fn description(&self) -> &str {
        "Issue a license to a holder"
    }

    fn usage(&self) -> &str {
        "issue <holder>"
    }

    fn example(&self) -> &str {
        "issue \"Dana Example\""
    }

    async fn execute(&self, args: &[String]) -> anyhow::Result<()> {
        let Some(holder) = args.first() else {
            bail!("missing holder name, see 'help issue'");
        };
        let key = self.store.issue(holder);
        self.output.write_line(&format!("Issued {key} to {holder}"));
        Ok(())
    }
}

struct Revoke {
    store: Arc<LicenseStore>,
    output: Arc<dyn ConsoleOutput>,
}

#[async_trait]
impl Command for Revoke {
    fn name(&self) -> &str {
        "revoke"
    }

    fn description(&self) -> &str {
        "Revoke an issued license"
    }

    fn usage(&self) -> &str {
        "revoke <key>"
    }

    fn example(&self) -> &str {
        "revoke lic-0001"
    }

    async fn execute(&self, args: &[String]) -> anyhow::Result<()> {
        let Some(key) = args.first() else {
            bail!("missing license key, see 'help revoke'");
        };
        match self.store.revoke(key) {
            Some(holder) => {
                self.output
                    .write_line(&format!("Revoked {key} (was held by {holder})"));
                Ok(())
            }
            None => bail!("no such license '{key}'"),
        }
    }

    async fn suggest(&self, _args: &[String]) -> Option<Vec<String>> {
        Some(self.store.keys())
    }
}

#[tokio::main]
async fn main() {
    logging::init(logging::LogTarget::File(logging::host_log_path("server")));

    if let Err(e) = run().await {
        eprintln!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}

async fn run() -> opcon::Result<()> {
    let store = Arc::new(LicenseStore::new());
    let output: Arc<dyn ConsoleOutput> = Arc::new(TerminalOutput::new());

    let mut registry = CommandRegistry::new();
    registry.register_many([
        Arc::new(Licenses {
            store: Arc::clone(&store),
            output: Arc::clone(&output),
        }) as Arc<dyn Command>,
        Arc::new(Issue {
            store: Arc::clone(&store),
            output: Arc::clone(&output),
        }),
        Arc::new(Revoke {
            store: Arc::clone(&store),
            output: Arc::clone(&output),
        }),
    ]);

    let config = ConsoleConfig::new()
        .with_prompt("server> ")
        .with_banner("Server admin console")
        .with_exit_message("Leaving server console.");

    let cancel = CancellationToken::new();
    let _raw = RawModeGuard::new()?;
    let keys = spawn_stdin_reader(cancel.clone());

    let mut console = Console::new(config, registry, output, keys, cancel);
    console.start().await;

    Ok(())
}
