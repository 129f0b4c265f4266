//! Logging setup for the console hosts.
//!
//! While a console runs, the engine owns the terminal in raw mode, so
//! interactive hosts log to a per-host file and headless runs log to
//! stderr. Each host picks its own [`LogTarget`]; the client and server
//! consoles write separate files so their logs never interleave.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;

/// Where a host sends its log lines.
pub enum LogTarget {
    /// Append to a file. Required while the console holds raw mode.
    File(PathBuf),
    /// Write to stderr, for headless runs.
    Stderr,
}

/// Installs the global tracing subscriber for the chosen target.
///
/// The filter comes from `RUST_LOG`, defaulting to `info`. If the file
/// target cannot be opened, the host runs without logging rather than
/// writing into the raw-mode terminal.
pub fn init(target: LogTarget) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match target {
        LogTarget::File(path) => {
            let Some(file) = open_log_file(&path) else {
                return;
            };
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(file)
                .with_ansi(false)
                .init();
        }
        LogTarget::Stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
    }
}

/// Returns the log file path for a named host.
///
/// Resolves to `<state dir>/opcon/<host>.log`, falling back to the config
/// directory and then the temp directory on platforms without a state dir.
pub fn host_log_path(host: &str) -> PathBuf {
    let base = dirs::state_dir()
        .or_else(dirs::config_dir)
        .unwrap_or_else(std::env::temp_dir);
    base.join("opcon").join(format!("{host}.log"))
}

/// Opens the log file in append mode, creating parent directories.
fn open_log_file(path: &Path) -> Option<File> {
    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            eprintln!("Warning: could not create log directory {}: {e}", parent.display());
            return None;
        }
    }
    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("Warning: could not open log file {}: {e}", path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_host_log_paths_are_absolute_and_distinct() {
        let client = host_log_path("client");
        let server = host_log_path("server");
        assert!(client.is_absolute());
        assert!(client.ends_with("opcon/client.log"));
        assert_ne!(client, server);
    }

    #[test]
    fn test_open_log_file_appends_across_runs() {
        let dir = std::env::temp_dir().join("opcon-logging-test");
        let path = dir.join("host.log");
        let _ = fs::remove_dir_all(&dir);

        {
            let mut file = open_log_file(&path).expect("first open");
            writeln!(file, "first run").unwrap();
        }
        {
            let mut file = open_log_file(&path).expect("second open");
            writeln!(file, "second run").unwrap();
        }

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("first run"));
        assert!(content.contains("second run"));
        let _ = fs::remove_dir_all(&dir);
    }
}
