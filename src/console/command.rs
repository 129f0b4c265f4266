//! The command descriptor contract.
//!
//! External command modules implement [`Command`]; the engine only consumes
//! it. `execute` and `suggest` may suspend (network or file I/O), so both
//! are async. `suggest` is an optional capability: the default body returns
//! `None`, which the editor checks before offering argument completion.

use async_trait::async_trait;

/// Metadata and behavior for one console command.
///
/// Names are normalized to lower-case at registration and must not contain
/// whitespace. Two descriptors with the same name cannot coexist in a
/// registry; the last registration wins.
#[async_trait]
pub trait Command: Send + Sync {
    /// The command name (unique registry key).
    fn name(&self) -> &str;

    /// Short description shown in the command summary.
    fn description(&self) -> &str {
        ""
    }

    /// Free-form usage hint shown by `help <name>`.
    fn usage(&self) -> &str {
        ""
    }

    /// Free-form example shown by `help <name>`.
    fn example(&self) -> &str {
        ""
    }

    /// Executes the command with the positional arguments.
    ///
    /// Failures are caught at the dispatch loop, logged, and surfaced to the
    /// operator; they never terminate the console.
    async fn execute(&self, args: &[String]) -> anyhow::Result<()>;

    /// Returns completion candidates for the argument currently being typed.
    ///
    /// `args` holds all tokens after the command name. Returning `None`
    /// means the command has no suggest capability; Tab then has no visible
    /// effect.
    async fn suggest(&self, _args: &[String]) -> Option<Vec<String>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ping;

    #[async_trait]
    impl Command for Ping {
        fn name(&self) -> &str {
            "ping"
        }

        async fn execute(&self, _args: &[String]) -> anyhow::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_default_metadata_is_empty() {
        let cmd = Ping;
        assert_eq!(cmd.description(), "");
        assert_eq!(cmd.usage(), "");
        assert_eq!(cmd.example(), "");
    }

    #[tokio::test]
    async fn test_suggest_defaults_to_absent() {
        let cmd = Ping;
        assert!(cmd.suggest(&[]).await.is_none());
    }
}
