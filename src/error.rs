//! Error types for the console engine.
//!
//! Defines the engine-level error enum. Failures raised inside command
//! bodies travel as `anyhow::Error` and are caught at the dispatch loop.

use thiserror::Error;

/// Main error type for console engine operations.
#[derive(Error, Debug)]
pub enum ConsoleError {
    /// Terminal errors (raw mode, cursor movement, writing).
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Key input errors (reader thread gone, channel closed).
    #[error("Input error: {0}")]
    Input(String),

    /// Internal engine errors (unexpected states, bugs).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ConsoleError {
    /// Creates a terminal error with the given message.
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }

    /// Creates an input error with the given message.
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Terminal(_) => "Terminal Error",
            Self::Input(_) => "Input Error",
            Self::Internal(_) => "Internal Error",
        }
    }
}

/// Result type alias using ConsoleError.
pub type Result<T> = std::result::Result<T, ConsoleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_terminal() {
        let err = ConsoleError::terminal("Failed to enable raw mode");
        assert_eq!(err.to_string(), "Terminal error: Failed to enable raw mode");
        assert_eq!(err.category(), "Terminal Error");
    }

    #[test]
    fn test_error_display_input() {
        let err = ConsoleError::input("key channel closed");
        assert_eq!(err.to_string(), "Input error: key channel closed");
        assert_eq!(err.category(), "Input Error");
    }

    #[test]
    fn test_error_display_internal() {
        let err = ConsoleError::internal("unexpected state");
        assert_eq!(err.to_string(), "Internal error: unexpected state");
        assert_eq!(err.category(), "Internal Error");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ConsoleError>();
    }
}
