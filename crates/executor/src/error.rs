//! Error types for command execution.
//!
//! The display text of a [`CommandError`] is what the backend reports as
//! its last error message.

use tessera_core::StatusCode;

/// Command parsing and execution errors.
///
/// # Categories
///
/// | Category | Variants | Status |
/// |----------|----------|--------|
/// | Syntax | `UnterminatedQuote`, `UnknownCommand`, `WrongArity`, `NotAnInteger` | `UNKNOWN` |
/// | Arithmetic | `Overflow` | `LIMIT` |
/// | Storage | `Storage` | the storage status |
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// A quoted token was not closed
    #[error("unterminated quoted string")]
    UnterminatedQuote,

    /// No built-in command has this name
    #[error("unknown command '{name}'")]
    UnknownCommand {
        /// The name as written
        name: String,
    },

    /// Argument count does not match the command
    #[error("wrong number of arguments for '{command}'")]
    WrongArity {
        /// Canonical command name
        command: &'static str,
    },

    /// An integer argument did not parse
    #[error("value is not an integer or out of range: '{arg}'")]
    NotAnInteger {
        /// The argument as written
        arg: String,
    },

    /// An increment or decrement left the 64-bit range
    #[error("increment or decrement would overflow")]
    Overflow,

    /// The keyspace rejected the operation
    #[error("{command} failed: {status}")]
    Storage {
        /// Canonical command name
        command: &'static str,
        /// Status reported by the keyspace
        status: StatusCode,
    },
}

impl CommandError {
    /// Backend status code for this failure.
    pub fn status(&self) -> StatusCode {
        match self {
            CommandError::UnterminatedQuote
            | CommandError::UnknownCommand { .. }
            | CommandError::WrongArity { .. }
            | CommandError::NotAnInteger { .. } => StatusCode::UNKNOWN,
            CommandError::Overflow => StatusCode::LIMIT,
            CommandError::Storage { status, .. } => *status,
        }
    }

    /// Adapter for `map_err` on keyspace results.
    pub(crate) fn storage(command: &'static str) -> impl Fn(StatusCode) -> CommandError {
        move |status| CommandError::Storage { command, status }
    }
}
