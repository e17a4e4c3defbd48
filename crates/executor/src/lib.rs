//! # Tessera Executor
//!
//! The command language run by the bundled backend's `execute` hook.
//!
//! A script is one or more commands separated by `;`. Each command is a
//! name followed by whitespace-separated arguments, which may be quoted:
//!
//! ```text
//! SET greeting 'Hello World'; APPEND greeting "!\n"; GET greeting
//! ```
//!
//! The result of a script is the result of its last command, as a
//! [`Value`](tessera_core::Value).
//!
//! | Layer | Module |
//! |-------|--------|
//! | Splitting text into statements and tokens | `tokenizer` |
//! | Built-in command table | `table` |
//! | Typed commands | `command` |
//! | Running commands against a keyspace | `executor`, `handlers` |

#![warn(missing_docs)]
#![warn(clippy::all)]

mod command;
mod error;
mod executor;
mod handlers;
mod table;
mod tokenizer;

pub use command::Command;
pub use error::CommandError;
pub use executor::{ExecStats, Executor};
pub use table::{lookup, Arity, CommandSpec, COMMANDS};
pub use tokenizer::tokenize;
