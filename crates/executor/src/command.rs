//! Typed commands.
//!
//! [`Command::parse`] turns one tokenized statement into a variant holding
//! everything needed to run it. Keys and values stay raw bytes.

use crate::error::CommandError;
use crate::table::lookup;

/// One parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `SET key value`
    Set {
        /// Target key
        key: Vec<u8>,
        /// Value to store
        value: Vec<u8>,
    },
    /// `SETNX key value`
    SetNx {
        /// Target key
        key: Vec<u8>,
        /// Value to store
        value: Vec<u8>,
    },
    /// `GET key`
    Get {
        /// Key to read
        key: Vec<u8>,
    },
    /// `GETSET key value`
    GetSet {
        /// Target key
        key: Vec<u8>,
        /// Value to store
        value: Vec<u8>,
    },
    /// `DEL key [key ...]`
    Del {
        /// Keys to remove
        keys: Vec<Vec<u8>>,
    },
    /// `EXISTS key`
    Exists {
        /// Key to test
        key: Vec<u8>,
    },
    /// `APPEND key value`
    Append {
        /// Target key
        key: Vec<u8>,
        /// Bytes to append
        value: Vec<u8>,
    },
    /// `STRLEN key`
    Strlen {
        /// Key to measure
        key: Vec<u8>,
    },
    /// `MSET key value [key value ...]`
    MSet {
        /// Key/value pairs in argument order
        pairs: Vec<(Vec<u8>, Vec<u8>)>,
    },
    /// `MSETNX key value [key value ...]`
    MSetNx {
        /// Key/value pairs in argument order
        pairs: Vec<(Vec<u8>, Vec<u8>)>,
    },
    /// `MGET key [key ...]`
    MGet {
        /// Keys to read
        keys: Vec<Vec<u8>>,
    },
    /// `INCR`, `DECR`, `INCRBY` and `DECRBY`
    IncrBy {
        /// Name the command was written as
        command: &'static str,
        /// Counter key
        key: Vec<u8>,
        /// Signed amount to add
        delta: i64,
    },
    /// `COPY src dst`
    Copy {
        /// Source key
        src: Vec<u8>,
        /// Destination key
        dst: Vec<u8>,
    },
    /// `MOVE src dst`
    Move {
        /// Source key
        src: Vec<u8>,
        /// Destination key
        dst: Vec<u8>,
    },
    /// `CMD_LIST`
    CmdList,
    /// `CMD_COUNT`
    CmdCount,
}

/// Arguments of a statement whose count was already checked.
struct Args(std::vec::IntoIter<Vec<u8>>);

impl Args {
    fn take(&mut self) -> Vec<u8> {
        self.0.next().unwrap_or_default()
    }

    fn rest(self) -> Vec<Vec<u8>> {
        self.0.collect()
    }

    fn pairs(mut self) -> Vec<(Vec<u8>, Vec<u8>)> {
        let mut pairs = Vec::with_capacity(self.0.len() / 2);
        while let (Some(k), Some(v)) = (self.0.next(), self.0.next()) {
            pairs.push((k, v));
        }
        pairs
    }
}

impl Command {
    /// Parse one statement (name followed by arguments).
    pub fn parse(tokens: Vec<Vec<u8>>) -> Result<Self, CommandError> {
        let mut tokens = tokens.into_iter();
        let name = tokens.next().unwrap_or_default();
        let name = String::from_utf8_lossy(&name);
        let spec = lookup(&name).ok_or_else(|| CommandError::UnknownCommand {
            name: name.to_string(),
        })?;

        if !spec.arity.accepts(tokens.len()) {
            return Err(CommandError::WrongArity { command: spec.name });
        }
        let mut args = Args(tokens);

        let command = match spec.name {
            "SET" => Command::Set {
                key: args.take(),
                value: args.take(),
            },
            "SETNX" => Command::SetNx {
                key: args.take(),
                value: args.take(),
            },
            "GET" => Command::Get { key: args.take() },
            "GETSET" => Command::GetSet {
                key: args.take(),
                value: args.take(),
            },
            "DEL" => Command::Del { keys: args.rest() },
            "EXISTS" => Command::Exists { key: args.take() },
            "APPEND" => Command::Append {
                key: args.take(),
                value: args.take(),
            },
            "STRLEN" => Command::Strlen { key: args.take() },
            "MSET" => Command::MSet {
                pairs: args.pairs(),
            },
            "MSETNX" => Command::MSetNx {
                pairs: args.pairs(),
            },
            "MGET" => Command::MGet { keys: args.rest() },
            "INCR" => Command::IncrBy {
                command: spec.name,
                key: args.take(),
                delta: 1,
            },
            "DECR" => Command::IncrBy {
                command: spec.name,
                key: args.take(),
                delta: -1,
            },
            "INCRBY" => {
                let key = args.take();
                let delta = parse_integer(&args.take())?;
                Command::IncrBy {
                    command: spec.name,
                    key,
                    delta,
                }
            }
            "DECRBY" => {
                let key = args.take();
                let delta = parse_integer(&args.take())?
                    .checked_neg()
                    .ok_or(CommandError::Overflow)?;
                Command::IncrBy {
                    command: spec.name,
                    key,
                    delta,
                }
            }
            "COPY" => Command::Copy {
                src: args.take(),
                dst: args.take(),
            },
            "MOVE" => Command::Move {
                src: args.take(),
                dst: args.take(),
            },
            "CMD_LIST" => Command::CmdList,
            "CMD_COUNT" => Command::CmdCount,
            other => {
                return Err(CommandError::UnknownCommand {
                    name: other.to_string(),
                })
            }
        };
        Ok(command)
    }

    /// Canonical name, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Set { .. } => "SET",
            Command::SetNx { .. } => "SETNX",
            Command::Get { .. } => "GET",
            Command::GetSet { .. } => "GETSET",
            Command::Del { .. } => "DEL",
            Command::Exists { .. } => "EXISTS",
            Command::Append { .. } => "APPEND",
            Command::Strlen { .. } => "STRLEN",
            Command::MSet { .. } => "MSET",
            Command::MSetNx { .. } => "MSETNX",
            Command::MGet { .. } => "MGET",
            Command::IncrBy { command, .. } => command,
            Command::Copy { .. } => "COPY",
            Command::Move { .. } => "MOVE",
            Command::CmdList => "CMD_LIST",
            Command::CmdCount => "CMD_COUNT",
        }
    }

    /// True if running the command may modify the keyspace.
    pub fn is_write(&self) -> bool {
        !matches!(
            self,
            Command::Get { .. }
                | Command::Exists { .. }
                | Command::Strlen { .. }
                | Command::MGet { .. }
                | Command::CmdList
                | Command::CmdCount
        )
    }
}

/// Strict decimal integer: optional sign, digits, nothing else.
fn parse_integer(arg: &[u8]) -> Result<i64, CommandError> {
    std::str::from_utf8(arg)
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or_else(|| CommandError::NotAnInteger {
            arg: String::from_utf8_lossy(arg).into_owned(),
        })
}
