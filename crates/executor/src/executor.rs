//! Runs scripts against a keyspace.
//!
//! The executor has no transaction logic of its own: the caller decides
//! whether the keyspace has an open write buffer. A script that fails part
//! way leaves the effects of the commands before the failing one in place.

use tessera_core::Value;
use tessera_storage::Keyspace;
use tracing::{debug, warn};

use crate::command::Command;
use crate::error::CommandError;
use crate::handlers::{counter, keys, meta, string, HandlerResult};
use crate::tokenizer::tokenize;

/// Counters for one executor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecStats {
    /// Scripts run
    pub scripts: u64,
    /// Commands dispatched
    pub commands: u64,
    /// Scripts that ended in an error
    pub failures: u64,
}

/// Command executor
///
/// # Example
///
/// ```
/// use tessera_executor::Executor;
/// use tessera_storage::Keyspace;
///
/// let mut ks = Keyspace::new();
/// let mut executor = Executor::new();
/// let value = executor.run(&mut ks, "SET x 123; GET x").unwrap();
/// assert_eq!(value.to_int(), 123);
/// ```
#[derive(Debug, Default)]
pub struct Executor {
    read_only: bool,
    stats: ExecStats,
}

impl Executor {
    /// Create an executor that allows writes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an executor that rejects every writing command with
    /// `READ_ONLY` before it touches the keyspace.
    pub fn read_only() -> Self {
        Self {
            read_only: true,
            ..Self::default()
        }
    }

    /// True if writes are rejected.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Counters so far.
    pub fn stats(&self) -> ExecStats {
        self.stats
    }

    /// Run a script and return the last command's result.
    ///
    /// An empty script yields `Value::Null`.
    pub fn run(&mut self, ks: &mut Keyspace, script: &str) -> Result<Value, CommandError> {
        self.stats.scripts += 1;
        let outcome = self.run_statements(ks, script);
        if let Err(e) = &outcome {
            self.stats.failures += 1;
            warn!(target: "tessera::exec", error = %e, "Command failed");
        }
        outcome
    }

    fn run_statements(&mut self, ks: &mut Keyspace, script: &str) -> Result<Value, CommandError> {
        let mut result = Value::Null;
        for tokens in tokenize(script)? {
            let command = Command::parse(tokens)?;
            result = self.execute(ks, command)?;
        }
        Ok(result)
    }

    /// Execute a single parsed command.
    pub fn execute(&mut self, ks: &mut Keyspace, cmd: Command) -> HandlerResult {
        if self.read_only && cmd.is_write() {
            return Err(CommandError::Storage {
                command: cmd.name(),
                status: tessera_core::StatusCode::READ_ONLY,
            });
        }
        self.stats.commands += 1;
        debug!(target: "tessera::exec", command = cmd.name(), "Executing command");

        match cmd {
            Command::Set { key, value } => string::set(ks, &key, &value),
            Command::SetNx { key, value } => string::set_nx(ks, &key, &value),
            Command::Get { key } => string::get(ks, &key),
            Command::GetSet { key, value } => string::get_set(ks, &key, &value),
            Command::Append { key, value } => string::append(ks, &key, &value),
            Command::Strlen { key } => string::strlen(ks, &key),
            Command::MSet { pairs } => string::mset(ks, &pairs),
            Command::MSetNx { pairs } => string::mset_nx(ks, &pairs),
            Command::MGet { keys } => string::mget(ks, &keys),
            Command::Del { keys: targets } => keys::del(ks, &targets),
            Command::Exists { key } => keys::exists(ks, &key),
            Command::Copy { src, dst } => keys::copy(ks, &src, &dst),
            Command::Move { src, dst } => keys::rename(ks, &src, &dst),
            Command::IncrBy {
                command,
                key,
                delta,
            } => counter::incr_by(ks, command, &key, delta),
            Command::CmdList => meta::cmd_list(),
            Command::CmdCount => meta::cmd_count(),
        }
    }
}
