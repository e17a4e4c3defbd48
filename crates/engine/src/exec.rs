//! Command execution with a single result slot
//!
//! Each store has one slot holding the result of its most recent `exec`.
//! Running another command replaces it, so a borrowed result can never
//! outlive the next command. The borrow checker enforces this through
//! [`Store::result`](crate::Store::result).

use tessera_core::{Error, Result, StorageBackend, Value};
use tracing::{debug, warn};

/// Runs command strings and owns the result slot
#[derive(Debug, Default)]
pub struct CommandExecutor {
    slot: Value,
    executed: u64,
}

impl CommandExecutor {
    /// Create an executor with an empty (Null) slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `command` and store its result in the slot.
    ///
    /// The previous result is discarded before the command runs, so on
    /// failure the slot holds `Value::Null`.
    pub fn exec<B: StorageBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        command: &str,
    ) -> Result<()> {
        self.slot = Value::Null;
        self.executed += 1;
        debug!(target: "tessera::exec", command_len = command.len(), "exec");

        if let Err(status) = backend.execute(command) {
            let error = Error::from_status(status);
            warn!(
                target: "tessera::exec",
                %status,
                detail = %backend.last_error_text(),
                "exec failed"
            );
            return Err(error);
        }
        self.slot = backend.last_result();
        Ok(())
    }

    /// The result of the last successful `exec`, or Null.
    pub fn result(&self) -> &Value {
        &self.slot
    }

    /// `exec` followed by `result`.
    pub fn exec_result<B: StorageBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        command: &str,
    ) -> Result<&Value> {
        self.exec(backend, command)?;
        Ok(&self.slot)
    }

    /// Number of `exec` calls so far.
    pub fn executed(&self) -> u64 {
        self.executed
    }

    /// Drop the held result.
    pub fn clear(&mut self) {
        self.slot = Value::Null;
    }
}
