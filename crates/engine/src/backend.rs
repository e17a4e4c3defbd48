//! Bundled storage backend
//!
//! [`EmbeddedBackend`] keeps every record in a [`Keyspace`] and, for file
//! targets, makes commits durable through a [`Journal`]. Opening a file
//! target replays the journal, so the file is the whole store.
//!
//! # Autocommit
//!
//! A mutation issued while no explicit transaction is open runs in an
//! implicit one that commits before the call returns. For `execute` the
//! implicit transaction covers the whole script: if a later command fails,
//! the effects of the earlier ones are still committed.
//!
//! # Commit failure
//!
//! When the journal append fails, the transaction ends, its buffered writes
//! are dropped from memory and the journal's status (usually `IOERR`) is
//! returned. A record that reached the file before its fsync failed may
//! reappear on the next open; a partially written record never does.

use std::path::{Path, PathBuf};

use tessera_core::{BackendResult, FetchSink, StatusCode, StorageBackend, Value};
use tessera_durability::{Journal, JournalOptions, RecoveryStats};
use tessera_executor::Executor;
use tessera_storage::Keyspace;
use tracing::{debug, info, warn};

use crate::config::StoreConfig;

/// Target name that opens a purely in-memory store.
pub const MEMORY_TARGET: &str = ":mem:";

/// The default [`StorageBackend`]
#[derive(Debug)]
pub struct EmbeddedBackend {
    keyspace: Keyspace,
    executor: Executor,
    journal: Option<Journal>,
    recovery: Option<RecoveryStats>,
    fetch_chunk_size: usize,
    read_only: bool,
    /// An explicit transaction is open
    explicit: bool,
    closed: bool,
    last_result: Value,
    last_error: String,
}

impl EmbeddedBackend {
    /// Open `target` with the given configuration.
    ///
    /// `target` is [`MEMORY_TARGET`] or the path of the journal file.
    pub fn open_with_config(target: &str, config: &StoreConfig) -> BackendResult<Self> {
        let durability = config.durability_mode().map_err(|e| {
            warn!(target: "tessera::store", error = %e, "Invalid configuration");
            StatusCode::INVALID
        })?;
        if config.fetch_chunk_size == 0 {
            warn!(target: "tessera::store", "fetch_chunk_size must be greater than zero");
            return Err(StatusCode::INVALID);
        }

        let mut keyspace = Keyspace::with_max_value_size(config.max_value_size);
        let executor = if config.read_only {
            Executor::read_only()
        } else {
            Executor::new()
        };

        let (journal, recovery) = if target == MEMORY_TARGET {
            (None, None)
        } else {
            let options = JournalOptions {
                read_only: config.read_only,
                durability,
            };
            let (journal, stats) = Journal::open(Path::new(target), options, |ws| {
                keyspace.apply(ws)
            })
            .map_err(|e| {
                warn!(
                    target: "tessera::store",
                    path = target,
                    error = %e,
                    "Failed to open journal"
                );
                e.status()
            })?;
            (Some(journal), Some(stats))
        };

        info!(
            target: "tessera::store",
            target_name = target,
            records = keyspace.len(),
            read_only = config.read_only,
            mode = durability.description(),
            "Backend opened"
        );

        Ok(Self {
            keyspace,
            executor,
            journal,
            recovery,
            fetch_chunk_size: config.fetch_chunk_size,
            read_only: config.read_only,
            explicit: false,
            closed: false,
            last_result: Value::Null,
            last_error: String::new(),
        })
    }

    /// True for a [`MEMORY_TARGET`] store.
    pub fn is_memory(&self) -> bool {
        self.journal.is_none()
    }

    /// True if every mutation is rejected.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Number of committed records.
    pub fn record_count(&self) -> usize {
        self.keyspace.len()
    }

    /// Path of the journal file, if any.
    pub fn journal_path(&self) -> Option<PathBuf> {
        self.journal.as_ref().map(|j| j.path().to_path_buf())
    }

    /// What recovery found when the store was opened.
    pub fn recovery_stats(&self) -> Option<RecoveryStats> {
        self.recovery
    }

    /// Largest chunk a fetch hands to its sink.
    pub fn fetch_chunk_size(&self) -> usize {
        self.fetch_chunk_size
    }

    fn fail(&mut self, status: StatusCode, message: impl Into<String>) -> StatusCode {
        self.last_error = message.into();
        status
    }

    fn ensure_open(&mut self) -> BackendResult<()> {
        if self.closed {
            return Err(self.fail(StatusCode::ABORT, "store handle is closed"));
        }
        Ok(())
    }

    fn ensure_writable(&mut self) -> BackendResult<()> {
        self.ensure_open()?;
        if self.read_only {
            return Err(self.fail(StatusCode::READ_ONLY, "store is opened read-only"));
        }
        Ok(())
    }

    /// Run `op` inside the open transaction, or inside an implicit one that
    /// commits afterwards.
    fn autocommit<T>(
        &mut self,
        op: impl FnOnce(&mut Self) -> BackendResult<T>,
    ) -> BackendResult<T> {
        if self.explicit {
            return op(self);
        }
        self.keyspace.begin()?;
        let outcome = op(self);
        let committed = self.commit_pending();
        let value = outcome?;
        committed?;
        Ok(value)
    }

    /// Journal and apply the buffered write set.
    fn commit_pending(&mut self) -> BackendResult<()> {
        let Some(write_set) = self.keyspace.take_pending() else {
            return Ok(());
        };
        if write_set.is_empty() {
            return Ok(());
        }
        if let Some(journal) = &mut self.journal {
            if let Err(e) = journal.append(&write_set) {
                let status = e.status();
                warn!(
                    target: "tessera::txn",
                    error = %e,
                    "Journal append failed, writes discarded"
                );
                return Err(self.fail(status, format!("commit failed: {}", e)));
            }
        }
        self.keyspace.apply(write_set);
        Ok(())
    }
}

fn describe(status: StatusCode) -> &'static str {
    match status {
        StatusCode::LIMIT => "key or value exceeds the size limit",
        StatusCode::NOMEM => "out of memory",
        StatusCode::NOTFOUND => "key not found",
        _ => "storage error",
    }
}

impl StorageBackend for EmbeddedBackend {
    fn open(target: &str) -> BackendResult<Self> {
        Self::open_with_config(target, &StoreConfig::default())
    }

    fn close(&mut self) -> BackendResult<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        if self.explicit {
            self.explicit = false;
            self.keyspace.rollback();
        }
        if let Some(journal) = self.journal.take() {
            if let Err(e) = journal.close() {
                warn!(target: "tessera::store", error = %e, "Failed to close journal");
                return Err(self.fail(e.status(), format!("close failed: {}", e)));
            }
        }
        debug!(target: "tessera::store", "Backend closed");
        Ok(())
    }

    fn begin(&mut self) -> BackendResult<()> {
        self.ensure_open()?;
        if self.explicit {
            return Err(self.fail(StatusCode::INVALID, "a transaction is already open"));
        }
        self.keyspace.begin()?;
        self.explicit = true;
        Ok(())
    }

    fn commit(&mut self) -> BackendResult<()> {
        self.ensure_open()?;
        if !self.explicit {
            return Err(self.fail(StatusCode::INVALID, "no transaction is open"));
        }
        self.explicit = false;
        self.commit_pending()
    }

    fn rollback(&mut self) -> BackendResult<()> {
        self.ensure_open()?;
        if !self.explicit {
            return Err(self.fail(StatusCode::INVALID, "no transaction is open"));
        }
        self.explicit = false;
        let discarded = self.keyspace.rollback();
        debug!(target: "tessera::txn", discarded, "Write set discarded");
        Ok(())
    }

    fn execute(&mut self, command: &str) -> BackendResult<()> {
        self.ensure_open()?;
        self.last_result = Value::Null;
        let value = self.autocommit(|b| {
            b.executor
                .run(&mut b.keyspace, command)
                .map_err(|e| {
                    let status = e.status();
                    b.last_error = e.to_string();
                    status
                })
        })?;
        self.last_result = value;
        Ok(())
    }

    fn last_result(&mut self) -> Value {
        std::mem::take(&mut self.last_result)
    }

    fn kv_store(&mut self, key: &[u8], value: &[u8]) -> BackendResult<()> {
        self.ensure_writable()?;
        debug!(target: "tessera::kv", key_len = key.len(), value_len = value.len(), "kv_store");
        self.autocommit(|b| {
            b.keyspace
                .put(key, value)
                .map_err(|status| b.fail(status, format!("kv_store: {}", describe(status))))
        })
    }

    fn kv_append(&mut self, key: &[u8], value: &[u8]) -> BackendResult<()> {
        self.ensure_writable()?;
        debug!(target: "tessera::kv", key_len = key.len(), value_len = value.len(), "kv_append");
        self.autocommit(|b| match b.keyspace.append(key, value) {
            Ok(_) => Ok(()),
            Err(status) => Err(b.fail(status, format!("kv_append: {}", describe(status)))),
        })
    }

    fn kv_delete(&mut self, key: &[u8]) -> BackendResult<()> {
        self.ensure_writable()?;
        debug!(target: "tessera::kv", key_len = key.len(), "kv_delete");
        self.autocommit(|b| {
            if b.keyspace.delete(key) {
                Ok(())
            } else {
                Err(b.fail(StatusCode::NOTFOUND, "kv_delete: key not found"))
            }
        })
    }

    fn kv_fetch(&mut self, key: &[u8], sink: &mut FetchSink<'_>) -> BackendResult<()> {
        self.ensure_open()?;
        debug!(target: "tessera::kv", key_len = key.len(), "kv_fetch");
        let Some(chunks) = self.keyspace.chunks(key, self.fetch_chunk_size) else {
            self.last_error = "kv_fetch: key not found".to_string();
            return Err(StatusCode::NOTFOUND);
        };
        for chunk in chunks {
            if sink(chunk).is_break() {
                self.last_error = "kv_fetch: consumer stopped the stream".to_string();
                return Err(StatusCode::ABORT);
            }
        }
        Ok(())
    }

    fn last_error_text(&self) -> String {
        self.last_error.clone()
    }
}

impl Drop for EmbeddedBackend {
    fn drop(&mut self) {
        // Journal::drop syncs; this only rolls back a dangling transaction
        if self.explicit {
            self.keyspace.rollback();
        }
    }
}
