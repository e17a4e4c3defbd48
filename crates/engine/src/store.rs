//! The public store handle
//!
//! A [`Store`] owns one backend and routes every call through one of three
//! components:
//!
//! | Component | Calls |
//! |-----------|-------|
//! | [`TransactionController`] | `begin`, `commit`, `rollback` |
//! | [`CommandExecutor`] | `exec`, `result`, `exec_result` |
//! | [`KvChannel`] | `store`, `append`, `delete`, `fetch*` |
//!
//! # Threading
//!
//! A store is a single-threaded handle: every method takes `&self` or
//! `&mut self`, so sharing one across threads requires the caller's own
//! synchronization. Contention between handles on the same file surfaces as
//! [`Error::Busy`], which this crate never retries.
//!
//! # Closing
//!
//! [`Store::close`] consumes the handle. Dropping a store closes it too.
//! Either way an open transaction is rolled back first.

use std::ops::ControlFlow;

use tessera_concurrency::{TransactionController, TransactionState, TransactionStats};
use tessera_core::{Error, Result, StorageBackend, Value};
use tracing::{info, warn};

use crate::backend::{EmbeddedBackend, MEMORY_TARGET};
use crate::config::OpenOptions;
use crate::exec::CommandExecutor;
use crate::kv::{KvChannel, KvStats};

/// An open store
///
/// # Example
///
/// ```
/// use tessera_engine::Store;
///
/// let mut store = Store::open_memory()?;
/// store.store(b"greeting", b"hello")?;
/// store.append(b"greeting", b" world")?;
/// assert_eq!(store.fetch_all(b"greeting")?, b"hello world");
///
/// let value = store.exec_result("SET x 123; GET x")?;
/// assert_eq!(value.to_int(), 123);
/// # Ok::<(), tessera_engine::Error>(())
/// ```
#[derive(Debug)]
pub struct Store<B: StorageBackend = EmbeddedBackend> {
    backend: B,
    txn: TransactionController,
    commands: CommandExecutor,
    kv: KvChannel,
    closed: bool,
}

impl Store<EmbeddedBackend> {
    /// Open the store at `target`: a journal file path, or `":mem:"`.
    pub fn open(target: &str) -> Result<Self> {
        Self::open_with_options(target, OpenOptions::default())
    }

    /// Open with explicit options.
    pub fn open_with_options(target: &str, options: OpenOptions) -> Result<Self> {
        let config = options.resolve()?;
        let backend = EmbeddedBackend::open_with_config(target, &config).map_err(|status| {
            warn!(target: "tessera::store", target_name = target, %status, "Open failed");
            Error::from_status(status)
        })?;
        info!(target: "tessera::store", target_name = target, "Store opened");
        Ok(Self::from_backend(backend))
    }

    /// Open a fresh in-memory store.
    pub fn open_memory() -> Result<Self> {
        Self::open(MEMORY_TARGET)
    }
}

impl<B: StorageBackend> Store<B> {
    /// Open `target` through the backend's own `open`.
    pub fn open_backend(target: &str) -> Result<Self> {
        let backend = B::open(target).map_err(Error::from_status)?;
        Ok(Self::from_backend(backend))
    }

    /// Wrap an already open backend.
    pub fn from_backend(backend: B) -> Self {
        Self {
            backend,
            txn: TransactionController::new(),
            commands: CommandExecutor::new(),
            kv: KvChannel::new(),
            closed: false,
        }
    }

    /// Shared access to the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    // =========================================================================
    // Transactions
    // =========================================================================

    /// Open a transaction.
    ///
    /// Fails with [`Error::TransactionAlreadyActive`] if one is open.
    pub fn begin(&mut self) -> Result<()> {
        self.txn.begin(&mut self.backend)
    }

    /// Commit the open transaction.
    ///
    /// Fails with [`Error::TransactionNotActive`] if none is open. After any
    /// other failure the transaction has still ended.
    pub fn commit(&mut self) -> Result<()> {
        self.txn.commit(&mut self.backend)
    }

    /// Discard the open transaction.
    pub fn rollback(&mut self) -> Result<()> {
        self.txn.rollback(&mut self.backend)
    }

    /// True while a transaction is open.
    pub fn in_transaction(&self) -> bool {
        self.txn.is_active()
    }

    /// Current transaction state.
    pub fn transaction_state(&self) -> TransactionState {
        self.txn.state()
    }

    /// Transaction counters for this handle.
    pub fn transaction_stats(&self) -> TransactionStats {
        self.txn.stats()
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Run a command string, replacing the held result.
    pub fn exec(&mut self, command: &str) -> Result<()> {
        self.commands.exec(&mut self.backend, command)
    }

    /// The result of the last `exec`; Null if there was none or it failed.
    ///
    /// The reference is invalidated by the next call that takes `&mut self`.
    pub fn result(&self) -> &Value {
        self.commands.result()
    }

    /// Run a command string and borrow its result.
    pub fn exec_result(&mut self, command: &str) -> Result<&Value> {
        self.commands.exec_result(&mut self.backend, command)
    }

    // =========================================================================
    // Key/value
    // =========================================================================

    /// Insert or overwrite `key`.
    pub fn store(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        self.kv.store(&mut self.backend, key, value)
    }

    /// Append to `key`, creating it when absent.
    pub fn append(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        self.kv.append(&mut self.backend, key, value)
    }

    /// Remove `key`. Fails with [`Error::NotFound`] when absent.
    pub fn delete(&mut self, key: &[u8]) -> Result<()> {
        self.kv.delete(&mut self.backend, key)
    }

    /// Stream the value under `key` to `sink`, one chunk per call.
    ///
    /// Chunk boundaries carry no meaning. Fails with [`Error::NotFound`]
    /// when the key is absent.
    pub fn fetch<F: FnMut(&[u8])>(&mut self, key: &[u8], sink: F) -> Result<()> {
        self.kv.fetch(&mut self.backend, key, sink)
    }

    /// Like [`fetch`](Self::fetch), but the sink can stop the stream by
    /// returning `ControlFlow::Break`, which fails the fetch with
    /// [`Error::Abort`].
    pub fn fetch_with<F>(&mut self, key: &[u8], sink: F) -> Result<()>
    where
        F: FnMut(&[u8]) -> ControlFlow<()>,
    {
        self.kv.fetch_with(&mut self.backend, key, sink)
    }

    /// Fetch the whole value under `key`.
    pub fn fetch_all(&mut self, key: &[u8]) -> Result<Vec<u8>> {
        self.kv.fetch_all(&mut self.backend, key)
    }

    /// KV path counters.
    pub fn kv_stats(&self) -> KvStats {
        self.kv.stats()
    }

    // =========================================================================
    // Diagnostics and lifecycle
    // =========================================================================

    /// The backend's latest diagnostic message, or an empty string.
    ///
    /// For logging only.
    pub fn last_error(&self) -> String {
        self.backend.last_error_text()
    }

    /// Roll back any open transaction and release the backend.
    pub fn close(mut self) -> Result<()> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.commands.clear();
        self.txn.abandon(&mut self.backend);
        self.backend.close().map_err(Error::from_status)?;
        info!(target: "tessera::store", "Store closed");
        Ok(())
    }
}

impl<B: StorageBackend> Drop for Store<B> {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            warn!(target: "tessera::store", error = %e, "Error closing store on drop");
        }
    }
}
