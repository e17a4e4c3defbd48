//! Core trait for the storage backend abstraction
//!
//! A `Store` owns exactly one [`StorageBackend`] and drives it through this
//! trait. Backends report failures as raw [`StatusCode`]s; the Store maps
//! them onto [`Error`](crate::Error) so no raw code escapes.

use std::ops::ControlFlow;

use crate::status::BackendResult;
use crate::value::Value;

/// Consumer of a streamed value.
///
/// Invoked once per chunk, synchronously, inside the backend's call. The
/// chunk slice is only valid for the duration of the invocation. Returning
/// `ControlFlow::Break(())` stops the stream and the fetch fails with
/// `ABORT`.
pub type FetchSink<'a> = dyn FnMut(&[u8]) -> ControlFlow<()> + 'a;

/// Durable key/value page store with transaction hooks
///
/// Implementations are single-threaded per handle: the owning Store never
/// calls into a backend from two threads at once.
///
/// # Transaction hooks
///
/// `begin`, `commit` and `rollback` are only called by the transaction
/// controller, which guarantees `begin` is never issued while a transaction
/// is open and `commit`/`rollback` only while one is.
///
/// # Implicit transactions
///
/// Mutations issued while no transaction is open (through the KV methods or
/// through `execute`) must be applied durably before the call returns.
pub trait StorageBackend {
    /// Open or create the store named by `target`.
    fn open(target: &str) -> BackendResult<Self>
    where
        Self: Sized;

    /// Release all resources held by the handle. Further calls are invalid.
    fn close(&mut self) -> BackendResult<()>;

    /// Open a transaction. Fails with `BUSY` if the lock cannot be taken.
    fn begin(&mut self) -> BackendResult<()>;

    /// Durably apply every mutation buffered since `begin`.
    fn commit(&mut self) -> BackendResult<()>;

    /// Discard every mutation buffered since `begin`.
    fn rollback(&mut self) -> BackendResult<()>;

    /// Run a command string.
    fn execute(&mut self, command: &str) -> BackendResult<()>;

    /// Hand over the result produced by the most recent `execute`.
    ///
    /// Returns `Value::Null` if nothing was produced since the last call.
    fn last_result(&mut self) -> Value;

    /// Insert or overwrite the value stored under `key`.
    fn kv_store(&mut self, key: &[u8], value: &[u8]) -> BackendResult<()>;

    /// Append to the value under `key`, creating it when absent.
    fn kv_append(&mut self, key: &[u8], value: &[u8]) -> BackendResult<()>;

    /// Remove `key`. Fails with `NOTFOUND` when absent.
    fn kv_delete(&mut self, key: &[u8]) -> BackendResult<()>;

    /// Stream the value under `key` to `sink` in one or more chunks.
    ///
    /// Fails with `NOTFOUND` when absent. Chunk boundaries are
    /// backend-defined and carry no meaning.
    fn kv_fetch(&mut self, key: &[u8], sink: &mut FetchSink<'_>) -> BackendResult<()>;

    /// Most recent diagnostic message, or an empty string.
    fn last_error_text(&self) -> String;
}
