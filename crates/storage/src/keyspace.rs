//! Keyspace: ordered record table with a transaction write buffer
//!
//! Committed records live in a `BTreeMap`. While a transaction is open,
//! mutations are buffered in a [`WriteSet`] and reads consult the buffer
//! first (read-your-writes). Outside a transaction, mutations hit the
//! committed table directly.
//!
//! # Commit protocol
//!
//! The keyspace never persists anything. Commit is split in two so the
//! caller can make the write set durable in between:
//!
//! 1. [`Keyspace::take_pending`] ends the transaction and hands over its
//!    write set.
//! 2. The caller journals it, then calls [`Keyspace::apply`]. If journaling
//!    fails the write set is simply dropped.

use std::collections::BTreeMap;

use tessera_core::limits::{DEFAULT_MAX_VALUE_SIZE, MAX_KEY_LEN};
use tessera_core::{BackendResult, StatusCode};

use crate::write_set::{Mutation, WriteSet};

/// In-memory record table
#[derive(Debug)]
pub struct Keyspace {
    records: BTreeMap<Vec<u8>, Vec<u8>>,
    pending: Option<WriteSet>,
    max_value_size: u64,
}

impl Default for Keyspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Keyspace {
    /// Create an empty keyspace with the default value size limit.
    pub fn new() -> Self {
        Self::with_max_value_size(DEFAULT_MAX_VALUE_SIZE)
    }

    /// Create an empty keyspace that rejects values above `max_value_size`.
    pub fn with_max_value_size(max_value_size: u64) -> Self {
        Self {
            records: BTreeMap::new(),
            pending: None,
            max_value_size,
        }
    }

    /// Number of committed records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if no records are committed.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True while a write buffer is open.
    pub fn in_transaction(&self) -> bool {
        self.pending.is_some()
    }

    /// Open a write buffer.
    ///
    /// Fails with `INVALID` if one is already open.
    pub fn begin(&mut self) -> BackendResult<()> {
        if self.pending.is_some() {
            return Err(StatusCode::INVALID);
        }
        self.pending = Some(WriteSet::new());
        Ok(())
    }

    /// Close the write buffer and return its contents for journaling.
    pub fn take_pending(&mut self) -> Option<WriteSet> {
        self.pending.take()
    }

    /// Close the write buffer, discarding its contents.
    ///
    /// Returns the number of keys that were touched.
    pub fn rollback(&mut self) -> usize {
        self.pending.take().map_or(0, |ws| ws.len())
    }

    /// Apply a write set to the committed table.
    pub fn apply(&mut self, write_set: WriteSet) {
        for (key, mutation) in write_set {
            match mutation {
                Mutation::Put(value) => {
                    self.records.insert(key, value);
                }
                Mutation::Delete => {
                    self.records.remove(&key);
                }
            }
        }
    }

    /// Current value of `key`, including buffered mutations.
    pub fn get(&self, key: &[u8]) -> Option<&[u8]> {
        if let Some(pending) = &self.pending {
            match pending.get(key) {
                Some(Mutation::Put(value)) => return Some(value),
                Some(Mutation::Delete) => return None,
                None => {}
            }
        }
        self.records.get(key).map(Vec::as_slice)
    }

    /// True if `key` currently has a value.
    pub fn contains(&self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }

    /// Store `value` under `key`.
    ///
    /// Fails with `LIMIT` if the key or value exceeds its size limit.
    pub fn put(&mut self, key: &[u8], value: &[u8]) -> BackendResult<()> {
        self.check_put(key, value.len())?;
        self.write(key.to_vec(), value.to_vec());
        Ok(())
    }

    /// Append `value` to the bytes under `key`, creating the key if absent.
    ///
    /// Returns the new length. Fails with `LIMIT` if the result would exceed
    /// the value size limit and with `NOMEM` if it cannot be allocated.
    pub fn append(&mut self, key: &[u8], value: &[u8]) -> BackendResult<usize> {
        self.check_key(key)?;
        let existing = self.get(key).unwrap_or_default();
        let new_len = existing
            .len()
            .checked_add(value.len())
            .ok_or(StatusCode::LIMIT)?;
        self.check_value_len(new_len)?;

        let mut joined = Vec::new();
        joined
            .try_reserve_exact(new_len)
            .map_err(|_| StatusCode::NOMEM)?;
        joined.extend_from_slice(existing);
        joined.extend_from_slice(value);
        self.write(key.to_vec(), joined);
        Ok(new_len)
    }

    /// Remove `key`. Returns whether it existed.
    pub fn delete(&mut self, key: &[u8]) -> bool {
        if !self.contains(key) {
            return false;
        }
        match &mut self.pending {
            Some(pending) => pending.delete(key.to_vec()),
            None => {
                self.records.remove(key);
            }
        }
        true
    }

    /// Iterate the value under `key` in chunks of at most `chunk_size` bytes.
    ///
    /// An empty value yields a single empty chunk so consumers always see at
    /// least one invocation for a present key.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    pub fn chunks(&self, key: &[u8], chunk_size: usize) -> Option<impl Iterator<Item = &[u8]>> {
        assert!(chunk_size > 0, "chunk size must be non-zero");
        let value = self.get(key)?;
        let empty = value.is_empty().then_some(value);
        Some(empty.into_iter().chain(value.chunks(chunk_size)))
    }

    /// Check that a put of `value_len` bytes under `key` is within limits,
    /// without writing anything.
    pub fn check_put(&self, key: &[u8], value_len: usize) -> BackendResult<()> {
        self.check_key(key)?;
        self.check_value_len(value_len)
    }

    fn write(&mut self, key: Vec<u8>, value: Vec<u8>) {
        match &mut self.pending {
            Some(pending) => pending.put(key, value),
            None => {
                self.records.insert(key, value);
            }
        }
    }

    fn check_key(&self, key: &[u8]) -> BackendResult<()> {
        if key.len() > MAX_KEY_LEN {
            return Err(StatusCode::LIMIT);
        }
        Ok(())
    }

    fn check_value_len(&self, len: usize) -> BackendResult<()> {
        if len as u64 > self.max_value_size {
            return Err(StatusCode::LIMIT);
        }
        Ok(())
    }
}
