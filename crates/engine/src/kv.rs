//! Direct key/value operations
//!
//! These bypass the command language. Keys and values are opaque bytes.

use std::ops::ControlFlow;

use tessera_core::{Error, Result, StorageBackend};
use tracing::debug;

/// Counters for the KV path
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KvStats {
    /// Successful stores
    pub stores: u64,
    /// Successful appends
    pub appends: u64,
    /// Successful deletes
    pub deletes: u64,
    /// Completed fetches
    pub fetches: u64,
    /// Bytes delivered to fetch sinks
    pub bytes_fetched: u64,
}

/// Store/append/delete/fetch over a backend
#[derive(Debug, Default)]
pub struct KvChannel {
    stats: KvStats,
}

impl KvChannel {
    /// Create a channel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counters so far.
    pub fn stats(&self) -> KvStats {
        self.stats
    }

    /// Insert or overwrite `key`.
    pub fn store<B: StorageBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        key: &[u8],
        value: &[u8],
    ) -> Result<()> {
        backend.kv_store(key, value).map_err(Error::from_status)?;
        self.stats.stores += 1;
        Ok(())
    }

    /// Append to `key`, creating it when absent.
    pub fn append<B: StorageBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        key: &[u8],
        value: &[u8],
    ) -> Result<()> {
        backend.kv_append(key, value).map_err(Error::from_status)?;
        self.stats.appends += 1;
        Ok(())
    }

    /// Remove `key`. Fails with `NotFound` when absent.
    pub fn delete<B: StorageBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        key: &[u8],
    ) -> Result<()> {
        backend.kv_delete(key).map_err(Error::from_status)?;
        self.stats.deletes += 1;
        Ok(())
    }

    /// Stream the value under `key` to `sink`, which may stop the stream
    /// with `ControlFlow::Break`. A stopped stream fails with `Abort`.
    ///
    /// The sink runs on the calling thread inside the backend call and may
    /// be invoked any number of times, including once with an empty chunk.
    pub fn fetch_with<B, F>(&mut self, backend: &mut B, key: &[u8], mut sink: F) -> Result<()>
    where
        B: StorageBackend + ?Sized,
        F: FnMut(&[u8]) -> ControlFlow<()>,
    {
        let mut delivered = 0u64;
        let outcome = backend.kv_fetch(key, &mut |chunk: &[u8]| {
            delivered += chunk.len() as u64;
            sink(chunk)
        });
        self.stats.bytes_fetched += delivered;
        outcome.map_err(Error::from_status)?;
        self.stats.fetches += 1;
        debug!(target: "tessera::kv", bytes = delivered, "fetch complete");
        Ok(())
    }

    /// Stream the value under `key` to `sink` until the end.
    pub fn fetch<B, F>(&mut self, backend: &mut B, key: &[u8], mut sink: F) -> Result<()>
    where
        B: StorageBackend + ?Sized,
        F: FnMut(&[u8]),
    {
        self.fetch_with(backend, key, |chunk| {
            sink(chunk);
            ControlFlow::Continue(())
        })
    }

    /// Fetch the whole value into one buffer.
    pub fn fetch_all<B: StorageBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        key: &[u8],
    ) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.fetch(backend, key, |chunk| out.extend_from_slice(chunk))?;
        Ok(out)
    }
}
