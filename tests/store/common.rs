//! Common test utilities for store tests

use tessera::{OpenOptions, Store};

/// Route `tracing` output to the test harness. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Fresh in-memory store
pub fn memory_store() -> Store {
    init_tracing();
    Store::open_memory().unwrap()
}

/// In-memory store whose fetches deliver `chunk` bytes at a time
pub fn chunked_store(chunk: usize) -> Store {
    init_tracing();
    Store::open_with_options(":mem:", OpenOptions::new().fetch_chunk_size(chunk)).unwrap()
}

/// Fetch `key` and return the individual chunks
#[allow(dead_code)]
pub fn fetch_chunks(store: &mut Store, key: &[u8]) -> tessera::Result<Vec<Vec<u8>>> {
    let mut chunks = Vec::new();
    store.fetch(key, |chunk| chunks.push(chunk.to_vec()))?;
    Ok(chunks)
}
