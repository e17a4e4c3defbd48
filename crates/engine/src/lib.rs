//! Storage engine for Tessera
//!
//! This crate puts the lower layers together:
//! - [`EmbeddedBackend`]: keyspace + command executor + commit journal
//! - [`Store`]: the public handle, composing the transaction controller,
//!   the command result slot and the KV channel over one backend
//! - Configuration: [`StoreConfig`] (TOML) and [`OpenOptions`]
//!
//! Everything a user needs is re-exported here.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod config;
pub mod exec;
pub mod info;
pub mod kv;
pub mod store;

pub use backend::{EmbeddedBackend, MEMORY_TARGET};
pub use config::{AccessMode, ConfigError, OpenOptions, StoreConfig, DEFAULT_FETCH_CHUNK_SIZE};
pub use exec::CommandExecutor;
pub use info::{copyright, identity, signature, version};
pub use kv::{KvChannel, KvStats};
pub use store::Store;

pub use tessera_concurrency::{TransactionState, TransactionStats};
pub use tessera_core::{
    ArrayValue, BackendResult, Error, FetchSink, Result, StatusCode, StorageBackend, Value,
    MAX_ARRAY_LEN, MAX_KEY_LEN,
};
pub use tessera_durability::{DurabilityMode, RecoveryStats};
