//! Tessera - an embeddable, transactional key-value store
//!
//! A [`Store`] offers two ways into one data set: direct key/value
//! operations and a small command language whose results come back as
//! dynamically typed [`Value`]s.
//!
//! # Quick Start
//!
//! ```
//! use tessera::Store;
//!
//! let mut store = Store::open_memory()?;
//!
//! store.begin()?;
//! store.store(b"user:1", b"Alice")?;
//! store.commit()?;
//!
//! assert_eq!(store.fetch_all(b"user:1")?, b"Alice");
//! assert!(store.exec_result("EXISTS user:1")?.to_bool());
//! # Ok::<(), tessera::Error>(())
//! ```
//!
//! File-backed stores take a path instead of `":mem:"`; commits are written
//! to a journal at that path and replayed when it is opened again.

// Re-export the public API from tessera-engine
pub use tessera_engine::*;
