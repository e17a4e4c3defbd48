//! Durability layer for Tessera
//!
//! File-backed stores keep a single append-only commit journal:
//! - encoding: CRC32-framed records, one per committed transaction
//! - journal: file locking, recovery on open, appending commit records
//! - mode: when the journal is fsynced
//!
//! There is no separate data file. Opening a store replays the journal into
//! a fresh keyspace.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod encoding;
pub mod error;
pub mod journal;
pub mod mode;

pub use error::JournalError;
pub use journal::{Journal, JournalOptions, RecoveryStats};
pub use mode::DurabilityMode;
