//! Durability Tests
//!
//! File-backed stores: persistence across reopen, journal recovery,
//! file locking and read-only access.

mod common;

mod locking;
mod persistence;
mod recovery;
