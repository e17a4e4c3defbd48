//! Store API Tests
//!
//! End-to-end tests through the public `Store` handle:
//! - KV channel: store, append, delete, streaming fetch
//! - Command execution and the result slot
//! - Transaction state machine
//! - Value coercions on command results

mod common;

mod commands;
mod kv_channel;
mod transactions;
mod values;
