//! Storage layer for Tessera
//!
//! This crate implements the in-memory record table behind every store:
//! - Keyspace: BTreeMap of committed records plus an optional write buffer
//! - WriteSet: the buffered mutations of one transaction, applied atomically
//!
//! Persistence is not handled here. A backend takes the write set out of the
//! keyspace, journals it, and only then applies it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod keyspace;
pub mod write_set;

pub use keyspace::Keyspace;
pub use write_set::{Mutation, WriteSet};
