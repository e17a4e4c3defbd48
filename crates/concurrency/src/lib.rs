//! Transaction layer for Tessera
//!
//! A store runs at most one transaction at a time. This crate holds the
//! Idle/Active state machine that decides which backend transaction hooks
//! may be called, and turns backend status codes into [`tessera_core::Error`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod controller;

pub use controller::{TransactionController, TransactionState, TransactionStats};
