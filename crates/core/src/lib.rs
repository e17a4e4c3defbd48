//! Core types and traits for Tessera
//!
//! This crate defines the foundational types used throughout the system:
//! - Error: the closed error taxonomy every public operation reports
//! - StatusCode: raw backend status codes and their mapping onto Error
//! - Value / ArrayValue: dynamically typed command results
//! - StorageBackend: the capability a Store drives
//! - Limits: key, value, and array size bounds

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod array;
pub mod error;
pub mod limits;
pub mod status;
pub mod traits;
pub mod value;

pub use array::ArrayValue;
pub use error::{Error, Result};
pub use limits::{MAX_ARRAY_LEN, MAX_KEY_LEN};
pub use status::{BackendResult, StatusCode};
pub use traits::{FetchSink, StorageBackend};
pub use value::Value;
