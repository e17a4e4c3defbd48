//! Error taxonomy for Tessera
//!
//! Every fallible operation reports exactly one [`Error`] variant. The first
//! ten variants mirror the failure modes a storage backend can signal; raw
//! backend status codes are always translated through
//! [`Error::from_status`] and never reach a caller.
//!
//! The two transaction variants are state conflicts detected before the
//! backend is consulted (see `TransactionController`).

use crate::status::StatusCode;
use thiserror::Error;

/// Result type alias for Tessera operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error kinds reported by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum Error {
    /// The store was opened read-only and a mutation was attempted
    #[error("read-only database")]
    ReadOnly,

    /// Another thread or process holds an exclusive lock on the database
    #[error("another thread or process has an exclusive lock on the database")]
    Busy,

    /// Input/output failure in the backend
    #[error("input/output error")]
    Io,

    /// Allocation failure
    #[error("out of memory")]
    OutOfMemory,

    /// The handle or an in-flight stream was released underneath the call
    #[error("operation aborted: the database handle was released")]
    Abort,

    /// The backend lacks an optional capability
    #[error("operation not implemented by the storage backend")]
    NotImplemented,

    /// Filesystem or access permission failure
    #[error("permission error")]
    Permission,

    /// A key, value, array, or journal record limit was reached
    #[error("journal or record limit reached")]
    Limit,

    /// Key or record is absent
    #[error("nonexistent record")]
    NotFound,

    /// Backend status code with no taxonomy mapping
    #[error("unknown error")]
    Unknown,

    /// `begin` was called while a transaction is already active
    #[error("transaction already active")]
    TransactionAlreadyActive,

    /// `commit` or `rollback` was called with no active transaction
    #[error("no active transaction")]
    TransactionNotActive,
}

impl Error {
    /// Map a backend status code onto the taxonomy.
    ///
    /// Codes without a dedicated variant map to [`Error::Unknown`]. A
    /// backend that fails a call with [`StatusCode::OK`] is itself reporting
    /// an unmapped code, so that maps to `Unknown` too.
    pub fn from_status(code: StatusCode) -> Self {
        match code {
            StatusCode::READ_ONLY => Error::ReadOnly,
            StatusCode::BUSY => Error::Busy,
            StatusCode::IOERR => Error::Io,
            StatusCode::NOMEM => Error::OutOfMemory,
            StatusCode::ABORT => Error::Abort,
            StatusCode::NOTIMPLEMENTED => Error::NotImplemented,
            StatusCode::PERM => Error::Permission,
            StatusCode::LIMIT => Error::Limit,
            StatusCode::NOTFOUND => Error::NotFound,
            _ => Error::Unknown,
        }
    }

    /// Canonical backend status code for this error.
    ///
    /// Returns `None` for the transaction state conflicts, which never
    /// originate in a backend.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::ReadOnly => Some(StatusCode::READ_ONLY),
            Error::Busy => Some(StatusCode::BUSY),
            Error::Io => Some(StatusCode::IOERR),
            Error::OutOfMemory => Some(StatusCode::NOMEM),
            Error::Abort => Some(StatusCode::ABORT),
            Error::NotImplemented => Some(StatusCode::NOTIMPLEMENTED),
            Error::Permission => Some(StatusCode::PERM),
            Error::Limit => Some(StatusCode::LIMIT),
            Error::NotFound => Some(StatusCode::NOTFOUND),
            Error::Unknown => Some(StatusCode::UNKNOWN),
            Error::TransactionAlreadyActive | Error::TransactionNotActive => None,
        }
    }

    /// True for the transaction state-machine conflicts.
    pub fn is_state_conflict(&self) -> bool {
        matches!(
            self,
            Error::TransactionAlreadyActive | Error::TransactionNotActive
        )
    }

    /// True if retrying the same call later may succeed.
    ///
    /// Only lock contention qualifies; callers own the retry policy.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Busy)
    }
}

impl From<StatusCode> for Error {
    fn from(code: StatusCode) -> Self {
        Error::from_status(code)
    }
}
