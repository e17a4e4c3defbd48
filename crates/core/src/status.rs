//! Raw backend status codes
//!
//! Backends report failures as [`StatusCode`]s. The code space is open: a
//! backend may return values this crate does not name, which is why the
//! mapping onto [`Error`](crate::Error) has an `Unknown` fallback.

use std::fmt;

/// Result type returned by [`StorageBackend`](crate::StorageBackend) methods
pub type BackendResult<T> = std::result::Result<T, StatusCode>;

/// A backend status code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StatusCode(i32);

impl StatusCode {
    /// Success
    pub const OK: StatusCode = StatusCode(0);
    /// Out of memory
    pub const NOMEM: StatusCode = StatusCode(-1);
    /// I/O error
    pub const IOERR: StatusCode = StatusCode(-2);
    /// Empty result or empty input where one is required
    pub const EMPTY: StatusCode = StatusCode(-3);
    /// Record not found
    pub const NOTFOUND: StatusCode = StatusCode(-6);
    /// Record or journal limit reached
    pub const LIMIT: StatusCode = StatusCode(-7);
    /// Invalid parameter
    pub const INVALID: StatusCode = StatusCode(-9);
    /// Operation aborted
    pub const ABORT: StatusCode = StatusCode(-10);
    /// Unknown failure
    pub const UNKNOWN: StatusCode = StatusCode(-13);
    /// Lock held elsewhere
    pub const BUSY: StatusCode = StatusCode(-14);
    /// Optional capability missing
    pub const NOTIMPLEMENTED: StatusCode = StatusCode(-17);
    /// Permission denied
    pub const PERM: StatusCode = StatusCode(-19);
    /// Corrupted data or journal
    pub const CORRUPT: StatusCode = StatusCode(-24);
    /// Write attempted on a read-only handle
    pub const READ_ONLY: StatusCode = StatusCode(-75);

    /// Wrap a raw code.
    pub const fn new(code: i32) -> Self {
        StatusCode(code)
    }

    /// The raw integer code.
    pub const fn code(self) -> i32 {
        self.0
    }

    /// True for [`StatusCode::OK`].
    pub const fn is_ok(self) -> bool {
        self.0 == 0
    }

    /// Convert into a `Result`, treating anything other than `OK` as failure.
    pub fn into_result(self) -> BackendResult<()> {
        if self.is_ok() {
            Ok(())
        } else {
            Err(self)
        }
    }

    fn name(self) -> Option<&'static str> {
        Some(match self {
            StatusCode::OK => "OK",
            StatusCode::NOMEM => "NOMEM",
            StatusCode::IOERR => "IOERR",
            StatusCode::EMPTY => "EMPTY",
            StatusCode::NOTFOUND => "NOTFOUND",
            StatusCode::LIMIT => "LIMIT",
            StatusCode::INVALID => "INVALID",
            StatusCode::ABORT => "ABORT",
            StatusCode::UNKNOWN => "UNKNOWN",
            StatusCode::BUSY => "BUSY",
            StatusCode::NOTIMPLEMENTED => "NOTIMPLEMENTED",
            StatusCode::PERM => "PERM",
            StatusCode::CORRUPT => "CORRUPT",
            StatusCode::READ_ONLY => "READ_ONLY",
            _ => return None,
        })
    }
}

impl From<i32> for StatusCode {
    fn from(code: i32) -> Self {
        StatusCode(code)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} ({})", name, self.0),
            None => write!(f, "status {}", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_result() {
        assert!(StatusCode::OK.into_result().is_ok());
        assert_eq!(StatusCode::BUSY.into_result(), Err(StatusCode::BUSY));
    }

    #[test]
    fn test_display() {
        assert_eq!(StatusCode::NOTFOUND.to_string(), "NOTFOUND (-6)");
        assert_eq!(StatusCode::CORRUPT.to_string(), "CORRUPT (-24)");
        assert_eq!(StatusCode::new(-500).to_string(), "status -500");
    }
}
