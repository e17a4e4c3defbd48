//! Error types for the commit journal

use std::io;

use tessera_core::StatusCode;
use thiserror::Error;

/// Failures opening, recovering, or appending to a journal
#[derive(Debug, Error)]
pub enum JournalError {
    /// Underlying file I/O failed
    #[error("journal I/O error: {0}")]
    Io(#[from] io::Error),

    /// Another handle holds a conflicting lock on the journal file
    #[error("journal is locked by another handle")]
    Locked,

    /// The file is not a journal, or its header is unreadable
    #[error("journal corrupted at offset {offset}: {reason}")]
    Corrupted {
        /// Byte offset of the bad data
        offset: u64,
        /// What was wrong
        reason: String,
    },

    /// A commit record would exceed the per-record size limit
    #[error("journal record of {size} bytes exceeds the {max} byte limit")]
    RecordTooLarge {
        /// Encoded record size
        size: usize,
        /// Limit
        max: usize,
    },

    /// Append attempted on a journal opened read-only
    #[error("journal is read-only")]
    ReadOnly,
}

impl JournalError {
    /// Backend status code for this failure.
    pub fn status(&self) -> StatusCode {
        match self {
            JournalError::Io(e) => io_status(e),
            JournalError::Locked => StatusCode::BUSY,
            JournalError::Corrupted { .. } => StatusCode::CORRUPT,
            JournalError::RecordTooLarge { .. } => StatusCode::LIMIT,
            JournalError::ReadOnly => StatusCode::READ_ONLY,
        }
    }
}

/// Map an I/O error onto a backend status code.
pub fn io_status(e: &io::Error) -> StatusCode {
    match e.kind() {
        io::ErrorKind::PermissionDenied => StatusCode::PERM,
        io::ErrorKind::OutOfMemory => StatusCode::NOMEM,
        io::ErrorKind::WouldBlock => StatusCode::BUSY,
        _ => StatusCode::IOERR,
    }
}
