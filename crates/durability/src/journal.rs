//! Append-only commit journal
//!
//! One journal file backs one store. Opening it:
//!
//! 1. takes an advisory lock (exclusive for writers, shared for readers),
//! 2. validates the header, writing one if the file is new,
//! 3. replays every complete record through the caller's `apply` callback.
//!
//! Replay stops at the first incomplete or checksum-failing record. Such a
//! tail is the remains of a commit that never finished, so it is dropped
//! (and truncated away on writable opens).
//!
//! # Commit failure outcome
//!
//! If writing a record fails, the journal truncates the partial bytes back
//! off (best effort) and the caller must treat the transaction as not
//! committed. If the write lands but the following fsync fails, the record
//! is on disk and the transaction may reappear on the next open.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tessera_storage::WriteSet;
use tracing::{debug, info, warn};

use crate::encoding::{
    decode_commit, encode_commit, encode_header, validate_header, Decoded, JOURNAL_HEADER_SIZE,
};
use crate::error::JournalError;
use crate::mode::DurabilityMode;

/// How to open a journal
#[derive(Debug, Clone, Copy, Default)]
pub struct JournalOptions {
    /// Open for reading only, under a shared lock
    pub read_only: bool,
    /// fsync policy for commit records
    pub durability: DurabilityMode,
}

/// Statistics from replaying a journal on open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecoveryStats {
    /// Complete records replayed
    pub records_replayed: u64,
    /// Put mutations applied
    pub puts_applied: u64,
    /// Delete mutations applied
    pub deletes_applied: u64,
    /// Bytes of incomplete or corrupt tail that were dropped
    pub truncated_bytes: u64,
    /// Highest transaction id seen (0 if none)
    pub last_txn_id: u64,
}

/// An open, locked commit journal
#[derive(Debug)]
pub struct Journal {
    file: File,
    path: PathBuf,
    options: JournalOptions,
    /// Byte length of the valid journal prefix
    len: u64,
    next_txn_id: u64,
    /// Commits written since the last fsync
    unsynced: usize,
}

impl Journal {
    /// Open (or create) the journal at `path` and replay it.
    ///
    /// `apply` receives each committed write set in commit order.
    ///
    /// # Errors
    ///
    /// - [`JournalError::Locked`] if another handle holds a conflicting lock
    /// - [`JournalError::Corrupted`] if the file header is invalid
    /// - [`JournalError::Io`] for filesystem failures, including a missing
    ///   file on a read-only open
    pub fn open<F>(
        path: &Path,
        options: JournalOptions,
        mut apply: F,
    ) -> Result<(Self, RecoveryStats), JournalError>
    where
        F: FnMut(WriteSet),
    {
        let mut file = if options.read_only {
            OpenOptions::new().read(true).open(path)?
        } else {
            OpenOptions::new()
                .read(true)
                .write(true)
                .create(true)
                .truncate(false)
                .open(path)?
        };

        let locked = if options.read_only {
            FileExt::try_lock_shared(&file)
        } else {
            FileExt::try_lock_exclusive(&file)
        };
        locked.map_err(lock_error)?;

        let mut buf = Vec::new();
        file.read_to_end(&mut buf)?;

        let mut stats = RecoveryStats::default();

        // A crash while creating the file can leave part of the header behind.
        let header = encode_header();
        if buf.len() < JOURNAL_HEADER_SIZE && header.starts_with(&buf) {
            if !buf.is_empty() {
                warn!(
                    target: "tessera::journal",
                    path = %path.display(),
                    bytes = buf.len(),
                    "Incomplete journal header, starting empty"
                );
                stats.truncated_bytes = buf.len() as u64;
            }
            if !options.read_only {
                file.set_len(0)?;
                file.seek(SeekFrom::Start(0))?;
                file.write_all(&header)?;
                file.sync_all()?;
                debug!(target: "tessera::journal", path = %path.display(), "Created journal");
            }
            let len = if options.read_only {
                0
            } else {
                JOURNAL_HEADER_SIZE as u64
            };
            return Ok((Self::from_parts(file, path, options, len, 1), stats));
        }

        validate_header(&buf)?;

        let mut offset = JOURNAL_HEADER_SIZE;
        while offset < buf.len() {
            match decode_commit(&buf[offset..]) {
                Decoded::Record(record, consumed) => {
                    let (puts, deletes) = record.write_set.counts();
                    stats.records_replayed += 1;
                    stats.puts_applied += puts as u64;
                    stats.deletes_applied += deletes as u64;
                    stats.last_txn_id = stats.last_txn_id.max(record.txn_id);
                    apply(record.write_set);
                    offset += consumed;
                }
                Decoded::Incomplete => {
                    warn!(
                        target: "tessera::journal",
                        offset,
                        "Incomplete record at journal tail, discarding"
                    );
                    break;
                }
                Decoded::Corrupt(reason) => {
                    warn!(
                        target: "tessera::journal",
                        offset,
                        reason = %reason,
                        "Corrupt record in journal, discarding it and everything after"
                    );
                    break;
                }
            }
        }

        stats.truncated_bytes = (buf.len() - offset) as u64;
        if stats.truncated_bytes > 0 && !options.read_only {
            file.set_len(offset as u64)?;
            file.sync_all()?;
        }
        file.seek(SeekFrom::Start(offset as u64))?;

        info!(
            target: "tessera::journal",
            path = %path.display(),
            records_replayed = stats.records_replayed,
            puts_applied = stats.puts_applied,
            deletes_applied = stats.deletes_applied,
            truncated_bytes = stats.truncated_bytes,
            "Recovery complete"
        );

        let next_txn_id = stats.last_txn_id + 1;
        Ok((
            Self::from_parts(file, path, options, offset as u64, next_txn_id),
            stats,
        ))
    }

    fn from_parts(
        file: File,
        path: &Path,
        options: JournalOptions,
        len: u64,
        next_txn_id: u64,
    ) -> Self {
        Self {
            file,
            path: path.to_path_buf(),
            options,
            len,
            next_txn_id,
            unsynced: 0,
        }
    }

    /// Path of the journal file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True if opened read-only.
    pub fn is_read_only(&self) -> bool {
        self.options.read_only
    }

    /// Length of the valid journal in bytes.
    pub fn len(&self) -> u64 {
        self.len
    }

    /// True if the journal holds no header (an empty read-only file).
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Transaction id the next commit will receive.
    pub fn next_txn_id(&self) -> u64 {
        self.next_txn_id
    }

    /// Append one commit record and return its transaction id.
    ///
    /// See the module docs for the outcome when this fails.
    pub fn append(&mut self, write_set: &WriteSet) -> Result<u64, JournalError> {
        if self.options.read_only {
            return Err(JournalError::ReadOnly);
        }

        let txn_id = self.next_txn_id;
        let record = encode_commit(txn_id, write_set)?;

        if let Err(e) = self.file.write_all(&record) {
            self.discard_partial();
            return Err(e.into());
        }
        self.len += record.len() as u64;
        self.next_txn_id += 1;
        self.unsynced += 1;

        if self.options.durability.should_sync(self.unsynced) {
            self.sync()?;
        }
        Ok(txn_id)
    }

    /// fsync any commits written since the last sync.
    pub fn sync(&mut self) -> Result<(), JournalError> {
        if self.unsynced > 0 {
            self.file.sync_data()?;
            self.unsynced = 0;
        }
        Ok(())
    }

    /// Sync outstanding commits and release the lock.
    pub fn close(mut self) -> Result<(), JournalError> {
        if !self.options.read_only {
            self.sync()?;
        }
        FileExt::unlock(&self.file)?;
        Ok(())
    }

    fn discard_partial(&mut self) {
        if self.file.set_len(self.len).is_err() {
            warn!(
                target: "tessera::journal",
                path = %self.path.display(),
                "Failed to truncate partial commit record"
            );
        }
        let _ = self.file.seek(SeekFrom::Start(self.len));
    }
}

impl Drop for Journal {
    fn drop(&mut self) {
        if !self.options.read_only && self.unsynced > 0 && self.file.sync_data().is_err() {
            warn!(
                target: "tessera::journal",
                path = %self.path.display(),
                "Failed to sync journal on drop"
            );
        }
    }
}

fn lock_error(e: io::Error) -> JournalError {
    if e.kind() == io::ErrorKind::WouldBlock
        || e.raw_os_error() == fs2::lock_contended_error().raw_os_error()
    {
        JournalError::Locked
    } else {
        JournalError::Io(e)
    }
}
