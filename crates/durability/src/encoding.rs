//! Commit record encoding and decoding
//!
//! This module provides encoding/decoding for journal records with CRC32
//! checksums for corruption detection.
//!
//! ## File Format
//!
//! ```text
//! [magic: "TSJ1"][format version: u32]   file header, 8 bytes
//! [record][record]...
//! ```
//!
//! ## Record Format
//!
//! ```text
//! [length: u32][type: u8][payload: bytes][crc32: u32]
//! ```
//!
//! - **length**: Total size of type + payload + crc (NOT including length itself)
//! - **type**: Record type tag (1 = Commit)
//! - **payload**: `[txn_id: u64][count: u32]` followed by `count` mutations,
//!   each `[op: u8][key_len: u32][key]` plus `[value_len: u32][value]` for puts
//! - **crc32**: CRC32 checksum over \[type\]\[payload\]
//!
//! All integers are little-endian.

use std::io::{Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use crc32fast::Hasher;
use tessera_storage::{Mutation, WriteSet};

use crate::error::JournalError;

/// Magic bytes at the start of every journal file
pub const JOURNAL_MAGIC: [u8; 4] = *b"TSJ1";

/// Journal format version for forward compatibility
pub const JOURNAL_FORMAT_VERSION: u32 = 1;

/// Size of the file header in bytes
pub const JOURNAL_HEADER_SIZE: usize = 8;

/// Largest encoded record accepted (1 GiB)
pub const MAX_RECORD_LEN: usize = 1 << 30;

/// Record type tag for a committed transaction
const TYPE_COMMIT: u8 = 1;

const OP_PUT: u8 = 1;
const OP_DELETE: u8 = 2;

/// Minimum record body: type(1) + txn_id(8) + count(4) + crc(4)
const MIN_BODY_LEN: usize = 1 + 8 + 4 + 4;

/// One decoded commit record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    /// Monotonic transaction id assigned at commit
    pub txn_id: u64,
    /// The mutations the transaction applied
    pub write_set: WriteSet,
}

/// Outcome of decoding at one offset
#[derive(Debug)]
pub enum Decoded {
    /// A complete, checksum-valid record and the bytes it occupied
    Record(CommitRecord, usize),
    /// The buffer ends mid-record (torn write)
    Incomplete,
    /// The bytes are present but invalid
    Corrupt(String),
}

/// Encode the file header.
pub fn encode_header() -> [u8; JOURNAL_HEADER_SIZE] {
    let mut header = [0u8; JOURNAL_HEADER_SIZE];
    header[0..4].copy_from_slice(&JOURNAL_MAGIC);
    header[4..8].copy_from_slice(&JOURNAL_FORMAT_VERSION.to_le_bytes());
    header
}

/// Validate a file header.
pub fn validate_header(buf: &[u8]) -> Result<(), JournalError> {
    if buf.len() < JOURNAL_HEADER_SIZE {
        return Err(JournalError::Corrupted {
            offset: 0,
            reason: format!("header truncated to {} bytes", buf.len()),
        });
    }
    if buf[0..4] != JOURNAL_MAGIC {
        return Err(JournalError::Corrupted {
            offset: 0,
            reason: "not a journal file (bad magic)".to_string(),
        });
    }
    let version = u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
    if version > JOURNAL_FORMAT_VERSION {
        return Err(JournalError::Corrupted {
            offset: 4,
            reason: format!(
                "unsupported format version {} (max {})",
                version, JOURNAL_FORMAT_VERSION
            ),
        });
    }
    Ok(())
}

/// Encode a commit record.
///
/// Fails with [`JournalError::RecordTooLarge`] above [`MAX_RECORD_LEN`].
pub fn encode_commit(txn_id: u64, write_set: &WriteSet) -> Result<Vec<u8>, JournalError> {
    let mut payload = Vec::new();
    payload.write_u64::<LittleEndian>(txn_id)?;
    payload.write_u32::<LittleEndian>(len_u32(write_set.len())?)?;
    for (key, mutation) in write_set.iter() {
        match mutation {
            Mutation::Put(value) => {
                payload.push(OP_PUT);
                write_bytes(&mut payload, key)?;
                write_bytes(&mut payload, value)?;
            }
            Mutation::Delete => {
                payload.push(OP_DELETE);
                write_bytes(&mut payload, key)?;
            }
        }
    }

    // type(1) + payload + crc(4)
    let total_len = 1 + payload.len() + 4;
    if 4 + total_len > MAX_RECORD_LEN {
        return Err(JournalError::RecordTooLarge {
            size: 4 + total_len,
            max: MAX_RECORD_LEN,
        });
    }

    let mut hasher = Hasher::new();
    hasher.update(&[TYPE_COMMIT]);
    hasher.update(&payload);
    let crc = hasher.finalize();

    let mut buf = Vec::with_capacity(4 + total_len);
    buf.write_u32::<LittleEndian>(total_len as u32)?;
    buf.push(TYPE_COMMIT);
    buf.extend_from_slice(&payload);
    buf.write_u32::<LittleEndian>(crc)?;
    Ok(buf)
}

/// Decode the record starting at the beginning of `buf`.
pub fn decode_commit(buf: &[u8]) -> Decoded {
    if buf.len() < 4 {
        return Decoded::Incomplete;
    }
    let total_len = u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]) as usize;

    // Validate minimum length before arithmetic (prevent underflow)
    if total_len < MIN_BODY_LEN {
        return Decoded::Corrupt(format!(
            "invalid record length {} (minimum is {})",
            total_len, MIN_BODY_LEN
        ));
    }
    if total_len + 4 > MAX_RECORD_LEN {
        return Decoded::Corrupt(format!("record length {} exceeds limit", total_len));
    }
    if buf.len() < 4 + total_len {
        return Decoded::Incomplete;
    }

    let body = &buf[4..4 + total_len];
    let (covered, crc_bytes) = body.split_at(total_len - 4);
    let expected_crc = u32::from_le_bytes([crc_bytes[0], crc_bytes[1], crc_bytes[2], crc_bytes[3]]);
    let actual_crc = crc32fast::hash(covered);
    if actual_crc != expected_crc {
        return Decoded::Corrupt(format!(
            "CRC mismatch: expected {:08x}, got {:08x}",
            expected_crc, actual_crc
        ));
    }

    if covered[0] != TYPE_COMMIT {
        return Decoded::Corrupt(format!("unknown record type {}", covered[0]));
    }

    match decode_payload(&covered[1..]) {
        Ok(record) => Decoded::Record(record, 4 + total_len),
        Err(reason) => Decoded::Corrupt(reason),
    }
}

fn decode_payload(payload: &[u8]) -> Result<CommitRecord, String> {
    let mut cursor = Cursor::new(payload);
    let txn_id = cursor
        .read_u64::<LittleEndian>()
        .map_err(|_| "truncated transaction id".to_string())?;
    let count = cursor
        .read_u32::<LittleEndian>()
        .map_err(|_| "truncated mutation count".to_string())?;

    let mut write_set = WriteSet::new();
    for i in 0..count {
        let op = cursor
            .read_u8()
            .map_err(|_| format!("mutation {}: truncated op", i))?;
        let key = read_bytes(&mut cursor).map_err(|e| format!("mutation {}: key {}", i, e))?;
        match op {
            OP_PUT => {
                let value =
                    read_bytes(&mut cursor).map_err(|e| format!("mutation {}: value {}", i, e))?;
                write_set.put(key, value);
            }
            OP_DELETE => write_set.delete(key),
            other => return Err(format!("mutation {}: unknown op {}", i, other)),
        }
    }

    if cursor.position() as usize != payload.len() {
        return Err("trailing bytes after last mutation".to_string());
    }
    Ok(CommitRecord { txn_id, write_set })
}

fn len_u32(len: usize) -> Result<u32, JournalError> {
    u32::try_from(len).map_err(|_| JournalError::RecordTooLarge {
        size: len,
        max: MAX_RECORD_LEN,
    })
}

fn write_bytes(buf: &mut Vec<u8>, bytes: &[u8]) -> Result<(), JournalError> {
    buf.write_u32::<LittleEndian>(len_u32(bytes.len())?)?;
    buf.extend_from_slice(bytes);
    Ok(())
}

fn read_bytes(cursor: &mut Cursor<&[u8]>) -> Result<Vec<u8>, String> {
    let len = cursor
        .read_u32::<LittleEndian>()
        .map_err(|_| "truncated length".to_string())? as usize;
    let remaining = cursor.get_ref().len() - cursor.position() as usize;
    if len > remaining {
        return Err(format!("length {} overruns record", len));
    }
    let mut bytes = vec![0u8; len];
    cursor
        .read_exact(&mut bytes)
        .map_err(|_| "truncated bytes".to_string())?;
    Ok(bytes)
}
