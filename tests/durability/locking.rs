//! Locking Tests
//!
//! One writer per file; readers share.

use crate::common::*;
use tessera::Error;

#[test]
fn second_writer_gets_busy() {
    let ts = TestStore::new();
    let _first = ts.open();
    let second = tessera::Store::open(ts.target());
    assert_eq!(second.err(), Some(Error::Busy));
}

#[test]
fn lock_is_released_on_close() {
    let ts = TestStore::new();
    let first = ts.open();
    first.close().unwrap();
    let _second = ts.open();
}

#[test]
fn readers_share_and_block_writers() {
    let ts = TestStore::new();
    {
        let mut store = ts.open();
        store.store(b"k", b"v").unwrap();
    }
    let mut r1 = ts.open_read_only().unwrap();
    let mut r2 = ts.open_read_only().unwrap();
    assert_eq!(r1.fetch_all(b"k").unwrap(), b"v");
    assert_eq!(r2.fetch_all(b"k").unwrap(), b"v");
    assert_eq!(tessera::Store::open(ts.target()).err(), Some(Error::Busy));
}

#[test]
fn read_only_rejects_every_mutation() {
    let ts = TestStore::new();
    {
        let mut store = ts.open();
        store.store(b"k", b"v").unwrap();
    }
    let mut store = ts.open_read_only().unwrap();
    assert_eq!(store.store(b"k", b"w"), Err(Error::ReadOnly));
    assert_eq!(store.append(b"k", b"w"), Err(Error::ReadOnly));
    assert_eq!(store.delete(b"k"), Err(Error::ReadOnly));
    assert_eq!(store.exec("SET k w"), Err(Error::ReadOnly));
    assert_eq!(store.exec_result("GET k").unwrap().to_string(), "v");

    // transactions are allowed, they just cannot write
    store.begin().unwrap();
    assert_eq!(store.store(b"k", b"w"), Err(Error::ReadOnly));
    store.commit().unwrap();
    assert_eq!(store.fetch_all(b"k").unwrap(), b"v");
}

#[test]
fn read_only_open_of_missing_file_fails() {
    let ts = TestStore::new();
    assert_eq!(ts.open_read_only().err(), Some(Error::Io));
    assert!(!ts.path().exists());
}
