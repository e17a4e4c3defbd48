//! Recovery Tests
//!
//! A journal with a damaged tail opens with everything before the damage.

use std::fs::OpenOptions;
use std::io::Write;

use crate::common::*;
use tessera::Error;

fn append_raw(ts: &TestStore, bytes: &[u8]) {
    let mut file = OpenOptions::new().append(true).open(ts.path()).unwrap();
    file.write_all(bytes).unwrap();
}

#[test]
fn torn_tail_is_discarded_and_truncated() {
    let ts = TestStore::new();
    {
        let mut store = ts.open();
        store.store(b"good", b"1").unwrap();
    }
    let clean_len = std::fs::metadata(ts.path()).unwrap().len();

    // A record header promising 64 bytes, followed by only 3
    append_raw(&ts, &[64, 0, 0, 0, 1, 9, 9]);

    {
        let mut store = ts.open();
        let stats = store.backend().recovery_stats().unwrap();
        assert_eq!(stats.records_replayed, 1);
        assert_eq!(stats.truncated_bytes, 7);
        assert_eq!(store.fetch_all(b"good").unwrap(), b"1");
    }
    assert_eq!(std::fs::metadata(ts.path()).unwrap().len(), clean_len);
}

#[test]
fn writes_after_recovery_are_kept() {
    let ts = TestStore::new();
    {
        let mut store = ts.open();
        store.store(b"a", b"1").unwrap();
    }
    append_raw(&ts, &[200, 1, 0, 0, 1]);
    {
        let mut store = ts.open();
        store.store(b"b", b"2").unwrap();
    }
    let mut store = ts.open();
    assert_eq!(store.backend().recovery_stats().unwrap().truncated_bytes, 0);
    assert_eq!(store.fetch_all(b"a").unwrap(), b"1");
    assert_eq!(store.fetch_all(b"b").unwrap(), b"2");
}

#[test]
fn read_only_open_ignores_tail_without_truncating() {
    let ts = TestStore::new();
    {
        let mut store = ts.open();
        store.store(b"a", b"1").unwrap();
    }
    append_raw(&ts, &[64, 0, 0]);
    let damaged_len = std::fs::metadata(ts.path()).unwrap().len();
    {
        let mut store = ts.open_read_only().unwrap();
        assert_eq!(store.fetch_all(b"a").unwrap(), b"1");
    }
    assert_eq!(std::fs::metadata(ts.path()).unwrap().len(), damaged_len);
}

#[test]
fn foreign_file_is_rejected() {
    let ts = TestStore::new();
    std::fs::write(ts.path(), b"this is not a tessera journal").unwrap();
    assert_eq!(tessera::Store::open(ts.target()).err(), Some(Error::Unknown));
}

#[test]
fn partial_header_opens_as_empty_store() {
    let ts = TestStore::new();
    std::fs::write(ts.path(), b"TSJ1").unwrap();
    {
        let mut store = ts.open();
        assert_eq!(store.backend().recovery_stats().unwrap().records_replayed, 0);
        store.store(b"k", b"v").unwrap();
    }
    let mut store = ts.open();
    assert_eq!(store.fetch_all(b"k").unwrap(), b"v");
}
