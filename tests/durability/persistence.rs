//! Persistence Tests
//!
//! What a store holds after it is closed and opened again.

use crate::common::*;
use tessera::Error;

#[test]
fn kv_writes_survive_reopen() {
    let ts = TestStore::new();
    {
        let mut store = ts.open();
        store.store(b"a", b"1").unwrap();
        store.store(b"b", b"2").unwrap();
        store.append(b"a", b"1").unwrap();
        store.delete(b"b").unwrap();
        store.close().unwrap();
    }
    let mut store = ts.open();
    assert_eq!(store.fetch_all(b"a").unwrap(), b"11");
    assert_eq!(store.fetch_all(b"b"), Err(Error::NotFound));
}

#[test]
fn command_writes_survive_reopen() {
    let ts = TestStore::new();
    {
        let mut store = ts.open_always();
        store.exec("SET x 123; INCR x").unwrap();
    }
    let mut store = ts.open();
    assert_eq!(store.exec_result("GET x").unwrap().to_int(), 124);
}

#[test]
fn committed_transaction_survives_reopen() {
    let ts = TestStore::new();
    {
        let mut store = ts.open();
        store.begin().unwrap();
        store.store(b"k1", b"v1").unwrap();
        store.store(b"k2", b"v2").unwrap();
        store.commit().unwrap();
    }
    let mut store = ts.open();
    assert_eq!(store.fetch_all(b"k1").unwrap(), b"v1");
    assert_eq!(store.fetch_all(b"k2").unwrap(), b"v2");
}

#[test]
fn rolled_back_transaction_leaves_no_trace() {
    let ts = TestStore::new();
    {
        let mut store = ts.open();
        store.begin().unwrap();
        store.store(b"k", b"v").unwrap();
        store.rollback().unwrap();
    }
    let mut store = ts.open();
    assert_eq!(store.fetch_all(b"k"), Err(Error::NotFound));
    assert_eq!(store.backend().recovery_stats().unwrap().records_replayed, 0);
}

#[test]
fn open_transaction_is_rolled_back_on_drop() {
    let ts = TestStore::new();
    {
        let mut store = ts.open();
        store.store(b"kept", b"1").unwrap();
        store.begin().unwrap();
        store.store(b"dropped", b"2").unwrap();
        // dropped without commit
    }
    let mut store = ts.open();
    assert_eq!(store.fetch_all(b"kept").unwrap(), b"1");
    assert_eq!(store.fetch_all(b"dropped"), Err(Error::NotFound));
}

#[test]
fn each_commit_is_one_journal_record() {
    let ts = TestStore::new();
    {
        let mut store = ts.open();
        store.store(b"a", b"1").unwrap();
        store.begin().unwrap();
        for i in 0..10u8 {
            store.store(&[i], b"x").unwrap();
        }
        store.commit().unwrap();
        store.exec("MSET p 1 q 2").unwrap();
        // reads write nothing
        store.exec("GET a").unwrap();
        store.fetch_all(b"a").unwrap();
    }
    let store = ts.open();
    let stats = store.backend().recovery_stats().unwrap();
    assert_eq!(stats.records_replayed, 3);
    assert_eq!(stats.puts_applied, 13);
    assert_eq!(store.backend().record_count(), 13);
}

#[test]
fn large_value_survives_reopen() {
    let ts = TestStore::new();
    let value: Vec<u8> = (0..200_000u32).map(|i| (i % 251) as u8).collect();
    {
        let mut store = ts.open();
        store.store(b"big", &value).unwrap();
    }
    let mut store = ts.open();
    assert_eq!(store.fetch_all(b"big").unwrap(), value);
}
