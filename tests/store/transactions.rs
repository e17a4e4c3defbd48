//! Transaction State Machine Tests
//!
//! Idle -> Active -> Idle through the public handle, including the
//! state-conflict errors.

use crate::common::*;
use tessera::{Error, TransactionState};

#[test]
fn store_starts_idle() {
    let store = memory_store();
    assert!(!store.in_transaction());
    assert_eq!(store.transaction_state(), TransactionState::Idle);
}

#[test]
fn rollback_makes_store_not_durable() {
    let mut store = memory_store();
    store.begin().unwrap();
    store.store(b"k", b"v").unwrap();
    store.rollback().unwrap();
    assert_eq!(store.fetch_all(b"k"), Err(Error::NotFound));
}

#[test]
fn commit_makes_store_visible() {
    let mut store = memory_store();
    store.begin().unwrap();
    store.store(b"k", b"v").unwrap();
    store.commit().unwrap();
    assert_eq!(store.fetch_all(b"k").unwrap(), b"v");
}

#[test]
fn reads_inside_transaction_see_own_writes() {
    let mut store = memory_store();
    store.store(b"k", b"old").unwrap();
    store.begin().unwrap();
    store.store(b"k", b"new").unwrap();
    assert_eq!(store.fetch_all(b"k").unwrap(), b"new");
    assert_eq!(store.exec_result("GET k").unwrap().to_string(), "new");
    store.rollback().unwrap();
    assert_eq!(store.fetch_all(b"k").unwrap(), b"old");
}

#[test]
fn rollback_undoes_delete_and_append() {
    let mut store = memory_store();
    store.store(b"a", b"1").unwrap();
    store.store(b"b", b"2").unwrap();
    store.begin().unwrap();
    store.delete(b"a").unwrap();
    store.append(b"b", b"3").unwrap();
    store.rollback().unwrap();
    assert_eq!(store.fetch_all(b"a").unwrap(), b"1");
    assert_eq!(store.fetch_all(b"b").unwrap(), b"2");
}

#[test]
fn commands_join_the_open_transaction() {
    let mut store = memory_store();
    store.begin().unwrap();
    store.exec("SET a 1; SET b 2").unwrap();
    store.rollback().unwrap();
    assert!(store.exec_result("EXISTS a").unwrap().is_bool());
    assert!(!store.exec_result("EXISTS a").unwrap().to_bool());
}

#[test]
fn begin_twice_is_rejected() {
    let mut store = memory_store();
    store.begin().unwrap();
    let err = store.begin().unwrap_err();
    assert_eq!(err, Error::TransactionAlreadyActive);
    assert!(err.is_state_conflict());
    assert!(store.in_transaction());
}

#[test]
fn commit_or_rollback_while_idle_is_rejected() {
    let mut store = memory_store();
    assert_eq!(store.commit(), Err(Error::TransactionNotActive));
    assert_eq!(store.rollback(), Err(Error::TransactionNotActive));
    assert!(!store.in_transaction());
}

#[test]
fn transaction_can_be_reused() {
    let mut store = memory_store();
    for i in 0..3u8 {
        store.begin().unwrap();
        store.store(&[i], &[i]).unwrap();
        store.commit().unwrap();
    }
    let stats = store.transaction_stats();
    assert_eq!(stats.begun, 3);
    assert_eq!(stats.committed, 3);
}

#[test]
fn failed_op_inside_transaction_keeps_it_open() {
    let mut store = memory_store();
    store.begin().unwrap();
    store.store(b"k", b"v").unwrap();
    assert_eq!(store.delete(b"ghost"), Err(Error::NotFound));
    assert!(store.in_transaction());
    store.commit().unwrap();
    assert_eq!(store.fetch_all(b"k").unwrap(), b"v");
}
