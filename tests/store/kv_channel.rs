//! KV Channel Tests
//!
//! Direct store/append/delete/fetch, bypassing the command language.

use crate::common::*;
use proptest::prelude::*;
use std::ops::ControlFlow;
use tessera::Error;

#[test]
fn store_then_fetch_round_trips() {
    let mut store = memory_store();
    store.store(b"k", b"value").unwrap();
    assert_eq!(store.fetch_all(b"k").unwrap(), b"value");
}

#[test]
fn store_overwrites() {
    let mut store = memory_store();
    store.store(b"k", b"first").unwrap();
    store.store(b"k", b"second").unwrap();
    assert_eq!(store.fetch_all(b"k").unwrap(), b"second");
}

#[test]
fn append_concatenates() {
    let mut store = memory_store();
    store.store(b"k", b"abc").unwrap();
    store.append(b"k", b"def").unwrap();
    assert_eq!(store.fetch_all(b"k").unwrap(), b"abcdef");
}

#[test]
fn append_to_absent_key_stores() {
    let mut store = memory_store();
    store.append(b"new", b"xyz").unwrap();
    assert_eq!(store.fetch_all(b"new").unwrap(), b"xyz");
}

#[test]
fn delete_then_fetch_is_not_found() {
    let mut store = memory_store();
    store.store(b"k", b"v").unwrap();
    store.delete(b"k").unwrap();
    assert_eq!(store.fetch_all(b"k"), Err(Error::NotFound));
}

#[test]
fn delete_absent_is_not_found() {
    let mut store = memory_store();
    assert_eq!(store.delete(b"ghost"), Err(Error::NotFound));
    assert!(!store.last_error().is_empty());
}

#[test]
fn fetch_absent_never_calls_sink() {
    let mut store = memory_store();
    let mut calls = 0;
    assert_eq!(store.fetch(b"ghost", |_| calls += 1), Err(Error::NotFound));
    assert_eq!(calls, 0);
}

#[test]
fn binary_keys_and_values_are_opaque() {
    let mut store = memory_store();
    let key = [0u8, 255, 10, 13];
    let value: Vec<u8> = (0..=255).collect();
    store.store(&key, &value).unwrap();
    assert_eq!(store.fetch_all(&key).unwrap(), value);
}

#[test]
fn empty_key_and_value() {
    let mut store = memory_store();
    store.store(b"", b"").unwrap();
    let chunks = fetch_chunks(&mut store, b"").unwrap();
    assert_eq!(chunks.concat(), b"");
}

#[test]
fn large_value_arrives_in_several_chunks() {
    let mut store = chunked_store(1024);
    let value = vec![7u8; 10_000];
    store.store(b"big", &value).unwrap();
    let chunks = fetch_chunks(&mut store, b"big").unwrap();
    assert!(chunks.len() > 1);
    assert!(chunks.iter().all(|c| c.len() <= 1024));
    assert_eq!(chunks.concat(), value);
}

#[test]
fn sink_break_aborts_fetch() {
    let mut store = chunked_store(4);
    store.store(b"k", b"0123456789").unwrap();
    let mut calls = 0;
    let result = store.fetch_with(b"k", |_| {
        calls += 1;
        if calls == 2 {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });
    assert_eq!(result, Err(Error::Abort));
    assert_eq!(calls, 2);
    // the value itself is untouched
    assert_eq!(store.fetch_all(b"k").unwrap(), b"0123456789");
}

#[test]
fn oversized_value_is_limit() {
    let mut store = tessera::Store::open_with_options(
        ":mem:",
        tessera::OpenOptions::new().max_value_size(8),
    )
    .unwrap();
    assert_eq!(store.store(b"k", b"123456789"), Err(Error::Limit));
    store.store(b"k", b"12345678").unwrap();
    assert_eq!(store.append(b"k", b"9"), Err(Error::Limit));
}

#[test]
fn oversized_key_is_limit() {
    let mut store = memory_store();
    let key = vec![b'k'; tessera::MAX_KEY_LEN + 1];
    assert_eq!(store.store(&key, b"v"), Err(Error::Limit));
}

#[test]
fn kv_stats_count_operations() {
    let mut store = memory_store();
    store.store(b"a", b"1").unwrap();
    store.append(b"a", b"2").unwrap();
    store.fetch_all(b"a").unwrap();
    store.delete(b"a").unwrap();
    let stats = store.kv_stats();
    assert_eq!(stats.stores, 1);
    assert_eq!(stats.appends, 1);
    assert_eq!(stats.fetches, 1);
    assert_eq!(stats.deletes, 1);
    assert_eq!(stats.bytes_fetched, 2);
}

proptest! {
    #[test]
    fn fetch_returns_stored_bytes(
        key in proptest::collection::vec(any::<u8>(), 0..32),
        value in proptest::collection::vec(any::<u8>(), 0..4096),
        chunk in 1usize..512,
    ) {
        let mut store = chunked_store(chunk);
        store.store(&key, &value).unwrap();
        prop_assert_eq!(store.fetch_all(&key).unwrap(), value);
    }

    #[test]
    fn append_yields_concatenation(
        first in proptest::collection::vec(any::<u8>(), 0..1024),
        second in proptest::collection::vec(any::<u8>(), 0..1024),
    ) {
        let mut store = memory_store();
        store.store(b"k", &first).unwrap();
        store.append(b"k", &second).unwrap();
        let mut expected = first.clone();
        expected.extend_from_slice(&second);
        prop_assert_eq!(store.fetch_all(b"k").unwrap(), expected);
    }
}
