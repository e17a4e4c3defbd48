//! Command Execution Tests
//!
//! `exec`, `result` and `exec_result` against the bundled command set.

use crate::common::*;
use tessera::Error;

#[test]
fn set_integer_then_get() {
    let mut store = memory_store();
    store.exec("SET x 123").unwrap();
    let value = store.exec_result("GET x").unwrap();
    assert_eq!(value.to_int(), 123);
}

#[test]
fn set_booleans_then_get() {
    let mut store = memory_store();
    store.exec("SET truthy true").unwrap();
    store.exec("SET falsy false").unwrap();
    assert!(store.exec_result("GET truthy").unwrap().to_bool());
    assert!(!store.exec_result("GET falsy").unwrap().to_bool());
}

#[test]
fn quoted_string_round_trips() {
    let mut store = memory_store();
    store.exec("SET test 'Hello World'").unwrap();
    let value = store.exec_result("GET test").unwrap();
    assert!(value.is_string());
    assert_eq!(value.to_string(), "Hello World");
}

#[test]
fn get_missing_is_null() {
    let mut store = memory_store();
    assert!(store.exec_result("GET nothing").unwrap().is_null());
}

#[test]
fn result_before_any_exec_is_null() {
    let store = memory_store();
    assert!(store.result().is_null());
}

#[test]
fn command_names_ignore_case() {
    let mut store = memory_store();
    store.exec("set k v").unwrap();
    assert_eq!(store.exec_result("Get k").unwrap().to_string(), "v");
}

#[test]
fn multiple_commands_return_last_result() {
    let mut store = memory_store();
    let value = store.exec_result("SET a 1; INCRBY a 41; GET a").unwrap();
    assert_eq!(value.to_int64(), 42);
}

#[test]
fn commands_and_kv_share_data() {
    let mut store = memory_store();
    store.store(b"from_kv", b"kv-value").unwrap();
    assert_eq!(
        store.exec_result("GET from_kv").unwrap().to_string(),
        "kv-value"
    );
    store.exec("SET from_cmd cmd-value").unwrap();
    assert_eq!(store.fetch_all(b"from_cmd").unwrap(), b"cmd-value");
}

#[test]
fn unknown_command_is_unknown_error() {
    let mut store = memory_store();
    assert_eq!(store.exec("FROB x"), Err(Error::Unknown));
    assert_eq!(store.last_error(), "unknown command 'FROB'");
    assert!(store.result().is_null());
}

#[test]
fn failed_command_keeps_earlier_effects() {
    let mut store = memory_store();
    assert_eq!(store.exec("SET a 1; SET b"), Err(Error::Unknown));
    assert_eq!(store.fetch_all(b"a").unwrap(), b"1");
    assert_eq!(store.fetch_all(b"b"), Err(Error::NotFound));
}

#[test]
fn unterminated_quote_runs_nothing() {
    let mut store = memory_store();
    assert_eq!(store.exec("SET a 1; SET b 'open"), Err(Error::Unknown));
    assert_eq!(store.fetch_all(b"a"), Err(Error::NotFound));
}

#[test]
fn incr_overflow_is_limit() {
    let mut store = memory_store();
    store.exec("SET n 9223372036854775807").unwrap();
    assert_eq!(store.exec("INCR n"), Err(Error::Limit));
}

#[test]
fn mget_returns_array() {
    let mut store = memory_store();
    store.exec("MSET a 1 b 2").unwrap();
    let value = store.exec_result("MGET a missing b").unwrap();
    let array = value.as_array().unwrap();
    assert_eq!(array.count(), 3);
    assert_eq!(array.index(0).to_int(), 1);
    assert!(array.index(1).is_null());
    assert_eq!(array.index(2).to_int(), 2);
}

#[test]
fn cmd_list_cursor_iterates_once_then_resets() {
    let mut store = memory_store();
    let count = store.exec_result("CMD_COUNT").unwrap().to_int64() as usize;

    let value = store.exec_result("CMD_LIST").unwrap();
    assert!(value.is_array());
    let list = value.as_array().unwrap();
    assert_eq!(list.count(), count);

    let mut first_pass = Vec::new();
    while let Some(item) = list.next() {
        assert!(item.is_string());
        first_pass.push(item.to_string());
    }
    assert_eq!(first_pass.len(), count);
    assert!(list.next().is_none());
    assert!(first_pass.contains(&"SET".to_string()));
    assert!(first_pass.contains(&"CMD_LIST".to_string()));

    list.reset();
    let mut second_pass = Vec::new();
    while let Some(item) = list.next() {
        second_pass.push(item.to_string());
    }
    assert_eq!(first_pass, second_pass);
}

#[test]
fn empty_command_succeeds_with_null() {
    let mut store = memory_store();
    assert!(store.exec_result("").unwrap().is_null());
}

#[test]
fn counters_through_commands() {
    let mut store = memory_store();
    assert_eq!(store.exec_result("INCR hits").unwrap().to_int(), 1);
    assert_eq!(store.exec_result("INCRBY hits 9").unwrap().to_int(), 10);
    assert_eq!(store.exec_result("DECRBY hits 3").unwrap().to_int(), 7);
    assert_eq!(store.exec_result("DECR hits").unwrap().to_int(), 6);
    assert_eq!(store.exec_result("STRLEN hits").unwrap().to_int(), 1);
}

#[test]
fn copy_move_del_exists() {
    let mut store = memory_store();
    store.exec("SET src v").unwrap();
    assert!(store.exec_result("COPY src copy").unwrap().to_bool());
    assert!(store.exec_result("MOVE src moved").unwrap().to_bool());
    assert!(!store.exec_result("EXISTS src").unwrap().to_bool());
    assert_eq!(store.exec_result("DEL copy moved src").unwrap().to_int(), 2);
    assert!(!store.exec_result("MOVE src elsewhere").unwrap().to_bool());
}
