//! Value Tests
//!
//! The dynamic value model as seen through command results.

use crate::common::*;
use tessera::{ArrayValue, Error, Value};

#[test]
fn scalar_results_are_scalar() {
    let mut store = memory_store();
    for cmd in ["SET a 1", "GET a", "GET none", "STRLEN a", "CMD_COUNT"] {
        let value = store.exec_result(cmd).unwrap();
        assert!(value.is_scalar(), "{} should be scalar", cmd);
        assert!(!value.is_array());
    }
}

#[test]
fn numeric_predicates() {
    assert!(Value::Int(1).is_numeric());
    assert!(Value::Float(1.5).is_numeric());
    assert!(!Value::from("1").is_numeric());
    assert!(!Value::Bool(true).is_numeric());
}

#[test]
fn coercions_never_fail() {
    let mut store = memory_store();
    store.exec("SET word hello").unwrap();
    let value = store.exec_result("GET word").unwrap();
    assert_eq!(value.to_int(), 0);
    assert_eq!(value.to_float(), 0.0);
    assert!(value.to_bool());
    assert_eq!(Value::Bool(true).to_int(), 1);
    assert_eq!(Value::Null.to_string(), "");
}

#[test]
fn array_insert_and_index() {
    let mut array = ArrayValue::new();
    array.insert(Value::Int(1)).unwrap();
    array.insert(Value::from("two")).unwrap();
    assert_eq!(array.count(), 2);
    assert_eq!(array.index(1).to_string(), "two");
    assert_eq!(array.next().map(Value::to_int), Some(1));
    assert_eq!(array.next().map(Value::to_string), Some("two".to_string()));
    assert!(array.next().is_none());
}

#[test]
#[should_panic(expected = "array index out of bounds")]
fn array_index_out_of_bounds_panics() {
    let array = ArrayValue::new();
    let _ = array.index(0);
}

#[test]
fn status_codes_map_onto_taxonomy() {
    use tessera::StatusCode;
    assert_eq!(Error::from_status(StatusCode::BUSY), Error::Busy);
    assert_eq!(Error::from_status(StatusCode::READ_ONLY), Error::ReadOnly);
    assert_eq!(Error::from_status(StatusCode::new(-999)), Error::Unknown);
}

#[test]
fn library_identity() {
    assert!(tessera::signature().contains(tessera::version()));
    assert!(!tessera::identity().is_empty());
    assert!(!tessera::copyright().is_empty());
}
