//! Value read/write command handlers.

use tessera_core::{ArrayValue, Value};
use tessera_storage::Keyspace;

use super::{bytes_value, HandlerResult};
use crate::error::CommandError;

/// Handle SET.
pub fn set(ks: &mut Keyspace, key: &[u8], value: &[u8]) -> HandlerResult {
    ks.put(key, value).map_err(CommandError::storage("SET"))?;
    Ok(Value::Bool(true))
}

/// Handle SETNX.
pub fn set_nx(ks: &mut Keyspace, key: &[u8], value: &[u8]) -> HandlerResult {
    if ks.contains(key) {
        return Ok(Value::Bool(false));
    }
    ks.put(key, value).map_err(CommandError::storage("SETNX"))?;
    Ok(Value::Bool(true))
}

/// Handle GET.
pub fn get(ks: &Keyspace, key: &[u8]) -> HandlerResult {
    Ok(bytes_value(ks.get(key)))
}

/// Handle GETSET.
pub fn get_set(ks: &mut Keyspace, key: &[u8], value: &[u8]) -> HandlerResult {
    let previous = bytes_value(ks.get(key));
    ks.put(key, value).map_err(CommandError::storage("GETSET"))?;
    Ok(previous)
}

/// Handle APPEND. Returns the new length.
pub fn append(ks: &mut Keyspace, key: &[u8], value: &[u8]) -> HandlerResult {
    let len = ks
        .append(key, value)
        .map_err(CommandError::storage("APPEND"))?;
    Ok(Value::Int(len as i64))
}

/// Handle STRLEN.
pub fn strlen(ks: &Keyspace, key: &[u8]) -> HandlerResult {
    Ok(Value::Int(ks.get(key).map_or(0, |v| v.len() as i64)))
}

/// Handle MSET. Either every pair is stored or none is.
pub fn mset(ks: &mut Keyspace, pairs: &[(Vec<u8>, Vec<u8>)]) -> HandlerResult {
    store_all(ks, pairs, "MSET")?;
    Ok(Value::Bool(true))
}

/// Handle MSETNX. Stores nothing if any key already exists.
pub fn mset_nx(ks: &mut Keyspace, pairs: &[(Vec<u8>, Vec<u8>)]) -> HandlerResult {
    if pairs.iter().any(|(k, _)| ks.contains(k)) {
        return Ok(Value::Bool(false));
    }
    store_all(ks, pairs, "MSETNX")?;
    Ok(Value::Bool(true))
}

/// Handle MGET.
pub fn mget(ks: &Keyspace, keys: &[Vec<u8>]) -> HandlerResult {
    let items: ArrayValue = keys.iter().map(|k| bytes_value(ks.get(k))).collect();
    Ok(Value::Array(items))
}

fn store_all(
    ks: &mut Keyspace,
    pairs: &[(Vec<u8>, Vec<u8>)],
    command: &'static str,
) -> Result<(), CommandError> {
    for (key, value) in pairs {
        ks.check_put(key, value.len())
            .map_err(CommandError::storage(command))?;
    }
    for (key, value) in pairs {
        ks.put(key, value).map_err(CommandError::storage(command))?;
    }
    Ok(())
}
