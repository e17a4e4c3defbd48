//! Key management command handlers.

use tessera_core::Value;
use tessera_storage::Keyspace;

use super::HandlerResult;
use crate::error::CommandError;

/// Handle DEL. Returns how many of `keys` existed.
pub fn del(ks: &mut Keyspace, keys: &[Vec<u8>]) -> HandlerResult {
    let removed = keys.iter().filter(|k| ks.delete(k)).count();
    Ok(Value::Int(removed as i64))
}

/// Handle EXISTS.
pub fn exists(ks: &Keyspace, key: &[u8]) -> HandlerResult {
    Ok(Value::Bool(ks.contains(key)))
}

/// Handle COPY. Overwrites `dst`.
pub fn copy(ks: &mut Keyspace, src: &[u8], dst: &[u8]) -> HandlerResult {
    let Some(value) = ks.get(src).map(<[u8]>::to_vec) else {
        return Ok(Value::Bool(false));
    };
    ks.put(dst, &value).map_err(CommandError::storage("COPY"))?;
    Ok(Value::Bool(true))
}

/// Handle MOVE. Overwrites `dst`.
pub fn rename(ks: &mut Keyspace, src: &[u8], dst: &[u8]) -> HandlerResult {
    let Some(value) = ks.get(src).map(<[u8]>::to_vec) else {
        return Ok(Value::Bool(false));
    };
    if src != dst {
        ks.put(dst, &value).map_err(CommandError::storage("MOVE"))?;
        ks.delete(src);
    }
    Ok(Value::Bool(true))
}
