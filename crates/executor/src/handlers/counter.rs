//! Integer counter command handlers.

use tessera_core::Value;
use tessera_storage::Keyspace;

use super::HandlerResult;
use crate::error::CommandError;

/// Handle INCR, DECR, INCRBY and DECRBY.
///
/// An absent key counts as 0, as does a value with no leading digits.
pub fn incr_by(ks: &mut Keyspace, command: &'static str, key: &[u8], delta: i64) -> HandlerResult {
    let current = ks.get(key).map_or(0, |v| Value::from(v).to_int64());
    let next = current.checked_add(delta).ok_or(CommandError::Overflow)?;
    ks.put(key, next.to_string().as_bytes())
        .map_err(CommandError::storage(command))?;
    Ok(Value::Int(next))
}
