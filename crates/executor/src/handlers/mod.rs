//! Command handlers organized by what they touch.
//!
//! | Module | Commands |
//! |--------|----------|
//! | `string` | SET, SETNX, GET, GETSET, APPEND, STRLEN, MSET, MSETNX, MGET |
//! | `keys` | DEL, EXISTS, COPY, MOVE |
//! | `counter` | INCR, DECR, INCRBY, DECRBY |
//! | `meta` | CMD_LIST, CMD_COUNT |

pub mod counter;
pub mod keys;
pub mod meta;
pub mod string;

use tessera_core::Value;

use crate::error::CommandError;

/// Result of one handler.
pub type HandlerResult = Result<Value, CommandError>;

/// Owned String value for a stored byte sequence.
pub(crate) fn bytes_value(bytes: Option<&[u8]>) -> Value {
    bytes.map_or(Value::Null, |b| Value::String(b.to_vec()))
}
