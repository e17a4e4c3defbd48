//! Introspection command handlers.

use tessera_core::{ArrayValue, Value};

use super::HandlerResult;
use crate::table::COMMANDS;

/// Handle CMD_LIST.
pub fn cmd_list() -> HandlerResult {
    let names: ArrayValue = COMMANDS.iter().map(|c| Value::from(c.name)).collect();
    Ok(Value::Array(names))
}

/// Handle CMD_COUNT.
pub fn cmd_count() -> HandlerResult {
    Ok(Value::Int(COMMANDS.len() as i64))
}
