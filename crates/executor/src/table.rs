//! Built-in command table.
//!
//! [`COMMANDS`] fixes the order `CMD_LIST` reports. Lookup by name is
//! case-insensitive and goes through an index built on first use.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// How many arguments a command takes (not counting its name)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many
    Exact(usize),
    /// This many or more
    AtLeast(usize),
    /// One or more key/value pairs
    Pairs,
}

impl Arity {
    /// True if `count` arguments are acceptable.
    pub fn accepts(&self, count: usize) -> bool {
        match *self {
            Arity::Exact(n) => count == n,
            Arity::AtLeast(n) => count >= n,
            Arity::Pairs => count >= 2 && count % 2 == 0,
        }
    }
}

/// Static description of a built-in command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    /// Canonical (upper case) name
    pub name: &'static str,
    /// Accepted argument count
    pub arity: Arity,
    /// One-line description
    pub summary: &'static str,
}

const fn spec(name: &'static str, arity: Arity, summary: &'static str) -> CommandSpec {
    CommandSpec {
        name,
        arity,
        summary,
    }
}

/// Every built-in command, in listing order.
pub static COMMANDS: &[CommandSpec] = &[
    spec("SET", Arity::Exact(2), "Store a value"),
    spec("SETNX", Arity::Exact(2), "Store a value if the key is absent"),
    spec("GET", Arity::Exact(1), "Read a value"),
    spec("GETSET", Arity::Exact(2), "Store a value and return the previous one"),
    spec("DEL", Arity::AtLeast(1), "Remove keys"),
    spec("EXISTS", Arity::Exact(1), "Test whether a key is present"),
    spec("APPEND", Arity::Exact(2), "Append to a value"),
    spec("STRLEN", Arity::Exact(1), "Length of a value in bytes"),
    spec("MSET", Arity::Pairs, "Store several values"),
    spec("MSETNX", Arity::Pairs, "Store several values if all keys are absent"),
    spec("MGET", Arity::AtLeast(1), "Read several values"),
    spec("INCR", Arity::Exact(1), "Add one to an integer value"),
    spec("DECR", Arity::Exact(1), "Subtract one from an integer value"),
    spec("INCRBY", Arity::Exact(2), "Add to an integer value"),
    spec("DECRBY", Arity::Exact(2), "Subtract from an integer value"),
    spec("COPY", Arity::Exact(2), "Copy a value to another key"),
    spec("MOVE", Arity::Exact(2), "Rename a key"),
    spec("CMD_LIST", Arity::Exact(0), "List built-in commands"),
    spec("CMD_COUNT", Arity::Exact(0), "Count built-in commands"),
];

static BY_NAME: Lazy<HashMap<&'static str, &'static CommandSpec>> =
    Lazy::new(|| COMMANDS.iter().map(|c| (c.name, c)).collect());

/// Find a built-in command by name, ignoring ASCII case.
pub fn lookup(name: &str) -> Option<&'static CommandSpec> {
    BY_NAME.get(name.to_ascii_uppercase().as_str()).copied()
}
