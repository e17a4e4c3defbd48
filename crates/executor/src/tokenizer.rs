//! Splits a script into statements and byte-string tokens.
//!
//! - Unquoted whitespace separates tokens, unquoted `;` separates statements.
//! - `'...'` is taken literally.
//! - `"..."` honours backslash: `\n`, `\t`, `\r`, `\0` are control bytes,
//!   any other escaped byte stands for itself.
//! - Quoted and unquoted parts written back to back form one token, so
//!   `a'b c'` is the single token `ab c`.
//!
//! Statements without tokens are dropped.

use crate::error::CommandError;

/// Tokenize `script` into statements.
pub fn tokenize(script: &str) -> Result<Vec<Vec<Vec<u8>>>, CommandError> {
    let bytes = script.as_bytes();
    let mut statements = Vec::new();
    let mut statement: Vec<Vec<u8>> = Vec::new();
    let mut token: Option<Vec<u8>> = None;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        match b {
            b';' => {
                statement.extend(token.take());
                if !statement.is_empty() {
                    statements.push(std::mem::take(&mut statement));
                }
            }
            b if b.is_ascii_whitespace() => {
                statement.extend(token.take());
            }
            b'\'' => {
                let buf = token.get_or_insert_with(Vec::new);
                let close = bytes[i + 1..]
                    .iter()
                    .position(|&c| c == b'\'')
                    .ok_or(CommandError::UnterminatedQuote)?;
                buf.extend_from_slice(&bytes[i + 1..i + 1 + close]);
                i += close + 1;
            }
            b'"' => {
                let buf = token.get_or_insert_with(Vec::new);
                i += 1;
                loop {
                    match bytes.get(i) {
                        None => return Err(CommandError::UnterminatedQuote),
                        Some(b'"') => break,
                        Some(b'\\') => {
                            let escaped = bytes.get(i + 1).ok_or(CommandError::UnterminatedQuote)?;
                            buf.push(unescape(*escaped));
                            i += 2;
                        }
                        Some(&c) => {
                            buf.push(c);
                            i += 1;
                        }
                    }
                }
            }
            _ => token.get_or_insert_with(Vec::new).push(b),
        }
        i += 1;
    }

    statement.extend(token.take());
    if !statement.is_empty() {
        statements.push(statement);
    }
    Ok(statements)
}

fn unescape(b: u8) -> u8 {
    match b {
        b'n' => b'\n',
        b't' => b'\t',
        b'r' => b'\r',
        b'0' => 0,
        other => other,
    }
}
