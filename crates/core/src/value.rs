//! Value types for Tessera
//!
//! This module defines:
//! - Value: the dynamically typed result of a command or KV read
//!
//! ## Value Model
//!
//! The Value enum has exactly 6 variants:
//! - Null, Bool, Int, Float, String, Array
//!
//! `String` holds raw bytes: the store never assumes an encoding, so a
//! value read back from the KV path may be arbitrary binary data.
//!
//! ## Coercion Rules
//!
//! Every `to_*` converter is total. Instead of failing they default or
//! saturate:
//!
//! | From | `to_int64` | `to_float` | `to_bool` | `to_string` |
//! |------|------------|------------|-----------|-------------|
//! | Null | 0 | 0.0 | false | `""` |
//! | Bool | 0 / 1 | 0.0 / 1.0 | itself | `true` / `false` |
//! | Int | itself | cast | `!= 0` | decimal |
//! | Float | truncated, saturating, NaN → 0 | itself | `!= 0.0` | shortest decimal |
//! | String | integer prefix, else 0 | float prefix, else 0.0 | see below | lossy UTF-8 |
//! | Array | element count | element count | non-empty | elements joined by `,` |
//!
//! String to bool: `""` is false, `"true"` is true and `"false"` is false
//! (case-sensitive), numeric strings are compared against zero, and any other
//! non-empty string is true.
//!
//! ## Lifetime
//!
//! Values handed out by a `Store` are borrowed from its result slot. The
//! borrow ends before the next `exec` can run, so a stale result cannot be
//! observed.

use std::borrow::Cow;
use std::fmt;

use crate::array::ArrayValue;

/// Dynamically typed result value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Null value
    #[default]
    Null,
    /// Boolean value
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point (IEEE-754)
    Float(f64),
    /// Byte string, encoding not assumed
    String(Vec<u8>),
    /// Ordered array with an iteration cursor
    Array(ArrayValue),
}

impl Value {
    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::String(_) => "String",
            Value::Array(_) => "Array",
        }
    }

    /// Check if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if this is a boolean value
    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Check if this is an integer value
    pub fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    /// Check if this is a float value
    pub fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    /// Check if this is a string value
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Check if this is an integer or a float
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    /// Check if this is anything but an array
    pub fn is_scalar(&self) -> bool {
        !self.is_array()
    }

    /// Check if this is an array value
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Get as &[u8] if this is a String value
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::String(b) => Some(b),
            _ => None,
        }
    }

    /// Get as &ArrayValue if this is an Array value
    pub fn as_array(&self) -> Option<&ArrayValue> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Get as &mut ArrayValue if this is an Array value
    pub fn as_array_mut(&mut self) -> Option<&mut ArrayValue> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Convert to a 64-bit integer.
    pub fn to_int64(&self) -> i64 {
        match self {
            Value::Null => 0,
            Value::Bool(b) => i64::from(*b),
            Value::Int(i) => *i,
            // `as` saturates at the bounds and maps NaN to 0
            Value::Float(f) => *f as i64,
            Value::String(s) => parse_int_prefix(s),
            Value::Array(a) => a.count() as i64,
        }
    }

    /// Convert to a 32-bit integer, clamping out-of-range values.
    pub fn to_int(&self) -> i32 {
        self.to_int64().clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    }

    /// Convert to a float.
    pub fn to_float(&self) -> f64 {
        match self {
            Value::Null => 0.0,
            Value::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Int(i) => *i as f64,
            Value::Float(f) => *f,
            Value::String(s) => parse_float_prefix(s).unwrap_or(0.0),
            Value::Array(a) => a.count() as f64,
        }
    }

    /// Convert to a boolean.
    pub fn to_bool(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::String(s) => string_to_bool(s),
            Value::Array(a) => !a.is_empty(),
        }
    }

    /// Raw byte rendering: the stored bytes for strings, the `to_string`
    /// rendering otherwise.
    pub fn to_bytes(&self) -> Cow<'_, [u8]> {
        match self {
            Value::String(s) => Cow::Borrowed(s),
            other => Cow::Owned(other.to_string().into_bytes()),
        }
    }
}

fn skip_whitespace(input: &[u8]) -> &[u8] {
    let start = input
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(input.len());
    &input[start..]
}

/// Parse an optional sign followed by decimal digits, saturating on overflow.
fn parse_int_prefix(input: &[u8]) -> i64 {
    let input = skip_whitespace(input);
    let (negative, digits) = match input.first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    let mut acc: i64 = 0;
    for &b in digits.iter().take_while(|b| b.is_ascii_digit()) {
        let d = i64::from(b - b'0');
        acc = if negative {
            acc.saturating_mul(10).saturating_sub(d)
        } else {
            acc.saturating_mul(10).saturating_add(d)
        };
    }
    acc
}

/// Length of the longest prefix of `input` that reads as a decimal float,
/// or `None` if it holds no digits.
fn float_prefix_len(input: &[u8]) -> Option<usize> {
    let mut i = 0;
    if matches!(input.first(), Some(b'-') | Some(b'+')) {
        i += 1;
    }
    let int_digits = input[i..].iter().take_while(|b| b.is_ascii_digit()).count();
    i += int_digits;

    let mut frac_digits = 0;
    if input.get(i) == Some(&b'.') {
        frac_digits = input[i + 1..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if int_digits > 0 || frac_digits > 0 {
            i += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(input.get(i), Some(b'e') | Some(b'E')) {
        let mut j = i + 1;
        if matches!(input.get(j), Some(b'-') | Some(b'+')) {
            j += 1;
        }
        let exp_digits = input[j.min(input.len())..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if exp_digits > 0 {
            i = j + exp_digits;
        }
    }
    Some(i)
}

fn parse_float_prefix(input: &[u8]) -> Option<f64> {
    let input = skip_whitespace(input);
    let len = float_prefix_len(input)?;
    std::str::from_utf8(&input[..len]).ok()?.parse().ok()
}

/// True if the whole string (ignoring surrounding whitespace) is a number.
fn is_numeric_string(input: &[u8]) -> bool {
    let input = skip_whitespace(input);
    let end = input
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(0, |p| p + 1);
    let trimmed = &input[..end];
    float_prefix_len(trimmed) == Some(trimmed.len())
}

fn string_to_bool(s: &[u8]) -> bool {
    match s {
        b"" => false,
        b"true" => true,
        b"false" => false,
        _ if is_numeric_string(s) => parse_float_prefix(s).map_or(false, |f| f != 0.0),
        _ => true,
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::String(s) => write!(f, "{}", String::from_utf8_lossy(s)),
            Value::Array(a) => {
                for (i, item) in a.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
        }
    }
}

// ============================================================================
// From implementations for ergonomic API usage
// ============================================================================

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.as_bytes().to_vec())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s.into_bytes())
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::String(b.to_vec())
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::String(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<ArrayValue> for Value {
    fn from(a: ArrayValue) -> Self {
        Value::Array(a)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(ArrayValue::from(items))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}
