//! Array values with an iteration cursor
//!
//! An [`ArrayValue`] is an owned ordered sequence plus a cursor. The cursor
//! starts before the first element; [`ArrayValue::next`] moves it forward one
//! element at a time and [`ArrayValue::reset`] rewinds it. Positional access
//! through [`ArrayValue::index`] ignores the cursor entirely.
//!
//! The cursor lives in a `Cell`, so a shared borrow of a result value is
//! enough to iterate it. That also makes `ArrayValue` `!Sync`: a Store's
//! results belong to the thread driving that Store.

use std::cell::Cell;
use std::fmt;

use crate::error::{Error, Result};
use crate::limits::MAX_ARRAY_LEN;
use crate::value::Value;

/// Ordered sequence of values with a cursor
#[derive(Clone, Default)]
pub struct ArrayValue {
    items: Vec<Value>,
    /// Number of elements already yielded by `next`
    cursor: Cell<usize>,
}

impl ArrayValue {
    /// Create an empty array.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of elements. O(1).
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// True if the array holds no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Advance the cursor and return the element now under it.
    ///
    /// Returns `None` once the cursor has passed the last element, and keeps
    /// returning `None` until [`reset`](Self::reset) is called.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&self) -> Option<&Value> {
        let pos = self.cursor.get();
        let item = self.items.get(pos)?;
        self.cursor.set(pos + 1);
        Some(item)
    }

    /// Rewind the cursor to before the first element.
    pub fn reset(&self) {
        self.cursor.set(0);
    }

    /// Number of elements `next` has yielded since the last reset.
    pub fn position(&self) -> usize {
        self.cursor.get()
    }

    /// Positional fetch, independent of the cursor.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.count()`. A valid index is a precondition of
    /// this call; use [`get`](Self::get) for a checked lookup.
    pub fn index(&self, i: usize) -> &Value {
        match self.items.get(i) {
            Some(v) => v,
            None => panic!(
                "array index out of bounds: the count is {} but the index is {}",
                self.items.len(),
                i
            ),
        }
    }

    /// Checked positional fetch.
    pub fn get(&self, i: usize) -> Option<&Value> {
        self.items.get(i)
    }

    /// Append a value to the end of the array.
    ///
    /// Fails with [`Error::Limit`] at [`MAX_ARRAY_LEN`] elements and with
    /// [`Error::OutOfMemory`] if the backing storage cannot grow.
    pub fn insert(&mut self, value: Value) -> Result<()> {
        if self.items.len() >= MAX_ARRAY_LEN {
            return Err(Error::Limit);
        }
        self.items.try_reserve(1).map_err(|_| Error::OutOfMemory)?;
        self.items.push(value);
        Ok(())
    }

    /// Iterate over all elements without touching the cursor.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    /// Borrow the elements as a slice.
    pub fn as_slice(&self) -> &[Value] {
        &self.items
    }

    /// Consume the array, returning its elements.
    pub fn into_vec(self) -> Vec<Value> {
        self.items
    }
}

// The cursor is iteration state, not content.
impl PartialEq for ArrayValue {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl fmt::Debug for ArrayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl From<Vec<Value>> for ArrayValue {
    fn from(items: Vec<Value>) -> Self {
        Self {
            items,
            cursor: Cell::new(0),
        }
    }
}

impl FromIterator<Value> for ArrayValue {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<'a> IntoIterator for &'a ArrayValue {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
