//! Buffered transaction mutations

use std::collections::btree_map;
use std::collections::BTreeMap;

/// A single buffered mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Store `value` under the key
    Put(Vec<u8>),
    /// Remove the key
    Delete,
}

/// The mutations of one transaction, last write per key wins
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteSet {
    mutations: BTreeMap<Vec<u8>, Mutation>,
}

impl WriteSet {
    /// Create an empty write set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a put, replacing any earlier mutation of the same key.
    pub fn put(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.mutations.insert(key, Mutation::Put(value));
    }

    /// Record a delete, replacing any earlier mutation of the same key.
    pub fn delete(&mut self, key: Vec<u8>) {
        self.mutations.insert(key, Mutation::Delete);
    }

    /// Buffered mutation for `key`, if any.
    pub fn get(&self, key: &[u8]) -> Option<&Mutation> {
        self.mutations.get(key)
    }

    /// Number of keys touched.
    pub fn len(&self) -> usize {
        self.mutations.len()
    }

    /// True if nothing was buffered.
    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }

    /// Count of (puts, deletes).
    pub fn counts(&self) -> (usize, usize) {
        let puts = self
            .mutations
            .values()
            .filter(|m| matches!(m, Mutation::Put(_)))
            .count();
        (puts, self.mutations.len() - puts)
    }

    /// Iterate mutations in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, Vec<u8>, Mutation> {
        self.mutations.iter()
    }
}

impl IntoIterator for WriteSet {
    type Item = (Vec<u8>, Mutation);
    type IntoIter = btree_map::IntoIter<Vec<u8>, Mutation>;

    fn into_iter(self) -> Self::IntoIter {
        self.mutations.into_iter()
    }
}

impl FromIterator<(Vec<u8>, Mutation)> for WriteSet {
    fn from_iter<I: IntoIterator<Item = (Vec<u8>, Mutation)>>(iter: I) -> Self {
        Self {
            mutations: iter.into_iter().collect(),
        }
    }
}
