//! Per-bucket entry chain used by the separate chaining table

use std::slice;

/// A key-value pair stored in a chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Entry<V> {
    /// The key in the key-value pair
    pub(crate) key: String,
    /// The value associated with the key
    pub(crate) value: V,
}

/// Entries that hashed to the same bucket, in insertion order
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Chain<V> {
    /// The entries of the chain
    entries: Vec<Entry<V>>,
}

impl<V> Default for Chain<V> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<V> Chain<V> {
    /// Appends a new entry at the end of the chain
    pub(crate) fn insert(&mut self, key: String, value: V) {
        self.entries.push(Entry { key, value });
    }

    /// Finds the entry holding `key`
    pub(crate) fn find(&self, key: &str) -> Option<&Entry<V>> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    /// Finds the entry holding `key` for modification
    pub(crate) fn find_mut(&mut self, key: &str) -> Option<&mut Entry<V>> {
        self.entries.iter_mut().find(|entry| entry.key == key)
    }

    /// Unlinks the entry holding `key`, keeping the order of the others
    pub(crate) fn remove(&mut self, key: &str) -> Option<Entry<V>> {
        let position = self.entries.iter().position(|entry| entry.key == key)?;
        Some(self.entries.remove(position))
    }

    /// Number of entries in the chain
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the chain has no entries
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries in insertion order
    pub(crate) fn iter(&self) -> slice::Iter<'_, Entry<V>> {
        self.entries.iter()
    }
}

impl<V> IntoIterator for Chain<V> {
    type Item = Entry<V>;
    type IntoIter = std::vec::IntoIter<Entry<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
