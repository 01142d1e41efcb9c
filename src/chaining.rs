use std::{fmt, iter::FusedIterator, mem, slice};

use log::debug;

use crate::{
    chain::{Chain, Entry},
    error::TableError,
    hash::{HashFunction, hash_function_1},
    prime::{is_prime, next_prime},
};

/// Load factor at which a chaining table grows before the next insertion
pub const CHAINING_MAX_LOAD: f64 = 1.0;

/// Allocates `capacity` empty chains
fn empty_chains<V>(capacity: usize) -> Vec<Chain<V>> {
    let mut chains = Vec::with_capacity(capacity);
    chains.resize_with(capacity, Chain::default);
    chains
}

/// Whether a table with `size` entries in `capacity` buckets grows before its next insertion
#[allow(clippy::cast_precision_loss)]
fn grows_before_insert(size: usize, capacity: usize) -> bool {
    size as f64 / capacity as f64 >= CHAINING_MAX_LOAD
}

/// Capacity a rebuild starting at `capacity` settles on for `live` entries
fn migration_capacity(mut capacity: usize, live: usize) -> usize {
    while live.checked_sub(1).is_some_and(|before| grows_before_insert(before, capacity)) {
        capacity = next_prime(capacity.saturating_mul(2));
    }
    capacity
}

/// A hash table over string keys resolving collisions with separate chaining.
///
/// Every bucket owns a chain of the entries that hash to it, kept in insertion order.
/// The capacity is always prime; the table grows to the next prime after twice its
/// capacity before an insertion once the load factor has reached [`CHAINING_MAX_LOAD`].
#[derive(Debug, Clone)]
pub struct ChainingMap<V> {
    /// One chain per bucket
    buckets: Vec<Chain<V>>,
    /// Number of entries across all chains
    size: usize,
    /// Maps keys to bucket indices
    hash_function: HashFunction,
}

impl<V> Default for ChainingMap<V> {
    fn default() -> Self {
        Self::new(11, hash_function_1)
    }
}

impl<K, V> Extend<(K, V)> for ChainingMap<V>
where
    K: Into<String>,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

impl<V> ChainingMap<V> {
    /// Load factor at which the table grows before the next insertion
    pub const MAX_LOAD: f64 = CHAINING_MAX_LOAD;

    /// Creates an empty table with at least `capacity` buckets, rounded up to a prime.
    #[must_use]
    pub fn new(capacity: usize, hash_function: HashFunction) -> Self {
        Self { buckets: empty_chains(next_prime(capacity)), size: 0, hash_function }
    }

    /// Gets the bucket index for a key
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
    fn bucket_index(&self, key: &str) -> usize {
        ((self.hash_function)(key) % self.buckets.len() as u64) as usize
    }

    /// Gets the chain a key belongs to
    fn chain(&self, key: &str) -> Option<&Chain<V>> {
        self.buckets.get(self.bucket_index(key))
    }

    /// Gets the chain a key belongs to for modification
    fn chain_mut(&mut self, key: &str) -> Option<&mut Chain<V>> {
        let index = self.bucket_index(key);
        self.buckets.get_mut(index)
    }

    /// Inserts a key-value pair, or updates the value if the key is already present.
    ///
    /// Returns the previous value when the key was present.
    pub fn put(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        if grows_before_insert(self.size, self.buckets.len()) {
            self.resize_table(next_prime(self.buckets.len().saturating_mul(2)));
        }
        self.insert(key.into(), value)
    }

    /// Updates the entry for `key` in its chain or appends a new one, without the growth check
    #[allow(clippy::arithmetic_side_effects)]
    fn insert(&mut self, key: String, value: V) -> Option<V> {
        let chain = self.chain_mut(&key)?;
        if let Some(entry) = chain.find_mut(&key) {
            return Some(mem::replace(&mut entry.value, value));
        }

        chain.insert(key, value);
        self.size += 1;
        None
    }

    /// Retrieves the value for a given key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.chain(key)?.find(key).map(|entry| &entry.value)
    }

    /// Retrieves a mutable reference to the value for a given key
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.chain_mut(key)?.find_mut(key).map(|entry| &mut entry.value)
    }

    /// Returns true if the table holds an entry for `key`
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        if self.size == 0 {
            return false;
        }
        self.chain(key).is_some_and(|chain| chain.find(key).is_some())
    }

    /// Unlinks the entry for `key`. Removing an absent key does nothing.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let entry = self.chain_mut(key)?.remove(key)?;
        self.size -= 1;
        Some(entry.value)
    }

    /// Rebuilds the table with at least `new_capacity` buckets.
    ///
    /// A zero capacity is ignored; use [`Self::try_resize_table`] to learn whether the
    /// request was applied.
    pub fn resize_table(&mut self, new_capacity: usize) {
        if let Err(err) = self.try_resize_table(new_capacity) {
            debug!("chaining resize ignored: {err}");
        }
    }

    /// Rebuilds the table with at least `new_capacity` buckets, rounded up to a prime.
    ///
    /// Entries are re-inserted bucket by bucket and in chain order within a bucket. A
    /// capacity too small for the entries is first grown the way repeated
    /// [`Self::put`] calls would grow it, so the migration is a single pass.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::ZeroCapacity`] and leaves the table untouched when
    /// `new_capacity` is 0.
    pub fn try_resize_table(&mut self, new_capacity: usize) -> Result<(), TableError> {
        if new_capacity < 1 {
            return Err(TableError::ZeroCapacity);
        }

        let new_capacity =
            if is_prime(new_capacity) { new_capacity } else { next_prime(new_capacity) };
        let new_capacity = migration_capacity(new_capacity, self.size);

        debug!(
            "rebuilding chaining table: capacity {} -> {new_capacity}, {} entries",
            self.buckets.len(),
            self.size
        );

        let old_buckets = mem::replace(&mut self.buckets, empty_chains(new_capacity));
        self.size = 0;

        for Entry { key, value } in old_buckets.into_iter().flatten() {
            self.insert(key, value);
        }

        Ok(())
    }

    /// Returns the number of buckets with an empty chain
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.buckets.iter().filter(|chain| chain.is_empty()).count()
    }

    /// Clears the table, keeping its capacity
    pub fn clear(&mut self) {
        self.buckets = empty_chains(self.buckets.len());
        self.size = 0;
    }

    /// Returns the current load factor of the table
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn table_load(&self) -> f64 {
        self.size as f64 / self.buckets.len() as f64
    }

    /// Returns the number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Same as [`Self::len`]
    #[must_use]
    pub fn get_size(&self) -> usize {
        self.size
    }

    /// Returns true if the table holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of buckets
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Same as [`Self::capacity`]
    #[must_use]
    pub fn get_capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the length of the longest chain.
    ///
    /// Together with [`Self::empty_buckets`] this shows how evenly the hash function
    /// spreads the keys.
    #[must_use]
    pub fn longest_chain(&self) -> usize {
        self.buckets.iter().map(Chain::len).max().unwrap_or(0)
    }

    /// Returns an iterator over the entries in bucket order, chain order within a bucket
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { buckets: self.buckets.iter(), chain: None }
    }

    /// Collects every entry in bucket order, chain order within a bucket
    #[must_use]
    pub fn get_keys_and_values(&self) -> Vec<(String, V)>
    where
        V: Clone,
    {
        self.iter().map(|(key, value)| (key.to_owned(), value.clone())).collect()
    }
}

impl<'a, V> IntoIterator for &'a ChainingMap<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V: fmt::Debug> fmt::Display for ChainingMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, chain) in self.buckets.iter().enumerate() {
            write!(f, "{index}:")?;
            for entry in chain.iter() {
                write!(f, " -> ({}: {:?})", entry.key, entry.value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Iterator over the entries of a [`ChainingMap`]
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// Buckets not yet visited
    buckets: slice::Iter<'a, Chain<V>>,
    /// Remaining entries of the bucket being visited
    chain: Option<slice::Iter<'a, Entry<V>>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.chain.as_mut().and_then(|chain| chain.next()) {
                return Some((entry.key.as_str(), &entry.value));
            }
            self.chain = Some(self.buckets.next()?.iter());
        }
    }
}

impl<V> FusedIterator for Iter<'_, V> {}
