use std::{fmt, iter::FusedIterator, mem};

use log::{debug, trace};

use crate::{
    error::TableError,
    hash::{HashFunction, hash_function_1},
    prime::{is_prime, next_prime},
};

/// Load factor at which an open-addressing table grows before the next insertion
pub const OPEN_ADDRESSING_MAX_LOAD: f64 = 0.5;

/// Whether a table with `size` live entries in `capacity` slots grows before its next insertion
#[allow(clippy::cast_precision_loss)]
fn grows_before_insert(size: usize, capacity: usize) -> bool {
    size as f64 / capacity as f64 >= OPEN_ADDRESSING_MAX_LOAD
}

/// Capacity a rebuild starting at `capacity` settles on for `live` entries.
///
/// Applies the growth rule each insertion would run; the last insertion sees `live - 1`
/// entries, and growing for it covers every earlier one.
fn migration_capacity(mut capacity: usize, live: usize) -> usize {
    while live.checked_sub(1).is_some_and(|before| grows_before_insert(before, capacity)) {
        capacity = next_prime(capacity.saturating_mul(2));
    }
    capacity
}

/// A single slot of the open-addressing table
#[derive(Debug, Clone)]
enum Slot<V> {
    /// Nothing was ever placed here since the last rebuild
    Empty,
    /// A live key-value pair
    Occupied {
        /// The key in the key-value pair
        key: String,
        /// The value associated with the key
        value: V,
    },
    /// A removed entry; keeps probe chains intact and can be resurrected by its own key
    Tombstone {
        /// The key that was removed
        key: String,
    },
}

impl<V> Default for Slot<V> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<V> Slot<V> {
    /// Whether probing for `key` stops at this slot
    fn ends_probe_for(&self, key: &str) -> bool {
        match self {
            Self::Empty => true,
            Self::Occupied { key: stored, .. } | Self::Tombstone { key: stored } => stored == key,
        }
    }

    /// Whether the slot holds no live entry
    fn is_vacant(&self) -> bool {
        !matches!(self, Self::Occupied { .. })
    }
}

/// Allocates `capacity` empty slots
fn empty_slots<V>(capacity: usize) -> Vec<Slot<V>> {
    let mut slots = Vec::with_capacity(capacity);
    slots.resize_with(capacity, Slot::default);
    slots
}

/// Quadratic probe sequence `home, home + 1², home + 2², …` modulo the capacity
#[derive(Debug, Clone)]
struct QuadraticProbe {
    /// Index the key hashes to
    home: usize,
    /// `i²` modulo the capacity for the next probe
    offset: usize,
    /// Probe number `i` of the next probe
    step: usize,
    /// Number of slots in the table
    capacity: usize,
}

impl Iterator for QuadraticProbe {
    type Item = usize;

    #[allow(clippy::arithmetic_side_effects)]
    fn next(&mut self) -> Option<Self::Item> {
        if self.step >= self.capacity {
            return None;
        }

        let index = (self.home + self.offset) % self.capacity;
        // (i + 1)² = i² + 2i + 1
        self.offset = (self.offset + 2 * self.step + 1) % self.capacity;
        self.step += 1;
        Some(index)
    }
}

/// A hash table over string keys using quadratic probing and tombstones.
///
/// The capacity is always prime. Before every insertion the table grows to the next
/// prime after twice its capacity when the load factor has reached
/// [`OPEN_ADDRESSING_MAX_LOAD`], so a probe sequence always meets an empty slot.
///
/// Removal leaves a tombstone holding the removed key. Probes walk past tombstones of
/// other keys; a later `put` of the same key revives the tombstone in place.
///
/// Note: This implementation is not thread-safe.
#[derive(Debug, Clone)]
pub struct OpenAddressingMap<V> {
    /// The slots, one per unit of capacity
    buckets: Vec<Slot<V>>,
    /// Number of live entries
    size: usize,
    /// Maps keys to home indices
    hash_function: HashFunction,
}

impl<V> Default for OpenAddressingMap<V> {
    fn default() -> Self {
        Self::new(11, hash_function_1)
    }
}

impl<K, V> Extend<(K, V)> for OpenAddressingMap<V>
where
    K: Into<String>,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

impl<V> OpenAddressingMap<V> {
    /// Load factor at which the table grows before the next insertion
    pub const MAX_LOAD: f64 = OPEN_ADDRESSING_MAX_LOAD;

    /// Creates an empty table with at least `capacity` slots, rounded up to a prime.
    #[must_use]
    pub fn new(capacity: usize, hash_function: HashFunction) -> Self {
        Self { buckets: empty_slots(next_prime(capacity)), size: 0, hash_function }
    }

    /// Probe sequence for `key` under the current capacity
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
    fn probe_sequence(&self, key: &str) -> QuadraticProbe {
        let capacity = self.buckets.len();
        let home = ((self.hash_function)(key) % capacity as u64) as usize;
        QuadraticProbe { home, offset: 0, step: 0, capacity }
    }

    /// Finds the slot where probing for `key` stops: an empty slot, or a live or
    /// tombstoned slot holding `key`. Returns `None` when the probe sequence runs out.
    fn find_slot(&self, key: &str) -> Option<usize> {
        let mut probe = self.probe_sequence(key);
        probe.find(|&index| self.buckets.get(index).is_none_or(|slot| slot.ends_probe_for(key)))
    }

    /// Inserts a key-value pair, or updates the value if the key is already present.
    ///
    /// Returns the previous value of a live entry. Reviving a tombstoned key returns
    /// `None` like a fresh insertion.
    pub fn put(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        if grows_before_insert(self.size, self.buckets.len()) {
            self.resize_table(next_prime(self.buckets.len().saturating_mul(2)));
        }
        self.insert(key.into(), value)
    }

    /// Places a pair in the slot found for its key, without the growth check
    #[allow(clippy::arithmetic_side_effects)]
    fn insert(&mut self, key: String, value: V) -> Option<V> {
        let index = self.find_slot(&key).or_else(|| self.find_slot_after_purge(&key))?;

        let slot = self.buckets.get_mut(index)?;
        match slot {
            Slot::Occupied { value: current, .. } => Some(mem::replace(current, value)),
            Slot::Empty | Slot::Tombstone { .. } => {
                *slot = Slot::Occupied { key, value };
                self.size += 1;
                None
            }
        }
    }

    /// Drops every tombstone and looks for the slot of `key` again.
    ///
    /// Only reached when tombstones fill every slot `key` can visit. An insertion runs
    /// with fewer than half the slots live, so after the purge more than half are empty
    /// and the quadratic sequence over a prime capacity is bound to reach one.
    fn find_slot_after_purge(&mut self, key: &str) -> Option<usize> {
        self.purge_tombstones();
        let index = self.find_slot(key);
        debug_assert!(
            index.is_some(),
            "no empty slot reachable for {key:?} after purging tombstones"
        );
        index
    }

    /// Retrieves the value for a given key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        match self.buckets.get(self.find_slot(key)?)? {
            Slot::Occupied { value, .. } => Some(value),
            Slot::Empty | Slot::Tombstone { .. } => None,
        }
    }

    /// Retrieves a mutable reference to the value for a given key
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.find_slot(key)?;
        match self.buckets.get_mut(index)? {
            Slot::Occupied { value, .. } => Some(value),
            Slot::Empty | Slot::Tombstone { .. } => None,
        }
    }

    /// Returns true if the table holds a live entry for `key`
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        if self.size == 0 {
            return false;
        }
        self.get(key).is_some()
    }

    /// Removes the entry for `key`, leaving a tombstone in its slot.
    ///
    /// Removing an absent or already removed key does nothing.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let index = self.find_slot(key)?;
        let slot = self.buckets.get_mut(index)?;
        match mem::take(slot) {
            Slot::Occupied { key, value } => {
                *slot = Slot::Tombstone { key };
                self.size -= 1;
                Some(value)
            }
            other => {
                *slot = other;
                None
            }
        }
    }

    /// Rebuilds the table with at least `new_capacity` slots.
    ///
    /// Requests below the current size are ignored; use [`Self::try_resize_table`] to
    /// learn whether the request was applied.
    pub fn resize_table(&mut self, new_capacity: usize) {
        if let Err(err) = self.try_resize_table(new_capacity) {
            debug!("open addressing resize ignored: {err}");
        }
    }

    /// Rebuilds the table with at least `new_capacity` slots, rounded up to a prime.
    ///
    /// Every live entry is re-inserted in slot order; tombstones are dropped. A
    /// capacity too small for the live entries is grown up front the way repeated
    /// [`Self::put`] calls would grow it, so the entries are migrated in one pass.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::CapacityBelowSize`] and leaves the table untouched when
    /// `new_capacity` is smaller than the number of live entries.
    pub fn try_resize_table(&mut self, new_capacity: usize) -> Result<(), TableError> {
        if new_capacity < self.size {
            return Err(TableError::CapacityBelowSize { requested: new_capacity, size: self.size });
        }

        let new_capacity =
            if is_prime(new_capacity) { new_capacity } else { next_prime(new_capacity) };
        self.rebuild(new_capacity);
        Ok(())
    }

    /// Replaces the slots with at least `new_capacity` empty ones and re-inserts the live
    /// entries in a single pass
    fn rebuild(&mut self, new_capacity: usize) {
        let new_capacity = migration_capacity(new_capacity, self.size);
        debug!(
            "rebuilding open addressing table: capacity {} -> {new_capacity}, {} live entries",
            self.buckets.len(),
            self.size
        );

        let old_buckets = mem::replace(&mut self.buckets, empty_slots(new_capacity));
        self.size = 0;

        for slot in old_buckets {
            if let Slot::Occupied { key, value } = slot {
                self.insert(key, value);
            }
        }
    }

    /// Rebuilds at the current capacity, dropping every tombstone
    fn purge_tombstones(&mut self) {
        trace!(
            "purging {} tombstones at capacity {}",
            self.buckets.iter().filter(|slot| matches!(slot, Slot::Tombstone { .. })).count(),
            self.buckets.len()
        );
        self.rebuild(self.buckets.len());
    }

    /// Returns the number of slots without a live entry, counting tombstones as empty
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.buckets.iter().filter(|slot| slot.is_vacant()).count()
    }

    /// Clears the table, keeping its capacity
    pub fn clear(&mut self) {
        self.buckets = empty_slots(self.buckets.len());
        self.size = 0;
    }

    /// Returns the current load factor of the table
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn table_load(&self) -> f64 {
        self.size as f64 / self.buckets.len() as f64
    }

    /// Returns the number of live entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Same as [`Self::len`]
    #[must_use]
    pub fn get_size(&self) -> usize {
        self.size
    }

    /// Returns true if the table holds no live entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of slots
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Same as [`Self::capacity`]
    #[must_use]
    pub fn get_capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns an iterator over the live entries in slot order
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { buckets: &self.buckets, index: 0 }
    }

    /// Collects the live entries in slot order
    #[must_use]
    pub fn get_keys_and_values(&self) -> Vec<(String, V)>
    where
        V: Clone,
    {
        self.iter().map(|(key, value)| (key.to_owned(), value.clone())).collect()
    }
}

impl<'a, V> IntoIterator for &'a OpenAddressingMap<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V: fmt::Debug> fmt::Display for OpenAddressingMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, slot) in self.buckets.iter().enumerate() {
            match slot {
                Slot::Empty => writeln!(f, "{index}: None")?,
                Slot::Occupied { key, value } => writeln!(f, "{index}: K: {key} V: {value:?}")?,
                Slot::Tombstone { key } => writeln!(f, "{index}: K: {key} (removed)")?,
            }
        }
        Ok(())
    }
}

/// Iterator over the live entries of an [`OpenAddressingMap`]
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// The slots being walked
    buckets: &'a [Slot<V>],
    /// Next slot to inspect
    index: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(slot) = self.buckets.get(self.index) {
            self.index = self.index.saturating_add(1);
            if let Slot::Occupied { key, value } = slot {
                return Some((key.as_str(), value));
            }
        }
        None
    }
}

impl<V> FusedIterator for Iter<'_, V> {}
