use std::{fmt, iter, mem};

use log::{debug, trace};

use crate::{
    error::ResizeError,
    hashing::HashFunction,
    prime::{is_prime, next_prime},
};

/// Load factor at which `put` doubles the table before inserting
pub const MAX_LOAD_FACTOR: f64 = 0.5;

/// A key-value pair stored in a slot
#[derive(Debug, Clone)]
struct Entry<V> {
    /// The key in the key-value pair
    key: String,
    /// The value associated with the key
    value: V,
}

/// State of a single table slot
#[derive(Debug, Clone)]
enum Slot<V> {
    /// Never written since the last clear or resize
    Empty,
    /// Holds a live entry
    Occupied(Entry<V>),
    /// Holds a removed entry; probe sequences continue past it
    Tombstone(Entry<V>),
}

/// Outcome of walking the probe sequence for a key
enum Probe {
    /// A live entry with the key sits at this index
    Found(usize),
    /// The key is absent; this is the first reusable slot on its sequence
    Vacant(usize),
    /// The key is absent and every slot on its sequence is live
    Full,
}

/// Quadratic probe sequence `(start + j * j) mod capacity` for `j` in `0..capacity`.
///
/// Successive squares differ by `2j + 1`, so each index is derived from the
/// previous one and never leaves `0..capacity`.
#[derive(Debug)]
struct QuadraticProbe {
    /// Next index to yield
    index: usize,
    /// Probe number `j` of the next index
    step: usize,
    /// Table length
    capacity: usize,
}

impl QuadraticProbe {
    /// Starts a sequence at `hash mod capacity`
    fn new(hash: usize, capacity: usize) -> Self {
        Self { index: hash.checked_rem(capacity).unwrap_or(0), step: 0, capacity }
    }
}

impl Iterator for QuadraticProbe {
    type Item = usize;

    #[allow(clippy::arithmetic_side_effects)]
    fn next(&mut self) -> Option<usize> {
        if self.step >= self.capacity {
            return None;
        }
        let current = self.index;
        let offset = (2 * self.step + 1) % self.capacity;
        self.index = (self.index + offset) % self.capacity;
        self.step += 1;
        Some(current)
    }
}

/// A string-keyed hash map resolving collisions by quadratic probing.
///
/// The table length is always prime and the load factor is kept at or below
/// [`MAX_LOAD_FACTOR`] after every insertion, which guarantees that the probe
/// sequence of a new key reaches a free slot. Removed entries stay behind as
/// tombstones so that the probe sequences passing through them stay intact.
///
/// Note: This implementation is not thread-safe.
#[derive(Clone)]
pub struct OpenAddressingHashMap<V> {
    /// The slots of the table
    buckets: Vec<Slot<V>>,
    /// Number of live entries
    size: usize,
    /// Maps a key to the start of its probe sequence
    hash_function: HashFunction,
}

impl<V> OpenAddressingHashMap<V> {
    /// Creates an empty map with `next_prime(capacity)` slots
    #[must_use]
    pub fn new(capacity: usize, hash_function: HashFunction) -> Self {
        Self { buckets: Self::empty_table(next_prime(capacity)), size: 0, hash_function }
    }

    /// Allocates `capacity` empty slots
    fn empty_table(capacity: usize) -> Vec<Slot<V>> {
        iter::repeat_with(|| Slot::Empty).take(capacity).collect()
    }

    /// Returns the probe sequence for `key` in the current table
    fn probe_sequence(&self, key: &str) -> QuadraticProbe {
        QuadraticProbe::new((self.hash_function)(key), self.buckets.len())
    }

    /// Walks the probe sequence for `key`, remembering the first tombstone passed
    fn probe(&self, key: &str) -> Probe {
        let mut first_tombstone = None;

        for index in self.probe_sequence(key) {
            match self.buckets.get(index) {
                None | Some(Slot::Empty) => {
                    return Probe::Vacant(first_tombstone.unwrap_or(index));
                }
                Some(Slot::Tombstone(_)) => {
                    if first_tombstone.is_none() {
                        first_tombstone = Some(index);
                    }
                }
                Some(Slot::Occupied(entry)) if entry.key == key => return Probe::Found(index),
                Some(Slot::Occupied(_)) => {}
            }
        }

        first_tombstone.map_or(Probe::Full, Probe::Vacant)
    }

    /// Returns true if storing `key` requires doubling the table first.
    ///
    /// That is the case once the load factor has reached [`MAX_LOAD_FACTOR`], or
    /// when inserting a new key would push it past that bound.
    #[allow(clippy::cast_precision_loss)]
    fn needs_growth(&self, key: &str) -> bool {
        if self.table_load() >= MAX_LOAD_FACTOR {
            return true;
        }
        let grown = self.size.saturating_add(1) as f64 / self.buckets.len() as f64;
        grown > MAX_LOAD_FACTOR && !self.contains_key(key)
    }

    /// Inserts or updates `key`, returning the previous value on update.
    ///
    /// The table is rebuilt at the next prime past twice its capacity before the
    /// write whenever the load factor has reached [`MAX_LOAD_FACTOR`] or a new key
    /// would push it past that bound.
    pub fn put(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        if self.needs_growth(&key) {
            self.resize_table(self.get_capacity().saturating_mul(2));
        }

        match self.probe(&key) {
            Probe::Found(index) => match self.buckets.get_mut(index) {
                Some(Slot::Occupied(entry)) => Some(mem::replace(&mut entry.value, value)),
                _ => None,
            },
            Probe::Vacant(index) => {
                if let Some(slot) = self.buckets.get_mut(index) {
                    *slot = Slot::Occupied(Entry { key, value });
                    self.size = self.size.saturating_add(1);
                }
                None
            }
            Probe::Full => {
                // The load bound leaves a reusable slot on every probe sequence
                self.resize_table(self.get_capacity().saturating_mul(2));
                self.put(key, value)
            }
        }
    }

    /// Retrieve a value for a given key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        match self.probe(key) {
            Probe::Found(index) => match self.buckets.get(index) {
                Some(Slot::Occupied(entry)) => Some(&entry.value),
                _ => None,
            },
            Probe::Vacant(_) | Probe::Full => None,
        }
    }

    /// Get a mutable reference to a value for a given key
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        match self.probe(key) {
            Probe::Found(index) => match self.buckets.get_mut(index) {
                Some(Slot::Occupied(entry)) => Some(&mut entry.value),
                _ => None,
            },
            Probe::Vacant(_) | Probe::Full => None,
        }
    }

    /// Returns true if a live entry for `key` is reachable
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        if self.size == 0 {
            return false;
        }
        matches!(self.probe(key), Probe::Found(_))
    }

    /// Tombstones the entry for `key`. Returns false if the key was absent.
    pub fn remove(&mut self, key: &str) -> bool {
        if self.size == 0 {
            return false;
        }
        let Probe::Found(index) = self.probe(key) else {
            return false;
        };
        let Some(slot) = self.buckets.get_mut(index) else {
            return false;
        };

        *slot = match mem::replace(slot, Slot::Empty) {
            Slot::Occupied(entry) => Slot::Tombstone(entry),
            other => other,
        };
        self.size = self.size.saturating_sub(1);
        trace!("tombstoned slot {index} for key {key:?}");
        true
    }

    /// Empties every slot, keeping the current capacity
    pub fn clear(&mut self) {
        self.buckets = Self::empty_table(self.buckets.len());
        self.size = 0;
    }

    /// Rehashes every live entry into a table of `new_capacity` slots.
    ///
    /// Requests below the live entry count are ignored; use
    /// [`try_resize_table`](Self::try_resize_table) to observe the refusal.
    pub fn resize_table(&mut self, new_capacity: usize) {
        if let Err(err) = self.try_resize_table(new_capacity) {
            debug!("ignoring resize request: {err}");
        }
    }

    /// Rehashes every live entry into a table of `new_capacity` slots, rounded up to a prime.
    ///
    /// Returns the capacity the table ends up with. Re-inserting goes through
    /// [`put`](Self::put), so a target smaller than twice the live count grows
    /// again on the way.
    ///
    /// # Errors
    ///
    /// [`ResizeError::BelowSize`] if `new_capacity` is smaller than the number of live entries.
    pub fn try_resize_table(&mut self, new_capacity: usize) -> Result<usize, ResizeError> {
        if new_capacity < self.size {
            return Err(ResizeError::BelowSize { requested: new_capacity, size: self.size });
        }
        let new_capacity =
            if is_prime(new_capacity) { new_capacity } else { next_prime(new_capacity) };

        let old_capacity = self.buckets.len();
        let old_buckets = mem::replace(&mut self.buckets, Self::empty_table(new_capacity));
        let rehashed = self.size;
        self.size = 0;

        for slot in old_buckets {
            if let Slot::Occupied(Entry { key, value }) = slot {
                self.put(key, value);
            }
        }

        debug!(
            "resized open addressing table from {old_capacity} to {} slots, rehashed {rehashed} entries",
            self.buckets.len()
        );
        Ok(self.buckets.len())
    }

    /// Returns the current load factor of the table
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn table_load(&self) -> f64 {
        self.size as f64 / self.buckets.len() as f64
    }

    /// Returns the number of slots not holding a live entry
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.buckets.len().saturating_sub(self.size)
    }

    /// Returns the number of live entries
    #[must_use]
    pub fn get_size(&self) -> usize {
        self.size
    }

    /// Returns the number of slots in the table
    #[must_use]
    pub fn get_capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns true if the map holds no live entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns an iterator over the live pairs in slot order
    #[must_use]
    #[allow(clippy::iter_without_into_iter)]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { slots: self.buckets.iter() }
    }

    /// Returns a snapshot of the live pairs in slot order
    #[must_use]
    pub fn get_keys_and_values(&self) -> Vec<(String, V)>
    where
        V: Clone,
    {
        self.iter().map(|(key, value)| (key.to_owned(), value.clone())).collect()
    }
}

impl<K, V> Extend<(K, V)> for OpenAddressingHashMap<V>
where
    K: Into<String>,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for OpenAddressingHashMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V: fmt::Display> fmt::Display for OpenAddressingHashMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, slot) in self.buckets.iter().enumerate() {
            match slot {
                Slot::Empty => writeln!(f, "{index}: None")?,
                Slot::Occupied(Entry { key, value }) => writeln!(f, "{index}: {key}: {value}")?,
                Slot::Tombstone(Entry { key, value }) => {
                    writeln!(f, "{index}: {key}: {value} (tombstone)")?;
                }
            }
        }
        Ok(())
    }
}

/// Iterator over the live pairs of an [`OpenAddressingHashMap`]
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// Remaining slots
    slots: std::slice::Iter<'a, Slot<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.slots.by_ref().find_map(|slot| match slot {
            Slot::Occupied(entry) => Some((entry.key.as_str(), &entry.value)),
            Slot::Empty | Slot::Tombstone(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashing::{additive_hash, positional_hash};

    fn sorted_pairs<V: Clone + Ord>(map: &OpenAddressingHashMap<V>) -> Vec<(String, V)> {
        let mut pairs = map.get_keys_and_values();
        pairs.sort();
        pairs
    }

    #[test]
    fn test_capacity_is_prime() {
        assert_eq!(OpenAddressingHashMap::<i32>::new(11, additive_hash).get_capacity(), 11);
        assert_eq!(OpenAddressingHashMap::<i32>::new(23, additive_hash).get_capacity(), 23);
        assert_eq!(OpenAddressingHashMap::<i32>::new(4, additive_hash).get_capacity(), 5);
        assert_eq!(OpenAddressingHashMap::<i32>::new(0, additive_hash).get_capacity(), 3);
    }

    #[test]
    fn test_probe_sequence_is_quadratic() {
        let indices: Vec<usize> = QuadraticProbe::new(3, 11).take(5).collect();
        // 3 + 0, 3 + 1, 3 + 4, 3 + 9, 3 + 16 modulo 11
        assert_eq!(indices, vec![3, 4, 7, 1, 8]);
        assert_eq!(QuadraticProbe::new(0, 7).count(), 7);
    }

    #[test]
    fn test_put_and_get() {
        let mut map = OpenAddressingHashMap::new(31, additive_hash);
        assert_eq!(map.get("key"), None);
        assert_eq!(map.put("key1", 10), None);
        assert_eq!(map.get("key1"), Some(&10));
        assert_eq!(map.get_size(), 1);
    }

    #[test]
    fn test_update_keeps_size() {
        let mut map = OpenAddressingHashMap::new(101, additive_hash);
        map.put("key1", 10);
        map.put("key2", 20);
        assert_eq!(map.put("key1", 30), Some(10));
        assert_eq!(map.get_size(), 2);
        assert_eq!(map.get("key1"), Some(&30));
        assert!((map.table_load() - 2.0 / 101.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_resize_rounds_to_prime() {
        let mut map = OpenAddressingHashMap::new(23, additive_hash);
        map.put("key1", 10);
        assert_eq!(map.get_size(), 1);
        assert_eq!(map.get_capacity(), 23);
        assert_eq!(map.get("key1"), Some(&10));
        assert!(map.contains_key("key1"));

        map.resize_table(30);
        assert_eq!(map.get_size(), 1);
        assert_eq!(map.get_capacity(), 31);
        assert_eq!(map.get("key1"), Some(&10));
        assert!(map.contains_key("key1"));
    }

    #[test]
    fn test_resize_below_size_is_ignored() {
        let mut map = OpenAddressingHashMap::new(11, positional_hash);
        for i in 1..6 {
            map.put(i.to_string(), (i * 10).to_string());
        }
        let before = sorted_pairs(&map);

        map.resize_table(2);
        assert_eq!(map.get_capacity(), 11);
        assert_eq!(
            map.try_resize_table(4),
            Err(ResizeError::BelowSize { requested: 4, size: 5 })
        );
        assert_eq!(sorted_pairs(&map), before);
    }

    #[test]
    fn test_resize_to_live_count_regrows() {
        let mut map = OpenAddressingHashMap::new(11, positional_hash);
        for i in 1..6 {
            map.put(i.to_string(), i);
        }
        map.put("20", 200);
        map.remove("1");
        let before = sorted_pairs(&map);

        assert_eq!(map.try_resize_table(5).map(is_prime), Ok(true));
        assert!(map.table_load() <= MAX_LOAD_FACTOR);
        assert_eq!(sorted_pairs(&map), before);
    }

    #[test]
    fn test_load_stays_at_or_below_half() {
        let mut map = OpenAddressingHashMap::new(53, additive_hash);
        for i in 0..150 {
            map.put(format!("str{i}"), i * 100);
            assert!(map.table_load() <= MAX_LOAD_FACTOR);
            assert!(is_prime(map.get_capacity()));
            assert_eq!(map.empty_buckets(), map.get_capacity() - map.get_size());
        }
        assert_eq!(map.get_size(), 150);
        for i in 0..150 {
            assert_eq!(map.get(&format!("str{i}")), Some(&(i * 100)));
        }
    }

    #[test]
    fn test_doubling_before_insert() {
        let mut map = OpenAddressingHashMap::new(5, additive_hash);
        map.put("a", 1);
        map.put("b", 2);
        assert_eq!(map.get_capacity(), 5);
        // a third key would load 3/5, so the table is rebuilt at next_prime(10) first
        map.put("c", 3);
        assert_eq!(map.get_capacity(), 11);
        assert_eq!(map.get_size(), 3);
        assert_eq!(map.get("a"), Some(&1));
    }

    #[test]
    fn test_update_at_half_load_grows() {
        let mut map = OpenAddressingHashMap::new(4, additive_hash);
        map.put("a", 1);
        map.put("b", 2);
        assert_eq!(map.get_capacity(), 5);
        map.put("a", 10);
        assert_eq!(map.get_capacity(), 5);

        let mut map = OpenAddressingHashMap::new(2, additive_hash);
        map.resize_table(2);
        map.put("a", 1);
        assert_eq!(map.get_capacity(), 2);
        // load is already 1/2, so even an update grows the table
        assert_eq!(map.put("a", 2), Some(1));
        assert_eq!(map.get_capacity(), 5);
    }

    #[test]
    fn test_tombstone_keeps_probe_chain() {
        let mut map = OpenAddressingHashMap::new(11, additive_hash);
        // anagrams share a home slot under the additive hash
        map.put("ab", 1);
        map.put("ba", 2);
        assert!(map.remove("ab"));
        assert!(map.contains_key("ba"));
        assert_eq!(map.get("ba"), Some(&2));
        assert!(!map.contains_key("ab"));
        assert_eq!(map.get("ab"), None);
    }

    #[test]
    fn test_tombstone_is_reused() {
        let mut map = OpenAddressingHashMap::new(11, additive_hash);
        map.put("ab", 1);
        map.put("ba", 2);
        map.remove("ab");
        assert_eq!(map.empty_buckets(), 10);

        map.put("ab", 3);
        assert_eq!(map.get("ab"), Some(&3));
        assert_eq!(map.get("ba"), Some(&2));
        assert_eq!(map.get_size(), 2);
        let first = map.iter().next();
        assert_eq!(first, Some(("ab", &3)));
    }

    #[test]
    fn test_update_behind_tombstone_does_not_duplicate() {
        let mut map = OpenAddressingHashMap::new(11, additive_hash);
        map.put("abc", 1);
        map.put("bca", 2);
        map.put("cab", 3);
        map.remove("abc");

        assert_eq!(map.put("cab", 30), Some(3));
        assert_eq!(map.get_size(), 2);
        assert_eq!(map.iter().filter(|&(key, _)| key == "cab").count(), 1);
    }

    #[test]
    fn test_remove() {
        let mut map = OpenAddressingHashMap::new(53, additive_hash);
        assert!(!map.remove("key4"));
        map.put("key1", 10);
        assert!(map.remove("key1"));
        assert_eq!(map.get("key1"), None);
        assert!(!map.remove("key1"));
        assert_eq!(map.get_size(), 0);
    }

    #[test]
    fn test_contains_key() {
        let mut map = OpenAddressingHashMap::new(11, additive_hash);
        assert!(!map.contains_key("key1"));
        map.put("key1", 10);
        map.put("key2", 20);
        map.put("key3", 30);
        assert!(map.contains_key("key1"));
        assert!(!map.contains_key("key4"));
        assert!(map.contains_key("key2"));
        assert!(map.contains_key("key3"));
        map.remove("key3");
        assert!(!map.contains_key("key3"));
    }

    #[test]
    fn test_lookup_terminates_without_empty_slots() {
        let mut map = OpenAddressingHashMap::new(3, additive_hash);
        map.put("a", 1);
        map.remove("a");
        map.put("b", 2);
        map.remove("b");
        map.put("c", 3);
        // slots are now [c, tombstone, tombstone]; lookups must still finish
        assert!(!map.contains_key("zz"));
        assert_eq!(map.get("zz"), None);
        assert_eq!(map.get("c"), Some(&3));
    }

    #[test]
    fn test_clear() {
        let mut map = OpenAddressingHashMap::new(53, additive_hash);
        map.put("key1", 10);
        map.put("key2", 20);
        map.resize_table(100);
        assert_eq!(map.get_capacity(), 101);

        map.clear();
        assert_eq!(map.get_size(), 0);
        assert_eq!(map.get_capacity(), 101);
        assert!(map.is_empty());
        assert_eq!(map.get("key1"), None);
        assert_eq!(map.empty_buckets(), 101);
    }

    #[test]
    fn test_get_keys_and_values_skips_tombstones() {
        let mut map = OpenAddressingHashMap::new(11, positional_hash);
        map.extend([("1", 10), ("2", 20), ("3", 30)]);
        map.remove("2");
        assert_eq!(
            sorted_pairs(&map),
            vec![("1".to_string(), 10), ("3".to_string(), 30)]
        );
    }

    #[test]
    fn test_get_mut() {
        let mut map = OpenAddressingHashMap::new(11, additive_hash);
        map.put("key1", 1);
        if let Some(value) = map.get_mut("key1") {
            *value += 10;
        }
        assert_eq!(map.get("key1"), Some(&11));
        assert_eq!(map.get_mut("missing"), None);
    }

    #[test]
    fn test_display_marks_tombstones() {
        let mut map = OpenAddressingHashMap::new(3, additive_hash);
        map.put("a", 1);
        map.remove("a");
        // 'a' is 97, and 97 mod 3 is 1
        assert_eq!(map.to_string(), "0: None\n1: a: 1 (tombstone)\n2: None\n");
    }
}
