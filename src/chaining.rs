use std::{fmt, mem};

use log::debug;

use crate::{
    chain::{self, Chain},
    error::ResizeError,
    hashing::{HashFunction, additive_hash},
    prime::{is_prime, next_prime},
};

/// Number of buckets of a map built with [`ChainingHashMap::default`]
pub const DEFAULT_CAPACITY: usize = 11;

/// A string-keyed hash map resolving collisions by separate chaining.
///
/// Every bucket owns a [`Chain`] of the pairs hashing to it. There is no load
/// factor ceiling: the table only changes size through [`resize_table`](Self::resize_table),
/// which may even shrink it below the number of stored pairs.
pub struct ChainingHashMap<V> {
    /// The chains, one per bucket
    buckets: Vec<Chain<V>>,
    /// Number of stored pairs
    size: usize,
    /// Selects the bucket of a key
    hash_function: HashFunction,
}

impl<V> Default for ChainingHashMap<V> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, additive_hash)
    }
}

impl<V> ChainingHashMap<V> {
    /// Creates an empty map with `next_prime(capacity)` buckets
    #[must_use]
    pub fn new(capacity: usize, hash_function: HashFunction) -> Self {
        Self { buckets: Self::empty_table(next_prime(capacity)), size: 0, hash_function }
    }

    /// Allocates `capacity` empty chains
    fn empty_table(capacity: usize) -> Vec<Chain<V>> {
        (0..capacity).map(|_| Chain::new()).collect()
    }

    /// Gets the bucket index for a key
    fn bucket_index(&self, key: &str) -> usize {
        (self.hash_function)(key).checked_rem(self.buckets.len()).unwrap_or(0)
    }

    /// Returns the chain `key` hashes to
    fn chain(&self, key: &str) -> Option<&Chain<V>> {
        self.buckets.get(self.bucket_index(key))
    }

    /// Returns the chain `key` hashes to, mutably
    fn chain_mut(&mut self, key: &str) -> Option<&mut Chain<V>> {
        let index = self.bucket_index(key);
        self.buckets.get_mut(index)
    }

    /// Inserts or updates `key`, returning the previous value on update.
    ///
    /// An existing pair is updated in place; a new pair is prepended to its chain.
    pub fn put(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        let chain = self.chain_mut(&key)?;

        if let Some(existing) = chain.find_mut(&key) {
            return Some(mem::replace(existing, value));
        }

        chain.insert(key, value);
        self.size = self.size.saturating_add(1);
        None
    }

    /// Retrieve a value for a given key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.chain(key)?.find(key)
    }

    /// Get a mutable reference to a value for a given key
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.chain_mut(key)?.find_mut(key)
    }

    /// Returns true if the map holds `key`
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        if self.size == 0 {
            return false;
        }
        self.get(key).is_some()
    }

    /// Unlinks the pair for `key` and returns its value
    pub fn remove(&mut self, key: &str) -> Option<V> {
        if self.size == 0 {
            return None;
        }
        let value = self.chain_mut(key)?.remove(key)?;
        self.size = self.size.saturating_sub(1);
        Some(value)
    }

    /// Empties every chain, keeping the current capacity
    pub fn clear(&mut self) {
        self.buckets = Self::empty_table(self.buckets.len());
        self.size = 0;
    }

    /// Rehashes every pair into a table of `new_capacity` buckets.
    ///
    /// A request for zero buckets is ignored; use
    /// [`try_resize_table`](Self::try_resize_table) to observe the refusal.
    pub fn resize_table(&mut self, new_capacity: usize) {
        if let Err(err) = self.try_resize_table(new_capacity) {
            debug!("ignoring resize request: {err}");
        }
    }

    /// Rehashes every pair into a table of `new_capacity` buckets, rounded up to a prime.
    ///
    /// The new capacity may be smaller than the number of stored pairs.
    /// Returns the capacity the table ends up with.
    ///
    /// # Errors
    ///
    /// [`ResizeError::ZeroCapacity`] if `new_capacity` is zero.
    pub fn try_resize_table(&mut self, new_capacity: usize) -> Result<usize, ResizeError> {
        if new_capacity < 1 {
            return Err(ResizeError::ZeroCapacity);
        }
        let new_capacity =
            if is_prime(new_capacity) { new_capacity } else { next_prime(new_capacity) };

        let old_capacity = self.buckets.len();
        let old_buckets = mem::replace(&mut self.buckets, Self::empty_table(new_capacity));
        self.size = 0;

        for (key, value) in old_buckets.into_iter().flatten() {
            self.put(key, value);
        }

        debug!(
            "resized chaining table from {old_capacity} to {new_capacity} buckets, rehashed {} entries",
            self.size
        );
        Ok(new_capacity)
    }

    /// Returns the current load factor of the table
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn table_load(&self) -> f64 {
        self.size as f64 / self.buckets.len() as f64
    }

    /// Returns the number of buckets whose chain is empty
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.buckets.iter().filter(|chain| chain.is_empty()).count()
    }

    /// Returns the number of stored pairs
    #[must_use]
    pub fn get_size(&self) -> usize {
        self.size
    }

    /// Returns the number of buckets in the table
    #[must_use]
    pub fn get_capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns true if the map holds no pairs
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns an iterator over the pairs, bucket by bucket, each chain head first
    #[must_use]
    #[allow(clippy::iter_without_into_iter)]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { buckets: self.buckets.iter(), chain: None }
    }

    /// Returns a snapshot of the pairs in bucket order, then chain order
    #[must_use]
    pub fn get_keys_and_values(&self) -> Vec<(String, V)>
    where
        V: Clone,
    {
        self.iter().map(|(key, value)| (key.to_owned(), value.clone())).collect()
    }
}

impl<K, V> Extend<(K, V)> for ChainingHashMap<V>
where
    K: Into<String>,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for ChainingHashMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V: fmt::Display> fmt::Display for ChainingHashMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, chain) in self.buckets.iter().enumerate() {
            writeln!(f, "{index}: {chain}")?;
        }
        Ok(())
    }
}

/// Iterator over the pairs of a [`ChainingHashMap`]
#[derive(Debug)]
pub struct Iter<'a, V> {
    /// Buckets not yet visited
    buckets: std::slice::Iter<'a, Chain<V>>,
    /// Chain currently being walked
    chain: Option<chain::Iter<'a, V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(pair) = self.chain.as_mut().and_then(|chain| chain.next()) {
                return Some(pair);
            }
            self.chain = Some(self.buckets.next()?.iter());
        }
    }
}
