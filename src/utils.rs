//! The operations shared by both map variants

use crate::{ChainingHashMap, OpenAddressingHashMap};

/// Common contract of [`OpenAddressingHashMap`] and [`ChainingHashMap`].
///
/// Lets tests, benchmarks and reports drive either variant through the same code.
pub trait StringHashMap<V> {
    /// Inserts or updates `key`, returning the previous value on update
    fn put(&mut self, key: impl Into<String>, value: V) -> Option<V>;

    /// Returns the value stored under `key`
    fn get(&self, key: &str) -> Option<&V>;

    /// Returns true if the map holds `key`
    fn contains_key(&self, key: &str) -> bool;

    /// Removes `key`, returning whether it was present
    fn remove(&mut self, key: &str) -> bool;

    /// Drops every pair without changing the capacity
    fn clear(&mut self);

    /// Rehashes into a table of at least `new_capacity` buckets, ignoring invalid requests
    fn resize_table(&mut self, new_capacity: usize);

    /// Returns `size / capacity`
    fn table_load(&self) -> f64;

    /// Returns the number of buckets holding no pair
    fn empty_buckets(&self) -> usize;

    /// Returns the number of stored pairs
    fn get_size(&self) -> usize;

    /// Returns the number of buckets
    fn get_capacity(&self) -> usize;

    /// Returns a snapshot of every stored pair
    fn get_keys_and_values(&self) -> Vec<(String, V)>
    where
        V: Clone;

    /// Returns true if the map holds no pairs
    fn is_empty(&self) -> bool {
        self.get_size() == 0
    }
}

impl<V> StringHashMap<V> for OpenAddressingHashMap<V> {
    fn put(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        Self::put(self, key, value)
    }

    fn get(&self, key: &str) -> Option<&V> {
        Self::get(self, key)
    }

    fn contains_key(&self, key: &str) -> bool {
        Self::contains_key(self, key)
    }

    fn remove(&mut self, key: &str) -> bool {
        Self::remove(self, key)
    }

    fn clear(&mut self) {
        Self::clear(self);
    }

    fn resize_table(&mut self, new_capacity: usize) {
        Self::resize_table(self, new_capacity);
    }

    fn table_load(&self) -> f64 {
        Self::table_load(self)
    }

    fn empty_buckets(&self) -> usize {
        Self::empty_buckets(self)
    }

    fn get_size(&self) -> usize {
        Self::get_size(self)
    }

    fn get_capacity(&self) -> usize {
        Self::get_capacity(self)
    }

    fn get_keys_and_values(&self) -> Vec<(String, V)>
    where
        V: Clone,
    {
        Self::get_keys_and_values(self)
    }
}

impl<V> StringHashMap<V> for ChainingHashMap<V> {
    fn put(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        Self::put(self, key, value)
    }

    fn get(&self, key: &str) -> Option<&V> {
        Self::get(self, key)
    }

    fn contains_key(&self, key: &str) -> bool {
        Self::contains_key(self, key)
    }

    fn remove(&mut self, key: &str) -> bool {
        Self::remove(self, key).is_some()
    }

    fn clear(&mut self) {
        Self::clear(self);
    }

    fn resize_table(&mut self, new_capacity: usize) {
        Self::resize_table(self, new_capacity);
    }

    fn table_load(&self) -> f64 {
        Self::table_load(self)
    }

    fn empty_buckets(&self) -> usize {
        Self::empty_buckets(self)
    }

    fn get_size(&self) -> usize {
        Self::get_size(self)
    }

    fn get_capacity(&self) -> usize {
        Self::get_capacity(self)
    }

    fn get_keys_and_values(&self) -> Vec<(String, V)>
    where
        V: Clone,
    {
        Self::get_keys_and_values(self)
    }
}
