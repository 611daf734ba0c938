//! Singly linked list of key-value nodes used as a bucket by [`ChainingHashMap`](crate::ChainingHashMap)

use std::fmt;

/// A node in a [`Chain`]
#[derive(Debug)]
struct Node<V> {
    /// The key stored in this node
    key: String,
    /// The value associated with the key
    value: V,
    /// The following node, if any
    next: Option<Box<Node<V>>>,
}

/// A singly linked list of key-value pairs.
///
/// New pairs are prepended, so iteration yields the most recently inserted pair first.
pub struct Chain<V> {
    /// First node of the list
    head: Option<Box<Node<V>>>,
    /// Number of nodes in the list
    len: usize,
}

impl<V> Default for Chain<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Chain<V> {
    /// Creates an empty chain
    #[must_use]
    pub const fn new() -> Self {
        Self { head: None, len: 0 }
    }

    /// Returns the number of pairs in the chain
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the chain holds no pairs
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Prepends a pair without checking whether `key` is already present
    pub fn insert(&mut self, key: String, value: V) {
        let node = Box::new(Node { key, value, next: self.head.take() });
        self.head = Some(node);
        self.len = self.len.saturating_add(1);
    }

    /// Returns the value stored under `key`
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&V> {
        self.iter().find(|&(k, _)| k == key).map(|(_, value)| value)
    }

    /// Returns a mutable reference to the value stored under `key`
    pub fn find_mut(&mut self, key: &str) -> Option<&mut V> {
        let mut current = self.head.as_deref_mut();
        while let Some(node) = current {
            if node.key == key {
                return Some(&mut node.value);
            }
            current = node.next.as_deref_mut();
        }
        None
    }

    /// Unlinks the first node holding `key` and returns its value
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let mut link = &mut self.head;
        while link.as_ref().is_some_and(|node| node.key != key) {
            link = &mut link.as_mut()?.next;
        }

        let node = link.take()?;
        let Node { value, next, .. } = *node;
        *link = next;
        self.len = self.len.saturating_sub(1);
        Some(value)
    }

    /// Detaches and returns the first pair
    pub fn pop(&mut self) -> Option<(String, V)> {
        let node = self.head.take()?;
        let Node { key, value, next } = *node;
        self.head = next;
        self.len = self.len.saturating_sub(1);
        Some((key, value))
    }

    /// Returns an iterator over the pairs, head first
    #[must_use]
    #[allow(clippy::iter_without_into_iter)]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { current: self.head.as_deref() }
    }
}

impl<V> Drop for Chain<V> {
    fn drop(&mut self) {
        let mut current = self.head.take();
        while let Some(mut node) = current {
            current = node.next.take();
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for Chain<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V: fmt::Display> fmt::Display for Chain<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (key, value) in self.iter() {
            if !first {
                f.write_str(" -> ")?;
            }
            write!(f, "({key}: {value})")?;
            first = false;
        }
        Ok(())
    }
}

impl<V> IntoIterator for Chain<V> {
    type Item = (String, V);
    type IntoIter = IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { chain: self }
    }
}

/// Borrowing iterator over the pairs of a [`Chain`]
#[derive(Debug)]
pub struct Iter<'a, V> {
    /// Node to yield next
    current: Option<&'a Node<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.current.take()?;
        self.current = node.next.as_deref();
        Some((node.key.as_str(), &node.value))
    }
}

/// Consuming iterator over the pairs of a [`Chain`]
#[derive(Debug)]
pub struct IntoIter<V> {
    /// The chain being drained
    chain: Chain<V>,
}

impl<V> Iterator for IntoIter<V> {
    type Item = (String, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.chain.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.chain.len(), Some(self.chain.len()))
    }
}
