//! String hash functions accepted by the map constructors

/// Hash function signature expected by [`OpenAddressingHashMap`](crate::OpenAddressingHashMap)
/// and [`ChainingHashMap`](crate::ChainingHashMap).
pub type HashFunction = fn(&str) -> usize;

/// Sums the code points of every character in `key`.
///
/// Anagrams collide, which makes this handy for forcing probe sequences in tests.
#[must_use]
pub fn additive_hash(key: &str) -> usize {
    key.chars().fold(0_usize, |hash, ch| hash.wrapping_add(ch as usize))
}

/// Sums each character's code point weighted by its one-based position in `key`
#[must_use]
pub fn positional_hash(key: &str) -> usize {
    key.chars().enumerate().fold(0_usize, |hash, (index, ch)| {
        hash.wrapping_add(index.wrapping_add(1).wrapping_mul(ch as usize))
    })
}
