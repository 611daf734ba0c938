//! # String Hash Maps
//!
//! Two hash map implementations over string keys and prime-sized tables:
//!
//! - `OpenAddressingHashMap`: a flat table resolving collisions by quadratic probing,
//!   with tombstones left behind by removals
//! - `ChainingHashMap`: a flat table of singly linked chains
//!
//! Both take their hash function at construction and round the requested
//! capacity up to a prime with [`next_prime`]. The open addressing map doubles
//! its table to keep the load factor at or below one half; the chaining map
//! only resizes on request.
//!
//! ## Open Addressing
//!
//! ```rust
//! use hashmaps::{OpenAddressingHashMap, additive_hash};
//!
//! let mut map = OpenAddressingHashMap::new(23, additive_hash);
//! map.put("key1", 10);
//! assert_eq!(map.get("key1"), Some(&10));
//! assert!(map.contains_key("key1"));
//!
//! // 30 is not prime, so the table grows to 31 slots
//! map.resize_table(30);
//! assert_eq!(map.get_capacity(), 31);
//! assert_eq!(map.get("key1"), Some(&10));
//!
//! map.remove("key1");
//! assert_eq!(map.get("key1"), None);
//! ```
//!
//! ## Separate Chaining
//!
//! ```rust
//! use hashmaps::{ChainingHashMap, positional_hash};
//!
//! let mut map = ChainingHashMap::new(11, positional_hash);
//! for i in 0..50 {
//!     map.put(i.to_string(), i * 42);
//! }
//!
//! // Chains keep growing; the table does not resize on its own
//! assert_eq!(map.get_capacity(), 11);
//! assert!(map.table_load() > 4.0);
//!
//! // It may even be shrunk below the number of pairs
//! map.resize_table(2);
//! assert_eq!(map.get_capacity(), 2);
//! assert_eq!(map.get("49"), Some(&2058));
//! ```

/// Singly linked list used as a chaining bucket
mod chain;
/// Module implementing the separate chaining map
mod chaining;
/// Error types for rejected operations
mod error;
/// String hash functions
mod hashing;
/// Mode finding on top of the chaining map
mod mode;
/// Module implementing the open addressing map
mod open_addressing;
/// Prime table sizing
mod prime;
/// The contract shared by both maps
mod utils;

pub use chain::Chain;
pub use chaining::{ChainingHashMap, DEFAULT_CAPACITY};
pub use error::ResizeError;
pub use hashing::{HashFunction, additive_hash, positional_hash};
pub use mode::find_mode;
pub use open_addressing::{MAX_LOAD_FACTOR, OpenAddressingHashMap};
pub use prime::{is_prime, next_prime};
pub use utils::StringHashMap;
