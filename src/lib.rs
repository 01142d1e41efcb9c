//! # Prime Table
//!
//! Hash tables over string keys with prime capacities and a pluggable hash function.
//!
//! This crate provides two interchangeable implementations:
//!
//! - `OpenAddressingMap`: quadratic probing with tombstones, grows at a load factor of 0.5
//! - `ChainingMap`: separate chaining with one chain per bucket, grows at a load factor of 1.0
//!
//! Both keep their capacity prime, rebuild every live entry on resize and expose the same
//! `put`/`get`/`contains_key`/`remove`/`resize_table`/`clear` surface. `find_mode` is a small
//! frequency counter built on `ChainingMap`.
//!
//! ## Basic Usage
//!
//! ```rust
//! use primetable::{OpenAddressingMap, hash_function_1};
//!
//! // Capacity requests are rounded up to a prime
//! let mut map = OpenAddressingMap::new(20, hash_function_1);
//! assert_eq!(map.capacity(), 23);
//!
//! // Insert values
//! map.put("apple", 1);
//! map.put("banana", 2);
//!
//! // Retrieve values
//! assert_eq!(map.get("apple"), Some(&1));
//!
//! // Update values
//! map.put("apple", 10);
//! assert_eq!(map.get("apple"), Some(&10));
//!
//! // Remove values
//! map.remove("apple");
//! assert_eq!(map.get("apple"), None);
//!
//! // Rebuild with a larger capacity
//! map.resize_table(30);
//! assert_eq!(map.capacity(), 31);
//! assert_eq!(map.get("banana"), Some(&2));
//! ```
//!
//! ## Separate Chaining
//!
//! ```rust
//! use primetable::{ChainingMap, hash_function_2};
//!
//! let mut map = ChainingMap::new(3, hash_function_2);
//! for i in 0..10 {
//!     map.put(format!("key{i}"), i);
//! }
//!
//! assert_eq!(map.len(), 10);
//! assert!(map.table_load() <= 1.0);
//! assert_eq!(map.get_keys_and_values().len(), 10);
//! ```

/// Per-bucket entry chains for the chaining table
mod chain;
/// Module implementing the separate chaining hash table
mod chaining;
/// Error type for refused capacity changes
mod error;
/// Hash functions for string keys
mod hash;
/// Frequency counting on top of the chaining table
mod mode;
/// Module implementing the quadratic probing hash table
mod open_addressing;
/// Prime capacity helpers
mod prime;

pub use chaining::{CHAINING_MAX_LOAD, ChainingMap, Iter as ChainingIter};
pub use error::TableError;
pub use hash::{HashFunction, hash_function_1, hash_function_2, std_hash};
pub use mode::find_mode;
pub use open_addressing::{Iter as OpenAddressingIter, OPEN_ADDRESSING_MAX_LOAD, OpenAddressingMap};
pub use prime::{is_prime, next_prime};
