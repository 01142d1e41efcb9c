//! Pluggable hash functions for string keys
//!
//! A table takes a plain function pointer at construction and re-applies it to every
//! live key whenever it rebuilds, so a hash function only has to be deterministic for
//! the lifetime of one table.

use std::hash::{DefaultHasher, Hash, Hasher};

/// Signature of the hash functions accepted by the tables
pub type HashFunction = fn(&str) -> u64;

/// Sums the code points of the key's characters.
///
/// Anagrams collide, which makes it handy for exercising collision paths.
#[must_use]
pub fn hash_function_1(key: &str) -> u64 {
    key.chars().fold(0u64, |hash, c| hash.wrapping_add(u64::from(c)))
}

/// Sums each character's code point weighted by its one-based position.
#[must_use]
pub fn hash_function_2(key: &str) -> u64 {
    key.chars().zip(1u64..).fold(0u64, |hash, (c, position)| {
        hash.wrapping_add(position.wrapping_mul(u64::from(c)))
    })
}

/// Hashes the key with the standard library's `DefaultHasher` using its fixed keys.
#[must_use]
pub fn std_hash(key: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    hasher.finish()
}
