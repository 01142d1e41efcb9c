//! Checks both tables against `std::collections::HashMap` on random operation sequences

use std::collections::HashMap;

use primetable::{
    ChainingMap, HashFunction, OpenAddressingMap, hash_function_1, hash_function_2, is_prime,
    std_hash,
};
use proptest::prelude::*;

/// One step applied to both a table and the `HashMap` model
#[derive(Debug, Clone)]
enum Op {
    /// Insert or update a key
    Put(String, u32),
    /// Remove a key
    Remove(String),
    /// Request a new capacity
    Resize(usize),
    /// Drop every entry
    Clear,
}

/// Random operations over a small key alphabet so keys collide and repeat
fn op_strategy() -> impl Strategy<Value = Op> {
    let key = "[a-f]{1,3}";
    prop_oneof![
        8 => (key, any::<u32>()).prop_map(|(key, value)| Op::Put(key, value)),
        4 => key.prop_map(Op::Remove),
        1 => (0usize..128).prop_map(Op::Resize),
        1 => Just(Op::Clear),
    ]
}

/// Picks one of the crate's hash functions
fn hash_strategy() -> impl Strategy<Value = HashFunction> {
    prop_oneof![
        Just::<HashFunction>(hash_function_1),
        Just::<HashFunction>(hash_function_2),
        Just::<HashFunction>(std_hash),
    ]
}

/// Keys the strategy can produce, checked after every step
fn watched_keys() -> Vec<String> {
    ["a", "b", "ab", "ba", "fed", "def", "ccc", "zz"].into_iter().map(String::from).collect()
}

proptest! {
    #[test]
    fn open_addressing_matches_std(
        ops in prop::collection::vec(op_strategy(), 0..300),
        capacity in 0usize..40,
        hash_function in hash_strategy(),
    ) {
        let mut map = OpenAddressingMap::new(capacity, hash_function);
        let mut model: HashMap<String, u32> = HashMap::new();

        for op in ops {
            match op {
                Op::Put(key, value) => {
                    prop_assert_eq!(map.put(key.clone(), value), model.insert(key, value));
                    prop_assert!(map.table_load() < 1.0);
                }
                Op::Remove(key) => {
                    prop_assert_eq!(map.remove(&key), model.remove(&key));
                    prop_assert_eq!(map.get(&key), None);
                }
                Op::Resize(new_capacity) => {
                    let before = map.capacity();
                    map.resize_table(new_capacity);
                    if new_capacity < model.len() {
                        prop_assert_eq!(map.capacity(), before);
                    } else {
                        prop_assert!(map.capacity() >= new_capacity);
                    }
                }
                Op::Clear => {
                    let before = map.capacity();
                    map.clear();
                    model.clear();
                    prop_assert_eq!(map.capacity(), before);
                }
            }

            prop_assert_eq!(map.len(), model.len());
            prop_assert!(is_prime(map.capacity()));
            prop_assert!((map.table_load() - map.len() as f64 / map.capacity() as f64).abs() < 1e-12);
            prop_assert_eq!(map.empty_buckets(), map.capacity() - map.len());
            for (key, value) in &model {
                prop_assert_eq!(map.get(key), Some(value));
            }
            for key in watched_keys() {
                prop_assert_eq!(map.contains_key(&key), model.contains_key(&key));
            }
        }

        let mut entries = map.get_keys_and_values();
        entries.sort();
        let mut expected: Vec<(String, u32)> = model.into_iter().collect();
        expected.sort();
        prop_assert_eq!(entries, expected);
    }

    #[test]
    fn chaining_matches_std(
        ops in prop::collection::vec(op_strategy(), 0..300),
        capacity in 0usize..40,
        hash_function in hash_strategy(),
    ) {
        let mut map = ChainingMap::new(capacity, hash_function);
        let mut model: HashMap<String, u32> = HashMap::new();

        for op in ops {
            match op {
                Op::Put(key, value) => {
                    prop_assert_eq!(map.put(key.clone(), value), model.insert(key, value));
                    prop_assert!(map.table_load() <= 1.0);
                }
                Op::Remove(key) => {
                    prop_assert_eq!(map.remove(&key), model.remove(&key));
                    prop_assert_eq!(map.get(&key), None);
                }
                Op::Resize(new_capacity) => {
                    let before = map.capacity();
                    map.resize_table(new_capacity);
                    if new_capacity == 0 {
                        prop_assert_eq!(map.capacity(), before);
                    }
                }
                Op::Clear => {
                    let before = map.capacity();
                    map.clear();
                    model.clear();
                    prop_assert_eq!(map.capacity(), before);
                }
            }

            prop_assert_eq!(map.len(), model.len());
            prop_assert!(is_prime(map.capacity()));
            for (key, value) in &model {
                prop_assert_eq!(map.get(key), Some(value));
            }
            for key in watched_keys() {
                prop_assert_eq!(map.contains_key(&key), model.contains_key(&key));
            }
        }

        let mut entries = map.get_keys_and_values();
        entries.sort();
        let mut expected: Vec<(String, u32)> = model.into_iter().collect();
        expected.sort();
        prop_assert_eq!(entries, expected);
    }

    #[test]
    fn insert_then_remove_all_leaves_tables_empty(
        keys in prop::collection::hash_set("[a-z0-9]{1,8}", 0..150),
    ) {
        let mut open = OpenAddressingMap::new(11, hash_function_2);
        let mut chained = ChainingMap::new(11, hash_function_2);
        for key in &keys {
            open.put(key.as_str(), key.len());
            chained.put(key.as_str(), key.len());
        }
        prop_assert_eq!(open.len(), keys.len());
        prop_assert_eq!(chained.len(), keys.len());

        for key in &keys {
            prop_assert_eq!(open.remove(key), Some(key.len()));
            prop_assert_eq!(chained.remove(key), Some(key.len()));
        }
        prop_assert!(open.is_empty());
        prop_assert!(chained.is_empty());
        for key in &keys {
            prop_assert!(!open.contains_key(key));
            prop_assert!(!chained.contains_key(key));
        }
    }
}
