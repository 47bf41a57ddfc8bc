//! # Common Types

/// The integer type of a vocabulary token id.
pub type TokenId = u32;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// Type Alias for hash maps in this crate.
        pub type BTHashMap<K, V> = foldhash::HashMap<K, V>;

        /// Create a new hash map with the given capacity.
        pub fn hash_map_with_capacity<K, V>(capacity: usize) -> BTHashMap<K, V> {
            foldhash::HashMapExt::with_capacity(capacity)
        }
    } else {
        /// Type Alias for hash maps in this crate.
        pub type BTHashMap<K, V> = std::collections::HashMap<K, V>;

        /// Create a new hash map with the given capacity.
        pub fn hash_map_with_capacity<K, V>(capacity: usize) -> BTHashMap<K, V> {
            BTHashMap::with_capacity(capacity)
        }
    }
}
