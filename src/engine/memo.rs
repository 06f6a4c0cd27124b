//! Memoization cache scoped to one top-level search

use std::collections::HashMap;
use std::hash::Hash;

/// Unbounded cache from a sub-problem signature to its outcome.
///
/// A fresh cache is built for every top-level search so outcomes never leak
/// between unrelated inputs.
#[derive(Debug)]
pub struct MemoCache<K, V> {
    entries: HashMap<K, V>,
    hits: u64,
    misses: u64,
}

impl<K: Hash + Eq, V> MemoCache<K, V> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Look up a cached outcome, recording a hit or a miss
    pub fn get(&mut self, key: &K) -> Option<&V> {
        match self.entries.get(key) {
            Some(value) => {
                self.hits += 1;
                Some(value)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn put(&mut self, key: K, value: V) {
        self.entries.insert(key, value);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

impl<K: Hash + Eq, V> Default for MemoCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_and_miss_counting() {
        let mut cache: MemoCache<usize, u64> = MemoCache::new();
        assert!(cache.get(&3).is_none());
        cache.put(3, 5);
        assert_eq!(cache.get(&3), Some(&5));
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut cache: MemoCache<&str, bool> = MemoCache::new();
        cache.put("aa", true);
        let _ = cache.get(&"aa");
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.hits(), 0);
        assert!(cache.get(&"aa").is_none());
    }
}
