//! Bounded least-recently-used cache of canonical classifications
//!
//! Keys are sanitized User-Agent strings. `IndexMap` keeps entries in
//! recency order: the front is the least recently used entry, hits and
//! inserts move an entry to the back.
//!
//! Reordering shifts the entries behind the moved one, so a hit on an older
//! entry and an eviction each cost O(n) under the lock. A hit on the newest
//! entry, the common case of one client repeating its header, stays O(1).

use std::sync::{Mutex, MutexGuard, PoisonError};

use indexmap::IndexMap;
use tracing::trace;

use crate::config::DEFAULT_CACHE_CAPACITY;
use crate::parser::types::AgentRecord;

pub struct ResultCache {
    entries: Mutex<IndexMap<String, AgentRecord>>,
    capacity: usize,
}

impl ResultCache {
    /// Create a cache holding at most `capacity` entries; 0 disables caching
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(IndexMap::with_capacity(capacity.min(DEFAULT_CACHE_CAPACITY))),
            capacity,
        }
    }

    /// Acquire the entries, recovering from a poisoned lock
    fn lock_entries(&self) -> MutexGuard<'_, IndexMap<String, AgentRecord>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Look up a key, marking it as most recently used
    pub fn get(&self, key: &str) -> Option<AgentRecord> {
        let mut entries = self.lock_entries();
        let idx = entries.get_index_of(key)?;
        let last = entries.len() - 1;
        if idx != last {
            entries.move_index(idx, last);
        }
        entries.get_index(last).map(|(_, record)| record.clone())
    }

    /// Store a record, evicting the least recently used entry when full
    pub fn insert(&self, key: impl Into<String>, record: AgentRecord) {
        if self.capacity == 0 {
            return;
        }

        let key = key.into();
        let mut entries = self.lock_entries();
        if let Some(idx) = entries.get_index_of(&key) {
            let last = entries.len() - 1;
            entries.move_index(idx, last);
            entries[last] = record;
            return;
        }
        if entries.len() >= self.capacity {
            if let Some((evicted, _)) = entries.shift_remove_index(0) {
                trace!("Evicted {:?} from result cache", evicted);
            }
        }
        entries.insert(key, record);
    }

    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_entries().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&self) {
        self.lock_entries().clear();
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn record(major: u64) -> AgentRecord {
        AgentRecord::new("chrome", major, 0, 0)
    }

    #[test]
    fn get_returns_inserted_record() {
        let cache = ResultCache::new(2);
        cache.insert("a", record(1));

        assert_eq!(cache.get("a"), Some(record(1)));
        assert_eq!(cache.get("b"), None);
    }

    #[test]
    fn insert_evicts_least_recently_inserted_entry() {
        let cache = ResultCache::new(2);
        cache.insert("a", record(1));
        cache.insert("b", record(2));
        cache.insert("c", record(3));

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), Some(record(2)));
        assert_eq!(cache.get("c"), Some(record(3)));
    }

    #[test]
    fn get_refreshes_recency() {
        let cache = ResultCache::new(2);
        cache.insert("a", record(1));
        cache.insert("b", record(2));

        // "a" becomes most recently used, so "b" is evicted next
        cache.get("a");
        cache.insert("c", record(3));

        assert_eq!(cache.get("a"), Some(record(1)));
        assert_eq!(cache.get("b"), None);
    }

    #[test]
    fn get_on_newest_entry_keeps_recency_order() {
        let cache = ResultCache::new(2);
        cache.insert("a", record(1));
        cache.insert("b", record(2));

        cache.get("b");
        cache.get("b");
        cache.insert("c", record(3));

        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), Some(record(2)));
        assert_eq!(cache.get("c"), Some(record(3)));
    }

    #[test]
    fn reinserting_refreshes_recency() {
        let cache = ResultCache::new(2);
        cache.insert("a", record(1));
        cache.insert("b", record(2));
        cache.insert("a", record(10));
        cache.insert("c", record(3));

        assert_eq!(cache.get("b"), None);
        assert_eq!(cache.get("a"), Some(record(10)));
    }

    #[test]
    fn insert_existing_key_replaces_value_without_evicting() {
        let cache = ResultCache::new(2);
        cache.insert("a", record(1));
        cache.insert("b", record(2));
        cache.insert("a", record(10));

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("a"), Some(record(10)));
        assert_eq!(cache.get("b"), Some(record(2)));
    }

    #[test]
    fn zero_capacity_stores_nothing() {
        let cache = ResultCache::new(0);
        cache.insert("a", record(1));

        assert!(cache.is_empty());
        assert_eq!(cache.get("a"), None);
    }

    #[test]
    fn clear_removes_every_entry() {
        let cache = ResultCache::default();
        cache.insert("a", record(1));
        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), DEFAULT_CACHE_CAPACITY);
    }

    #[test]
    fn concurrent_inserts_respect_capacity() {
        let cache = Arc::new(ResultCache::new(16));

        let handles: Vec<_> = (0..4)
            .map(|thread| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    for i in 0..100 {
                        cache.insert(format!("{thread}-{i}"), record(i));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), 16);
    }
}
