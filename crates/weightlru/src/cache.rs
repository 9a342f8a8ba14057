//! Cache: weighted LRU engine behind a single lock

use std::any::type_name;
use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::capacity::Capacity;
use crate::error::{Error, Result};
use crate::lru::LruIndex;
use crate::stats::CacheStats;

/// State guarded by the cache lock
struct Inner<K, V> {
    index: LruIndex<K, V>,
    capacity: Capacity,
    stats: CacheStats,
}

impl<K, V> Inner<K, V>
where
    K: Hash + Eq + Clone,
{
    fn current_size(&self) -> usize {
        self.capacity.size_of(self.index.len())
    }

    /// Evict from the least recently used end until the size fits
    fn trim(&mut self) {
        while self.capacity.exceeded_by(self.index.len()) {
            if self.index.pop_front().is_none() {
                break;
            }
            self.stats.record_discard();
            debug!(
                discarded = self.stats.discarded(),
                current_size = self.current_size(),
                max_size = self.capacity.max_size(),
                "evicted least recently used entry"
            );
        }
    }
}

/// Thread-safe, size-bounded cache with least-recently-used eviction.
///
/// Every entry costs `item_weight` units against `max_size`. When an insert
/// or a resize pushes the occupied size over the ceiling, entries are
/// discarded from the least recently used end until it fits again.
///
/// All operations take one internal lock for their whole duration, so a
/// `Cache` can be shared between threads behind an `Arc`.
///
/// ```
/// use weightlru::Cache;
///
/// let cache = Cache::new(2, 1).unwrap();
/// cache.insert("a", 1).unwrap();
/// cache.insert("b", 2).unwrap();
/// assert_eq!(cache.get(&"a"), Some(1)); // "a" is now most recent
///
/// cache.insert("c", 3).unwrap(); // evicts "b"
/// assert!(!cache.contains(&"b"));
/// assert_eq!(cache.discarded_count(), 1);
/// ```
pub struct Cache<K, V> {
    inner: Mutex<Inner<K, V>>,
}

impl<K, V> Cache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Create a new cache
    ///
    /// # Arguments
    /// * `max_size` - Capacity ceiling, in the same units as `item_weight`
    /// * `item_weight` - Cost charged for every entry
    ///
    /// # Returns
    /// * `Result<Cache>` - `Error::InvalidCapacity` if `max_size` is zero or
    ///   smaller than `item_weight`
    pub fn new(max_size: usize, item_weight: usize) -> Result<Self> {
        let capacity = Capacity::new(max_size, item_weight)?;

        Ok(Self {
            inner: Mutex::new(Inner {
                index: LruIndex::new(),
                capacity,
                stats: CacheStats::new(),
            }),
        })
    }

    /// Create a new cache where every entry weighs one unit
    pub fn with_max_size(max_size: usize) -> Result<Self> {
        Self::new(max_size, 1)
    }

    /// Insert a new entry at the most recently used end
    ///
    /// Fails with `Error::DuplicateKey` if the key is already cached; the
    /// existing entry is left as it was. May evict older entries.
    pub fn insert(&self, key: K, value: V) -> Result<()> {
        let mut inner = self.inner.lock();
        if inner.index.push_back(key, value).is_err() {
            return Err(Error::DuplicateKey);
        }
        trace!(current_size = inner.current_size(), "inserted entry");

        inner.trim();
        Ok(())
    }

    /// Replace the value of an existing key and mark it most recently used
    ///
    /// Fails with `Error::KeyNotFound` if the key is absent. The occupied size
    /// does not change: weight is charged per key, not per value.
    pub fn set<Q>(&self, key: &Q, value: V) -> Result<()>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut inner = self.inner.lock();
        match inner.index.get_promote(key) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(Error::KeyNotFound),
        }
    }

    /// Look up a value, recording a hit or a miss
    ///
    /// On a hit the entry becomes the most recently used.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut inner = self.inner.lock();
        let found = inner.index.get_promote(key).cloned();

        match found {
            Some(_) => inner.stats.record_hit(),
            None => inner.stats.record_miss(),
        }
        found
    }

    /// Look up a value without promotion or statistics
    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().index.peek(key).cloned()
    }

    /// Check whether a key is cached, without promotion or statistics
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().index.contains(key)
    }

    /// Remove an entry, returning whether it was present
    pub fn remove<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().index.remove(key).is_some()
    }

    /// Least recently used entry
    pub fn peek_oldest(&self) -> Option<(K, V)> {
        let inner = self.inner.lock();
        inner.index.front().map(|(k, v)| (k.clone(), v.clone()))
    }

    /// Most recently used entry
    pub fn peek_newest(&self) -> Option<(K, V)> {
        let inner = self.inner.lock();
        inner.index.back().map(|(k, v)| (k.clone(), v.clone()))
    }

    /// Key of the least recently used entry
    pub fn oldest_key(&self) -> Option<K> {
        self.inner.lock().index.front().map(|(k, _)| k.clone())
    }

    /// Value of the least recently used entry
    pub fn oldest_value(&self) -> Option<V> {
        self.inner.lock().index.front().map(|(_, v)| v.clone())
    }

    /// Key of the most recently used entry
    pub fn newest_key(&self) -> Option<K> {
        self.inner.lock().index.back().map(|(k, _)| k.clone())
    }

    /// Value of the most recently used entry
    pub fn newest_value(&self) -> Option<V> {
        self.inner.lock().index.back().map(|(_, v)| v.clone())
    }

    /// Remove every entry. Statistics are kept.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        let removed = inner.index.len();
        inner.index.clear();
        debug!(removed, "cleared cache");
    }

    /// Change the capacity ceiling, evicting entries if it shrinks below the
    /// occupied size
    ///
    /// Fails with `Error::InvalidCapacity` if `max_size` is zero or smaller
    /// than the item weight; the cache is then left untouched.
    pub fn resize(&self, max_size: usize) -> Result<()> {
        let mut inner = self.inner.lock();
        let previous = inner.capacity.max_size();
        inner.capacity.set_max_size(max_size)?;
        debug!(previous, max_size, "resized cache");

        inner.trim();
        Ok(())
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.inner.lock().index.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Occupied size: entry count times item weight
    pub fn current_size(&self) -> usize {
        self.inner.lock().current_size()
    }

    /// Capacity ceiling
    pub fn max_size(&self) -> usize {
        self.inner.lock().capacity.max_size()
    }

    /// Cost charged per entry
    pub fn item_weight(&self) -> usize {
        self.inner.lock().capacity.item_weight()
    }

    /// Successful lookups so far
    pub fn hit_count(&self) -> u64 {
        self.inner.lock().stats.hits()
    }

    /// Failed lookups so far
    pub fn miss_count(&self) -> u64 {
        self.inner.lock().stats.misses()
    }

    /// Entries evicted by trimming so far
    pub fn discarded_count(&self) -> u64 {
        self.inner.lock().stats.discarded()
    }

    /// Snapshot of the statistics counters
    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats
    }

    /// Snapshot of all entries taken at call time
    ///
    /// Callers must not rely on the order of the returned pairs.
    pub fn iter(&self) -> std::vec::IntoIter<(K, V)> {
        let inner = self.inner.lock();
        inner
            .index
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect::<Vec<_>>()
            .into_iter()
    }

    /// Snapshot of all keys
    pub fn keys(&self) -> Vec<K> {
        let inner = self.inner.lock();
        inner.index.iter().map(|(k, _)| k.clone()).collect()
    }

    /// Snapshot of all values
    pub fn values(&self) -> Vec<V> {
        let inner = self.inner.lock();
        inner.index.iter().map(|(_, v)| v.clone()).collect()
    }

    /// Human-readable summary of capacity and statistics
    pub fn describe(&self) -> String {
        let inner = self.inner.lock();
        format!(
            "Cache<{},{}> Max Size: {} Current Size: {} Item Size {} Hits: {} Misses: {} Discarded: {}",
            type_name::<K>(),
            type_name::<V>(),
            inner.capacity.max_size(),
            inner.current_size(),
            inner.capacity.item_weight(),
            inner.stats.hits(),
            inner.stats.misses(),
            inner.stats.discarded(),
        )
    }
}

impl<K, V> fmt::Display for Cache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

impl<K, V> fmt::Debug for Cache<K, V>
where
    K: Hash + Eq + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("Cache")
            .field("len", &inner.index.len())
            .field("current_size", &inner.current_size())
            .field("max_size", &inner.capacity.max_size())
            .field("item_weight", &inner.capacity.item_weight())
            .field("stats", &inner.stats)
            .finish()
    }
}

impl<'a, K, V> IntoIterator for &'a Cache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    type Item = (K, V);
    type IntoIter = std::vec::IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
