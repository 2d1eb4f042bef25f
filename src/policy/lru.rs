//! Least-Recently-Used (LRU) replacement policy.
//!
//! A single list over a [`ListArena`]: front is MRU, back is LRU. `get`
//! and `put` on an existing key move its node to the front; inserting a
//! new key at capacity evicts the back node first.
//!
//! ## Operations
//!
//! | Operation | Time | Notes                              |
//! |-----------|------|------------------------------------|
//! | `get`     | O(1) | moves the hit to the MRU end       |
//! | `put`     | O(1) | may evict the LRU entry            |
//! | `peek`    | O(1) | no recency update                  |
//! | `clear`   | O(n) | evict callback fired per entry     |
//! | `each`    | O(n) | LRU end first                      |

use crate::ds::{ListArena, ListTag, NodeId};
use crate::error::KeyNotFound;
use crate::traits::{Cache, EvictCallback, OmitCallback};
use rustc_hash::FxHashMap;
use std::hash::Hash;

const RESIDENT: ListTag = ListTag::new(0);

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// LRU cache with optional evict and omit callbacks.
///
/// Not thread-safe; wrap in [`SafeCache`](crate::safe::SafeCache) for
/// concurrent use.
///
/// # Example
///
/// ```
/// use arclru::policy::lru::LruCache;
/// use arclru::traits::Cache;
///
/// let mut cache = LruCache::new(2);
/// cache.put("a", 1);
/// cache.put("b", 2);
/// cache.get(&"a").unwrap();
/// cache.put("c", 3); // evicts "b", the least recently used
///
/// assert!(cache.contains(&"a"));
/// assert!(!cache.contains(&"b"));
/// ```
///
/// # Panics
///
/// [`LruCache::new`] panics if `capacity` is zero.
pub struct LruCache<K, V> {
    index: FxHashMap<K, NodeId>,
    list: ListArena<Entry<K, V>>,
    capacity: usize,
    evict_cb: Option<EvictCallback<K, V>>,
    omit_cb: Option<OmitCallback<K, V>>,
}

impl<K, V> LruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates an LRU cache holding up to `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "LruCache: capacity must be greater than zero");
        Self {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            list: ListArena::with_capacity(1, capacity),
            capacity,
            evict_cb: None,
            omit_cb: None,
        }
    }

    /// Installs the evict callback, fired once per resident exit.
    pub fn on_evict(mut self, cb: impl FnMut(&K, V) + Send + Sync + 'static) -> Self {
        self.evict_cb = Some(Box::new(cb));
        self
    }

    /// Installs the omit callback, consulted on `get` misses. Its result
    /// is returned to the caller but never admitted.
    pub fn on_omit(mut self, cb: impl FnMut(&K) -> Option<V> + Send + Sync + 'static) -> Self {
        self.omit_cb = Some(Box::new(cb));
        self
    }

    pub(crate) fn set_callbacks(
        &mut self,
        evict: Option<EvictCallback<K, V>>,
        omit: Option<OmitCallback<K, V>>,
    ) {
        self.evict_cb = evict;
        self.omit_cb = omit;
    }

    fn evict_back(&mut self) {
        if let Some(entry) = self.list.pop_back(RESIDENT) {
            self.index.remove(&entry.key);
            if let Some(cb) = self.evict_cb.as_mut() {
                cb(&entry.key, entry.value);
            }
        }
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert_eq!(self.index.len(), self.list.len(RESIDENT));
        assert!(self.list.len(RESIDENT) <= self.capacity);
        for (key, &id) in &self.index {
            let entry = self.list.get(id).expect("indexed node is freed");
            assert!(&entry.key == key, "index points at a node with another key");
        }
        self.list.debug_validate_invariants();
    }
}

impl<K, V> Cache<K, V> for LruCache<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn len(&self) -> usize {
        self.list.len(RESIDENT)
    }

    fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    fn peek(&self, key: &K) -> Option<V> {
        let id = *self.index.get(key)?;
        self.list.get(id).map(|entry| entry.value.clone())
    }

    fn get(&mut self, key: &K) -> Result<V, KeyNotFound> {
        if let Some(&id) = self.index.get(key) {
            self.list.move_to_front(RESIDENT, id);
            if let Some(entry) = self.list.get(id) {
                return Ok(entry.value.clone());
            }
        }
        if let Some(cb) = self.omit_cb.as_mut() {
            if let Some(value) = cb(key) {
                return Ok(value);
            }
        }
        Err(KeyNotFound)
    }

    fn put(&mut self, key: K, value: V) {
        if let Some(&id) = self.index.get(&key) {
            self.list.move_to_front(RESIDENT, id);
            if let Some(entry) = self.list.get_mut(id) {
                entry.value = value;
            }
            return;
        }
        if self.list.len(RESIDENT) == self.capacity {
            self.evict_back();
        }
        let id = self.list.push_front(
            RESIDENT,
            Entry {
                key: key.clone(),
                value,
            },
        );
        self.index.insert(key, id);
    }

    fn remove(&mut self, key: &K) {
        if let Some(id) = self.index.remove(key) {
            if let Some(entry) = self.list.remove(id) {
                if let Some(cb) = self.evict_cb.as_mut() {
                    cb(&entry.key, entry.value);
                }
            }
        }
    }

    fn clear(&mut self) {
        while let Some(entry) = self.list.pop_back(RESIDENT) {
            if let Some(cb) = self.evict_cb.as_mut() {
                cb(&entry.key, entry.value);
            }
        }
        self.index.clear();
    }

    fn each(&self, n: usize, f: &mut dyn FnMut(&K, &V)) {
        let len = self.list.len(RESIDENT);
        if len == 0 {
            return;
        }
        let budget = if n == 0 || n > len { len } else { n };
        for (_, entry) in self.list.iter_rev(RESIDENT).take(budget) {
            f(&entry.key, &entry.value);
        }
    }
}

impl<K, V> std::fmt::Debug for LruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.capacity)
            .field("len", &self.list.len(RESIDENT))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[test]
    #[should_panic(expected = "capacity must be greater than zero")]
    fn zero_capacity_panics() {
        let _ = LruCache::<u32, u32>::new(0);
    }

    #[test]
    fn put_and_get_touch_recency() {
        let mut cache = LruCache::new(3);
        cache.put(1, "a");
        cache.put(2, "b");
        cache.put(3, "c");

        // 1 becomes MRU again; 2 is now the LRU.
        assert_eq!(cache.get(&1), Ok("a"));
        cache.put(4, "d");

        assert!(cache.contains(&1));
        assert!(!cache.contains(&2));
        assert!(cache.contains(&3));
        assert!(cache.contains(&4));
        cache.debug_validate_invariants();
    }

    #[test]
    fn put_existing_overwrites_without_evict() {
        let evictions = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&evictions);
        let mut cache = LruCache::new(2).on_evict(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        cache.put(1, 10);
        cache.put(1, 11);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.peek(&1), Some(11));
        assert_eq!(evictions.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn eviction_fires_callback_with_value() {
        let evicted = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&evicted);
        let mut cache = LruCache::new(2).on_evict(move |k: &u32, v: u32| {
            log.lock().unwrap().push((*k, v));
        });

        cache.put(1, 1);
        cache.put(2, 2);
        cache.put(1, 11);
        cache.put(3, 3);

        // 2 was the least recently used at overflow.
        assert_eq!(evicted.lock().unwrap().as_slice(), &[(2, 2)]);
        assert!(cache.contains(&1));
        assert!(cache.contains(&3));
        assert_eq!(cache.peek(&1), Some(11));
        cache.debug_validate_invariants();
    }

    #[test]
    fn omit_callback_serves_misses_without_admitting() {
        let mut cache: LruCache<u32, u32> =
            LruCache::new(2).on_omit(|k| if *k == 7 { Some(70) } else { None });

        assert_eq!(cache.get(&7), Ok(70));
        assert!(!cache.contains(&7));
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.get(&8), Err(KeyNotFound));
    }

    #[test]
    fn peek_does_not_touch() {
        let mut cache = LruCache::new(2);
        cache.put(1, "a");
        cache.put(2, "b");
        assert_eq!(cache.peek(&1), Some("a"));

        // 1 is still the LRU entry.
        cache.put(3, "c");
        assert!(!cache.contains(&1));
        assert!(cache.contains(&2));
    }

    #[test]
    fn remove_fires_evict_once() {
        let evictions = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&evictions);
        let mut cache = LruCache::new(2).on_evict(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        cache.put(1, 1);
        cache.remove(&1);
        cache.remove(&1);
        assert_eq!(evictions.load(Ordering::SeqCst), 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn clear_fires_evict_per_entry_and_is_idempotent() {
        let evictions = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&evictions);
        let mut cache = LruCache::new(4).on_evict(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        for i in 0..4 {
            cache.put(i, i);
        }
        cache.clear();
        cache.clear();
        assert_eq!(evictions.load(Ordering::SeqCst), 4);
        assert!(cache.is_empty());
        cache.debug_validate_invariants();
    }

    #[test]
    fn each_visits_lru_end_first() {
        let mut cache = LruCache::new(4);
        for i in 0..4 {
            cache.put(i, i * 10);
        }
        cache.get(&0).unwrap(); // order is now 1, 2, 3, 0

        let mut seen = Vec::new();
        cache.each(0, &mut |k, v| seen.push((*k, *v)));
        assert_eq!(seen, vec![(1, 10), (2, 20), (3, 30), (0, 0)]);

        let mut first_two = Vec::new();
        cache.each(2, &mut |k, _| first_two.push(*k));
        assert_eq!(first_two, vec![1, 2]);

        // A budget beyond len visits everything.
        let mut all = Vec::new();
        cache.each(99, &mut |k, _| all.push(*k));
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn capacity_bound_holds_under_churn() {
        let mut cache = LruCache::new(8);
        for i in 0..1000u32 {
            cache.put(i % 13, i);
            assert!(cache.len() <= cache.capacity());
        }
        cache.debug_validate_invariants();
    }
}
