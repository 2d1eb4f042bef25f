//! Reader/writer-locked decorator for any cache policy.
//!
//! [`SafeCache`] is the crate's only concurrency story: one writer or many
//! readers at a time, every operation synchronous and run to completion
//! under the lock. It performs no policy logic of its own.
//!
//! The lock split follows what each operation actually does, not what it
//! looks like: `get` takes the **write** lock because a hit rearranges
//! recency, and `each` takes it because the visitor is arbitrary code.
//! Only the genuinely read-only operations (`capacity`, `len`,
//! `is_empty`, `contains`, `peek`) share a read lock.
//!
//! Callbacks and visitors run while the lock is held; re-entering the
//! same `SafeCache` from inside one deadlocks.

use crate::error::KeyNotFound;
use crate::traits::Cache;
use parking_lot::RwLock;
use std::marker::PhantomData;

/// Thread-safe wrapper around any [`Cache`] implementation.
///
/// Methods take `&self`, so a `SafeCache` can be shared across threads
/// behind an `Arc`. It also implements [`Cache`] itself, delegating every
/// call, so wrapped and bare caches are interchangeable to generic code.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::thread;
///
/// use arclru::policy::arc::ArcCache;
/// use arclru::safe::SafeCache;
///
/// let cache = Arc::new(SafeCache::new(ArcCache::new(64)));
/// let writer = Arc::clone(&cache);
/// let handle = thread::spawn(move || {
///     for i in 0..32u64 {
///         writer.put(i, i * 2);
///     }
/// });
/// handle.join().unwrap();
/// assert_eq!(cache.len(), 32);
/// assert_eq!(cache.peek(&4), Some(8));
/// ```
pub struct SafeCache<K, V, C>
where
    C: Cache<K, V>,
{
    inner: RwLock<C>,
    _marker: PhantomData<(K, V)>,
}

impl<K, V, C> SafeCache<K, V, C>
where
    C: Cache<K, V>,
{
    /// Wraps `cache` in a reader/writer lock.
    pub fn new(cache: C) -> Self {
        Self {
            inner: RwLock::new(cache),
            _marker: PhantomData,
        }
    }

    /// Consumes the wrapper and returns the inner cache.
    pub fn into_inner(self) -> C {
        self.inner.into_inner()
    }

    /// Returns the configured capacity.
    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    /// Returns the number of resident entries.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns `true` if no entries are resident.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Returns `true` iff `key` is resident.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.read().contains(key)
    }

    /// Non-touching lookup of a resident value.
    pub fn peek(&self, key: &K) -> Option<V> {
        self.inner.read().peek(key)
    }

    /// Touching lookup. Takes the write lock: a hit mutates recency.
    pub fn get(&self, key: &K) -> Result<V, KeyNotFound> {
        self.inner.write().get(key)
    }

    /// Inserts or updates `key`, evicting under capacity pressure.
    pub fn put(&self, key: K, value: V) {
        self.inner.write().put(key, value)
    }

    /// Removes `key` if present.
    pub fn remove(&self, key: &K) {
        self.inner.write().remove(key)
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.inner.write().clear()
    }

    /// Visits up to `n` resident entries from the LRU end. Serialized as
    /// a writer: the visitor is arbitrary code.
    pub fn each(&self, n: usize, f: &mut dyn FnMut(&K, &V)) {
        self.inner.write().each(n, f)
    }
}

impl<K, V, C> Cache<K, V> for SafeCache<K, V, C>
where
    C: Cache<K, V>,
{
    fn capacity(&self) -> usize {
        SafeCache::capacity(self)
    }

    fn len(&self) -> usize {
        SafeCache::len(self)
    }

    fn contains(&self, key: &K) -> bool {
        SafeCache::contains(self, key)
    }

    fn peek(&self, key: &K) -> Option<V> {
        SafeCache::peek(self, key)
    }

    fn get(&mut self, key: &K) -> Result<V, KeyNotFound> {
        SafeCache::get(self, key)
    }

    fn put(&mut self, key: K, value: V) {
        SafeCache::put(self, key, value)
    }

    fn remove(&mut self, key: &K) {
        SafeCache::remove(self, key)
    }

    fn clear(&mut self) {
        SafeCache::clear(self)
    }

    fn each(&self, n: usize, f: &mut dyn FnMut(&K, &V)) {
        SafeCache::each(self, n, f)
    }
}

impl<K, V, C> std::fmt::Debug for SafeCache<K, V, C>
where
    C: Cache<K, V> + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SafeCache")
            .field("inner", &*self.inner.read())
            .finish()
    }
}
