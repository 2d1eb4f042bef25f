//! The uniform cache contract and its callback signatures.
//!
//! Every replacement policy in this crate implements [`Cache`], and the
//! thread-safe wrapper exposes the same surface, so callers can swap
//! policies (or add locking) without touching call sites.
//!
//! ## Operations
//!
//! | Op         | Receiver | Effect                                          |
//! |------------|----------|-------------------------------------------------|
//! | `capacity` | `&self`  | configured capacity (entries)                   |
//! | `len`      | `&self`  | resident entries; ghosts excluded               |
//! | `contains` | `&self`  | resident membership; ghosts count as absent     |
//! | `peek`     | `&self`  | non-touching lookup of residents                |
//! | `get`      | `&mut`   | touching lookup; miss may consult omit callback |
//! | `put`      | `&mut`   | insert or update; may evict                     |
//! | `remove`   | `&mut`   | drop if present; evict callback for residents   |
//! | `clear`    | `&mut`   | drop everything; evict callback per resident    |
//! | `each`     | `&self`  | visit up to `n` residents, LRU end first        |
//!
//! `get` is the only read that takes `&mut self`: it promotes the entry
//! toward the MRU end (LRU) or into T2 (ARC), and a miss may run the omit
//! callback, which is `FnMut`.
//!
//! ## Callbacks
//!
//! Callbacks are wired at construction, run synchronously inside the
//! operation that triggers them, and must not re-enter the cache (the
//! borrow checker enforces this for bare policies; behind
//! [`SafeCache`](crate::safe::SafeCache) re-entry deadlocks instead).
//!
//! Values travel by move through evict/shade — the cache is done with
//! them. Callers that need the value afterwards keep it behind `Arc`.
//!
//! ## Value semantics
//!
//! `peek`/`get` hand out owned values, so implementations require
//! `V: Clone`. Wrap expensive payloads in `Arc<V>` for reference
//! semantics; the contract itself puts no bounds on `K` or `V`.

use crate::error::KeyNotFound;

/// Fired when a resident entry leaves the cache: capacity eviction,
/// explicit `remove`, or `clear`. Exactly once per exit.
pub type EvictCallback<K, V> = Box<dyn FnMut(&K, V) + Send + Sync>;

/// Consulted on a `get` miss. A `Some` result is handed to the caller but
/// never admitted into the cache.
pub type OmitCallback<K, V> = Box<dyn FnMut(&K) -> Option<V> + Send + Sync>;

/// Fired when a resident entry is demoted to a ghost (ARC only). The value
/// is dropped once the callback returns; only the key survives in the
/// ghost list.
pub type ShadeCallback<K, V> = Box<dyn FnMut(&K, V) + Send + Sync>;

/// The policy-agnostic cache contract.
///
/// Object-safe: `Box<dyn Cache<K, V>>` works (see the blanket impl below).
///
/// # Example
///
/// ```
/// use arclru::policy::arc::ArcCache;
/// use arclru::policy::lru::LruCache;
/// use arclru::traits::Cache;
///
/// fn warm<C: Cache<u64, u64>>(cache: &mut C) {
///     for i in 0..4 {
///         cache.put(i, i * 10);
///     }
/// }
///
/// let mut lru = LruCache::new(8);
/// let mut arc = ArcCache::new(8);
/// warm(&mut lru);
/// warm(&mut arc);
/// assert_eq!(lru.len(), arc.len());
/// ```
pub trait Cache<K, V> {
    /// Returns the configured capacity in entries.
    fn capacity(&self) -> usize;

    /// Returns the number of resident entries. Ghost entries are excluded.
    fn len(&self) -> usize;

    /// Returns `true` if no entries are resident.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` iff `key` is resident. Ghosts count as absent.
    fn contains(&self, key: &K) -> bool;

    /// Non-touching lookup: returns the resident value without affecting
    /// recency and without consulting callbacks.
    fn peek(&self, key: &K) -> Option<V>;

    /// Touching lookup. A hit promotes the entry; a miss consults the omit
    /// callback and falls back to [`KeyNotFound`].
    fn get(&mut self, key: &K) -> Result<V, KeyNotFound>;

    /// Inserts or updates `key`. May evict (and fire the evict callback)
    /// to stay within capacity. Never fails.
    fn put(&mut self, key: K, value: V);

    /// Removes `key` if present. Fires the evict callback when the removed
    /// entry was resident.
    fn remove(&mut self, key: &K);

    /// Drops every entry, firing the evict callback once per resident.
    /// Ghosts are dropped silently.
    fn clear(&mut self);

    /// Visits up to `n` resident entries starting from the LRU end.
    /// `n == 0` (or `n > len()`) visits all of them.
    fn each(&self, n: usize, f: &mut dyn FnMut(&K, &V));
}

impl<K, V, C> Cache<K, V> for Box<C>
where
    C: Cache<K, V> + ?Sized,
{
    fn capacity(&self) -> usize {
        (**self).capacity()
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn contains(&self, key: &K) -> bool {
        (**self).contains(key)
    }

    fn peek(&self, key: &K) -> Option<V> {
        (**self).peek(key)
    }

    fn get(&mut self, key: &K) -> Result<V, KeyNotFound> {
        (**self).get(key)
    }

    fn put(&mut self, key: K, value: V) {
        (**self).put(key, value)
    }

    fn remove(&mut self, key: &K) {
        (**self).remove(key)
    }

    fn clear(&mut self) {
        (**self).clear()
    }

    fn each(&self, n: usize, f: &mut dyn FnMut(&K, &V)) {
        (**self).each(n, f)
    }
}
