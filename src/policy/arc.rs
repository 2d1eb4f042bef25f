//! Adaptive Replacement Cache (ARC) policy.
//!
//! ARC balances recency against frequency by splitting residents across
//! two lists and remembering recently evicted keys in two ghost lists.
//! A ghost hit is evidence the cache guessed wrong, and retunes the
//! adaptive target `p` before re-admitting the key.
//!
//! ## Architecture
//!
//! ```text
//!   index: FxHashMap<K, NodeId> ──► ListArena<Entry<K, V>>, four tags:
//!
//!     T1  resident, seen once       (recency)      MRU ◄──► LRU
//!     T2  resident, seen twice+     (frequency)    MRU ◄──► LRU
//!     B1  ghosts evicted from T1    (keys only, value = None)
//!     B2  ghosts evicted from T2    (keys only, value = None)
//!
//!   p ∈ [0, capacity]: target size for T1. Hits in B1 grow p (favor
//!   recency); hits in B2 shrink it (favor frequency).
//! ```
//!
//! A node keeps its identity for its whole stay: demotion to a ghost and
//! ghost-hit re-admission move the same node between lists, and the
//! arena's O(1) owner query classifies every hit.
//!
//! ## Put flow
//!
//! ```text
//!   put(k, v):
//!     in T1/T2  → move to T2 front, overwrite value
//!     in B1     → p ← min(c, p + max(1, |B2|/|B1|)); replace; to T2 front
//!     in B2     → p ← max(0, p − max(1, |B1|/|B2|)); replace; to T2 front
//!     absent    → admission by |T1|+|B1| and |T2|+|B2| (five paths),
//!                 then push at T1 front
//! ```
//!
//! `replace` demotes one resident to a ghost: the T1 LRU entry when T1 is
//! over target (or at target on a B2 hit), otherwise the T2 LRU entry.
//! The shade callback witnesses the value before it is cleared.
//!
//! ## Invariants
//!
//! - `|T1| + |T2| ≤ c` (resident budget)
//! - `|T1| + |B1| ≤ c`
//! - `|T2| + |B2| ≤ 2c`, and all four lists together hold ≤ 2c keys
//! - every indexed key is in exactly one list; ghosts carry no value
//!
//! `debug_validate_invariants()` checks all of these in debug/test builds.
//!
//! ## References
//!
//! - Megiddo & Modha, "ARC: A Self-Tuning, Low Overhead Replacement
//!   Cache", FAST 2003

use crate::ds::{ListArena, ListTag, NodeId};
use crate::error::KeyNotFound;
use crate::traits::{Cache, EvictCallback, OmitCallback, ShadeCallback};
use rustc_hash::FxHashMap;
use std::hash::Hash;

const T1: ListTag = ListTag::new(0);
const T2: ListTag = ListTag::new(1);
const B1: ListTag = ListTag::new(2);
const B2: ListTag = ListTag::new(3);

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    /// `None` marks a ghost: the key is remembered, the value is gone.
    value: Option<V>,
}

/// ARC cache with optional evict, omit, and shade callbacks.
///
/// Not thread-safe; wrap in [`SafeCache`](crate::safe::SafeCache) for
/// concurrent use.
///
/// # Example
///
/// ```
/// use arclru::policy::arc::ArcCache;
/// use arclru::traits::Cache;
///
/// let mut cache = ArcCache::new(2);
/// cache.put("a", 1);
/// cache.put("b", 2);
///
/// // A repeated access promotes "a" to the frequency side.
/// cache.put("a", 10);
/// assert_eq!(cache.t2_len(), 1);
///
/// // "b" is the recency-side victim for the next admission.
/// cache.put("c", 3);
/// assert!(!cache.contains(&"b"));
/// ```
///
/// # Panics
///
/// [`ArcCache::new`] panics if `capacity` is zero.
pub struct ArcCache<K, V> {
    index: FxHashMap<K, NodeId>,
    lists: ListArena<Entry<K, V>>,
    /// Adaptive target for T1's resident size, clamped to [0, capacity].
    p: usize,
    capacity: usize,
    evict_cb: Option<EvictCallback<K, V>>,
    omit_cb: Option<OmitCallback<K, V>>,
    shade_cb: Option<ShadeCallback<K, V>>,
}

impl<K, V> ArcCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates an ARC cache with `capacity` resident entries. Ghost lists
    /// may remember up to another `capacity` keys beyond the residents.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "ArcCache: capacity must be greater than zero");
        Self {
            index: FxHashMap::with_capacity_and_hasher(capacity * 2, Default::default()),
            lists: ListArena::with_capacity(4, capacity * 2),
            p: 0,
            capacity,
            evict_cb: None,
            omit_cb: None,
            shade_cb: None,
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

    /// Installs the shade callback, fired when a resident entry becomes a
    /// ghost. The value is dropped after the callback returns.
    pub fn on_shade(mut self, cb: impl FnMut(&K, V) + Send + Sync + 'static) -> Self {
        self.shade_cb = Some(Box::new(cb));
        self
    }

    pub(crate) fn set_callbacks(
        &mut self,
        evict: Option<EvictCallback<K, V>>,
        omit: Option<OmitCallback<K, V>>,
        shade: Option<ShadeCallback<K, V>>,
    ) {
        self.evict_cb = evict;
        self.omit_cb = omit;
        self.shade_cb = shade;
    }

    /// Current value of the adaptive target `p` (T1's target size).
    pub fn p_value(&self) -> usize {
        self.p
    }

    /// Number of residents seen exactly once (T1).
    pub fn t1_len(&self) -> usize {
        self.lists.len(T1)
    }

    /// Number of residents seen at least twice (T2).
    pub fn t2_len(&self) -> usize {
        self.lists.len(T2)
    }

    /// Number of ghosts evicted from T1 (B1).
    pub fn b1_len(&self) -> usize {
        self.lists.len(B1)
    }

    /// Number of ghosts evicted from T2 (B2).
    pub fn b2_len(&self) -> usize {
        self.lists.len(B2)
    }

    /// Demotes one resident to a ghost to free a slot.
    ///
    /// `b2_hit` is true when the demotion was triggered by a B2 ghost hit.
    fn replace(&mut self, b2_hit: bool) {
        let t1_len = self.lists.len(T1);
        // At |T1| == p the victim comes from T1 only for B2 hits; B1 hits
        // and cold misses break the tie toward T2. Not symmetric.
        let from_t1 = t1_len > 0 && (t1_len > self.p || (b2_hit && t1_len == self.p));
        let (victims, ghosts) = if from_t1 { (T1, B1) } else { (T2, B2) };

        let victim = match self.lists.back(victims) {
            Some(id) => id,
            None => return,
        };
        self.lists.move_to_front(ghosts, victim);
        let (key, value) = match self.lists.get_mut(victim) {
            Some(entry) => (entry.key.clone(), entry.value.take()),
            None => return,
        };
        if let (Some(value), Some(cb)) = (value, self.shade_cb.as_mut()) {
            cb(&key, value);
        }
    }

    /// Drops the LRU ghost of `tag` outright (no callback: ghosts carry
    /// no value and their departure is not an eviction).
    fn drop_ghost(&mut self, tag: ListTag) {
        if let Some(entry) = self.lists.pop_back(tag) {
            self.index.remove(&entry.key);
        }
    }

    /// Evicts the LRU resident of `tag`, firing the evict callback.
    fn evict_back(&mut self, tag: ListTag) {
        if let Some(entry) = self.lists.pop_back(tag) {
            self.index.remove(&entry.key);
            if let (Some(value), Some(cb)) = (entry.value, self.evict_cb.as_mut()) {
                cb(&entry.key, value);
            }
        }
    }

    fn is_resident(&self, id: NodeId) -> bool {
        let owner = self.lists.owner(id);
        owner == Some(T1) || owner == Some(T2)
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        let (t1, t2) = (self.lists.len(T1), self.lists.len(T2));
        let (b1, b2) = (self.lists.len(B1), self.lists.len(B2));

        assert!(t1 + t2 <= self.capacity, "resident budget exceeded");
        assert!(t1 + b1 <= self.capacity, "|T1|+|B1| exceeds capacity");
        assert!(t2 + b2 <= 2 * self.capacity, "|T2|+|B2| exceeds 2c");
        assert!(
            t1 + t2 + b1 + b2 <= 2 * self.capacity,
            "total tracked keys exceed 2c"
        );
        assert!(self.p <= self.capacity, "p outside [0, capacity]");

        assert_eq!(
            self.index.len(),
            t1 + t2 + b1 + b2,
            "index and lists disagree"
        );
        assert_eq!(
            self.lists.total_len(),
            self.index.len(),
            "arena holds detached nodes"
        );

        for (key, &id) in &self.index {
            let entry = self.lists.get(id).expect("indexed node is freed");
            assert!(&entry.key == key, "index points at a node with another key");
            match self.lists.owner(id) {
                Some(tag) if tag == T1 || tag == T2 => {
                    assert!(entry.value.is_some(), "resident without a value")
                },
                Some(tag) if tag == B1 || tag == B2 => {
                    assert!(entry.value.is_none(), "ghost with a live value")
                },
                other => panic!("indexed node in unexpected list: {:?}", other),
            }
        }
        self.lists.debug_validate_invariants();
    }
}

impl<K, V> Cache<K, V> for ArcCache<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn len(&self) -> usize {
        self.lists.len(T1) + self.lists.len(T2)
    }

    fn contains(&self, key: &K) -> bool {
        self.index
            .get(key)
            .map_or(false, |&id| self.is_resident(id))
    }

    fn peek(&self, key: &K) -> Option<V> {
        let id = *self.index.get(key)?;
        // Ghost values are None, so this is residents-only by construction.
        self.lists.get(id).and_then(|entry| entry.value.clone())
    }

    fn get(&mut self, key: &K) -> Result<V, KeyNotFound> {
        if let Some(&id) = self.index.get(key) {
            if self.is_resident(id) {
                self.lists.move_to_front(T2, id);
                if let Some(value) = self.lists.get(id).and_then(|entry| entry.value.as_ref()) {
                    return Ok(value.clone());
                }
            }
            // Ghost hits fall through to the miss path: adaptation happens
            // only through put.
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
            let owner = self.lists.owner(id);
            if owner == Some(B1) {
                // Recency ghosts argue for a larger T1. Integer division,
                // at least 1; the hit node keeps |B1| >= 1 here.
                let delta = (self.lists.len(B2) / self.lists.len(B1)).max(1);
                self.p = (self.p + delta).min(self.capacity);
                self.replace(false);
            } else if owner == Some(B2) {
                let delta = (self.lists.len(B1) / self.lists.len(B2)).max(1);
                self.p = self.p.saturating_sub(delta);
                self.replace(true);
            }
            // Any repeated reference lands at the front of T2.
            self.lists.move_to_front(T2, id);
            if let Some(entry) = self.lists.get_mut(id) {
                entry.value = Some(value);
            }
            return;
        }

        // Cold miss: make room per the paper's case analysis, then admit
        // into T1.
        let l1 = self.lists.len(T1) + self.lists.len(B1);
        if l1 == self.capacity {
            if self.lists.len(T1) < self.capacity {
                self.drop_ghost(B1);
                self.replace(false);
            } else {
                // B1 is empty and T1 is full; the new entry takes the
                // T1 LRU slot directly.
                self.evict_back(T1);
            }
        } else {
            let l2 = self.lists.len(T2) + self.lists.len(B2);
            if l1 + l2 >= self.capacity {
                if l1 + l2 == 2 * self.capacity {
                    self.drop_ghost(B2);
                }
                self.replace(false);
            }
        }

        let id = self.lists.push_front(
            T1,
            Entry {
                key: key.clone(),
                value: Some(value),
            },
        );
        self.index.insert(key, id);
    }

    fn remove(&mut self, key: &K) {
        if let Some(id) = self.index.remove(key) {
            if let Some(entry) = self.lists.remove(id) {
                if let (Some(value), Some(cb)) = (entry.value, self.evict_cb.as_mut()) {
                    cb(&entry.key, value);
                }
            }
        }
    }

    fn clear(&mut self) {
        // Evict fires for residents only; ghosts leave silently.
        for tag in [T1, T2] {
            while let Some(entry) = self.lists.pop_back(tag) {
                if let (Some(value), Some(cb)) = (entry.value, self.evict_cb.as_mut()) {
                    cb(&entry.key, value);
                }
            }
        }
        self.lists.clear();
        self.index.clear();
        self.p = 0;
    }

    fn each(&self, n: usize, f: &mut dyn FnMut(&K, &V)) {
        let len = self.len();
        if len == 0 {
            return;
        }
        let mut budget = if n == 0 || n > len { len } else { n };
        for tag in [T1, T2] {
            for (_, entry) in self.lists.iter_rev(tag) {
                if budget == 0 {
                    return;
                }
                if let Some(value) = entry.value.as_ref() {
                    f(&entry.key, value);
                    budget -= 1;
                }
            }
        }
    }
}

impl<K, V> std::fmt::Debug for ArcCache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArcCache")
            .field("capacity", &self.capacity)
            .field("p", &self.p)
            .field("t1_len", &self.lists.len(T1))
            .field("t2_len", &self.lists.len(T2))
            .field("b1_len", &self.lists.len(B1))
            .field("b2_len", &self.lists.len(B2))
            .finish()
    }
}
