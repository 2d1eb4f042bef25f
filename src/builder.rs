//! Runtime policy selection behind one builder.
//!
//! ## Example
//!
//! ```
//! use arclru::builder::{CacheBuilder, Policy};
//! use arclru::traits::Cache;
//!
//! let mut cache = CacheBuilder::<u64, String>::new(Policy::Arc, 100).build();
//! cache.put(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Ok("hello".to_string()));
//! ```

use std::hash::Hash;

use crate::policy::arc::ArcCache;
use crate::policy::lru::LruCache;
use crate::safe::SafeCache;
use crate::traits::{Cache, EvictCallback, OmitCallback, ShadeCallback};

/// Available replacement policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Least Recently Used eviction.
    Lru,
    /// Adaptive Replacement Cache eviction.
    Arc,
}

/// Builds a cache with a runtime-chosen policy and optional callbacks.
///
/// The shade callback only applies to [`Policy::Arc`]; it is ignored for
/// LRU, which never ghosts entries.
pub struct CacheBuilder<K, V> {
    policy: Policy,
    capacity: usize,
    evict_cb: Option<EvictCallback<K, V>>,
    omit_cb: Option<OmitCallback<K, V>>,
    shade_cb: Option<ShadeCallback<K, V>>,
}

impl<K, V> CacheBuilder<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Starts a builder for `policy` with the given entry capacity.
    ///
    /// # Panics
    ///
    /// `build`/`build_safe` panic if `capacity` is zero, like the policy
    /// constructors they call.
    pub fn new(policy: Policy, capacity: usize) -> Self {
        Self {
            policy,
            capacity,
            evict_cb: None,
            omit_cb: None,
            shade_cb: None,
        }
    }

    /// Installs the evict callback.
    pub fn on_evict(mut self, cb: impl FnMut(&K, V) + Send + Sync + 'static) -> Self {
        self.evict_cb = Some(Box::new(cb));
        self
    }

    /// Installs the omit callback.
    pub fn on_omit(mut self, cb: impl FnMut(&K) -> Option<V> + Send + Sync + 'static) -> Self {
        self.omit_cb = Some(Box::new(cb));
        self
    }

    /// Installs the shade callback (ARC only).
    pub fn on_shade(mut self, cb: impl FnMut(&K, V) + Send + Sync + 'static) -> Self {
        self.shade_cb = Some(Box::new(cb));
        self
    }

    /// Builds the chosen policy behind the uniform contract.
    pub fn build(self) -> Box<dyn Cache<K, V> + Send + Sync> {
        match self.policy {
            Policy::Lru => {
                let mut cache = LruCache::new(self.capacity);
                cache.set_callbacks(self.evict_cb, self.omit_cb);
                Box::new(cache)
            },
            Policy::Arc => {
                let mut cache = ArcCache::new(self.capacity);
                cache.set_callbacks(self.evict_cb, self.omit_cb, self.shade_cb);
                Box::new(cache)
            },
        }
    }

    /// Builds the chosen policy and wraps it in a [`SafeCache`].
    pub fn build_safe(self) -> SafeCache<K, V, Box<dyn Cache<K, V> + Send + Sync>> {
        SafeCache::new(self.build())
    }
}
