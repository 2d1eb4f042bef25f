//! Error types for the arclru library.
//!
//! There is exactly one recoverable error in the whole contract:
//! [`KeyNotFound`], returned by `get` when a key is neither resident nor
//! produced by the omit callback. Invalid configuration (zero capacity) is
//! a programmer error and panics in the constructors instead of returning.

use std::fmt;

/// Sentinel error returned by `get` on a lookup miss.
///
/// Ghost entries (ARC) count as absent: a key that is only in B1/B2 still
/// yields `KeyNotFound`.
///
/// # Example
///
/// ```
/// use arclru::policy::lru::LruCache;
/// use arclru::traits::Cache;
///
/// let mut cache: LruCache<&str, i32> = LruCache::new(4);
/// assert!(cache.get(&"missing").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyNotFound;

impl fmt::Display for KeyNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("key not found")
    }
}

impl std::error::Error for KeyNotFound {}
