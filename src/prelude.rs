pub use crate::builder::{CacheBuilder, Policy};
pub use crate::ds::{ListArena, ListTag, NodeId};
pub use crate::error::KeyNotFound;
pub use crate::policy::{ArcCache, LruCache};
pub use crate::safe::SafeCache;
pub use crate::traits::{Cache, EvictCallback, OmitCallback, ShadeCallback};
