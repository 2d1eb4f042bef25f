pub mod arc;
pub mod lru;

pub use arc::ArcCache;
pub use lru::LruCache;
