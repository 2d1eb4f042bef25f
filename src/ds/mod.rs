pub mod list_arena;

pub use list_arena::{ListArena, ListIter, ListTag, NodeId};
