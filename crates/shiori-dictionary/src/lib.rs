//! Dictionary containers and the handle cache the resolvers open them through.

pub mod cache;
pub mod entry;
pub mod loaders;

pub use cache::{HandleCache, HandlePolicy};
pub use loaders::memory::{MemoryDictionary, MemoryLoader};
pub use loaders::source::{SourceDictionary, SourceLoader};
