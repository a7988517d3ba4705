/// Dependency cache adapters
mod in_memory_cache;
mod json_file_cache;

pub use in_memory_cache::InMemoryDependencyCache;
pub use json_file_cache::{CacheLoadStatus, JsonFileDependencyCache, CACHE_FORMAT_VERSION};
