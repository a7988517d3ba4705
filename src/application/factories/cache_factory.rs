use crate::adapters::outbound::cache::{
    CacheLoadStatus, InMemoryDependencyCache, JsonFileDependencyCache,
};
use crate::ports::outbound::DependencyCache;
use std::path::PathBuf;
use std::sync::Arc;

/// Which dependency cache backs an analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheType {
    /// Records live only for this process
    InMemory,
    /// Records are loaded from and saved to a JSON store
    JsonFile(PathBuf),
}

/// Factory for creating dependency caches
pub struct CacheFactory;

impl CacheFactory {
    /// Creates the cache. The load status is `Some` for persistent caches.
    pub fn create(cache_type: CacheType) -> (Arc<dyn DependencyCache>, Option<CacheLoadStatus>) {
        match cache_type {
            CacheType::InMemory => (Arc::new(InMemoryDependencyCache::new()), None),
            CacheType::JsonFile(path) => {
                let (cache, status) = JsonFileDependencyCache::open(path);
                (Arc::new(cache), Some(status))
            }
        }
    }
}
