use crate::asset_analysis::domain::{AssetIdentity, DependencyRecord};
use crate::ports::outbound::DependencyCache;
use dashmap::DashMap;

/// InMemoryDependencyCache keeps dependency records for the lifetime of the process.
///
/// Backed by a `DashMap`, so concurrent `get`/`put` calls from the builder
/// never observe a partially written record.
#[derive(Debug, Default)]
pub struct InMemoryDependencyCache {
    records: DashMap<AssetIdentity, DependencyRecord>,
}

impl InMemoryDependencyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cache pre-filled with records (later duplicates win)
    pub fn with_records(records: impl IntoIterator<Item = DependencyRecord>) -> Self {
        let cache = Self::new();
        for record in records {
            cache.put(record);
        }
        cache
    }

    /// Copies out every stored record
    pub fn snapshot(&self) -> Vec<DependencyRecord> {
        self.records
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }
}

impl DependencyCache for InMemoryDependencyCache {
    fn get(&self, id: &AssetIdentity) -> Option<DependencyRecord> {
        self.records.get(id).map(|entry| entry.value().clone())
    }

    fn put(&self, record: DependencyRecord) {
        self.records.insert(record.owner().clone(), record);
    }

    fn invalidate(&self, id: &AssetIdentity) {
        self.records.remove(id);
    }

    fn clear(&self) {
        self.records.clear();
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset_analysis::domain::Fingerprint;
    use std::sync::Arc;

    fn record(owner: &str, deps: &[&str], fingerprint: &str) -> DependencyRecord {
        DependencyRecord::new(
            AssetIdentity::new(owner).unwrap(),
            deps.iter().map(|d| AssetIdentity::new(*d).unwrap()),
            Fingerprint::new(fingerprint),
        )
    }

    #[test]
    fn test_put_then_get_returns_record() {
        let cache = InMemoryDependencyCache::new();
        let stored = record("A", &["B"], "v1");
        cache.put(stored.clone());

        assert_eq!(cache.get(stored.owner()), Some(stored));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_put_replaces_existing_record() {
        let cache = InMemoryDependencyCache::new();
        cache.put(record("A", &["B"], "v1"));
        cache.put(record("A", &["C"], "v2"));

        let current = cache.get(&AssetIdentity::new("A").unwrap()).unwrap();
        assert_eq!(current.fingerprint().as_str(), "v2");
        assert_eq!(current.direct_deps()[0].as_str(), "C");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_invalidate_and_clear() {
        let cache =
            InMemoryDependencyCache::with_records(vec![record("A", &[], "1"), record("B", &[], "1")]);

        cache.invalidate(&AssetIdentity::new("A").unwrap());
        assert!(cache.get(&AssetIdentity::new("A").unwrap()).is_none());
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_get_unknown_is_absent() {
        let cache = InMemoryDependencyCache::new();
        assert!(cache.get(&AssetIdentity::new("missing").unwrap()).is_none());
    }

    #[test]
    fn test_concurrent_puts_are_all_visible() {
        let cache = Arc::new(InMemoryDependencyCache::new());
        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    for i in 0..100 {
                        cache.put(record(&format!("asset-{}-{}", worker, i), &[], "fp"));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), 800);
        assert_eq!(cache.snapshot().len(), 800);
    }
}
