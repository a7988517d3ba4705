use crate::asset_analysis::domain::{AssetIdentity, DependencyRecord};
use crate::shared::Result;

/// DependencyCache port for storing computed dependency records
///
/// The cache is the only state shared between analyses. Implementations
/// must upsert atomically per key: a concurrent reader sees either the old
/// or the new record for an identity, never a partial one.
///
/// Lookups never fail. A store that cannot be read behaves as an empty
/// cache, so the builder can always fall back to the AssetSource.
pub trait DependencyCache: Send + Sync {
    /// Pure lookup, never triggers computation
    fn get(&self, id: &AssetIdentity) -> Option<DependencyRecord>;

    /// Inserts or replaces the record for `record.owner()`
    fn put(&self, record: DependencyRecord);

    /// Removes the record for one identity
    fn invalidate(&self, id: &AssetIdentity);

    /// Removes every record
    fn clear(&self);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Writes the current records to durable storage, if the implementation has any
    fn persist(&self) -> Result<()> {
        Ok(())
    }
}
