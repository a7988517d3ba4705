use crate::asset_analysis::domain::{AssetIdentity, Fingerprint};
use async_trait::async_trait;
use thiserror::Error;

/// Errors an AssetSource can report
///
/// The two variants are handled very differently by the graph builder:
/// a `Lookup` failure concerns one asset and is tolerated, while
/// `Unavailable` means the whole source is gone and aborts the build.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetSourceError {
    #[error("Unknown asset: {id}")]
    Lookup { id: AssetIdentity },

    #[error("Asset source unavailable: {reason}")]
    Unavailable { reason: String },
}

pub type AssetSourceResult<T> = std::result::Result<T, AssetSourceError>;

/// AssetSource port for reading the asset database
///
/// This port abstracts the external asset database that knows every asset,
/// its raw list of referenced assets, its display path and its current
/// fingerprint.
///
/// # Async Support
/// All methods are async so dependency lookups for independent assets can
/// run concurrently. Implementations must be `Send + Sync`.
#[async_trait]
pub trait AssetSource: Send + Sync {
    /// Enumerates every asset identity known to the source
    async fn list_all_identities(&self) -> AssetSourceResult<Vec<AssetIdentity>>;

    /// Returns the raw direct dependencies of an asset
    ///
    /// # Errors
    /// Returns `Lookup` if `id` is unknown
    async fn get_direct_dependencies(
        &self,
        id: &AssetIdentity,
    ) -> AssetSourceResult<Vec<AssetIdentity>>;

    /// Returns the human-readable path of an asset, used only for rendering
    async fn get_display_path(&self, id: &AssetIdentity) -> AssetSourceResult<String>;

    /// Returns the token identifying the asset's current content
    async fn get_fingerprint(&self, id: &AssetIdentity) -> AssetSourceResult<Fingerprint>;
}
