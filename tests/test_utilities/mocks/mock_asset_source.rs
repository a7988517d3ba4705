use asset_deps::prelude::*;
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
struct MockAsset {
    path: String,
    fingerprint: String,
    dependencies: Vec<AssetIdentity>,
}

#[derive(Default)]
struct State {
    assets: Mutex<BTreeMap<AssetIdentity, MockAsset>>,
    failing: Mutex<BTreeSet<AssetIdentity>>,
    unavailable: AtomicBool,
    lookups: AtomicUsize,
}

/// Mock AssetSource for testing
///
/// Clones share state, so a test can edit the corpus between analyses.
#[derive(Default, Clone)]
pub struct MockAssetSource {
    state: Arc<State>,
}

pub fn id(s: &str) -> AssetIdentity {
    AssetIdentity::new(s).unwrap()
}

impl MockAssetSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an asset whose display path is `Assets/<id>.asset`
    pub fn with_asset(self, asset: &str, dependencies: &[&str]) -> Self {
        let path = format!("Assets/{}.asset", asset);
        self.with_asset_at(asset, &path, dependencies)
    }

    pub fn with_asset_at(self, asset: &str, path: &str, dependencies: &[&str]) -> Self {
        self.state.assets.lock().unwrap().insert(
            id(asset),
            MockAsset {
                path: path.to_string(),
                fingerprint: "v1".to_string(),
                dependencies: dependencies.iter().map(|d| id(d)).collect(),
            },
        );
        self
    }

    /// Dependency lookups for `asset` fail with `AssetSourceError::Lookup`
    pub fn with_failing_lookup(self, asset: &str) -> Self {
        self.state.failing.lock().unwrap().insert(id(asset));
        self
    }

    /// Replaces the dependencies of `asset` and bumps its fingerprint
    pub fn edit_asset(&self, asset: &str, dependencies: &[&str]) {
        let mut assets = self.state.assets.lock().unwrap();
        let entry = assets.get_mut(&id(asset)).unwrap();
        entry.dependencies = dependencies.iter().map(|d| id(d)).collect();
        entry.fingerprint = format!("{}+", entry.fingerprint);
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.state.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of `get_direct_dependencies` calls so far
    pub fn lookup_count(&self) -> usize {
        self.state.lookups.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> AssetSourceResult<()> {
        if self.state.unavailable.load(Ordering::SeqCst) {
            return Err(AssetSourceError::Unavailable {
                reason: "mock source offline".to_string(),
            });
        }
        Ok(())
    }

    fn asset(&self, asset: &AssetIdentity) -> AssetSourceResult<MockAsset> {
        self.check_available()?;
        self.state
            .assets
            .lock()
            .unwrap()
            .get(asset)
            .cloned()
            .ok_or_else(|| AssetSourceError::Lookup { id: asset.clone() })
    }
}

#[async_trait]
impl AssetSource for MockAssetSource {
    async fn list_all_identities(&self) -> AssetSourceResult<Vec<AssetIdentity>> {
        self.check_available()?;
        Ok(self.state.assets.lock().unwrap().keys().cloned().collect())
    }

    async fn get_direct_dependencies(
        &self,
        asset: &AssetIdentity,
    ) -> AssetSourceResult<Vec<AssetIdentity>> {
        self.state.lookups.fetch_add(1, Ordering::SeqCst);
        if self.state.failing.lock().unwrap().contains(asset) {
            return Err(AssetSourceError::Lookup { id: asset.clone() });
        }
        Ok(self.asset(asset)?.dependencies)
    }

    async fn get_display_path(&self, asset: &AssetIdentity) -> AssetSourceResult<String> {
        Ok(self.asset(asset)?.path)
    }

    async fn get_fingerprint(&self, asset: &AssetIdentity) -> AssetSourceResult<Fingerprint> {
        Ok(Fingerprint::new(self.asset(asset)?.fingerprint))
    }
}
