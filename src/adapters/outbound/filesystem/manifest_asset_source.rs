use crate::asset_analysis::domain::{AssetIdentity, Fingerprint};
use crate::ports::outbound::{AssetSource, AssetSourceError, AssetSourceResult};
use crate::shared::error::AnalysisError;
use crate::shared::security::read_regular_file;
use crate::shared::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use uuid::Uuid;

/// Namespace for fingerprints derived from manifest content
const FINGERPRINT_NAMESPACE: Uuid = Uuid::from_u128(0x6f1c_2a3e_8d4b_5c7a_9e0f_1b2d_3c4e_5f60);

#[derive(Debug, Deserialize)]
struct RawManifest {
    assets: Vec<RawAsset>,
}

#[derive(Debug, Deserialize)]
struct RawAsset {
    id: AssetIdentity,
    path: String,
    #[serde(default)]
    fingerprint: Option<String>,
    #[serde(default)]
    dependencies: Vec<AssetIdentity>,
}

#[derive(Debug)]
struct ManifestEntry {
    path: String,
    fingerprint: Fingerprint,
    dependencies: Vec<AssetIdentity>,
}

/// Serialization of a manifest file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Json,
    Yaml,
}

impl ManifestFormat {
    /// `.json` files are JSON, everything else is read as YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ManifestFormat::Json,
            _ => ManifestFormat::Yaml,
        }
    }
}

/// ManifestAssetSource adapter serving assets from a manifest file
///
/// The manifest lists every asset with its id, display path, optional
/// fingerprint and raw dependency ids:
///
/// ```yaml
/// assets:
///   - id: "3f2a"
///     path: "Assets/Prefabs/Player.prefab"
///     dependencies: ["9c1d", "77e0"]
/// ```
///
/// Dependencies may name ids that are not listed; looking those up fails
/// with `AssetSourceError::Lookup`. An asset without a fingerprint gets one
/// derived from its path and dependency list, so editing either one
/// invalidates its cached record.
#[derive(Debug)]
pub struct ManifestAssetSource {
    order: Vec<AssetIdentity>,
    entries: HashMap<AssetIdentity, ManifestEntry>,
}

impl ManifestAssetSource {
    /// Loads a manifest file after the regular-file and size checks
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = read_regular_file(path, "asset manifest")?;
        Self::parse(&content, ManifestFormat::from_path(path)).map_err(|e| {
            AnalysisError::InvalidManifest {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }

    /// Parses manifest content
    pub fn parse(content: &str, format: ManifestFormat) -> Result<Self> {
        let raw: RawManifest = match format {
            ManifestFormat::Json => serde_json::from_str(content)?,
            ManifestFormat::Yaml => serde_yaml_ng::from_str(content)?,
        };

        let mut order = Vec::with_capacity(raw.assets.len());
        let mut entries = HashMap::with_capacity(raw.assets.len());

        for asset in raw.assets {
            if asset.path.trim().is_empty() {
                anyhow::bail!("asset '{}' has an empty path", asset.id);
            }
            if entries.contains_key(&asset.id) {
                anyhow::bail!("asset '{}' is listed more than once", asset.id);
            }

            let fingerprint = match asset.fingerprint {
                Some(token) => Fingerprint::new(token),
                None => Self::derive_fingerprint(&asset.path, &asset.dependencies),
            };

            order.push(asset.id.clone());
            entries.insert(
                asset.id,
                ManifestEntry {
                    path: asset.path,
                    fingerprint,
                    dependencies: asset.dependencies,
                },
            );
        }

        Ok(Self { order, entries })
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn derive_fingerprint(path: &str, dependencies: &[AssetIdentity]) -> Fingerprint {
        let mut name = String::from(path);
        for dep in dependencies {
            name.push('\n');
            name.push_str(dep.as_str());
        }
        Fingerprint::new(Uuid::new_v5(&FINGERPRINT_NAMESPACE, name.as_bytes()).to_string())
    }

    fn entry(&self, id: &AssetIdentity) -> AssetSourceResult<&ManifestEntry> {
        self.entries
            .get(id)
            .ok_or_else(|| AssetSourceError::Lookup { id: id.clone() })
    }
}

#[async_trait]
impl AssetSource for ManifestAssetSource {
    async fn list_all_identities(&self) -> AssetSourceResult<Vec<AssetIdentity>> {
        Ok(self.order.clone())
    }

    async fn get_direct_dependencies(
        &self,
        id: &AssetIdentity,
    ) -> AssetSourceResult<Vec<AssetIdentity>> {
        Ok(self.entry(id)?.dependencies.clone())
    }

    async fn get_display_path(&self, id: &AssetIdentity) -> AssetSourceResult<String> {
        Ok(self.entry(id)?.path.clone())
    }

    async fn get_fingerprint(&self, id: &AssetIdentity) -> AssetSourceResult<Fingerprint> {
        Ok(self.entry(id)?.fingerprint.clone())
    }
}
