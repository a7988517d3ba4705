use super::{AssetIdentity, Fingerprint};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Last computed direct-dependency list of one asset, tagged with the
/// fingerprint the asset had when the list was computed.
///
/// Records are immutable: a changed asset gets a new record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyRecord {
    owner: AssetIdentity,
    direct_deps: Vec<AssetIdentity>,
    fingerprint: Fingerprint,
}

impl DependencyRecord {
    /// Creates a record from a raw dependency list.
    ///
    /// Duplicates are dropped (first occurrence wins) and self-references
    /// are stripped, so `direct_deps` never contains `owner`.
    pub fn new(
        owner: AssetIdentity,
        raw_deps: impl IntoIterator<Item = AssetIdentity>,
        fingerprint: Fingerprint,
    ) -> Self {
        let mut seen = HashSet::new();
        let direct_deps = raw_deps
            .into_iter()
            .filter(|dep| *dep != owner)
            .filter(|dep| seen.insert(dep.clone()))
            .collect();

        Self {
            owner,
            direct_deps,
            fingerprint,
        }
    }

    pub fn owner(&self) -> &AssetIdentity {
        &self.owner
    }

    pub fn direct_deps(&self) -> &[AssetIdentity] {
        &self.direct_deps
    }

    pub fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }

    /// True when this record was computed for the given fingerprint
    pub fn is_current(&self, fingerprint: &Fingerprint) -> bool {
        self.fingerprint == *fingerprint
    }

    /// Re-applies the normalization rules to a record that came from an
    /// untrusted store (e.g. a hand-edited cache file).
    pub(crate) fn normalized(self) -> Self {
        Self::new(self.owner, self.direct_deps, self.fingerprint)
    }
}
