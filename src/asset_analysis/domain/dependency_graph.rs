use super::AssetIdentity;
use crate::shared::error::AnalysisError;
use crate::shared::Result;
use std::collections::{BTreeMap, BTreeSet};

/// Asset -> assets it depends on
pub type ForwardMap = BTreeMap<AssetIdentity, BTreeSet<AssetIdentity>>;

/// Asset -> assets that depend on it
pub type ReverseMap = BTreeMap<AssetIdentity, BTreeSet<AssetIdentity>>;

/// DependencyGraph aggregate holding the forward and reverse maps of one build
///
/// The reverse map is maintained on every insert, so
/// `b ∈ reverse[a]` holds exactly when `a ∈ forward[b]`. Reverse keys may
/// name assets outside the analyzed set (targets referenced from inside it).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    analyzed: Vec<AssetIdentity>,
    forward: ForwardMap,
    reverse: ReverseMap,
}

impl DependencyGraph {
    /// Creates an empty graph for the given (already normalized) analyzed set
    pub fn new(analyzed: Vec<AssetIdentity>) -> Self {
        Self {
            analyzed,
            forward: ForwardMap::new(),
            reverse: ReverseMap::new(),
        }
    }

    /// Records the direct dependencies of `owner`.
    ///
    /// Self-references are ignored. Inserting the same owner twice is an
    /// invariant violation: each identity is processed once per build.
    pub fn insert(&mut self, owner: AssetIdentity, deps: &[AssetIdentity]) -> Result<()> {
        if self.forward.contains_key(&owner) {
            return Err(AnalysisError::InvariantViolation {
                details: format!("asset '{}' was inserted into the graph twice", owner),
            }
            .into());
        }

        let targets: BTreeSet<AssetIdentity> =
            deps.iter().filter(|dep| **dep != owner).cloned().collect();

        for dep in &targets {
            self.reverse
                .entry(dep.clone())
                .or_default()
                .insert(owner.clone());
        }
        self.forward.insert(owner, targets);

        Ok(())
    }

    pub fn analyzed(&self) -> &[AssetIdentity] {
        &self.analyzed
    }

    pub fn forward(&self) -> &ForwardMap {
        &self.forward
    }

    pub fn reverse(&self) -> &ReverseMap {
        &self.reverse
    }

    pub fn dependencies_of(&self, id: &AssetIdentity) -> Option<&BTreeSet<AssetIdentity>> {
        self.forward.get(id)
    }

    pub fn referrers_of(&self, id: &AssetIdentity) -> Option<&BTreeSet<AssetIdentity>> {
        self.reverse.get(id)
    }

    /// Number of identities whose dependencies were recorded
    pub fn processed_count(&self) -> usize {
        self.forward.len()
    }

    /// Number of owners with at least one dependency
    pub fn owners_with_dependencies(&self) -> usize {
        self.forward.values().filter(|deps| !deps.is_empty()).count()
    }
}
