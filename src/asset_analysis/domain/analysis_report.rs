use super::AssetIdentity;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// An asset together with the number of analyzed assets that reference it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceCount {
    pub id: AssetIdentity,
    pub count: usize,
}

/// Two assets that reference each other directly.
/// Stored with `first < second`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct CyclePair {
    pub first: AssetIdentity,
    pub second: AssetIdentity,
}

impl CyclePair {
    pub fn new(a: AssetIdentity, b: AssetIdentity) -> Self {
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }
}

/// A per-asset problem that was tolerated during the build
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetDiagnostic {
    pub id: AssetIdentity,
    pub message: String,
}

/// Referrers of one selected asset. `None` means the asset is unknown to
/// the reverse index of the build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceLookup {
    pub target: AssetIdentity,
    pub referrers: Option<Vec<AssetIdentity>>,
}

/// Immutable result of one completed analysis
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    most_referenced: Vec<ReferenceCount>,
    orphaned: Vec<AssetIdentity>,
    cycles: Vec<CyclePair>,
    cycle_chains: Vec<Vec<AssetIdentity>>,
    references: Vec<ReferenceLookup>,
    scanned_count: usize,
    relationship_count: usize,
    diagnostics: Vec<AssetDiagnostic>,
    timestamp: DateTime<Utc>,
}

impl AnalysisReport {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        most_referenced: Vec<ReferenceCount>,
        orphaned: Vec<AssetIdentity>,
        cycles: Vec<CyclePair>,
        cycle_chains: Vec<Vec<AssetIdentity>>,
        references: Vec<ReferenceLookup>,
        scanned_count: usize,
        relationship_count: usize,
        diagnostics: Vec<AssetDiagnostic>,
    ) -> Self {
        Self {
            most_referenced,
            orphaned,
            cycles,
            cycle_chains,
            references,
            scanned_count,
            relationship_count,
            diagnostics,
            timestamp: Utc::now(),
        }
    }

    pub fn most_referenced(&self) -> &[ReferenceCount] {
        &self.most_referenced
    }

    pub fn orphaned(&self) -> &[AssetIdentity] {
        &self.orphaned
    }

    pub fn cycles(&self) -> &[CyclePair] {
        &self.cycles
    }

    pub fn cycle_chains(&self) -> &[Vec<AssetIdentity>] {
        &self.cycle_chains
    }

    pub fn references(&self) -> &[ReferenceLookup] {
        &self.references
    }

    pub fn scanned_count(&self) -> usize {
        self.scanned_count
    }

    /// Number of analyzed assets that have at least one dependency
    pub fn relationship_count(&self) -> usize {
        self.relationship_count
    }

    pub fn diagnostics(&self) -> &[AssetDiagnostic] {
        &self.diagnostics
    }

    pub fn diagnostic_count(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
