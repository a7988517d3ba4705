//! Report read model for rendering
//!
//! A denormalized view of an `AnalysisReport` in which every identity is
//! paired with its display path, so formatters never need the asset source.

/// Main read model for an analysis report
#[derive(Debug, Clone)]
pub struct ReportReadModel {
    pub summary: SummaryView,
    pub most_referenced: Vec<ReferencedAssetView>,
    pub orphaned: Vec<AssetView>,
    pub cycles: Vec<CycleView>,
    pub cycle_chains: Vec<Vec<AssetView>>,
    /// Empty unless a reference lookup was requested
    pub references: Vec<ReferenceView>,
    pub diagnostics: Vec<DiagnosticView>,
}

/// Header figures of the report
#[derive(Debug, Clone)]
pub struct SummaryView {
    /// RFC 3339 timestamp of the analysis
    pub timestamp: String,
    pub scanned_count: usize,
    /// Analyzed assets with at least one dependency
    pub relationship_count: usize,
    pub diagnostic_count: usize,
}

/// An identity with its display path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetView {
    pub id: String,
    pub path: String,
}

#[derive(Debug, Clone)]
pub struct ReferencedAssetView {
    pub asset: AssetView,
    pub count: usize,
}

/// Two assets that reference each other
#[derive(Debug, Clone)]
pub struct CycleView {
    pub first: AssetView,
    pub second: AssetView,
}

/// Referrers of one selected asset; `None` when the asset was never seen
#[derive(Debug, Clone)]
pub struct ReferenceView {
    pub target: AssetView,
    pub referrers: Option<Vec<AssetView>>,
}

#[derive(Debug, Clone)]
pub struct DiagnosticView {
    pub asset: AssetView,
    pub message: String,
}
