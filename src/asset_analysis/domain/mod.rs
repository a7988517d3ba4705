pub mod analysis_report;
pub mod asset_identity;
pub mod dependency_graph;
pub mod dependency_record;

pub use analysis_report::{
    AnalysisReport, AssetDiagnostic, CyclePair, ReferenceCount, ReferenceLookup,
};
pub use asset_identity::{AssetIdentity, Fingerprint};
pub use dependency_graph::{DependencyGraph, ForwardMap, ReverseMap};
pub use dependency_record::DependencyRecord;
