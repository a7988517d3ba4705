mod asset_kind_filter;
mod cycle_detector;
mod graph_analyzer;

pub use asset_kind_filter::AssetKindFilter;
pub use cycle_detector::CycleDetector;
pub use graph_analyzer::GraphAnalyzer;
