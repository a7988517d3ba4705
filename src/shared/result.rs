/// Result alias with anyhow::Error as the error type.
/// Typed errors (`AnalysisError`, `AssetSourceError`) convert into it with `?`.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
