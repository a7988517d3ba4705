use crate::asset_analysis::domain::AssetIdentity;
use crate::shared::error::AnalysisError;
use crate::shared::Result;

/// Default number of entries in the most-referenced ranking
pub const DEFAULT_TOP_REFERENCED: usize = 10;

/// Default cap on reported orphans
pub const DEFAULT_ORPHAN_LIMIT: usize = 20;

/// Default number of concurrent dependency lookups
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

/// Upper bound for concurrent dependency lookups
pub const MAX_CONCURRENCY_LIMIT: usize = 256;

/// Asset kinds left out of orphan reports unless configured otherwise
pub fn default_exclude_kinds() -> Vec<String> {
    vec!["*.cs".to_string(), "*.shader".to_string()]
}

/// AnalysisRequest - request DTO for one analysis invocation
///
/// An empty `assets` list means "analyze every asset the source knows".
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    /// Assets to analyze (empty = all)
    pub assets: Vec<AssetIdentity>,
    /// Length of the most-referenced ranking
    pub top_referenced: usize,
    /// Maximum number of orphans to report
    pub orphan_limit: usize,
    /// Display-path patterns whose assets never count as orphans
    pub exclude_kinds: Vec<String>,
    /// Maximum number of dependency lookups in flight
    pub max_concurrency: usize,
    /// Whether to list the referrers of each requested asset
    pub find_references: bool,
}

impl AnalysisRequest {
    pub fn new(assets: Vec<AssetIdentity>) -> Self {
        Self {
            assets,
            top_referenced: DEFAULT_TOP_REFERENCED,
            orphan_limit: DEFAULT_ORPHAN_LIMIT,
            exclude_kinds: default_exclude_kinds(),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            find_references: false,
        }
    }

    /// Request covering every known asset
    pub fn all() -> Self {
        Self::new(Vec::new())
    }

    pub fn with_top_referenced(mut self, top_referenced: usize) -> Self {
        self.top_referenced = top_referenced;
        self
    }

    pub fn with_orphan_limit(mut self, orphan_limit: usize) -> Self {
        self.orphan_limit = orphan_limit;
        self
    }

    pub fn with_exclude_kinds(mut self, exclude_kinds: Vec<String>) -> Self {
        self.exclude_kinds = exclude_kinds;
        self
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    pub fn with_find_references(mut self, find_references: bool) -> Self {
        self.find_references = find_references;
        self
    }

    pub fn is_all_assets(&self) -> bool {
        self.assets.is_empty()
    }

    /// Rejects option values the analysis cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.max_concurrency == 0 || self.max_concurrency > MAX_CONCURRENCY_LIMIT {
            return Err(AnalysisError::Validation {
                message: format!(
                    "max_concurrency must be between 1 and {} (got {})",
                    MAX_CONCURRENCY_LIMIT, self.max_concurrency
                ),
            }
            .into());
        }
        Ok(())
    }
}
