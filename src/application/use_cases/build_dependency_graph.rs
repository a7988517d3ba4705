use crate::asset_analysis::domain::{
    AssetDiagnostic, AssetIdentity, DependencyGraph, DependencyRecord,
};
use crate::ports::outbound::{AssetSource, AssetSourceError, DependencyCache, ProgressReporter};
use crate::shared::error::AnalysisError;
use crate::shared::Result;
use futures::stream::{self, StreamExt};
use futures::FutureExt;
use std::collections::HashSet;
use std::ops::ControlFlow;

/// Progress of a running build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildProgress {
    pub processed: usize,
    pub total: usize,
}

/// Result of one build
#[derive(Debug)]
pub struct BuildOutcome {
    /// Forward and reverse maps for every processed identity
    pub graph: DependencyGraph,
    /// True when the progress callback asked to stop; the graph is then partial
    pub cancelled: bool,
    /// Per-asset problems that were tolerated
    pub diagnostics: Vec<AssetDiagnostic>,
    /// Identities served from the cache without a dependency lookup
    pub cache_hits: usize,
    /// Identities whose dependencies were fetched from the source
    pub fetched: usize,
}

/// How one identity got its dependency list
enum Resolution {
    Cached(DependencyRecord),
    Fetched(DependencyRecord),
    Failed(AssetDiagnostic),
}

/// DependencyGraphBuilder - builds forward and reverse maps for a set of assets
///
/// Lookups for up to `max_concurrency` identities run at once, but results are
/// folded into the graph strictly in input order by a single loop. That loop
/// is the only writer of the maps and of the cache, so a cancelled build
/// leaves cache records for exactly the identities it processed.
pub struct DependencyGraphBuilder<'a> {
    source: &'a dyn AssetSource,
    cache: &'a dyn DependencyCache,
    progress_reporter: &'a dyn ProgressReporter,
}

impl<'a> DependencyGraphBuilder<'a> {
    pub fn new(
        source: &'a dyn AssetSource,
        cache: &'a dyn DependencyCache,
        progress_reporter: &'a dyn ProgressReporter,
    ) -> Self {
        Self {
            source,
            cache,
            progress_reporter,
        }
    }

    /// Builds the dependency graph of `requested`
    ///
    /// # Arguments
    /// * `requested` - Identities to analyze; empty means every known asset
    /// * `max_concurrency` - Maximum number of lookups in flight
    /// * `on_progress` - Called once with `processed: 0` as soon as the total
    ///   is known, then after each processed identity. Returning
    ///   `ControlFlow::Break` stops the build; the initial call's result is
    ///   ignored, so at least one identity is processed before stopping.
    ///
    /// # Errors
    /// Fails when the source is unavailable (while enumerating or during any
    /// per-asset call) or when the graph invariants are violated.
    pub async fn build<F>(
        &self,
        requested: &[AssetIdentity],
        max_concurrency: usize,
        mut on_progress: F,
    ) -> Result<BuildOutcome>
    where
        F: FnMut(BuildProgress) -> ControlFlow<()>,
    {
        let analyzed = self.normalize(requested).await?;
        let total = analyzed.len();
        let mut graph = DependencyGraph::new(analyzed.clone());

        // Cancellation is observed only after a processed identity.
        let _ = on_progress(BuildProgress { processed: 0, total });

        let mut outcome_diagnostics = Vec::new();
        let mut cache_hits = 0;
        let mut fetched = 0;
        let mut cancelled = false;
        let mut processed = 0;

        let mut resolutions = stream::iter(analyzed)
            .map(|id| async move { self.resolve(&id).await }.boxed())
            .buffered(max_concurrency.max(1));

        while let Some(resolution) = resolutions.next().await {
            let (owner, deps) = match resolution.map_err(Self::fatal)? {
                Resolution::Cached(record) => {
                    cache_hits += 1;
                    (record.owner().clone(), record.direct_deps().to_vec())
                }
                Resolution::Fetched(record) => {
                    fetched += 1;
                    let entry = (record.owner().clone(), record.direct_deps().to_vec());
                    self.cache.put(record);
                    entry
                }
                Resolution::Failed(diagnostic) => {
                    self.progress_reporter.report_error(&format!(
                        "⚠️  Warning: {} ({})",
                        diagnostic.message, diagnostic.id
                    ));
                    let owner = diagnostic.id.clone();
                    outcome_diagnostics.push(diagnostic);
                    (owner, Vec::new())
                }
            };

            graph.insert(owner, &deps)?;
            processed += 1;

            if on_progress(BuildProgress { processed, total }).is_break() {
                cancelled = true;
                break;
            }
        }

        Ok(BuildOutcome {
            graph,
            cancelled,
            diagnostics: outcome_diagnostics,
            cache_hits,
            fetched,
        })
    }

    /// Deduplicates the requested identities, keeping first-seen order.
    /// An empty request expands to every identity the source knows.
    async fn normalize(&self, requested: &[AssetIdentity]) -> Result<Vec<AssetIdentity>> {
        let candidates = if requested.is_empty() {
            self.source
                .list_all_identities()
                .await
                .map_err(|e| AnalysisError::SourceUnavailable {
                    reason: e.to_string(),
                })?
        } else {
            requested.to_vec()
        };

        let mut seen = HashSet::with_capacity(candidates.len());
        Ok(candidates
            .into_iter()
            .filter(|id| seen.insert(id.clone()))
            .collect())
    }

    /// Resolves one identity. Never touches the graph or writes the cache.
    async fn resolve(
        &self,
        id: &AssetIdentity,
    ) -> std::result::Result<Resolution, AssetSourceError> {
        let fingerprint = match self.source.get_fingerprint(id).await {
            Ok(fingerprint) => fingerprint,
            Err(AssetSourceError::Lookup { .. }) => return Ok(Self::lookup_failed(id)),
            Err(e) => return Err(e),
        };

        if let Some(record) = self.cache.get(id) {
            if record.is_current(&fingerprint) {
                return Ok(Resolution::Cached(record));
            }
        }

        match self.source.get_direct_dependencies(id).await {
            Ok(raw_deps) => Ok(Resolution::Fetched(DependencyRecord::new(
                id.clone(),
                raw_deps,
                fingerprint,
            ))),
            Err(AssetSourceError::Lookup { .. }) => Ok(Self::lookup_failed(id)),
            Err(e) => Err(e),
        }
    }

    fn lookup_failed(id: &AssetIdentity) -> Resolution {
        Resolution::Failed(AssetDiagnostic {
            id: id.clone(),
            message: "dependency lookup failed, treated as having no dependencies".to_string(),
        })
    }

    fn fatal(error: AssetSourceError) -> anyhow::Error {
        let reason = match error {
            AssetSourceError::Unavailable { reason } => reason,
            other => other.to_string(),
        };
        AnalysisError::SourceUnavailable { reason }.into()
    }
}
