//! Builder for constructing ReportReadModel from an AnalysisReport

use super::report_read_model::{
    AssetView, CycleView, DiagnosticView, ReferenceView, ReferencedAssetView, ReportReadModel,
    SummaryView,
};
use crate::asset_analysis::domain::{AnalysisReport, AssetIdentity};
use crate::ports::outbound::AssetSource;
use std::collections::HashMap;

/// Builder for constructing ReportReadModel from domain objects
///
/// Display paths are looked up once per identity. An identity the source
/// cannot resolve is shown by its id.
pub struct ReportReadModelBuilder<'a> {
    source: &'a dyn AssetSource,
    paths: HashMap<AssetIdentity, String>,
}

impl<'a> ReportReadModelBuilder<'a> {
    pub fn new(source: &'a dyn AssetSource) -> Self {
        Self {
            source,
            paths: HashMap::new(),
        }
    }

    pub async fn build(mut self, report: &AnalysisReport) -> ReportReadModel {
        let summary = SummaryView {
            timestamp: report.timestamp().to_rfc3339(),
            scanned_count: report.scanned_count(),
            relationship_count: report.relationship_count(),
            diagnostic_count: report.diagnostic_count(),
        };

        let mut most_referenced = Vec::with_capacity(report.most_referenced().len());
        for entry in report.most_referenced() {
            most_referenced.push(ReferencedAssetView {
                asset: self.view(&entry.id).await,
                count: entry.count,
            });
        }

        let mut orphaned = Vec::with_capacity(report.orphaned().len());
        for id in report.orphaned() {
            orphaned.push(self.view(id).await);
        }

        let mut cycles = Vec::with_capacity(report.cycles().len());
        for pair in report.cycles() {
            cycles.push(CycleView {
                first: self.view(&pair.first).await,
                second: self.view(&pair.second).await,
            });
        }

        let mut cycle_chains = Vec::with_capacity(report.cycle_chains().len());
        for chain in report.cycle_chains() {
            cycle_chains.push(self.views(chain).await);
        }

        let mut references = Vec::with_capacity(report.references().len());
        for lookup in report.references() {
            let referrers = match &lookup.referrers {
                Some(referrers) => Some(self.views(referrers).await),
                None => None,
            };
            references.push(ReferenceView {
                target: self.view(&lookup.target).await,
                referrers,
            });
        }

        let mut diagnostics = Vec::with_capacity(report.diagnostics().len());
        for diagnostic in report.diagnostics() {
            diagnostics.push(DiagnosticView {
                asset: self.view(&diagnostic.id).await,
                message: diagnostic.message.clone(),
            });
        }

        ReportReadModel {
            summary,
            most_referenced,
            orphaned,
            cycles,
            cycle_chains,
            references,
            diagnostics,
        }
    }

    async fn views(&mut self, ids: &[AssetIdentity]) -> Vec<AssetView> {
        let mut views = Vec::with_capacity(ids.len());
        for id in ids {
            views.push(self.view(id).await);
        }
        views
    }

    async fn view(&mut self, id: &AssetIdentity) -> AssetView {
        let path = match self.paths.get(id) {
            Some(path) => path.clone(),
            None => {
                let path = self
                    .source
                    .get_display_path(id)
                    .await
                    .unwrap_or_else(|_| id.to_string());
                self.paths.insert(id.clone(), path.clone());
                path
            }
        };

        AssetView {
            id: id.to_string(),
            path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset_analysis::domain::{
        AssetDiagnostic, CyclePair, Fingerprint, ReferenceCount, ReferenceLookup,
    };
    use crate::ports::outbound::{AssetSourceError, AssetSourceResult};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn id(s: &str) -> AssetIdentity {
        AssetIdentity::new(s).unwrap()
    }

    /// Knows display paths for every id except "ghost"
    struct CountingSource {
        path_calls: AtomicUsize,
    }

    #[async_trait]
    impl AssetSource for CountingSource {
        async fn list_all_identities(&self) -> AssetSourceResult<Vec<AssetIdentity>> {
            Ok(Vec::new())
        }

        async fn get_direct_dependencies(
            &self,
            _target: &AssetIdentity,
        ) -> AssetSourceResult<Vec<AssetIdentity>> {
            Ok(Vec::new())
        }

        async fn get_display_path(&self, target: &AssetIdentity) -> AssetSourceResult<String> {
            self.path_calls.fetch_add(1, Ordering::SeqCst);
            if target.as_str() == "ghost" {
                return Err(AssetSourceError::Lookup { id: target.clone() });
            }
            Ok(format!("Assets/{}.mat", target))
        }

        async fn get_fingerprint(&self, _target: &AssetIdentity) -> AssetSourceResult<Fingerprint> {
            Ok(Fingerprint::new("1"))
        }
    }

    fn sample_report() -> AnalysisReport {
        AnalysisReport::new(
            vec![ReferenceCount { id: id("B"), count: 2 }],
            vec![id("A")],
            vec![CyclePair::new(id("B"), id("C"))],
            vec![vec![id("B"), id("C")]],
            vec![
                ReferenceLookup {
                    target: id("B"),
                    referrers: Some(vec![id("A"), id("C")]),
                },
                ReferenceLookup {
                    target: id("ghost"),
                    referrers: None,
                },
            ],
            3,
            3,
            vec![AssetDiagnostic {
                id: id("ghost"),
                message: "lookup failed".to_string(),
            }],
        )
    }

    #[tokio::test]
    async fn test_build_resolves_display_paths() {
        let source = CountingSource {
            path_calls: AtomicUsize::new(0),
        };
        let model = ReportReadModelBuilder::new(&source)
            .build(&sample_report())
            .await;

        assert_eq!(model.summary.scanned_count, 3);
        assert_eq!(model.summary.diagnostic_count, 1);
        assert_eq!(model.most_referenced[0].asset.path, "Assets/B.mat");
        assert_eq!(model.orphaned[0].path, "Assets/A.mat");
        assert_eq!(model.cycles[0].second.id, "C");
        assert_eq!(model.cycle_chains[0].len(), 2);
        assert!(model.references[1].referrers.is_none());
    }

    #[tokio::test]
    async fn test_unresolvable_path_falls_back_to_id() {
        let source = CountingSource {
            path_calls: AtomicUsize::new(0),
        };
        let model = ReportReadModelBuilder::new(&source)
            .build(&sample_report())
            .await;

        assert_eq!(model.diagnostics[0].asset.path, "ghost");
        assert_eq!(model.references[1].target.path, "ghost");
    }

    #[tokio::test]
    async fn test_each_identity_is_resolved_once() {
        let source = CountingSource {
            path_calls: AtomicUsize::new(0),
        };
        ReportReadModelBuilder::new(&source)
            .build(&sample_report())
            .await;

        // A, B, C, ghost
        assert_eq!(source.path_calls.load(Ordering::SeqCst), 4);
    }
}
