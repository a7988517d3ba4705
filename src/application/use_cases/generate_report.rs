use crate::application::dto::AnalysisRequest;
use crate::asset_analysis::domain::{AnalysisReport, AssetDiagnostic, AssetIdentity, DependencyGraph};
use crate::asset_analysis::services::{AssetKindFilter, GraphAnalyzer};
use crate::ports::outbound::{AssetSource, ProgressReporter};
use crate::shared::Result;
use std::collections::HashSet;

/// GenerateReportUseCase - runs the graph queries over a completed build
///
/// The only I/O here is resolving display paths, which the kind filter needs
/// to decide whether an orphan candidate is excluded.
pub struct GenerateReportUseCase<'a> {
    source: &'a dyn AssetSource,
    progress_reporter: &'a dyn ProgressReporter,
}

impl<'a> GenerateReportUseCase<'a> {
    pub fn new(source: &'a dyn AssetSource, progress_reporter: &'a dyn ProgressReporter) -> Self {
        Self {
            source,
            progress_reporter,
        }
    }

    /// Produces the report for a completed (not cancelled) build
    pub async fn execute(
        &self,
        graph: &DependencyGraph,
        request: &AnalysisRequest,
        diagnostics: Vec<AssetDiagnostic>,
    ) -> Result<AnalysisReport> {
        let kind_filter = AssetKindFilter::new(request.exclude_kinds.clone())?;

        let most_referenced = GraphAnalyzer::most_referenced(graph, request.top_referenced);
        let excluded = self
            .excluded_orphan_candidates(graph, &kind_filter, request.orphan_limit)
            .await;
        let orphaned = GraphAnalyzer::orphaned(
            graph,
            |id| excluded.contains(id),
            request.orphan_limit,
        );

        for pattern in kind_filter.unmatched_patterns() {
            self.progress_reporter.report(&format!(
                "ℹ️  Exclude pattern '{}' did not match any unreferenced asset",
                pattern
            ));
        }

        let references = match (request.find_references, request.assets.is_empty()) {
            (false, _) => Vec::new(),
            (true, true) => GraphAnalyzer::all_references(graph),
            (true, false) => GraphAnalyzer::find_references(graph, &request.assets),
        };

        Ok(AnalysisReport::new(
            most_referenced,
            orphaned,
            GraphAnalyzer::cycles(graph),
            GraphAnalyzer::cycle_chains(graph),
            references,
            graph.processed_count(),
            graph.owners_with_dependencies(),
            diagnostics,
        ))
    }

    /// Walks unreferenced assets in analyzed order and collects the ones whose
    /// display path matches the kind filter. Stops once `limit` candidates
    /// have been kept, since later ones can never make it into the report.
    async fn excluded_orphan_candidates(
        &self,
        graph: &DependencyGraph,
        kind_filter: &AssetKindFilter,
        limit: usize,
    ) -> HashSet<AssetIdentity> {
        let mut excluded = HashSet::new();
        if kind_filter.is_empty() {
            return excluded;
        }

        let mut kept = 0;
        for id in graph.analyzed() {
            if kept >= limit {
                break;
            }
            let unreferenced = graph
                .referrers_of(id)
                .map_or(true, |referrers| referrers.is_empty());
            if !unreferenced {
                continue;
            }

            let display_path = self
                .source
                .get_display_path(id)
                .await
                .unwrap_or_else(|_| id.to_string());
            if kind_filter.matches(&display_path) {
                excluded.insert(id.clone());
            } else {
                kept += 1;
            }
        }
        excluded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset_analysis::domain::Fingerprint;
    use crate::ports::outbound::{AssetSourceError, AssetSourceResult};
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn id(s: &str) -> AssetIdentity {
        AssetIdentity::new(s).unwrap()
    }

    /// Display paths are `<id>.<ext>` where ext is looked up in `kinds`
    struct PathSource {
        kinds: Vec<(&'static str, &'static str)>,
    }

    #[async_trait]
    impl AssetSource for PathSource {
        async fn list_all_identities(&self) -> AssetSourceResult<Vec<AssetIdentity>> {
            Ok(Vec::new())
        }

        async fn get_direct_dependencies(
            &self,
            target: &AssetIdentity,
        ) -> AssetSourceResult<Vec<AssetIdentity>> {
            Err(AssetSourceError::Lookup { id: target.clone() })
        }

        async fn get_display_path(&self, target: &AssetIdentity) -> AssetSourceResult<String> {
            self.kinds
                .iter()
                .find(|(name, _)| *name == target.as_str())
                .map(|(name, ext)| format!("Assets/{}.{}", name, ext))
                .ok_or_else(|| AssetSourceError::Lookup { id: target.clone() })
        }

        async fn get_fingerprint(&self, _target: &AssetIdentity) -> AssetSourceResult<Fingerprint> {
            Ok(Fingerprint::new("fp"))
        }
    }

    #[derive(Default)]
    struct RecordingReporter {
        messages: Mutex<Vec<String>>,
    }

    impl ProgressReporter for RecordingReporter {
        fn report(&self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }
        fn report_progress(&self, _current: usize, _total: usize, _message: Option<&str>) {}
        fn report_error(&self, _message: &str) {}
        fn report_completion(&self, _message: &str) {}
    }

    fn graph_of(edges: &[(&str, &[&str])]) -> DependencyGraph {
        let mut graph = DependencyGraph::new(edges.iter().map(|(owner, _)| id(owner)).collect());
        for (owner, deps) in edges {
            let deps: Vec<_> = deps.iter().map(|d| id(d)).collect();
            graph.insert(id(owner), &deps).unwrap();
        }
        graph
    }

    #[tokio::test]
    async fn test_report_for_mutual_pair_example() {
        let graph = graph_of(&[("A", &["B"]), ("B", &["C"]), ("C", &["B"])]);
        let source = PathSource {
            kinds: vec![("A", "prefab"), ("B", "mat"), ("C", "mat")],
        };
        let reporter = RecordingReporter::default();

        let report = GenerateReportUseCase::new(&source, &reporter)
            .execute(&graph, &AnalysisRequest::all(), Vec::new())
            .await
            .unwrap();

        assert_eq!(report.most_referenced().len(), 1);
        assert_eq!(report.most_referenced()[0].id, id("B"));
        assert_eq!(report.most_referenced()[0].count, 2);
        assert_eq!(report.orphaned(), &[id("A")]);
        assert_eq!(report.cycles().len(), 1);
        assert_eq!(report.cycles()[0].first, id("B"));
        assert_eq!(report.cycles()[0].second, id("C"));
        assert_eq!(report.cycle_chains(), &[vec![id("B"), id("C")]]);
        assert_eq!(report.scanned_count(), 3);
        assert_eq!(report.relationship_count(), 3);
        assert!(report.references().is_empty());
    }

    #[tokio::test]
    async fn test_excluded_kinds_are_not_orphans() {
        let graph = graph_of(&[("Script", &[]), ("Shader", &[]), ("Texture", &[])]);
        let source = PathSource {
            kinds: vec![("Script", "cs"), ("Shader", "shader"), ("Texture", "png")],
        };
        let reporter = RecordingReporter::default();

        let report = GenerateReportUseCase::new(&source, &reporter)
            .execute(&graph, &AnalysisRequest::all(), Vec::new())
            .await
            .unwrap();

        assert_eq!(report.orphaned(), &[id("Texture")]);
        assert!(reporter.messages.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_orphan_limit_and_unknown_display_path() {
        let graph = graph_of(&[("X1", &[]), ("X2", &[]), ("X3", &[])]);
        let source = PathSource { kinds: vec![] };
        let reporter = RecordingReporter::default();
        let request = AnalysisRequest::all()
            .with_orphan_limit(2)
            .with_exclude_kinds(vec!["*.meta".to_string()]);

        let report = GenerateReportUseCase::new(&source, &reporter)
            .execute(&graph, &request, Vec::new())
            .await
            .unwrap();

        assert_eq!(report.orphaned(), &[id("X1"), id("X2")]);
        let messages = reporter.messages.lock().unwrap();
        assert!(messages.iter().any(|m| m.contains("*.meta")));
    }

    #[tokio::test]
    async fn test_find_references_uses_request_selection() {
        let graph = graph_of(&[("A", &["B"]), ("B", &[])]);
        let source = PathSource { kinds: vec![] };
        let reporter = RecordingReporter::default();
        let request = AnalysisRequest::new(vec![id("B"), id("A"), id("Nope")])
            .with_find_references(true);

        let report = GenerateReportUseCase::new(&source, &reporter)
            .execute(&graph, &request, Vec::new())
            .await
            .unwrap();

        let references = report.references();
        assert_eq!(references.len(), 3);
        assert_eq!(references[0].referrers, Some(vec![id("A")]));
        assert_eq!(references[1].referrers, Some(vec![]));
        assert_eq!(references[2].referrers, None);
    }

    #[tokio::test]
    async fn test_invalid_exclude_pattern_is_rejected() {
        let graph = graph_of(&[("A", &[])]);
        let source = PathSource { kinds: vec![] };
        let reporter = RecordingReporter::default();
        let request = AnalysisRequest::all().with_exclude_kinds(vec!["*".to_string()]);

        let result = GenerateReportUseCase::new(&source, &reporter)
            .execute(&graph, &request, Vec::new())
            .await;

        assert!(result.is_err());
    }
}
