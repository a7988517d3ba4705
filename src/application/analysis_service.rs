use crate::application::dto::AnalysisRequest;
use crate::application::session::AnalysisSession;
use crate::application::use_cases::BuildProgress;
use crate::asset_analysis::domain::AnalysisReport;
use crate::ports::inbound::AssetAnalysisPort;
use crate::ports::outbound::{AssetSource, DependencyCache, ProgressReporter};
use crate::shared::error::AnalysisError;
use crate::shared::Result;
use std::sync::Arc;

/// AnalysisService - implements the inbound analysis port
///
/// Owns one [`AnalysisSession`] and the injected cache. Builds run on a
/// spawned tokio task, so [`AssetAnalysisPort::start_analysis`] must be
/// called from inside a tokio runtime.
pub struct AnalysisService {
    session: AnalysisSession,
    cache: Arc<dyn DependencyCache>,
}

impl AnalysisService {
    pub fn new(
        source: Arc<dyn AssetSource>,
        cache: Arc<dyn DependencyCache>,
        progress_reporter: Arc<dyn ProgressReporter>,
    ) -> Self {
        let session = AnalysisSession::new(source, Arc::clone(&cache), progress_reporter);
        Self { session, cache }
    }

    pub fn session(&self) -> &AnalysisSession {
        &self.session
    }
}

impl AssetAnalysisPort for AnalysisService {
    fn start_analysis(&self, request: AnalysisRequest) -> Result<AnalysisSession> {
        self.session.begin()?;

        let runner = self.session.clone();
        tokio::spawn(async move {
            runner.execute(request).await;
        });

        Ok(self.session.clone())
    }

    fn cancel(&self) -> bool {
        self.session.cancel()
    }

    fn poll_progress(&self) -> Option<BuildProgress> {
        self.session.poll_progress()
    }

    fn get_report(&self) -> Option<AnalysisReport> {
        self.session.report()
    }

    fn clear_cache(&self) -> Result<()> {
        if self.session.state().is_building() {
            return Err(AnalysisError::SessionBusy.into());
        }
        self.cache.clear();
        self.cache.persist()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::cache::InMemoryDependencyCache;
    use crate::application::session::SessionState;
    use crate::asset_analysis::domain::{AssetIdentity, DependencyRecord, Fingerprint};
    use crate::ports::outbound::{AssetSourceError, AssetSourceResult};
    use async_trait::async_trait;

    fn id(s: &str) -> AssetIdentity {
        AssetIdentity::new(s).unwrap()
    }

    /// A -> B, B -> C, C -> B
    struct TriangleSource;

    #[async_trait]
    impl AssetSource for TriangleSource {
        async fn list_all_identities(&self) -> AssetSourceResult<Vec<AssetIdentity>> {
            Ok(vec![id("A"), id("B"), id("C")])
        }

        async fn get_direct_dependencies(
            &self,
            target: &AssetIdentity,
        ) -> AssetSourceResult<Vec<AssetIdentity>> {
            match target.as_str() {
                "A" => Ok(vec![id("B")]),
                "B" => Ok(vec![id("C")]),
                "C" => Ok(vec![id("B")]),
                _ => Err(AssetSourceError::Lookup { id: target.clone() }),
            }
        }

        async fn get_display_path(&self, target: &AssetIdentity) -> AssetSourceResult<String> {
            Ok(format!("Assets/{}.asset", target))
        }

        async fn get_fingerprint(&self, _target: &AssetIdentity) -> AssetSourceResult<Fingerprint> {
            Ok(Fingerprint::new("1"))
        }
    }

    struct SilentReporter;

    impl ProgressReporter for SilentReporter {
        fn report(&self, _message: &str) {}
        fn report_progress(&self, _current: usize, _total: usize, _message: Option<&str>) {}
        fn report_error(&self, _message: &str) {}
        fn report_completion(&self, _message: &str) {}
    }

    fn service_with(cache: Arc<InMemoryDependencyCache>) -> AnalysisService {
        AnalysisService::new(Arc::new(TriangleSource), cache, Arc::new(SilentReporter))
    }

    #[tokio::test]
    async fn test_start_analysis_runs_to_completion() {
        let service = service_with(Arc::new(InMemoryDependencyCache::new()));

        let session = service.start_analysis(AnalysisRequest::all()).unwrap();
        let state = session.wait().await;

        assert!(matches!(state, SessionState::Completed(_)));
        let report = service.get_report().unwrap();
        assert_eq!(report.cycles().len(), 1);
        assert!(service.poll_progress().is_none());
        assert!(!service.cancel());
    }

    #[tokio::test]
    async fn test_clear_cache_empties_store() {
        let cache = Arc::new(InMemoryDependencyCache::with_records(vec![
            DependencyRecord::new(id("A"), vec![id("B")], Fingerprint::new("1")),
        ]));
        let service = service_with(Arc::clone(&cache));

        service.clear_cache().unwrap();
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_clear_cache_rejected_while_building() {
        let service = service_with(Arc::new(InMemoryDependencyCache::new()));
        service.session().begin().unwrap();

        let err = service.clear_cache().unwrap_err();
        assert!(err.to_string().contains("already running"));
    }
}
