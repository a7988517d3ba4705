use crate::application::dto::AnalysisRequest;
use crate::application::use_cases::{BuildProgress, DependencyGraphBuilder, GenerateReportUseCase};
use crate::asset_analysis::domain::{AnalysisReport, DependencyGraph};
use crate::asset_analysis::services::AssetKindFilter;
use crate::ports::outbound::{AssetSource, DependencyCache, ProgressReporter};
use crate::shared::error::AnalysisError;
use crate::shared::Result;
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// Graph and report of a completed analysis
#[derive(Debug)]
pub struct SessionResult {
    pub graph: DependencyGraph,
    pub report: AnalysisReport,
}

/// Lifecycle of an analysis session
///
/// `Idle → Building → {Completed, Cancelled, Failed}`. Any state except
/// `Building` may start a new build.
#[derive(Debug, Clone)]
pub enum SessionState {
    Idle,
    Building,
    Completed(Arc<SessionResult>),
    Cancelled,
    Failed(String),
}

impl SessionState {
    pub fn is_building(&self) -> bool {
        matches!(self, SessionState::Building)
    }

    pub fn label(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Building => "building",
            SessionState::Completed(_) => "completed",
            SessionState::Cancelled => "cancelled",
            SessionState::Failed(_) => "failed",
        }
    }
}

struct SessionInner {
    source: Arc<dyn AssetSource>,
    cache: Arc<dyn DependencyCache>,
    progress_reporter: Arc<dyn ProgressReporter>,
    cancel_requested: AtomicBool,
    processed: AtomicUsize,
    total: AtomicUsize,
    state: watch::Sender<SessionState>,
}

/// AnalysisSession - one analysis invocation and its state machine
///
/// The session is a cheap handle (`Clone` shares the same state), so a
/// spawned task can drive the build while the caller polls progress,
/// cancels, or waits for the outcome.
///
/// Builds are strictly sequential: starting while a build is running is
/// rejected with [`AnalysisError::SessionBusy`].
#[derive(Clone)]
pub struct AnalysisSession {
    inner: Arc<SessionInner>,
}

impl AnalysisSession {
    pub fn new(
        source: Arc<dyn AssetSource>,
        cache: Arc<dyn DependencyCache>,
        progress_reporter: Arc<dyn ProgressReporter>,
    ) -> Self {
        let (state, _) = watch::channel(SessionState::Idle);
        Self {
            inner: Arc::new(SessionInner {
                source,
                cache,
                progress_reporter,
                cancel_requested: AtomicBool::new(false),
                processed: AtomicUsize::new(0),
                total: AtomicUsize::new(0),
                state,
            }),
        }
    }

    /// Moves the session into `Building`, resetting progress and any
    /// earlier cancellation request.
    ///
    /// # Errors
    /// Returns `SessionBusy` if a build is already running
    pub(crate) fn begin(&self) -> Result<()> {
        let inner = &self.inner;
        let started = inner.state.send_if_modified(|state| {
            if state.is_building() {
                return false;
            }
            inner.cancel_requested.store(false, Ordering::SeqCst);
            inner.processed.store(0, Ordering::SeqCst);
            inner.total.store(0, Ordering::SeqCst);
            *state = SessionState::Building;
            true
        });

        if started {
            Ok(())
        } else {
            Err(AnalysisError::SessionBusy.into())
        }
    }

    /// Runs the build begun by [`AnalysisSession::begin`] to a terminal state
    pub(crate) async fn execute(&self, request: AnalysisRequest) -> SessionState {
        let next = match self.build_and_report(&request).await {
            Ok(Some(result)) => SessionState::Completed(Arc::new(result)),
            Ok(None) => SessionState::Cancelled,
            Err(e) => SessionState::Failed(e.to_string()),
        };

        self.inner.state.send_replace(next.clone());
        next
    }

    /// Starts a build and waits for it on the current task
    ///
    /// # Errors
    /// Returns `SessionBusy` if a build is already running. Build failures
    /// are not errors here; they end in `SessionState::Failed`.
    pub async fn run(&self, request: AnalysisRequest) -> Result<SessionState> {
        self.begin()?;
        Ok(self.execute(request).await)
    }

    /// Requests cooperative cancellation of the running build.
    /// Returns false when nothing is running.
    pub fn cancel(&self) -> bool {
        if !self.state().is_building() {
            return false;
        }
        self.inner.cancel_requested.store(true, Ordering::SeqCst);
        true
    }

    /// Progress of the running build, `None` when no build is running
    pub fn poll_progress(&self) -> Option<BuildProgress> {
        if !self.state().is_building() {
            return None;
        }
        Some(BuildProgress {
            processed: self.inner.processed.load(Ordering::SeqCst),
            total: self.inner.total.load(Ordering::SeqCst),
        })
    }

    pub fn state(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    /// Waits until the session is not building and returns that state
    pub async fn wait(&self) -> SessionState {
        let mut receiver = self.inner.state.subscribe();
        let settled = receiver
            .wait_for(|state| !state.is_building())
            .await
            .map(|state| state.clone());
        match settled {
            Ok(state) => state,
            Err(_) => self.state(),
        }
    }

    pub fn result(&self) -> Option<Arc<SessionResult>> {
        match &*self.inner.state.borrow() {
            SessionState::Completed(result) => Some(Arc::clone(result)),
            _ => None,
        }
    }

    /// Report of the last completed build
    pub fn report(&self) -> Option<AnalysisReport> {
        self.result().map(|result| result.report.clone())
    }

    /// Graph of the last completed build
    pub fn graph(&self) -> Option<DependencyGraph> {
        self.result().map(|result| result.graph.clone())
    }

    /// Returns `Ok(None)` when the build was cancelled
    async fn build_and_report(&self, request: &AnalysisRequest) -> Result<Option<SessionResult>> {
        request.validate()?;
        AssetKindFilter::new(request.exclude_kinds.clone())?;

        let inner = &self.inner;
        let reporter = inner.progress_reporter.as_ref();

        reporter.report(if request.is_all_assets() {
            "🔍 Analyzing dependencies of all assets..."
        } else {
            "🔍 Analyzing dependencies of the selected assets..."
        });

        let builder =
            DependencyGraphBuilder::new(inner.source.as_ref(), inner.cache.as_ref(), reporter);
        let built = builder
            .build(&request.assets, request.max_concurrency, |progress| {
                inner.total.store(progress.total, Ordering::SeqCst);
                inner.processed.store(progress.processed, Ordering::SeqCst);
                reporter.report_progress(progress.processed, progress.total, None);

                if inner.cancel_requested.load(Ordering::SeqCst) {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            })
            .await;

        // Records written before a cancel or failure are kept.
        if let Err(e) = inner.cache.persist() {
            reporter.report_error(&format!("⚠️  Warning: Failed to save dependency cache: {}", e));
        }

        let outcome = built?;
        if outcome.cancelled {
            reporter.report_completion(&format!(
                "⏹️  Analysis cancelled after {} of {} asset(s)",
                outcome.graph.processed_count(),
                outcome.graph.analyzed().len()
            ));
            return Ok(None);
        }

        reporter.report_completion(&format!(
            "✅ Scanned {} asset(s) ({} from cache, {} looked up)",
            outcome.graph.processed_count(),
            outcome.cache_hits,
            outcome.fetched
        ));

        let report = GenerateReportUseCase::new(inner.source.as_ref(), reporter)
            .execute(&outcome.graph, request, outcome.diagnostics)
            .await?;

        if report.diagnostic_count() > 0 {
            reporter.report_error(&format!(
                "⚠️  Warning: {} asset(s) could not be resolved and were treated as having no dependencies",
                report.diagnostic_count()
            ));
        }

        Ok(Some(SessionResult {
            graph: outcome.graph,
            report,
        }))
    }
}
