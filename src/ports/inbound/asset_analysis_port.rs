use crate::application::dto::AnalysisRequest;
use crate::application::session::AnalysisSession;
use crate::application::use_cases::BuildProgress;
use crate::asset_analysis::domain::AnalysisReport;
use crate::shared::Result;

/// AssetAnalysisPort - Inbound port for dependency analysis
///
/// This port defines the interface that external adapters (CLI, editor
/// integrations, etc.) use to drive an analysis. It represents the
/// application's public API.
pub trait AssetAnalysisPort {
    /// Starts an analysis in the background
    ///
    /// # Arguments
    /// * `request` - Assets to analyze (empty = all) and report options
    ///
    /// # Returns
    /// A handle on the session running the build, usable to wait for the
    /// terminal state
    ///
    /// # Errors
    /// Returns `SessionBusy` if an analysis is already running
    fn start_analysis(&self, request: AnalysisRequest) -> Result<AnalysisSession>;

    /// Requests cancellation of the running analysis.
    /// Returns false if nothing was running.
    fn cancel(&self) -> bool;

    /// Progress of the running analysis, if any
    fn poll_progress(&self) -> Option<BuildProgress>;

    /// Report of the most recent completed analysis
    fn get_report(&self) -> Option<AnalysisReport>;

    /// Drops every cached dependency record, in memory and on disk
    ///
    /// # Errors
    /// Returns an error if an analysis is running or the store cannot be written
    fn clear_cache(&self) -> Result<()>;
}
