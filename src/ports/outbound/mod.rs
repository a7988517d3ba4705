/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (asset database, cache store, console, etc.).
pub mod asset_source;
pub mod dependency_cache;
pub mod formatter;
pub mod output_presenter;
pub mod progress_reporter;

pub use asset_source::{AssetSource, AssetSourceError, AssetSourceResult};
pub use dependency_cache::DependencyCache;
pub use formatter::ReportFormatter;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
