//! asset-deps - reference graph analysis for asset corpora
//!
//! This library builds the forward and reverse dependency maps of a set of
//! assets, keeps an incremental cache of per-asset dependency lists, and
//! reports most-referenced, unreferenced and circularly referenced assets.
//! It follows hexagonal architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`asset_analysis`): Graph model and pure graph queries
//! - **Application Layer** (`application`): Graph builder, report generation and sessions
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Manifest source, caches, formatters and console output
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use asset_deps::prelude::*;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<()> {
//! let source = Arc::new(ManifestAssetSource::from_path(Path::new("assets.yml"))?);
//! let cache = Arc::new(InMemoryDependencyCache::new());
//! let reporter = Arc::new(StderrProgressReporter::new());
//!
//! let session = AnalysisSession::new(source.clone(), cache, reporter);
//! if let SessionState::Completed(result) = session.run(AnalysisRequest::all()).await? {
//!     let model = ReportReadModelBuilder::new(source.as_ref())
//!         .build(&result.report)
//!         .await;
//!     println!("{}", MarkdownFormatter::new().format(&model)?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod asset_analysis;
pub mod cli;
pub mod config;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::cache::{
        CacheLoadStatus, InMemoryDependencyCache, JsonFileDependencyCache,
    };
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemWriter, ManifestAssetSource, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, MarkdownFormatter};
    pub use crate::application::dto::{AnalysisRequest, OutputFormat};
    pub use crate::application::read_models::{ReportReadModel, ReportReadModelBuilder};
    pub use crate::application::session::{AnalysisSession, SessionResult, SessionState};
    pub use crate::application::use_cases::{
        BuildOutcome, BuildProgress, DependencyGraphBuilder, GenerateReportUseCase,
    };
    pub use crate::application::AnalysisService;
    pub use crate::asset_analysis::domain::{
        AnalysisReport, AssetDiagnostic, AssetIdentity, CyclePair, DependencyGraph,
        DependencyRecord, Fingerprint, ReferenceCount, ReferenceLookup,
    };
    pub use crate::asset_analysis::services::{AssetKindFilter, GraphAnalyzer};
    pub use crate::ports::inbound::AssetAnalysisPort;
    pub use crate::ports::outbound::{
        AssetSource, AssetSourceError, AssetSourceResult, DependencyCache, OutputPresenter,
        ProgressReporter, ReportFormatter,
    };
    pub use crate::shared::Result;
}
