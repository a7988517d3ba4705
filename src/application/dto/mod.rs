/// Data Transfer Objects for the application layer
///
/// DTOs carry requests from inbound adapters (CLI) into the use cases,
/// keeping the domain layer isolated from argument parsing.
mod analysis_request;
mod output_format;

pub use analysis_request::{
    default_exclude_kinds, AnalysisRequest, DEFAULT_MAX_CONCURRENCY, DEFAULT_ORPHAN_LIMIT,
    DEFAULT_TOP_REFERENCED, MAX_CONCURRENCY_LIMIT,
};
pub use output_format::OutputFormat;
