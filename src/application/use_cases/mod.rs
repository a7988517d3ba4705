/// Use cases module containing application business logic orchestration
mod build_dependency_graph;
mod generate_report;

pub use build_dependency_graph::{BuildOutcome, BuildProgress, DependencyGraphBuilder};
pub use generate_report::GenerateReportUseCase;
