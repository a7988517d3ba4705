/// Application layer - Use cases, sessions and DTOs
///
/// This layer contains the application logic that orchestrates
/// domain services and coordinates with infrastructure through ports.
pub mod analysis_service;
pub mod dto;
pub mod factories;
pub mod read_models;
pub mod session;
pub mod use_cases;

pub use analysis_service::AnalysisService;
