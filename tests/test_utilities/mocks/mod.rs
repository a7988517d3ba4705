/// Mock implementations for testing
mod mock_asset_source;
mod mock_progress_reporter;

pub use mock_asset_source::{id, MockAssetSource};
pub use mock_progress_reporter::{MockProgressReporter, Reported};
