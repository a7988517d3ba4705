/// Filesystem adapters for manifest input and report output
mod file_writer;
mod manifest_asset_source;

pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use manifest_asset_source::{ManifestAssetSource, ManifestFormat};
