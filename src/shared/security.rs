use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum size of any input file we load (manifest, config, cache store).
pub const MAX_FILE_SIZE: u64 = 256 * 1024 * 1024;

/// Validates that a path exists and is a regular file (not a directory or symlink)
///
/// # Arguments
/// * `path` - The path to validate
/// * `file_description` - Description of the file (e.g., "asset manifest", "cache store")
///
/// # Errors
/// Returns an error if:
/// - The path doesn't exist
/// - The path is a symbolic link
/// - The path is not a regular file
pub fn validate_regular_file(path: &Path, file_description: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {} metadata: {}", file_description, e))?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
            path.display()
        );
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    validate_file_size(metadata.len(), path, MAX_FILE_SIZE)
}

/// Validates file size is within acceptable limits
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            file_size,
            max_size
        );
    }
    Ok(())
}

/// Reads a file to a string after the regular-file and size checks pass.
pub fn read_regular_file(path: &Path, file_description: &str) -> Result<String> {
    validate_regular_file(path, file_description)?;
    fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", file_description, e))
}
