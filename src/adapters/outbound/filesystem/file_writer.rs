use crate::ports::outbound::OutputPresenter;
use crate::shared::error::AnalysisError;
use crate::shared::Result;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// FileSystemWriter adapter for writing reports to a file
///
/// This adapter implements the OutputPresenter port for file output.
/// It refuses to follow a symbolic link at the output path and never
/// creates missing directories.
pub struct FileSystemWriter {
    output_path: PathBuf,
}

impl FileSystemWriter {
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }

    fn write_error(&self, details: impl Into<String>) -> anyhow::Error {
        AnalysisError::FileWriteError {
            path: self.output_path.clone(),
            details: details.into(),
        }
        .into()
    }

    fn validate_destination(&self) -> Result<()> {
        if let Some(parent) = self.output_path.parent() {
            if parent != Path::new("") && !parent.is_dir() {
                return Err(self.write_error(format!(
                    "Parent directory does not exist: {}",
                    parent.display()
                )));
            }
        }

        match fs::symlink_metadata(&self.output_path) {
            Ok(metadata) if metadata.is_symlink() => Err(self.write_error(
                "Security: Output path is a symbolic link. For security reasons, writing to symbolic links is not allowed.",
            )),
            Ok(metadata) if metadata.is_dir() => {
                Err(self.write_error("Output path is a directory"))
            }
            _ => Ok(()),
        }
    }
}

impl OutputPresenter for FileSystemWriter {
    fn present(&self, content: &str) -> Result<()> {
        self.validate_destination()?;

        fs::write(&self.output_path, content).map_err(|e| self.write_error(e.to_string()))?;

        eprintln!("✅ Report written to: {}", self.output_path.display());
        Ok(())
    }
}

/// StdoutPresenter adapter for writing reports to stdout
pub struct StdoutPresenter;

impl StdoutPresenter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StdoutPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputPresenter for StdoutPresenter {
    fn present(&self, content: &str) -> Result<()> {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(content.as_bytes())
            .and_then(|_| stdout.flush())
            .map_err(|e| anyhow::anyhow!("Failed to write to stdout: {}", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_writer_writes_report() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("report.md");

        FileSystemWriter::new(output_path.clone())
            .present("# Asset Dependency Report\n")
            .unwrap();

        let written = fs::read_to_string(&output_path).unwrap();
        assert_eq!(written, "# Asset Dependency Report\n");
    }

    #[test]
    fn test_file_writer_overwrites_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("report.json");
        fs::write(&output_path, "old").unwrap();

        FileSystemWriter::new(output_path.clone())
            .present("new")
            .unwrap();

        assert_eq!(fs::read_to_string(&output_path).unwrap(), "new");
    }

    #[test]
    fn test_file_writer_parent_directory_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("missing").join("report.md");

        let err = FileSystemWriter::new(output_path)
            .present("content")
            .unwrap_err();

        assert!(err.to_string().contains("Failed to write to file"));
        assert!(format!("{}", err).contains("Parent directory does not exist"));
    }

    #[test]
    fn test_file_writer_rejects_directory_target() {
        let temp_dir = TempDir::new().unwrap();

        let err = FileSystemWriter::new(temp_dir.path().to_path_buf())
            .present("content")
            .unwrap_err();

        assert!(err.to_string().contains("is a directory"));
    }

    #[cfg(unix)]
    #[test]
    fn test_file_writer_rejects_symlink() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("target.md");
        fs::write(&target, "keep").unwrap();
        let link = temp_dir.path().join("link.md");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let err = FileSystemWriter::new(link).present("overwrite").unwrap_err();

        assert!(err.to_string().contains("symbolic link"));
        assert_eq!(fs::read_to_string(&target).unwrap(), "keep");
    }

    #[test]
    fn test_stdout_presenter_success() {
        assert!(StdoutPresenter::new().present("report\n").is_ok());
    }
}
