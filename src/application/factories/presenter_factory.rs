use crate::adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
use crate::ports::outbound::OutputPresenter;
use std::path::PathBuf;

/// Where the rendered report goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterType {
    Stdout,
    File(PathBuf),
}

impl PresenterType {
    /// `None` means stdout
    pub fn from_output(output: Option<PathBuf>) -> Self {
        output.map_or(PresenterType::Stdout, PresenterType::File)
    }
}

/// Factory for creating output presenters
pub struct PresenterFactory;

impl PresenterFactory {
    /// Creates a presenter instance for the specified type
    ///
    /// # Examples
    /// ```
    /// use asset_deps::application::factories::{PresenterFactory, PresenterType};
    ///
    /// let presenter = PresenterFactory::create(PresenterType::Stdout);
    /// ```
    pub fn create(presenter_type: PresenterType) -> Box<dyn OutputPresenter> {
        match presenter_type {
            PresenterType::Stdout => Box::new(StdoutPresenter::new()),
            PresenterType::File(path) => Box::new(FileSystemWriter::new(path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_from_output() {
        assert_eq!(PresenterType::from_output(None), PresenterType::Stdout);
        assert_eq!(
            PresenterType::from_output(Some(PathBuf::from("report.md"))),
            PresenterType::File(PathBuf::from("report.md"))
        );
    }

    #[test]
    fn test_create_file_presenter_writes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("report.md");

        PresenterFactory::create(PresenterType::File(path.clone()))
            .present("content")
            .unwrap();

        assert_eq!(std::fs::read_to_string(path).unwrap(), "content");
    }
}
