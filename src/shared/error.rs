use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow scripts and CI systems to distinguish a cancelled
/// analysis from a failed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Analysis completed and the report was written
    Success = 0,
    /// Analysis was cancelled before completion; no report was produced
    AnalysisCancelled = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (manifest error, asset source unavailable, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::AnalysisCancelled => write!(f, "Analysis Cancelled (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for asset dependency analysis.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// keeping user-facing messages next to the variants they describe.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Asset source is unavailable\nReason: {reason}\n\n💡 Hint: Verify that the asset manifest or database can be reached, then retry the analysis")]
    SourceUnavailable { reason: String },

    #[error("An analysis is already running in this session\n\n💡 Hint: Cancel the running analysis or wait for it to finish")]
    SessionBusy,

    #[error("Dependency graph invariant violated: {details}")]
    InvariantViolation { details: String },

    #[error("Failed to parse asset manifest: {path}\nDetails: {details}\n\n💡 Hint: The manifest must contain an 'assets' list with 'id' and 'path' for every entry")]
    InvalidManifest { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    /// Validation error for identities, patterns and request options
    #[error("Validation error: {message}")]
    Validation { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::AnalysisCancelled.as_i32(), 1);
        assert_eq!(ExitCode::InvalidArguments.as_i32(), 2);
        assert_eq!(ExitCode::ApplicationError.as_i32(), 3);
    }

    #[test]
    fn test_exit_code_display() {
        assert_eq!(format!("{}", ExitCode::Success), "Success (0)");
        assert_eq!(
            format!("{}", ExitCode::AnalysisCancelled),
            "Analysis Cancelled (1)"
        );
        assert_eq!(
            format!("{}", ExitCode::ApplicationError),
            "Application Error (3)"
        );
    }

    #[test]
    fn test_source_unavailable_display() {
        let error = AnalysisError::SourceUnavailable {
            reason: "database offline".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Asset source is unavailable"));
        assert!(display.contains("database offline"));
        assert!(display.contains("💡 Hint:"));
    }

    #[test]
    fn test_invalid_manifest_display() {
        let error = AnalysisError::InvalidManifest {
            path: PathBuf::from("/test/assets.json"),
            details: "missing field `id`".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Failed to parse asset manifest"));
        assert!(display.contains("/test/assets.json"));
        assert!(display.contains("missing field `id`"));
    }

    #[test]
    fn test_session_busy_display() {
        let display = format!("{}", AnalysisError::SessionBusy);
        assert!(display.contains("already running"));
    }

    #[test]
    fn test_file_write_error_display() {
        let error = AnalysisError::FileWriteError {
            path: PathBuf::from("/test/report.md"),
            details: "Permission denied".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Failed to write to file"));
        assert!(display.contains("/test/report.md"));
        assert!(display.contains("Permission denied"));
    }
}
