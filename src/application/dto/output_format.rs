/// Output format for analysis reports
///
/// Both the CLI (inbound adapter) and the formatters (outbound adapters)
/// need to understand this, so it lives in the application layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable Markdown report (default)
    #[default]
    Markdown,
    /// Machine-readable JSON report
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!(
                "Invalid format: {}. Please specify 'markdown' or 'json'",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_output_format_from_str_aliases() {
        assert_eq!(OutputFormat::from_str("md").unwrap(), OutputFormat::Markdown);
        assert_eq!(
            OutputFormat::from_str("MARKDOWN").unwrap(),
            OutputFormat::Markdown
        );
        assert_eq!(OutputFormat::from_str("Json").unwrap(), OutputFormat::Json);
    }

    #[test]
    fn test_output_format_from_str_invalid() {
        let error = OutputFormat::from_str("yaml").unwrap_err();
        assert!(error.contains("Invalid format"));
        assert!(error.contains("yaml"));
        assert!(OutputFormat::from_str("").is_err());
    }

    #[test]
    fn test_output_format_default_is_markdown() {
        assert_eq!(OutputFormat::default(), OutputFormat::Markdown);
    }

    #[test]
    fn test_output_format_display_round_trips() {
        for format in [OutputFormat::Markdown, OutputFormat::Json] {
            assert_eq!(OutputFormat::from_str(&format.to_string()).unwrap(), format);
        }
    }
}
