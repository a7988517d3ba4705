use clap::Parser;
use std::path::PathBuf;

use crate::application::dto::{OutputFormat, MAX_CONCURRENCY_LIMIT};
use crate::shared::error::AnalysisError;
use crate::shared::Result;

/// Analyze the reference graph of an asset corpus
#[derive(Parser, Debug)]
#[command(name = "asset-deps")]
#[command(version)]
#[command(
    about = "Find most-referenced, unreferenced and circularly referenced assets",
    long_about = None
)]
pub struct Args {
    /// Asset manifest (JSON or YAML) listing every asset and its dependencies
    #[arg(short, long, value_name = "FILE")]
    pub manifest: PathBuf,

    /// Asset id to analyze; can be specified multiple times.
    /// Without any --asset every asset in the manifest is analyzed.
    #[arg(short, long = "asset", value_name = "ID")]
    pub assets: Vec<String>,

    /// Analyze every asset in the manifest
    #[arg(long, conflicts_with = "assets")]
    pub all: bool,

    /// List the assets that reference each --asset.
    /// Without any --asset every referenced asset is listed.
    #[arg(long)]
    pub find_references: bool,

    /// Drop all cached dependency records before doing anything else
    #[arg(long)]
    pub clear_cache: bool,

    /// Keep dependency records in memory only
    #[arg(long, conflicts_with = "cache")]
    pub no_cache: bool,

    /// Dependency cache store (default: .asset-deps/cache.json next to the manifest)
    #[arg(long, value_name = "PATH")]
    pub cache: Option<PathBuf>,

    /// Output format: markdown or json
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Config file (default: asset-deps.config.yml next to the manifest)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of entries in the most-referenced ranking
    #[arg(long = "top", value_name = "N")]
    pub top: Option<usize>,

    /// Maximum number of unreferenced assets to report
    #[arg(long, value_name = "N")]
    pub orphan_limit: Option<usize>,

    /// Never report unreferenced assets whose path matches these patterns (supports wildcards: *).
    /// Replaces the configured patterns. Can be specified multiple times: -e "*.cs" -e "Assets/Editor/*"
    #[arg(short, long = "exclude", value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Maximum number of concurrent dependency lookups
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// True when the invocation only asks to clear the cache
    pub fn is_clear_only(&self) -> bool {
        self.clear_cache && self.assets.is_empty() && !self.all && !self.find_references
    }

    /// Checks the values clap cannot check on its own
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| -> anyhow::Error {
            AnalysisError::Validation { message }.into()
        };

        if self.top == Some(0) {
            return Err(invalid("--top must be at least 1".to_string()));
        }
        if self.orphan_limit == Some(0) {
            return Err(invalid("--orphan-limit must be at least 1".to_string()));
        }
        if let Some(jobs) = self.jobs {
            if jobs == 0 || jobs > MAX_CONCURRENCY_LIMIT {
                return Err(invalid(format!(
                    "--jobs must be between 1 and {}",
                    MAX_CONCURRENCY_LIMIT
                )));
            }
        }
        Ok(())
    }
}
