//! Configuration file support for asset-deps.
//!
//! Provides YAML-based configuration through `asset-deps.config.yml` files,
//! including data structures, file loading, and validation.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::application::dto::MAX_CONCURRENCY_LIMIT;
use crate::shared::security::read_regular_file;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "asset-deps.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub format: Option<String>,
    pub top_referenced: Option<usize>,
    pub orphan_limit: Option<usize>,
    pub exclude_kinds: Option<Vec<String>>,
    pub max_concurrency: Option<usize>,
    /// Dependency cache store; relative paths resolve against the config file's directory
    pub cache_path: Option<PathBuf>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = read_regular_file(path, "config file").with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let mut config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    if let (Some(cache_path), Some(base)) = (config.cache_path.take(), path.parent()) {
        config.cache_path = Some(if cache_path.is_relative() {
            base.join(cache_path)
        } else {
            cache_path
        });
    }

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref format) = config.format {
        if format.parse::<crate::application::dto::OutputFormat>().is_err() {
            bail!(
                "Invalid config: format '{}' is not supported.\n\n\
                 💡 Hint: Use 'markdown' or 'json'.",
                format
            );
        }
    }

    if config.top_referenced == Some(0) {
        bail!(
            "Invalid config: top_referenced must be at least 1.\n\n\
             💡 Hint: Remove the field to use the default of 10."
        );
    }

    if config.orphan_limit == Some(0) {
        bail!(
            "Invalid config: orphan_limit must be at least 1.\n\n\
             💡 Hint: Remove the field to use the default of 20."
        );
    }

    if let Some(jobs) = config.max_concurrency {
        if jobs == 0 || jobs > MAX_CONCURRENCY_LIMIT {
            bail!(
                "Invalid config: max_concurrency must be between 1 and {} (got {}).",
                MAX_CONCURRENCY_LIMIT,
                jobs
            );
        }
    }

    if let Some(ref patterns) = config.exclude_kinds {
        for (i, pattern) in patterns.iter().enumerate() {
            if pattern.trim().is_empty() {
                bail!(
                    "Invalid config: exclude_kinds[{}] must not be empty.\n\n\
                     💡 Hint: Each pattern matches display paths, e.g. \"*.cs\" or \"Assets/Editor/*\".",
                    i
                );
            }
        }
    }

    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    let mut keys: Vec<&String> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        eprintln!("⚠️  Warning: Unknown config field '{}' will be ignored.", key);
    }
}
