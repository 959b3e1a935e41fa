//! VG-002: Config parsing and validation.
//!
//! Reads the watch-set config (JSON, YAML, or TOML by extension) and validates
//! structural constraints:
//! - At least one watch path
//! - No empty or duplicate paths

use super::error::{Result, VigilError};
use super::types::VigilConfig;
use std::collections::HashSet;
use std::path::Path;

/// Validation error.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Supported config encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// Pick a format from the file extension; anything unrecognised is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml") | Some("yml") => ConfigFormat::Yaml,
            Some("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Json,
        }
    }
}

/// Parse a config file from disk.
pub fn parse_config_file(path: &Path) -> Result<VigilConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| VigilError::Config(format!("failed to read {}: {}", path.display(), e)))?;
    parse_config(&content, ConfigFormat::from_path(path))
}

/// Parse a config from a string.
pub fn parse_config(content: &str, format: ConfigFormat) -> Result<VigilConfig> {
    match format {
        ConfigFormat::Json => serde_json::from_str(content)
            .map_err(|e| VigilError::Config(format!("JSON parse error: {}", e))),
        ConfigFormat::Yaml => serde_yaml_ng::from_str(content)
            .map_err(|e| VigilError::Config(format!("YAML parse error: {}", e))),
        ConfigFormat::Toml => toml::from_str(content)
            .map_err(|e| VigilError::Config(format!("TOML parse error: {}", e))),
    }
}

/// Validate a parsed config. Returns a list of errors (empty = valid).
pub fn validate_config(config: &VigilConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.watch_paths.is_empty() {
        errors.push(ValidationError {
            message: "watch_paths must not be empty".to_string(),
        });
    }

    let mut seen = HashSet::new();
    for (i, path) in config.watch_paths.iter().enumerate() {
        if path.trim().is_empty() {
            errors.push(ValidationError {
                message: format!("watch_paths[{}] is empty", i),
            });
            continue;
        }
        if !seen.insert(path.as_str()) {
            errors.push(ValidationError {
                message: format!("watch path '{}' is listed more than once", path),
            });
        }
    }

    errors
}

/// Check that every watch path can be opened right now. Returns the index into
/// `watch_paths` and the error for each unreadable path.
pub fn verify_watch_paths(config: &VigilConfig) -> Vec<(usize, ValidationError)> {
    config
        .watch_paths
        .iter()
        .enumerate()
        .filter_map(|(i, p)| {
            let path = Path::new(p);
            let probe = if path.is_dir() {
                std::fs::read_dir(path).map(|_| ())
            } else {
                std::fs::File::open(path).map(|_| ())
            };
            probe.err().map(|e| {
                (
                    i,
                    ValidationError {
                        message: format!("cannot open {}: {}", p, e),
                    },
                )
            })
        })
        .collect()
}
