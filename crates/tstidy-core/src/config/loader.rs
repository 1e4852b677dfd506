//! Configuration file discovery and loading

use std::path::{Path, PathBuf};

use crate::config::FormatterConfig;
use crate::error::TstidyError;
use crate::result::Result;

/// Config file names probed during discovery, in priority order
const CONFIG_FILE_NAMES: &[&str] = &[
    ".tstidyrc.json",
    ".tstidyrc.toml",
    "tstidy.json",
    "tstidy.toml",
];

/// Configuration loader for discovering and loading config files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Auto-discover a config file by traversing upward from `start_path`.
    ///
    /// Each directory is probed for, in order: `.tstidyrc.json`,
    /// `.tstidyrc.toml`, `tstidy.json`, `tstidy.toml`. The walk stops at the
    /// filesystem root; `Ok(None)` means nothing was found.
    pub fn auto_discover(start_path: &Path) -> Result<Option<PathBuf>> {
        let mut current = start_path
            .canonicalize()
            .map_err(|e| TstidyError::config_error(format!("Invalid path: {e}")))?;

        loop {
            for filename in CONFIG_FILE_NAMES {
                let config_path = current.join(filename);
                if config_path.exists() && config_path.is_file() {
                    tracing::debug!("Found config: {}", config_path.display());
                    return Ok(Some(config_path));
                }
            }

            if let Some(parent) = current.parent() {
                current = parent.to_path_buf();
            } else {
                break;
            }
        }

        Ok(None)
    }

    /// Load configuration from a specific file.
    ///
    /// The format is chosen by extension: `.json` or `.toml`. Every config
    /// field is required; a missing field is a configuration error.
    pub fn load_from_file(path: &Path) -> Result<FormatterConfig> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| TstidyError::io_error(path.to_path_buf(), e))?;

        let extension = path.extension().and_then(|ext| ext.to_str());
        match extension {
            Some("json") => serde_json::from_str(&content).map_err(|e| {
                TstidyError::config_error(format!(
                    "Failed to parse '{}': {}",
                    path.display(),
                    e
                ))
            }),
            Some("toml") => toml::from_str(&content).map_err(|e| {
                TstidyError::config_error(format!(
                    "Failed to parse '{}': {}",
                    path.display(),
                    e
                ))
            }),
            _ => Err(TstidyError::config_error(format!(
                "Unsupported config format: {} (expected .json or .toml)",
                path.display()
            ))),
        }
    }

    /// Load config from an explicit path or by auto-discovery.
    ///
    /// An explicit path that does not exist is an error. Without one, the
    /// discovery walk starts from `start_dir` (or the current directory) and
    /// falls back to [`FormatterConfig::default`] when no file is found.
    pub fn load(custom_path: Option<&Path>, start_dir: Option<&Path>) -> Result<FormatterConfig> {
        if let Some(path) = custom_path {
            if !path.exists() {
                return Err(TstidyError::config_error(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Self::load_from_file(path);
        }

        let search_dir = start_dir.unwrap_or_else(|| Path::new("."));
        match Self::auto_discover(search_dir)? {
            Some(path) => Self::load_from_file(&path),
            None => {
                tracing::debug!("No config file found, using defaults");
                Ok(FormatterConfig::default())
            }
        }
    }
}
