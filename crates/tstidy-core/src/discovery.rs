//! Source file discovery for formatting runs
//!
//! This module locates the TypeScript sources a run operates on, either by
//! walking a project tree or by resolving explicit glob patterns, and filters
//! the result through exclude patterns.

use crate::error::TstidyError;
use crate::result::Result;
use glob::Pattern;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// File extensions recognized as formattable sources
pub const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx"];

/// Directory names the walker never descends into
const SKIPPED_DIRS: &[&str] = &["node_modules"];

/// Trait for source file discovery
pub trait FileDiscovery {
    /// Discover formattable files under the root directory
    fn discover(&self) -> Result<Vec<PathBuf>>;

    /// Discover files matching explicit include patterns, minus excludes
    fn discover_with_patterns(
        &self,
        include: &[String],
        exclude: &[String],
    ) -> Result<Vec<PathBuf>>;
}

/// Default implementation of file discovery
#[derive(Debug, Clone)]
pub struct DefaultFileDiscovery {
    /// Root directory for file discovery
    root_dir: PathBuf,
}

impl DefaultFileDiscovery {
    /// Create a new file discovery instance rooted at a directory
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Root directory the walk starts from
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Check whether a path carries a formattable extension
    pub fn is_source_file(path: &Path) -> bool {
        path.extension()
            .map(|ext| {
                let ext_str = ext.to_string_lossy().to_lowercase();
                SOURCE_EXTENSIONS.iter().any(|allowed| *allowed == ext_str)
            })
            .unwrap_or(false)
    }

    // Depth 0 is the root itself and must pass or the walk yields nothing.
    fn keep_entry(entry: &DirEntry) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return true;
        }
        let name = entry.file_name().to_string_lossy();
        !name.starts_with('.') && !SKIPPED_DIRS.contains(&name.as_ref())
    }

    /// Discover files by walking the directory tree
    fn discover_by_walking(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.root_dir)
            .follow_links(false)
            .into_iter()
            .filter_entry(Self::keep_entry)
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && Self::is_source_file(path) {
                files.push(path.to_path_buf());
            }
        }

        files
    }

    /// Discover files using glob patterns rooted at the discovery root
    fn discover_with_globs(&self, patterns: &[String]) -> Result<Vec<PathBuf>> {
        let mut files = BTreeSet::new();

        for pattern in patterns {
            let full_pattern = if Path::new(pattern).is_absolute() {
                pattern.clone()
            } else {
                format!("{}/{}", self.root_dir.display(), pattern)
            };

            let entries = glob::glob(&full_pattern).map_err(|e| {
                TstidyError::discovery_error(format!("Invalid glob pattern '{pattern}': {e}"))
            })?;

            for entry in entries {
                match entry {
                    Ok(path) => {
                        if path.is_file() {
                            files.insert(path);
                        }
                    }
                    Err(e) => warn!("Glob entry error: {}", e),
                }
            }
        }

        Ok(files.into_iter().collect())
    }

    fn compile_patterns(&self, patterns: &[String]) -> Result<Vec<Pattern>> {
        patterns
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|e| {
                    TstidyError::discovery_error(format!("Invalid exclude pattern '{p}': {e}"))
                })
            })
            .collect()
    }

    /// Check if a path matches any exclude pattern
    fn is_excluded(&self, path: &Path, patterns: &[Pattern]) -> bool {
        // Patterns are written relative to the root, so match against that form.
        let relative = path.strip_prefix(&self.root_dir).unwrap_or(path);
        let path_str = relative.to_string_lossy();

        patterns.iter().any(|pattern| pattern.matches(&path_str))
    }
}

impl FileDiscovery for DefaultFileDiscovery {
    fn discover(&self) -> Result<Vec<PathBuf>> {
        self.discover_with_patterns(&[], &[])
    }

    fn discover_with_patterns(
        &self,
        include: &[String],
        exclude: &[String],
    ) -> Result<Vec<PathBuf>> {
        debug!("Discovering source files in {}", self.root_dir.display());

        let mut files = if include.is_empty() {
            self.discover_by_walking()
        } else {
            self.discover_with_globs(include)?
        };

        if !exclude.is_empty() {
            let exclude_patterns = self.compile_patterns(exclude)?;
            files.retain(|path| !self.is_excluded(path, &exclude_patterns));
        }

        // Sorted, duplicate-free output keeps run order deterministic.
        files.sort();
        files.dedup();

        debug!("Discovered {} source files", files.len());
        Ok(files)
    }
}
