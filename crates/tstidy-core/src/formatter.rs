//! Formatting engine entry points.

use std::path::Path;

use crate::config::FormatterConfig;
use crate::error::TstidyError;
use crate::result::Result;
use crate::{passes, render};

/// Format one document.
///
/// Pure and infallible: colon spacing normalization, depth-based rendering,
/// then the construct pass pipeline, in that order. Malformed input degrades
/// to pass-through of the ambiguous spans, never an error, and no I/O
/// happens here.
pub fn format(source: &str, config: &FormatterConfig) -> String {
    let text = passes::normalize_colon_spacing(source);
    let text = render::render(&text, config);
    passes::apply(&text, config)
}

/// How the caller intends to use formatting results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatMode {
    /// Produce formatted content for output or writing back.
    Format,
    /// Only report whether content would change.
    Check,
    /// Produce content for diff rendering.
    Diff,
}

/// Outcome of formatting one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatResult {
    pub content: String,
    pub changed: bool,
}

/// Engine wrapper carrying one immutable config for a run.
pub struct SourceFormatter {
    config: FormatterConfig,
}

impl SourceFormatter {
    pub fn new(config: FormatterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FormatterConfig {
        &self.config
    }

    /// Format in-memory content and report whether it changed.
    pub fn format_string(&self, source: &str) -> FormatResult {
        let content = format(source, &self.config);
        let changed = content != source;
        FormatResult { content, changed }
    }

    /// Read and format one file. Writing back is the caller's decision.
    pub fn format_file(&self, path: &Path) -> Result<FormatResult> {
        let source =
            std::fs::read_to_string(path).map_err(|e| TstidyError::io_error(path, e))?;
        Ok(self.format_string(&source))
    }

    /// Whether `source` already satisfies the configured style.
    pub fn check_string(&self, source: &str) -> bool {
        !self.format_string(source).changed
    }
}
