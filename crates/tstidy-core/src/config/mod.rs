//! Configuration system for tstidy
//!
//! Strongly typed style policy with serde (camelCase wire form, matching the
//! JSON config files the tool reads) and file discovery/loading.
//!
//! ## Configuration files
//!
//! Two formats are supported:
//! - `.tstidyrc.json` / `tstidy.json` - JSON
//! - `.tstidyrc.toml` / `tstidy.toml` - TOML
//!
//! When no explicit path is given, discovery starts from the working
//! directory and walks up until a config file is found or the filesystem
//! root is reached. Every field is required in a config file; defaults only
//! apply when no file exists at all.
//!
//! ## Example
//!
//! ```json
//! {
//!   "indentation": { "type": "spaces", "size": 2 },
//!   "importFormat": { "spacesAroundImports": true },
//!   "maxLineLength": 100,
//!   "objectFormatting": { "maxPropertiesPerLine": 3, "trailingComma": false },
//!   "typeFormatting": { "maxPropertiesPerLine": 3, "trailingSemicolon": true },
//!   "arrayFormatting": { "maxElementsPerLine": 3, "trailingSemicolon": true }
//! }
//! ```

mod loader;

pub use loader::ConfigLoader;

use serde::{Deserialize, Serialize};

/// Indentation character class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndentationKind {
    Spaces,
    Tabs,
}

/// Indentation policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndentationConfig {
    /// Character class used for indentation
    #[serde(rename = "type")]
    pub kind: IndentationKind,
    /// Units of that character per depth level
    pub size: usize,
}

/// Import statement style
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportFormatConfig {
    /// `{ A, B }` when true, `{A,B}` when false
    pub spaces_around_imports: bool,
}

/// Object literal style
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectFormattingConfig {
    /// Item count above which the literal is forced onto multiple lines
    pub max_properties_per_line: usize,
    /// Comma after the last item in multi-line form
    pub trailing_comma: bool,
}

/// Type annotation block style
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeFormattingConfig {
    pub max_properties_per_line: usize,
    /// Semicolon after the last property in multi-line form
    pub trailing_semicolon: bool,
}

/// Array literal style
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayFormattingConfig {
    pub max_elements_per_line: usize,
    /// Ensure the statement ends with a semicolon after the closing bracket
    pub trailing_semicolon: bool,
}

/// Complete style policy for one formatting run.
///
/// Loaded once, shared by reference, never mutated. The core consumes every
/// field except `max_line_length`, which is carried for callers but not
/// enforced by the transformations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatterConfig {
    pub indentation: IndentationConfig,
    pub import_format: ImportFormatConfig,
    pub max_line_length: usize,
    pub object_formatting: ObjectFormattingConfig,
    pub type_formatting: TypeFormattingConfig,
    pub array_formatting: ArrayFormattingConfig,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            indentation: IndentationConfig {
                kind: IndentationKind::Spaces,
                size: 2,
            },
            import_format: ImportFormatConfig {
                spaces_around_imports: true,
            },
            max_line_length: 100,
            object_formatting: ObjectFormattingConfig {
                max_properties_per_line: 3,
                trailing_comma: false,
            },
            type_formatting: TypeFormattingConfig {
                max_properties_per_line: 3,
                trailing_semicolon: true,
            },
            array_formatting: ArrayFormattingConfig {
                max_elements_per_line: 3,
                trailing_semicolon: true,
            },
        }
    }
}

impl FormatterConfig {
    /// One depth level of leading indentation
    pub fn indent_unit(&self) -> String {
        match self.indentation.kind {
            IndentationKind::Spaces => " ".repeat(self.indentation.size),
            IndentationKind::Tabs => "\t".repeat(self.indentation.size),
        }
    }
}
