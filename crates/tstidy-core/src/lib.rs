//! tstidy Core
//!
//! Core formatting engine for TypeScript sources.
//! This crate provides the fundamental components for classifying, parsing,
//! and reformatting source text, plus configuration loading and file
//! discovery for whole-project runs.

pub mod config;
pub mod discovery;
pub mod error;
pub mod formatter;
pub mod lexer; // Protected-span classifier (strings, templates, comments)
pub mod passes;
pub mod render;
pub mod result;
pub mod tree; // Bracket structure tree (positional, kind-blind closing)

// Re-export commonly used types
pub use config::{
    ArrayFormattingConfig, ConfigLoader, FormatterConfig, ImportFormatConfig, IndentationConfig,
    IndentationKind, ObjectFormattingConfig, TypeFormattingConfig,
};
pub use discovery::{DefaultFileDiscovery, FileDiscovery, SOURCE_EXTENSIONS};
pub use error::{ErrorKind, TstidyError};
pub use formatter::{FormatMode, FormatResult, SourceFormatter, format};
pub use result::{Result, ResultExt};
pub use tree::{BracketNode, NodeKind};

/// Initialize the tracing subscriber for logging
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tstidy=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
