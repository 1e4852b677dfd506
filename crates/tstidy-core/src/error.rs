//! Error types and handling for formatting operations

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for formatting operations
#[derive(Debug, Error)]
pub enum TstidyError {
    /// Configuration loading or validation errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// File system I/O errors
    #[error("IO error for path '{}': {source}", .path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File discovery errors (bad glob patterns, unreadable directories)
    #[error("Discovery error: {message}")]
    DiscoveryError { message: String },

    /// Formatter errors surfaced by the engine wrapper (never by the pure core)
    #[error("Formatter error: {message}")]
    FormatterError { message: String },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    InternalError { message: String },
}

/// Error kind enumeration for categorizing errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Io,
    Discovery,
    Formatter,
    Internal,
}

impl TstidyError {
    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            TstidyError::ConfigError { .. } => ErrorKind::Config,
            TstidyError::IoError { .. } => ErrorKind::Io,
            TstidyError::DiscoveryError { .. } => ErrorKind::Discovery,
            TstidyError::FormatterError { .. } => ErrorKind::Formatter,
            TstidyError::InternalError { .. } => ErrorKind::Internal,
        }
    }

    /// Check if this error is recoverable (can continue processing other files)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Discovery | ErrorKind::Formatter | ErrorKind::Io
        )
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create an IO error with path context
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }

    /// Create a discovery error
    pub fn discovery_error(message: impl Into<String>) -> Self {
        Self::DiscoveryError {
            message: message.into(),
        }
    }

    /// Create a formatter error
    pub fn formatter_error(message: impl Into<String>) -> Self {
        Self::FormatterError {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }
}

/// Convert from std::io::Error
impl From<std::io::Error> for TstidyError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError {
            path: PathBuf::new(),
            source: err,
        }
    }
}

/// Convert from serde_json::Error
impl From<serde_json::Error> for TstidyError {
    fn from(err: serde_json::Error) -> Self {
        Self::ConfigError {
            message: err.to_string(),
        }
    }
}

/// Convert from glob pattern errors
impl From<glob::PatternError> for TstidyError {
    fn from(err: glob::PatternError) -> Self {
        Self::DiscoveryError {
            message: format!("Invalid glob pattern: {err}"),
        }
    }
}
