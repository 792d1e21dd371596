//! Error handling for GCodeView
//!
//! Provides the error types for every layer of the viewer core:
//! - Load errors (reading G-code sources)
//! - Configuration errors (settings validation)
//!
//! Malformed coordinates are dropped by the parser and never surface here.
//! An empty tool path is a load outcome, not an error.

use std::path::PathBuf;
use thiserror::Error;

/// Load error type
///
/// Represents failures that abort a whole file load. A load that fails with
/// one of these leaves the previously loaded tool path in place.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be opened or read
    #[error("Failed to read {}: {source}", path.display())]
    FileRead {
        /// The path that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The path does not point at a regular file
    #[error("Not a file: {}", path.display())]
    NotAFile {
        /// The offending path.
        path: PathBuf,
    },
}

impl LoadError {
    /// The path the failed load was reading
    pub fn path(&self) -> &std::path::Path {
        match self {
            LoadError::FileRead { path, .. } | LoadError::NotAFile { path } => path,
        }
    }
}

/// Configuration error type
///
/// Represents values that fail validation when settings are loaded or applied.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A numeric value is outside its valid range
    #[error("Value out of range for '{key}': {value}")]
    ValueOutOfRange {
        /// The setting key.
        key: String,
        /// The rejected value, formatted.
        value: String,
    },

    /// A skip-rule pattern is not a valid regular expression
    #[error("Invalid skip pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The pattern text.
        pattern: String,
        /// The regex compiler's message.
        reason: String,
    },

    /// Generic configuration error
    #[error("Configuration error: {message}")]
    Other {
        /// The error message.
        message: String,
    },
}

/// Main error type for GCodeView
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Load error
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a load error
    pub fn is_load_error(&self) -> bool {
        matches!(self, Error::Load(_))
    }

    /// Check if this is a configuration error
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
