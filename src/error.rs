//! Error types for vizscene operations.
//!
//! Only construction-time problems are errors. Steady-state conditions such as a
//! missing rendering surface, an exhausted color pool or an unknown key are
//! reported through `Option` sentinels by the operations themselves.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building scenes, palettes or configuration.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error while reading configuration.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration file not found.
    #[error("configuration file not found: {0}")]
    ConfigNotFound(String),

    /// Configuration parsing error with line number.
    #[error("configuration error at line {line}: {message}")]
    ConfigParse {
        /// Line number where the error occurred (1-indexed, 0 if unknown).
        line: usize,
        /// Error message describing the issue.
        message: String,
    },

    /// Invalid configuration value.
    #[error("invalid configuration value for '{key}': {message}")]
    ConfigInvalid {
        /// The configuration key with invalid value.
        key: String,
        /// Error message describing why the value is invalid.
        message: String,
    },

    /// Color parsing error.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Two scenes share the same identifier.
    #[error("duplicate scene identifier: '{0}'")]
    DuplicateScene(String),

    /// A scene was declared without an identifier.
    #[error("scene identifier must not be empty")]
    EmptySceneIdentifier,
}
