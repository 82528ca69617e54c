//! Error types for the fallible corners of the crate.
//!
//! The attribute helpers themselves are total; errors only surface from
//! configuration loading and from text marshaling of opaque values.

use thiserror::Error;

/// Errors that can occur in logattr operations.
#[derive(Debug, Error)]
pub enum AttrError {
    /// A configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        /// Path of the file.
        path: String,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// A configuration document could not be parsed.
    #[error("failed to parse config {path}: {source}")]
    ParseError {
        /// Path of the file, or `<inline>` for in-memory documents.
        path: String,
        /// Underlying TOML error.
        source: toml::de::Error,
    },

    /// An opaque value failed to render itself as text.
    #[error("text marshaling failed for {type_name}: {message}")]
    MarshalError {
        /// Concrete type of the value.
        type_name: &'static str,
        /// Message reported by the value.
        message: String,
    },

    /// A self-describing value kept expanding into further self-describing values.
    #[error("log value resolution exceeded {limit} steps")]
    ResolutionLimit {
        /// Number of expansions attempted.
        limit: usize,
    },
}

/// Result type for logattr operations.
pub type AttrResult<T> = Result<T, AttrError>;
