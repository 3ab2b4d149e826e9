//! Error types for kereta operations.
//!
//! This module defines the main error type [`KeretaError`] which covers
//! input validation, date localization, document parsing, fetching and
//! schema loading.
//!
//! # Example
//!
//! ```rust
//! use kereta_core::{KeretaError, Result, StationCode};
//!
//! fn origin(code: &str) -> Result<StationCode> {
//!     StationCode::parse(code)
//! }
//!
//! assert!(matches!(origin("12"), Err(KeretaError::InvalidInput { .. })));
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for schedule search and extraction.
///
/// An empty extraction is not an error by itself; [`KeretaError::NoResults`]
/// only appears when a caller explicitly asks for a non-empty result set.
///
/// # Example
///
/// ```rust
/// use kereta_core::{Document, KeretaError, extract};
///
/// let doc = Document::parse("<html><body></body></html>").unwrap();
/// match extract(&doc).non_empty() {
///     Ok(trains) => println!("{} trains", trains.len()),
///     Err(KeretaError::NoResults) => println!("No matching route"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum KeretaError {
    /// A station code or date failed validation.
    ///
    /// The caller must not go on to build a query from this input.
    #[error("Invalid {field}: {value:?}")]
    InvalidInput { field: &'static str, value: String },

    /// The month segment of a date is not one of the twelve known keys.
    #[error("Invalid month: {0:?}")]
    InvalidMonth(String),

    /// The search produced no trains.
    ///
    /// This is a valid outcome rather than a fault, kept distinct so sinks
    /// can report it as "no matching route".
    #[error("No trains found for this route and date")]
    NoResults,

    /// HTTP request errors from reqwest.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid or disallowed URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTML parsing errors, mostly invalid CSS selectors.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File read/write errors.
    #[error("I/O error: {0}")]
    WriteError(#[from] std::io::Error),

    /// An encoded search query lacks one of its six keys.
    #[error("Search query is missing `{key}`: {query:?}")]
    MalformedQuery { key: &'static str, query: String },

    /// Extraction schema file errors.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// JSON serialization errors.
    #[error("Failed to serialize output: {0}")]
    SerializeError(#[from] serde_json::Error),
}

impl KeretaError {
    /// Returns true for errors caused by the caller's station codes or date.
    pub fn is_bad_input(&self) -> bool {
        matches!(self, KeretaError::InvalidInput { .. } | KeretaError::InvalidMonth(_))
    }
}

/// Result type alias for KeretaError.
pub type Result<T> = std::result::Result<T, KeretaError>;
