//! Error types for the Palimpsest library.
//!
//! All fallible operations return [`PalimpsestError`] through the crate-wide
//! [`Result`] alias. The three domain variants mirror the ways a caller can
//! violate the match engine's contract:
//!
//! - [`PalimpsestError::Range`]: search coordinates or version ids outside the
//!   backbone's extent.
//! - [`PalimpsestError::Parse`]: a malformed serialized match record.
//! - [`PalimpsestError::Value`]: numeric text that does not fit its target width.
//!
//! # Examples
//!
//! ```
//! use palimpsest::error::{PalimpsestError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(PalimpsestError::range("segment 9 out of range"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Palimpsest operations.
#[derive(Error, Debug)]
pub enum PalimpsestError {
    /// I/O errors (loading documents, reading record files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Coordinates or version ids outside the backbone
    #[error("Range error: {0}")]
    Range(String),

    /// Malformed serialized record
    #[error("Parse error: {0}")]
    Parse(String),

    /// Numeric value that does not fit its target type
    #[error("Value error: {0}")]
    Value(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with PalimpsestError.
pub type Result<T> = std::result::Result<T, PalimpsestError>;

impl PalimpsestError {
    /// Create a new range error.
    pub fn range<S: Into<String>>(msg: S) -> Self {
        PalimpsestError::Range(msg.into())
    }

    /// Create a new parse error.
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        PalimpsestError::Parse(msg.into())
    }

    /// Create a new value error.
    pub fn value<S: Into<String>>(msg: S) -> Self {
        PalimpsestError::Value(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        PalimpsestError::Other(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        PalimpsestError::Other(format!("Invalid argument: {}", msg.into()))
    }

    /// Whether this error came from a malformed record.
    pub fn is_parse(&self) -> bool {
        matches!(self, PalimpsestError::Parse(_))
    }

    /// Whether this error came from out-of-range coordinates.
    pub fn is_range(&self) -> bool {
        matches!(self, PalimpsestError::Range(_))
    }
}
