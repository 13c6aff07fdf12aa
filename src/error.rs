//! Error types for the boolsearch library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`BoolSearchError`] enum. An absent term is never an error: queries
//! report it as an empty document list.
//!
//! # Examples
//!
//! ```
//! use boolsearch::error::{BoolSearchError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(BoolSearchError::invalid_argument("Invalid input"))
//! }
//!
//! assert!(example_operation().is_err());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for boolsearch operations.
#[derive(Error, Debug)]
pub enum BoolSearchError {
    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Index-related errors
    #[error("Index error: {0}")]
    Index(String),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Query-related errors
    #[error("Query error: {0}")]
    Query(String),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// A persisted index that is truncated or violates the index invariants.
    #[error("Corrupted index at byte {offset}: {message}")]
    Corrupted { offset: u64, message: String },

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

/// Result type alias for operations that may fail with BoolSearchError.
pub type Result<T> = std::result::Result<T, BoolSearchError>;

impl BoolSearchError {
    /// Create a new index error.
    pub fn index<S: Into<String>>(msg: S) -> Self {
        BoolSearchError::Index(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        BoolSearchError::Analysis(msg.into())
    }

    /// Create a new query error.
    pub fn query<S: Into<String>>(msg: S) -> Self {
        BoolSearchError::Query(msg.into())
    }

    /// Create a new storage error.
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        BoolSearchError::Storage(msg.into())
    }

    /// Create a new corruption error at the given byte offset.
    pub fn corrupted<S: Into<String>>(offset: u64, msg: S) -> Self {
        BoolSearchError::Corrupted {
            offset,
            message: msg.into(),
        }
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        BoolSearchError::Other(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        BoolSearchError::Other(format!("Invalid configuration: {}", msg.into()))
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        BoolSearchError::Other(format!("Invalid argument: {}", msg.into()))
    }

    /// Create a new not found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        BoolSearchError::Other(format!("Not found: {}", msg.into()))
    }

    /// Whether this error reports a truncated or corrupt index.
    pub fn is_corruption(&self) -> bool {
        matches!(self, BoolSearchError::Corrupted { .. })
    }
}
