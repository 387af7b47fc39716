//! Error types for the entlink library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for entlink operations.
#[derive(Debug, Error)]
pub enum EntlinkError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error parsing a source or entity file.
    #[error("Parse error in '{file}' at line {line}: {message}")]
    Parse {
        file: String,
        line: usize,
        message: String,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// No annotation record exists for the requested identifier.
    #[error("no annotation with identifier {0}")]
    AnnotationNotFound(u64),

    /// A correction request that does not parse or reference a known record.
    #[error("malformed correction: {0}")]
    MalformedCorrection(String),

    /// A link that failed external existence validation.
    #[error("'{0}' is not an entry in the reference service")]
    InvalidLink(String),

    /// Failure writing or copying the annotation store file.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Error from the HTTP client during link validation.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error (bad context size, missing directories).
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for entlink operations.
pub type Result<T> = std::result::Result<T, EntlinkError>;
