//! Error types for raw-text lookups.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TextError {
    /// A search pattern is not a valid regular expression.
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The annotation file could not be loaded.
    #[error(transparent)]
    Annotation(#[from] anafora::AnaforaError),

    /// The raw text file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for raw-text operations.
pub type TextResult<T> = Result<T, TextError>;
