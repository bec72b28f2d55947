//! Error types for agreement computation.

use thiserror::Error;

/// Errors that can occur while configuring or producing an agreement report.
#[derive(Debug, Error)]
pub enum IaaError {
    /// The configuration file could not be read or parsed.
    #[error("invalid config {path}: {message}")]
    Config { path: String, message: String },

    /// An annotation file could not be loaded or queried.
    #[error(transparent)]
    Annotation(#[from] anafora::AnaforaError),

    /// A report could not be serialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for agreement operations.
pub type IaaResult<T> = Result<T, IaaError>;
