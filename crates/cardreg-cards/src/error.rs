//! Error types for cardreg-cards

use std::path::PathBuf;

/// Result type for cardreg-cards operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in cardreg-cards operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A schema the run depends on does not exist
    #[error("Schema not found at {path}")]
    SchemaNotFound { path: PathBuf },

    /// A schema could not be compiled by the validator
    #[error("Failed to compile schema {path}: {message}")]
    SchemaCompile { path: PathBuf, message: String },

    /// A document is not valid JSON
    #[error("Invalid JSON in {path}: {message}")]
    InvalidJson { path: PathBuf, message: String },

    /// Core error from cardreg-core
    #[error(transparent)]
    Core(#[from] cardreg_core::Error),

    /// Filesystem error from cardreg-fs
    #[error(transparent)]
    Fs(#[from] cardreg_fs::Error),

    /// Directory walk error
    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
