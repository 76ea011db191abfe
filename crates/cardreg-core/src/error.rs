//! Error types for cardreg-core

use std::path::PathBuf;

/// Result type for cardreg-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in cardreg-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration values that cannot be used
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Directory walk failed without an underlying I/O error
    #[error("Failed to walk {path}: {message}")]
    Walk { path: PathBuf, message: String },

    /// Filesystem error from cardreg-fs
    #[error(transparent)]
    Fs(#[from] cardreg_fs::Error),
}

impl Error {
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(PathBuf::from).unwrap_or_default();
        let message = err.to_string();
        match err.into_io_error() {
            Some(source) => Self::Fs(cardreg_fs::Error::io(path, source)),
            None => Self::Walk { path, message },
        }
    }
}
