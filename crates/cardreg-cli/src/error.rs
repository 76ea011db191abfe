//! Error types for cardreg-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from cardreg-core
    #[error(transparent)]
    Core(#[from] cardreg_core::Error),

    /// Error from cardreg-cards
    #[error(transparent)]
    Cards(#[from] cardreg_cards::Error),

    /// Error from cardreg-fs
    #[error(transparent)]
    Fs(#[from] cardreg_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// User-facing failure with a message (drift, invalid cards)
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
