//! Error types for prefs-core

use thiserror::Error;

/// Result type alias using prefs-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in prefs-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// libSQL error
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Background work needs a Tokio runtime that is not available
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An injected collaborator (session, user repository, clipboard) failed
    #[error("{service} failed: {message}")]
    Collaborator {
        service: &'static str,
        message: String,
    },
}

impl Error {
    /// Build a collaborator failure for the named service.
    pub fn collaborator(service: &'static str, message: impl Into<String>) -> Self {
        Self::Collaborator {
            service,
            message: message.into(),
        }
    }
}
