use std::io;

use prefs_core::focus::FocusField;
use prefs_core::EditRejection;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] prefs_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("{field} focus delay not changed: {reason}")]
    Rejected {
        field: FocusField,
        reason: EditRejection,
    },
    #[error("Another edit is already in progress")]
    EditInProgress,
    #[error("Configuration error: {0}")]
    Config(String),
}
