//! Unified error handling for the shell.

use crate::config::ConfigError;

/// Shell error type.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for the shell.
pub type Result<T> = std::result::Result<T, CliError>;
