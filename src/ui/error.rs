//! UI error types

use thiserror::Error;

/// Errors that can occur while running the terminal editor
#[derive(Debug, Error)]
pub enum UiError {
    /// Terminal I/O failed
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Result type for UI operations
pub type Result<T> = std::result::Result<T, UiError>;
