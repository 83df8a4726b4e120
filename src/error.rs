//! Error types for the Libris core

use thiserror::Error;

/// Main application error type.
///
/// Expected failures (a missing record, an operation attempted in the wrong
/// state) are returned as values so the embedding UI decides how to surface
/// them; nothing in the core panics on a business-rule violation.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
