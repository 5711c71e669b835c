//! Error types and handling.

use thiserror::Error;

use crate::checklist::LoadError;
use crate::config::ConfigError;
use crate::report::RenderError;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Checklist table could not be loaded
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// Report generation failed
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for AppError
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Create a validation error with message
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
