//! Error types for the sentiment runtime

use thiserror::Error;

use crate::config::ConfigError;

/// Main runtime error type
#[derive(Error, Debug, Clone)]
pub enum RuntimeError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Batch error: {0}")]
    Batch(#[from] BatchError),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Rejections raised before any item of a batch is classified
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BatchError {
    #[error("Maximum {max} texts allowed per batch, got {len}")]
    TooLarge { len: usize, max: usize },

    #[error("Texts array is required")]
    Empty,
}

impl BatchError {
    /// Stable machine-readable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            BatchError::TooLarge { .. } => "BATCH_TOO_LARGE",
            BatchError::Empty => "EMPTY_BATCH",
        }
    }
}
