//! Error types for Telos Neural

use thiserror::Error;

/// Errors that can occur during assessment
#[derive(Debug, Error)]
pub enum AssessmentError {
    #[error("Failed to parse assessment input: {0}")]
    ParseError(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Store error: {0}")]
    StoreError(String),

    #[error("Insufficient assessment history: {0}")]
    InsufficientHistory(String),
}
