//! Error types for touch sensing

use thiserror::Error;

/// Touch sensor errors
#[derive(Debug, Error)]
pub enum TouchError {
    /// The sensor did not respond during initialization
    #[error("Touch sensor initialization failed: {0}")]
    Init(String),
}

/// Result type for touch operations
pub type Result<T> = std::result::Result<T, TouchError>;
