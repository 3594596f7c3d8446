//! Error types for playback management

use thiserror::Error;

/// Playback errors
///
/// Commands never fail; only bringing the decoder up can.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The audio decoder returned a non-zero status from its init routine
    #[error("Audio decoder initialization failed with code {0}")]
    DriverInit(u8),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
