//! Error types for device setup and configuration

use thiserror::Error;
use touchplay_playback::PlaybackError;
use touchplay_touch::TouchError;

pub type Result<T> = std::result::Result<T, DeviceError>;

#[derive(Error, Debug)]
pub enum DeviceError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Touch sensor error: {0}")]
    Touch(#[from] TouchError),

    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),
}
