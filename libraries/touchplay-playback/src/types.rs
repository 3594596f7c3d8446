//! Core types for playback management

use serde::{Deserialize, Serialize};

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Nothing playing (a fade-out may still be draining)
    Stopped,

    /// Currently playing
    Playing,

    /// Paused mid-track (a fade-out may still be draining)
    Paused,

    /// Track queued, waiting for the start delay to elapse
    Waiting,
}

/// Configuration for the playback controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Initial volume (0-100, default: 100)
    pub volume: u8,

    /// Fade-in duration in ms (default: 0 = off)
    pub fade_in_ms: u32,

    /// Fade-out duration in ms (default: 0 = off)
    pub fade_out_ms: u32,

    /// Delay before a queued track starts, in ms (default: 1000)
    pub start_delay_ms: u32,

    /// Restart instead of resuming after this much inactivity (default: off)
    pub idle_restart_ms: Option<u32>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: 100,
            fade_in_ms: 0,
            fade_out_ms: 0,
            start_delay_ms: 1000,
            idle_restart_ms: None,
        }
    }
}
