//! Playback Events
//!
//! The controller queues events at key points so the host loop can drive
//! feedback (status LED, console) without polling every field:
//! - State changes (play/pause/stop/waiting)
//! - Track started or finished on its own
//! - Target volume changes
//! - Fades reaching their end

use serde::{Deserialize, Serialize};

use crate::fade::FadeDirection;
use crate::types::PlaybackState;

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Player state changed
    StateChanged {
        /// The new state
        state: PlaybackState,
    },

    /// A track was handed to the decoder
    TrackStarted {
        /// Track number
        track: u16,
    },

    /// The decoder reached the end of the track by itself
    TrackFinished {
        /// Track number, if known
        track: Option<u16>,
    },

    /// Target volume changed
    VolumeChanged {
        /// New volume level (0-100)
        percent: u8,
    },

    /// A fade reached its end level
    FadeCompleted {
        /// Which ramp finished
        direction: FadeDirection,
    },
}
