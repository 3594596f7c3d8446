//! Core types for touch arbitration

use serde::{Deserialize, Serialize};

/// Number of electrodes on the touch board (pins 0 through 11)
pub const PIN_COUNT: usize = 12;

/// Outcome of a single poll of the touch sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TouchEvent {
    /// Nothing reportable happened
    NoChange,

    /// A pin became the active touch
    NewTouch(u8),

    /// The active pin was released and no other pin is touched
    NewRelease(u8),
}

impl TouchEvent {
    /// Pin the event refers to, if any
    pub fn pin(&self) -> Option<u8> {
        match self {
            TouchEvent::NoChange => None,
            TouchEvent::NewTouch(pin) | TouchEvent::NewRelease(pin) => Some(*pin),
        }
    }
}

/// Configuration for the touch arbiter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchConfig {
    /// Touch threshold (1-255, default: 40)
    pub touch_threshold: i32,

    /// Release threshold (0 to touch - 1, default: 20)
    pub release_threshold: i32,

    /// Scale applied to the proximity percentage (default: 1.3)
    pub proximity_multiplier: f32,

    /// Slow the falling baseline filter so a hovering hand is not
    /// absorbed into the baseline (default: false)
    pub proximity_sensing: bool,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            touch_threshold: 40,
            release_threshold: 20,
            proximity_multiplier: 1.3,
            proximity_sensing: false,
        }
    }
}
