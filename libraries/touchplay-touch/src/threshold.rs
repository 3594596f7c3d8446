//! Touch/release threshold clamping

use serde::{Deserialize, Serialize};

/// Touch and release thresholds, always within the controller's valid range
///
/// The release threshold must sit strictly below the touch threshold,
/// otherwise the electrode would chatter between states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    touch: u8,
    release: u8,
}

impl Thresholds {
    /// Clamp requested thresholds into range
    ///
    /// Touch is clamped to 1-255, release to 0..touch.
    pub fn clamped(touch: i32, release: i32) -> Self {
        let touch = touch.clamp(1, 255);
        let release = release.min(touch - 1).max(0);

        Self {
            touch: touch as u8,
            release: release as u8,
        }
    }

    pub fn touch(&self) -> u8 {
        self.touch
    }

    pub fn release(&self) -> u8 {
        self.release
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::clamped(40, 20)
    }
}
