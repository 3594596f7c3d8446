//! Audio decoder abstraction
//!
//! Board support code implements [`AudioDriver`] for the decoder/amplifier
//! chip. Commands are fire-and-forget: the controller relies on the driver
//! tolerating repeated calls (pausing twice, stopping a stopped track).

use crate::error::Result;

/// Device volume code for the loudest setting
pub const LOUDEST_DEVICE_CODE: u8 = 0;

/// Device volume code for silence
pub const SILENT_DEVICE_CODE: u8 = 254;

/// Audio decoder driver
pub trait AudioDriver {
    /// Bring the decoder up
    fn begin(&mut self) -> Result<()>;

    /// Start playing a track from its beginning
    fn play(&mut self, track: u16);

    /// Pause the current track, keeping its position
    fn pause(&mut self);

    /// Resume a paused track
    fn resume(&mut self);

    /// Stop the current track
    fn stop(&mut self);

    /// Whether a track is loaded, playing or paused
    ///
    /// Goes false once the track reaches its end or is stopped.
    fn is_playing(&mut self) -> bool;

    /// Position within the current track
    fn position_ms(&mut self) -> u32;

    /// Jump within the current track
    ///
    /// The decoder needs time around a seek before its position is
    /// accurate; the controller inserts the settle delays explicitly.
    fn seek(&mut self, position_ms: u32);

    /// Set hardware attenuation, 0 (loudest) to 254 (silent)
    fn set_volume(&mut self, code: u8);
}
