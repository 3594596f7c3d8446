//! Capacitive touch peripheral abstraction
//!
//! The arbiter never talks to registers directly; the board support code
//! provides an implementation of [`TouchSensor`] for its touch controller.

use crate::error::Result;

/// Noise half delta register, falling direction
pub const REG_NOISE_HALF_DELTA_FALLING: u8 = 0x30;

/// Filter delay count limit register, falling direction
pub const REG_FILTER_DELAY_LIMIT_FALLING: u8 = 0x32;

/// Capacitive touch controller with a fixed, contiguous range of pins
///
/// Reads are expected to be cheap: the arbiter reads every pin on every poll
/// in which the controller reports a change.
pub trait TouchSensor {
    /// Bring the controller up
    fn begin(&mut self) -> Result<()>;

    /// Whether any pin changed state since the last call
    fn has_changed(&mut self) -> bool;

    /// Latch fresh touch data; must be called before [`Self::is_touched`]
    fn refresh(&mut self);

    /// Touch state of a single pin from the last [`Self::refresh`]
    fn is_touched(&mut self, pin: u8) -> bool;

    /// Delta counts required to register a touch
    fn set_touch_threshold(&mut self, threshold: u8);

    /// Delta counts below which a touch is released
    fn set_release_threshold(&mut self, threshold: u8);

    /// Latch fresh baseline and filtered data for all pins
    fn refresh_all(&mut self);

    /// Slow-moving baseline capacitance reading for a pin
    fn baseline(&mut self, pin: u8) -> u16;

    /// Current filtered capacitance reading for a pin
    fn filtered(&mut self, pin: u8) -> u16;

    /// Write a raw controller register
    fn write_register(&mut self, register: u8, value: u8);
}
