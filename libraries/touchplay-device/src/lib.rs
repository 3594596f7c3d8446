//! TouchPlay - Device
//!
//! Glue between the touch board and the playback controller.
//!
//! This crate provides:
//! - [`DeviceConfig`], loaded from a TOML file with `TOUCHPLAY_` environment
//!   overrides
//! - [`Device`], which maps pins to tracks and runs one poll cycle at a time
//! - Degraded start-up when a peripheral is missing
//! - An optional [`StatusLed`], lit while a track plays
//!
//! # Touch policy
//!
//! Pin `n` plays track `first_track + n`:
//! - Touching the pin of the playing track pauses it
//! - Touching the pin of the paused track resumes it
//! - Any other touch queues that track behind the start delay, or starts it
//!   at once when the delay is 0
//! - Releasing a pin does what [`ReleaseAction`] says

mod config;
mod device;
mod error;
mod led;

// Public exports
pub use config::{
    ControlSettings, DeviceConfig, PlaybackSettings, ReleaseAction, TouchSettings, ENV_PREFIX,
};
pub use device::Device;
pub use error::{DeviceError, Result};
pub use led::StatusLed;
