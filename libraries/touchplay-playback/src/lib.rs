//! TouchPlay - Playback Control
//!
//! Platform-agnostic playback control for a touch-triggered audio player.
//!
//! This crate provides:
//! - Player state machine (stopped, playing, paused, waiting to start)
//! - Loudness-compensated volume (0-100% mapped to decoder attenuation codes)
//! - Time-driven fade-in/fade-out ramps
//! - Delayed start of queued tracks
//! - Restart-after-idle policy for resume
//!
//! # Architecture
//!
//! `touchplay-playback` never touches hardware directly:
//! - The audio decoder is reached through the [`AudioDriver`] trait
//! - Time comes from an injected [`Clock`]
//! - Settle delays around seeks use `embedded_hal::delay::DelayNs`
//!
//! Everything runs on the polling thread: commands complete synchronously
//! and [`PlaybackController::tick`] advances timers once per poll.
//!
//! # Example
//!
//! ```rust
//! use touchplay_playback::{
//!     AudioDriver, ManualClock, PlaybackConfig, PlaybackController, PlaybackState, Result,
//! };
//!
//! #[derive(Default)]
//! struct Decoder {
//!     playing: bool,
//! }
//!
//! impl AudioDriver for Decoder {
//!     fn begin(&mut self) -> Result<()> { Ok(()) }
//!     fn play(&mut self, _track: u16) { self.playing = true; }
//!     fn pause(&mut self) {}
//!     fn resume(&mut self) {}
//!     fn stop(&mut self) { self.playing = false; }
//!     fn is_playing(&mut self) -> bool { self.playing }
//!     fn position_ms(&mut self) -> u32 { 0 }
//!     fn seek(&mut self, _position_ms: u32) {}
//!     fn set_volume(&mut self, _code: u8) {}
//! }
//!
//! let clock = ManualClock::new(0);
//! let config = PlaybackConfig { fade_in_ms: 1000, ..Default::default() };
//! let mut player = PlaybackController::new(Decoder::default(), clock.clone(), config);
//!
//! player.queue_with_delay(7);
//! clock.advance(1000);
//! player.tick();
//! assert_eq!(player.state(), PlaybackState::Playing);
//!
//! clock.advance(500);
//! player.tick();
//! assert_eq!(player.volume().actual(), 50);
//! ```

mod clock;
mod controller;
mod driver;
mod error;
pub mod events;
pub mod fade;
pub mod types;
mod volume;

// Public exports
pub use clock::{elapsed_ms, Clock, ManualClock, MonotonicClock};
pub use controller::PlaybackController;
pub use driver::{AudioDriver, LOUDEST_DEVICE_CODE, SILENT_DEVICE_CODE};
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use fade::FadeDirection;
pub use types::{PlaybackConfig, PlaybackState};
pub use volume::{percent_to_device_code, VolumeModel};
