//! TouchPlay - Touch Arbitration
//!
//! Turns raw per-pin capacitive touch data into at most one authoritative
//! touch or release event per poll cycle.
//!
//! This crate provides:
//! - A [`TouchSensor`] trait for the capacitive-touch peripheral driver
//! - [`TouchArbiter`], the single-active-touch policy
//! - Touch/release threshold clamping
//! - A smoothed proximity reading for hover-style controls, with a sensing
//!   mode that keeps the baseline from swallowing a slow hand
//!
//! # Example
//!
//! ```rust
//! use touchplay_touch::{TouchArbiter, TouchEvent, TouchSensor, Result};
//!
//! struct Board {
//!     touched: [bool; 12],
//!     changed: bool,
//! }
//!
//! impl TouchSensor for Board {
//!     fn begin(&mut self) -> Result<()> { Ok(()) }
//!     fn has_changed(&mut self) -> bool { std::mem::take(&mut self.changed) }
//!     fn refresh(&mut self) {}
//!     fn is_touched(&mut self, pin: u8) -> bool { self.touched[pin as usize] }
//!     fn set_touch_threshold(&mut self, _threshold: u8) {}
//!     fn set_release_threshold(&mut self, _threshold: u8) {}
//!     fn refresh_all(&mut self) {}
//!     fn baseline(&mut self, _pin: u8) -> u16 { 0 }
//!     fn filtered(&mut self, _pin: u8) -> u16 { 0 }
//!     fn write_register(&mut self, _register: u8, _value: u8) {}
//! }
//!
//! let mut board = Board { touched: [false; 12], changed: true };
//! board.touched[5] = true;
//!
//! let mut arbiter: TouchArbiter<Board> = TouchArbiter::new(board);
//! assert_eq!(arbiter.poll(), TouchEvent::NewTouch(5));
//! assert_eq!(arbiter.poll(), TouchEvent::NoChange);
//! ```

mod arbiter;
mod error;
mod proximity;
mod sensor;
mod threshold;
pub mod types;

// Public exports
pub use arbiter::{arbitrate, TouchArbiter};
pub use error::{Result, TouchError};
pub use proximity::ProximityFilter;
pub use sensor::{TouchSensor, REG_FILTER_DELAY_LIMIT_FALLING, REG_NOISE_HALF_DELTA_FALLING};
pub use threshold::Thresholds;
pub use types::{TouchConfig, TouchEvent, PIN_COUNT};
