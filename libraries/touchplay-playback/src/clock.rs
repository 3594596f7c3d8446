//! Millisecond time source
//!
//! All timestamps are `u32` milliseconds, matching the device's fixed-width
//! tick counter. Elapsed time is computed with wrapping subtraction so a
//! counter rollover yields a bogus duration rather than a panic.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Monotonic millisecond clock
pub trait Clock {
    fn now_ms(&self) -> u32;
}

/// Milliseconds from `since` to `now`, rollover-safe
#[inline]
pub fn elapsed_ms(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}

/// Host clock backed by [`Instant`]
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u32 {
        // Truncation is the rollover
        self.origin.elapsed().as_millis() as u32
    }
}

/// Manually advanced clock for simulations and tests
///
/// Clones share the same time, so one handle can be given to the controller
/// while another drives it forward.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u32>>,
}

impl ManualClock {
    pub fn new(start_ms: u32) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn advance(&self, ms: u32) {
        self.now.set(self.now.get().wrapping_add(ms));
    }

    pub fn set(&self, ms: u32) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u32 {
        self.now.get()
    }
}
