//! Single-active-touch arbitration
//!
//! Only one pin is ever "the" touched pin. When several electrodes are in
//! contact at once the lowest-numbered one wins, so a stray finger brushing
//! the board never makes the device unresponsive.

use crate::proximity::ProximityFilter;
use crate::sensor::{TouchSensor, REG_FILTER_DELAY_LIMIT_FALLING, REG_NOISE_HALF_DELTA_FALLING};
use crate::threshold::Thresholds;
use crate::types::{TouchConfig, TouchEvent, PIN_COUNT};
use crate::Result;

/// Decide the event for one poll given the tracked pin and fresh pin states
///
/// `touched[i]` is the state of pin `i`. Pure policy, no side effects; the
/// caller updates its tracked pin from the returned event.
pub fn arbitrate(last_touched: Option<u8>, touched: &[bool]) -> TouchEvent {
    let lowest = touched.iter().position(|&t| t).map(|pin| pin as u8);

    match last_touched {
        None => match lowest {
            Some(pin) => TouchEvent::NewTouch(pin),
            None => TouchEvent::NoChange,
        },
        Some(last) if touched.get(last as usize).copied().unwrap_or(false) => TouchEvent::NoChange,
        Some(last) => match lowest {
            Some(pin) => TouchEvent::NewTouch(pin),
            None => TouchEvent::NewRelease(last),
        },
    }
}

/// Touch arbiter owning the sensor driver
///
/// `N` is the number of contiguous pins scanned, starting at pin 0.
pub struct TouchArbiter<S, const N: usize = PIN_COUNT> {
    sensor: S,
    last_touched: Option<u8>,
    thresholds: Thresholds,
    proximity: ProximityFilter,
    proximity_sensing: bool,
}

impl<S: TouchSensor, const N: usize> TouchArbiter<S, N> {
    /// Create an arbiter with default thresholds
    ///
    /// Thresholds are not written to the sensor until [`Self::begin`] or
    /// [`Self::set_thresholds`] is called.
    pub fn new(sensor: S) -> Self {
        Self::with_config(sensor, &TouchConfig::default())
    }

    pub fn with_config(sensor: S, config: &TouchConfig) -> Self {
        Self {
            sensor,
            last_touched: None,
            thresholds: Thresholds::clamped(config.touch_threshold, config.release_threshold),
            proximity: ProximityFilter::new(config.proximity_multiplier),
            proximity_sensing: config.proximity_sensing,
        }
    }

    /// Initialize the sensor and push the configured thresholds
    ///
    /// On failure the thresholds (and proximity mode, if configured) are
    /// still written; the caller decides whether to carry on without touch
    /// input.
    pub fn begin(&mut self) -> Result<()> {
        let result = self.sensor.begin();
        self.write_thresholds();
        if self.proximity_sensing {
            self.set_proximity_sensing_mode();
        }
        result
    }

    /// Poll the sensor once and report what changed
    pub fn poll(&mut self) -> TouchEvent {
        if !self.sensor.has_changed() {
            return TouchEvent::NoChange;
        }

        self.sensor.refresh();

        // Every pin must be read every cycle, the controller's per-pin
        // new-touch latch only clears that way.
        let mut touched = [false; N];
        for (pin, state) in touched.iter_mut().enumerate() {
            *state = self.sensor.is_touched(pin as u8);
        }

        let event = arbitrate(self.last_touched, &touched);
        match event {
            TouchEvent::NewTouch(pin) => self.last_touched = Some(pin),
            TouchEvent::NewRelease(_) => self.last_touched = None,
            TouchEvent::NoChange => {}
        }

        let touched_pins: Vec<usize> = touched
            .iter()
            .enumerate()
            .filter(|(_, &t)| t)
            .map(|(pin, _)| pin)
            .collect();
        tracing::trace!(touched = ?touched_pins, ?event, "touch poll");

        event
    }

    /// Pin currently tracked as touched
    pub fn touched_pin(&self) -> Option<u8> {
        self.last_touched
    }

    /// Clamp and apply new touch/release thresholds
    ///
    /// Returns the values actually written.
    pub fn set_thresholds(&mut self, touch: i32, release: i32) -> Thresholds {
        self.thresholds = Thresholds::clamped(touch, release);
        self.write_thresholds();
        self.thresholds
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    fn write_thresholds(&mut self) {
        self.sensor.set_touch_threshold(self.thresholds.touch());
        self.sensor.set_release_threshold(self.thresholds.release());
        tracing::info!(
            touch = self.thresholds.touch(),
            release = self.thresholds.release(),
            "touch thresholds set"
        );
    }

    /// Smoothed proximity of a hand to `pin`, in percent (may exceed 100)
    pub fn proximity_percent(&mut self, pin: u8) -> i32 {
        self.sensor.refresh_all();
        let reading = i32::from(self.sensor.baseline(pin)) - i32::from(self.sensor.filtered(pin));
        self.proximity.push(reading)
    }

    /// Slow the controller's falling baseline filter
    ///
    /// Without this the baseline follows a hand that approaches slowly and
    /// [`Self::proximity_percent`] drifts back toward zero.
    pub fn set_proximity_sensing_mode(&mut self) {
        self.sensor.write_register(REG_NOISE_HALF_DELTA_FALLING, 0x01);
        self.sensor.write_register(REG_FILTER_DELAY_LIMIT_FALLING, 0x3F);
        self.proximity_sensing = true;
        tracing::info!("proximity sensing mode enabled");
    }

    pub fn set_proximity_multiplier(&mut self, multiplier: f32) {
        self.proximity.set_multiplier(multiplier);
    }

    /// Access the underlying sensor
    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }
}
