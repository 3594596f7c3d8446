//! Smoothed proximity reading
//!
//! A hand approaching an electrode lowers its filtered capacitance reading
//! below the baseline well before a touch registers. The difference is
//! clamped, low-pass filtered and mapped onto 0-100%.

/// Smallest baseline/filtered difference that counts as proximity
const LOW_DIFF: i32 = 0;

/// Difference that maps to 100%
const HIGH_DIFF: i32 = 50;

/// IIR weight of the previous value (0.0-1.0, higher = more smoothing)
const FILTER_WEIGHT: f32 = 0.3;

/// IIR low-pass filter over raw proximity differences
#[derive(Debug, Clone)]
pub struct ProximityFilter {
    last: f32,
    multiplier: f32,
}

impl ProximityFilter {
    pub fn new(multiplier: f32) -> Self {
        Self {
            last: 0.0,
            multiplier,
        }
    }

    pub fn set_multiplier(&mut self, multiplier: f32) {
        self.multiplier = multiplier;
    }

    pub fn multiplier(&self) -> f32 {
        self.multiplier
    }

    /// Feed a new `baseline - filtered` difference, returns the scaled percentage
    ///
    /// The result is not clamped to 100: a multiplier above 1.0 is meant to
    /// let a close hand saturate the control early.
    pub fn push(&mut self, reading: i32) -> i32 {
        let prox = reading.clamp(LOW_DIFF, HIGH_DIFF);

        self.last = FILTER_WEIGHT * self.last + (1.0 - FILTER_WEIGHT) * prox as f32;

        // Integer map of LOW_DIFF..HIGH_DIFF onto 0..100
        let percent = (self.last as i32 - LOW_DIFF) * 100 / (HIGH_DIFF - LOW_DIFF);

        (percent as f32 * self.multiplier) as i32
    }

    pub fn reset(&mut self) {
        self.last = 0.0;
    }
}

impl Default for ProximityFilter {
    fn default() -> Self {
        Self::new(1.3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_reading_is_zero() {
        let mut filter = ProximityFilter::new(1.0);
        assert_eq!(filter.push(0), 0);
        assert_eq!(filter.push(-20), 0);
    }

    #[test]
    fn converges_to_full_scale() {
        let mut filter = ProximityFilter::new(1.0);
        let mut last = 0;
        for _ in 0..30 {
            let value = filter.push(HIGH_DIFF);
            assert!(value >= last, "filter output went backwards");
            last = value;
        }
        assert!((98..=100).contains(&last), "settled at {}", last);
    }

    #[test]
    fn first_sample_is_smoothed() {
        let mut filter = ProximityFilter::new(1.0);
        // 0.7 * 50 = 35 -> 70%
        assert_eq!(filter.push(50), 70);
    }

    #[test]
    fn readings_above_range_are_clamped() {
        let mut a = ProximityFilter::new(1.0);
        let mut b = ProximityFilter::new(1.0);
        assert_eq!(a.push(500), b.push(HIGH_DIFF));
    }

    #[test]
    fn multiplier_scales_output() {
        let mut filter = ProximityFilter::new(2.0);
        // 70% * 2.0, deliberately past 100
        assert_eq!(filter.push(50), 140);
    }

    #[test]
    fn reset_clears_history() {
        let mut filter = ProximityFilter::new(1.0);
        filter.push(50);
        filter.push(50);
        filter.reset();
        assert_eq!(filter.push(50), 70);
    }
}
