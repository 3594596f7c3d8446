//! Volume model with loudness-compensated device codes
//!
//! The decoder attenuates in -2 dB steps from 0 (loudest) to 254 (silent),
//! so a linear percent-to-code mapping would crowd all audible change into
//! the top of the range. A corrective curve is applied before inverting.

use crate::driver::SILENT_DEVICE_CODE;
use crate::fade::{proportional_duration, FadeDirection};

/// Convert a volume percentage to the decoder's attenuation code
///
/// Formula, with `p = clamp(percent, 0, 100) / 100`:
/// `p' = (1 - 1 / (10 (p + 0.1))^1.5) / 0.974`, code `= round((1 - p') * 254)`
/// - 0%   → 254 (silent)
/// - 50%  → 11
/// - 100% → 0 (loudest)
pub fn percent_to_device_code(percent: i32) -> u8 {
    let p = f64::from(percent.clamp(0, 100)) / 100.0;
    let p = (1.0 - 1.0 / (10.0 * (p + 0.1)).powf(1.5)) / 0.974;
    let code = ((1.0 - p) * f64::from(SILENT_DEVICE_CODE)).round();

    code.clamp(0.0, f64::from(SILENT_DEVICE_CODE)) as u8
}

/// Requested and applied volume plus fade configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeModel {
    /// Steady-state volume the caller asked for (0-100)
    pub(crate) target: u8,

    /// Last volume written to the hardware (0-100)
    pub(crate) actual: u8,

    /// Configured fade durations, 0 = disabled
    pub(crate) fade_in_ms: u32,
    pub(crate) fade_out_ms: u32,

    /// Durations the current fades were started with
    pub(crate) this_fade_in_ms: u32,
    pub(crate) this_fade_out_ms: u32,
}

impl VolumeModel {
    pub fn new(percent: u8) -> Self {
        let percent = percent.min(100);
        Self {
            target: percent,
            actual: percent,
            fade_in_ms: 0,
            fade_out_ms: 0,
            this_fade_in_ms: 0,
            this_fade_out_ms: 0,
        }
    }

    pub fn target(&self) -> u8 {
        self.target
    }

    pub fn actual(&self) -> u8 {
        self.actual
    }

    pub fn fade_in_ms(&self) -> u32 {
        self.fade_in_ms
    }

    pub fn fade_out_ms(&self) -> u32 {
        self.fade_out_ms
    }

    /// Whether any ramping is configured
    pub fn fades_enabled(&self) -> bool {
        self.fade_in_ms != 0 || self.fade_out_ms != 0
    }

    /// Fade duration scaled to the distance still to travel
    ///
    /// A fade that starts part-way (resume during a fade-in, pause at reduced
    /// volume) only needs the matching fraction of the configured duration.
    pub fn fade_duration(&self, direction: FadeDirection) -> u32 {
        match direction {
            FadeDirection::In => {
                proportional_duration(self.fade_in_ms, self.target.saturating_sub(self.actual))
            }
            FadeDirection::Out => proportional_duration(self.fade_out_ms, self.actual),
        }
    }
}

impl Default for VolumeModel {
    fn default() -> Self {
        Self::new(100)
    }
}
