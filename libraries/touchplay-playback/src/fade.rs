//! Time-driven volume ramps
//!
//! Fades are evaluated at polling cadence, not per sample: each tick works
//! out where the ramp should be from the time since it began and the
//! controller writes the level to the hardware if it moved.
//!
//! A ramp always spans the full configured duration from 0 to the target
//! (or back). A fade that begins part-way along is handled by pushing the
//! elapsed time forward by `configured - this_fade`, where `this_fade` is the
//! proportional duration computed when the fade began.

use serde::{Deserialize, Serialize};

/// Direction of a volume ramp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FadeDirection {
    /// Rising toward the target volume after start/resume
    In,

    /// Falling toward silence after pause/stop
    Out,
}

/// Scale a configured fade duration by the volume delta still to travel
///
/// `delta_percent` above 100 is treated as 100.
pub fn proportional_duration(configured_ms: u32, delta_percent: u8) -> u32 {
    let delta = f64::from(delta_percent.min(100));
    (f64::from(configured_ms) * delta / 100.0).round() as u32
}

#[inline]
fn adjusted_elapsed(elapsed_ms: u32, fade_ms: u32, this_fade_ms: u32) -> u32 {
    elapsed_ms.saturating_add(fade_ms.saturating_sub(this_fade_ms))
}

/// Volume a fade-in should be at, never above `target`
pub fn fade_in_level(target: u8, elapsed_ms: u32, fade_ms: u32, this_fade_ms: u32) -> u8 {
    if fade_ms == 0 {
        return target;
    }

    let elapsed = adjusted_elapsed(elapsed_ms, fade_ms, this_fade_ms);
    let level = (f64::from(target) * f64::from(elapsed) / f64::from(fade_ms)).round();

    level.min(f64::from(target)) as u8
}

/// Volume a fade-out should be at, never below 0
pub fn fade_out_level(target: u8, elapsed_ms: u32, fade_ms: u32, this_fade_ms: u32) -> u8 {
    if fade_ms == 0 {
        return 0;
    }

    let elapsed = adjusted_elapsed(elapsed_ms, fade_ms, this_fade_ms);
    let drop = (f64::from(target) * f64::from(elapsed) / f64::from(fade_ms)).round();

    (f64::from(target) - drop).max(0.0) as u8
}
