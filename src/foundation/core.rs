use std::time::Duration;

use crate::foundation::error::{LoopError, LoopResult};

/// Lowest value a control parameter may take.
pub const PARAM_MIN: u8 = 1;
/// Highest value a control parameter may take.
pub const PARAM_MAX: u8 = 100;

/// The two user-facing controls that fully determine a trajectory.
///
/// Both values live in `[1, 100]`; construct with [`ControlParameters::new`] to enforce that.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ControlParameters {
    /// Position of the oscillation center around the anchor circle.
    pub time_phase: u8,
    /// Oscillation amplitude as a percentage of the calibration radius.
    pub amplitude: u8,
}

impl ControlParameters {
    /// Create validated parameters (both in `[1, 100]`).
    pub fn new(time_phase: u8, amplitude: u8) -> LoopResult<Self> {
        for (name, v) in [("time_phase", time_phase), ("amplitude", amplitude)] {
            if !(PARAM_MIN..=PARAM_MAX).contains(&v) {
                return Err(LoopError::validation(format!(
                    "{name} must be in [{PARAM_MIN}, {PARAM_MAX}], got {v}"
                )));
            }
        }
        Ok(Self {
            time_phase,
            amplitude,
        })
    }

    /// Clamp arbitrary integers into the accepted range, the way a slider would.
    pub fn clamped(time_phase: i64, amplitude: i64) -> Self {
        let clamp = |v: i64| v.clamp(i64::from(PARAM_MIN), i64::from(PARAM_MAX)) as u8;
        Self {
            time_phase: clamp(time_phase),
            amplitude: clamp(amplitude),
        }
    }
}

impl Default for ControlParameters {
    fn default() -> Self {
        Self {
            time_phase: 63,
            amplitude: 14,
        }
    }
}

/// One point of the 2-dimensional latent space.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LatentPoint {
    /// First latent coordinate.
    pub z1: f64,
    /// Second latent coordinate.
    pub z2: f64,
}

impl LatentPoint {
    /// Create a latent point.
    pub fn new(z1: f64, z2: f64) -> Self {
        Self { z1, z2 }
    }

    /// Single-precision view fed to the expand model.
    pub fn to_f32(self) -> [f32; 2] {
        [self.z1 as f32, self.z2 as f32]
    }
}

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> LoopResult<Self> {
        if den == 0 {
            return Err(LoopError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(LoopError::validation("Fps num must be > 0"));
        }
        let fps = Self { num, den };
        if fps.tick_interval().is_zero() {
            return Err(LoopError::validation(format!(
                "Fps {num}/{den} is too high: tick interval rounds to zero"
            )));
        }
        Ok(fps)
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Wall-clock length of one playback tick.
    pub fn tick_interval(self) -> Duration {
        Duration::from_nanos(u64::from(self.den) * 1_000_000_000 / u64::from(self.num))
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 20, den: 1 }
    }
}

/// Output image dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Number of pixels on the canvas.
    pub fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
