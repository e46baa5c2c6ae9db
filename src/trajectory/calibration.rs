use crate::foundation::error::{LoopError, LoopResult};

/// Model-specific constants describing where the trained latent manifold lives.
///
/// The anchor and radius were fitted to the training set of the shipped model and travel with
/// the model artifact. They are configuration, not something derived at runtime.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Calibration {
    /// First coordinate of the anchor point every oscillation swings towards.
    pub anchor_z1: f64,
    /// Second coordinate of the anchor point.
    pub anchor_z2: f64,
    /// Radius of the circle the oscillation center travels on.
    pub radius: f64,
    /// Number of latent points (and frames) in one loop.
    pub frame_count: usize,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            anchor_z1: -0.048_140_03,
            anchor_z2: 0.091_673_71,
            radius: 2.217_567_03,
            frame_count: 100,
        }
    }
}

impl Calibration {
    /// Check that the constants describe a usable loop.
    pub fn validate(&self) -> LoopResult<()> {
        if self.frame_count == 0 {
            return Err(LoopError::validation("calibration frame_count must be >= 1"));
        }
        for (name, v) in [
            ("anchor_z1", self.anchor_z1),
            ("anchor_z2", self.anchor_z2),
            ("radius", self.radius),
        ] {
            if !v.is_finite() {
                return Err(LoopError::validation(format!("calibration {name} must be finite")));
            }
        }
        if self.radius < 0.0 {
            return Err(LoopError::validation("calibration radius must be >= 0"));
        }
        Ok(())
    }
}
