use std::f64::consts::TAU;

use crate::{
    foundation::core::{ControlParameters, LatentPoint, PARAM_MAX},
    foundation::error::{LoopError, LoopResult},
    trajectory::calibration::Calibration,
};

/// One full period of the closed latent path, index-aligned with the animation frames.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Trajectory {
    params: ControlParameters,
    points: Vec<LatentPoint>,
}

impl Trajectory {
    /// Parameters the path was generated from.
    pub fn params(&self) -> ControlParameters {
        self.params
    }

    /// Latent points in playback order.
    pub fn points(&self) -> &[LatentPoint] {
        &self.points
    }

    /// Number of points in the loop.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Return `true` when the trajectory has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Center of the oscillation for a given phase: a point on the calibration circle, opposite the
/// phase angle.
pub fn oscillation_center(time_phase: u8, cal: &Calibration) -> LatentPoint {
    let t = f64::from(time_phase) / 100.0;
    let angle = TAU * (t + 0.5);
    LatentPoint::new(
        cal.anchor_z1 + cal.radius * angle.sin(),
        cal.anchor_z2 + cal.radius * angle.cos(),
    )
}

/// Sample the harmonic oscillator between `center` and the anchor at loop phase `t` (radians).
fn oscillate(center: LatentPoint, alpha: f64, t: f64, cal: &Calibration) -> LatentPoint {
    let s = alpha * t.sin();
    LatentPoint::new(
        center.z1 + s * (cal.anchor_z1 - center.z1),
        center.z2 + s * (cal.anchor_z2 - center.z2),
    )
}

/// Build the trajectory for validated control parameters.
pub fn generate(params: ControlParameters, cal: &Calibration) -> LoopResult<Trajectory> {
    let params = ControlParameters::new(params.time_phase, params.amplitude)?;
    let points = generate_raw(params.time_phase, params.amplitude, cal)?;
    Ok(Trajectory { params, points })
}

/// Build the raw point sequence.
///
/// `amplitude` may be 0 here, which collapses the loop onto the oscillation center. The control
/// surface never produces 0, so only [`generate`] is used on the live path.
#[tracing::instrument(skip(cal))]
pub fn generate_raw(
    time_phase: u8,
    amplitude: u8,
    cal: &Calibration,
) -> LoopResult<Vec<LatentPoint>> {
    if !(1..=PARAM_MAX).contains(&time_phase) {
        return Err(LoopError::validation(format!(
            "time_phase must be in [1, {PARAM_MAX}], got {time_phase}"
        )));
    }
    if amplitude > PARAM_MAX {
        return Err(LoopError::validation(format!(
            "amplitude must be in [0, {PARAM_MAX}], got {amplitude}"
        )));
    }
    cal.validate()?;

    let center = oscillation_center(time_phase, cal);
    let alpha = cal.radius * f64::from(amplitude) / 100.0;
    let n = cal.frame_count;
    Ok((0..n)
        .map(|i| {
            let t = TAU * (i as f64) / (n as f64);
            oscillate(center, alpha, t, cal)
        })
        .collect())
}

#[cfg(test)]
#[path = "../../tests/unit/trajectory/generator.rs"]
mod tests;
