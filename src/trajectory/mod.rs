//! Closed latent-space paths derived from the two control parameters.

/// Model calibration constants.
pub mod calibration;
/// Harmonic-oscillator path generation.
pub mod generator;
