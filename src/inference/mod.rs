//! Two-stage model inference, per point and per trajectory.

/// Parallel fan-out over a whole trajectory.
pub mod batch;
/// Single-point expand/decode chain.
pub mod pipeline;
