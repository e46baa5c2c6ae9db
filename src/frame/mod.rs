//! Decoder output to displayable pixels.

/// Planar-to-interleaved frame assembly.
pub mod assemble;
