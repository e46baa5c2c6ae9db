//! Frame buffer state machine and timed playback.

/// All-or-nothing frame buffer with generation tracking.
pub mod buffer;
/// Fixed-rate tick source.
pub mod clock;
/// Control-thread orchestration.
pub mod player;
