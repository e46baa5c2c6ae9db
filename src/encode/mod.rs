//! Display and export sinks.
//!
//! Sinks consume the frame under the playback cursor and are driven by `Player::present`.

/// PNG sequence export.
pub mod png;
/// Display sink trait and built-in sinks.
pub mod sink;
