use std::time::{Duration, Instant};

use crate::foundation::core::Fps;

/// Fixed-rate tick source for playback.
///
/// The clock is driven by the caller's `Instant`s. It starts on the first call to
/// [`PlaybackClock::due_ticks`] after a [`PlaybackClock::reset`], so a freshly installed loop
/// always shows frame 0 for one full tick.
#[derive(Clone, Debug)]
pub struct PlaybackClock {
    interval: Duration,
    origin: Option<Instant>,
    consumed: u64,
}

impl PlaybackClock {
    /// Create a stopped clock ticking at `fps`.
    pub fn new(fps: Fps) -> Self {
        Self {
            interval: fps.tick_interval(),
            origin: None,
            consumed: 0,
        }
    }

    /// Length of one tick.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Stop the clock; the next `due_ticks` call starts it again.
    pub fn reset(&mut self) {
        self.origin = None;
        self.consumed = 0;
    }

    /// Whole ticks elapsed since the last call, starting the clock if it is stopped.
    pub fn due_ticks(&mut self, now: Instant) -> u64 {
        let Some(origin) = self.origin else {
            self.origin = Some(now);
            return 0;
        };
        let elapsed = now.saturating_duration_since(origin).as_nanos();
        let total = (elapsed / self.interval.as_nanos().max(1)) as u64;
        let due = total.saturating_sub(self.consumed);
        self.consumed = self.consumed.max(total);
        due
    }

    /// When the next tick falls due, if the clock is running.
    pub fn next_deadline(&self) -> Option<Instant> {
        let origin = self.origin?;
        let next = u32::try_from(self.consumed + 1).ok()?;
        origin.checked_add(self.interval.checked_mul(next)?)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/clock.rs"]
mod tests;
