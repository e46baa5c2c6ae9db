use crate::{
    foundation::core::ControlParameters,
    foundation::error::{LoopError, LoopResult},
    frame::assemble::Frame,
};

/// Lifecycle of the frame buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    /// No frames; nothing in flight.
    Empty,
    /// A batch for the current parameters is in flight; no frames.
    Generating,
    /// A complete loop is installed and playing.
    Ready,
    /// Models never became available. Permanent.
    Unavailable,
}

/// Identifies one generation attempt. Results are accepted only for the latest ticket.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket {
    /// Monotonic generation counter value.
    pub generation: u64,
    /// Parameters the batch was dispatched for.
    pub params: ControlParameters,
}

/// What happened to a completed batch.
#[derive(Debug)]
pub enum Completion {
    /// Frames were installed; playback restarts at frame 0.
    Installed {
        /// Generation that was installed.
        generation: u64,
    },
    /// The current batch failed; the buffer stays empty until parameters change again.
    Failed {
        /// Generation that failed.
        generation: u64,
        /// Why it failed.
        error: LoopError,
    },
    /// A newer generation superseded this batch; its result was dropped.
    Stale {
        /// Generation of the dropped batch.
        generation: u64,
        /// Generation currently expected.
        current: u64,
    },
}

/// All-or-nothing frame store plus playback cursor.
///
/// The frame list is observable only with length 0 or exactly `loop_len`: batches install
/// atomically and every new generation clears the previous loop before it starts.
#[derive(Debug)]
pub struct AnimationBuffer {
    loop_len: usize,
    state: PlaybackState,
    generation: u64,
    params: Option<ControlParameters>,
    frames: Vec<Frame>,
    cursor: usize,
}

impl AnimationBuffer {
    /// Create an empty buffer for loops of `loop_len` frames.
    pub fn new(loop_len: usize) -> Self {
        Self {
            loop_len,
            state: PlaybackState::Empty,
            generation: 0,
            params: None,
            frames: Vec::new(),
            cursor: 0,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Latest generation counter value (0 before the first batch).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Parameters of the latest generation.
    pub fn params(&self) -> Option<ControlParameters> {
        self.params
    }

    /// Installed frames: empty, or exactly one full loop.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Number of installed frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Return `true` when no loop is installed.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Playback cursor into [`Self::frames`].
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Return `true` while a consumer should show a loading indicator.
    pub fn is_loading(&self) -> bool {
        matches!(self.state, PlaybackState::Empty | PlaybackState::Generating)
    }

    /// Frame under the cursor, if a loop is installed.
    pub fn current(&self) -> Option<(usize, &Frame)> {
        self.frames.get(self.cursor).map(|f| (self.cursor, f))
    }

    /// Start a new generation: drop the current loop, reset the cursor and hand out a ticket.
    pub fn begin(&mut self, params: ControlParameters) -> LoopResult<Ticket> {
        if self.state == PlaybackState::Unavailable {
            return Err(LoopError::model_load(
                "models are unavailable; no generation can start",
            ));
        }
        self.generation += 1;
        self.params = Some(params);
        self.frames.clear();
        self.cursor = 0;
        self.state = PlaybackState::Generating;
        Ok(Ticket {
            generation: self.generation,
            params,
        })
    }

    /// Deliver the result of a batch.
    pub fn complete(&mut self, ticket: Ticket, result: LoopResult<Vec<Frame>>) -> Completion {
        if ticket.generation != self.generation || self.state != PlaybackState::Generating {
            return Completion::Stale {
                generation: ticket.generation,
                current: self.generation,
            };
        }

        let result = result.and_then(|frames| {
            if frames.len() == self.loop_len {
                Ok(frames)
            } else {
                Err(LoopError::precondition(format!(
                    "batch produced {} frames, loop needs {}",
                    frames.len(),
                    self.loop_len
                )))
            }
        });

        match result {
            Ok(frames) => {
                self.frames = frames;
                self.cursor = 0;
                self.state = PlaybackState::Ready;
                Completion::Installed {
                    generation: ticket.generation,
                }
            }
            Err(error) => {
                self.state = PlaybackState::Empty;
                Completion::Failed {
                    generation: ticket.generation,
                    error,
                }
            }
        }
    }

    /// Enter the permanent no-models state.
    pub fn mark_unavailable(&mut self) {
        self.frames.clear();
        self.cursor = 0;
        self.state = PlaybackState::Unavailable;
    }

    /// Move the cursor `ticks` frames forward, wrapping at the loop end. No-op unless ready.
    pub fn advance(&mut self, ticks: u64) {
        if self.state != PlaybackState::Ready || self.frames.is_empty() {
            return;
        }
        let len = self.frames.len() as u64;
        self.cursor = ((self.cursor as u64 + ticks % len) % len) as usize;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/buffer.rs"]
mod tests;
