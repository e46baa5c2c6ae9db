use crate::{foundation::error::LoopResult, frame::assemble::Frame};

/// Consumer of the frame under the playback cursor.
///
/// The player calls `present` once per tick while a loop is installed. Nothing is presented
/// while the buffer is empty, so a display shows its loading state until frames arrive.
pub trait DisplaySink {
    /// Show `frame`, which sits at index `cursor` of the loop installed by `generation`.
    ///
    /// A change of `generation` means a new loop replaced the previous one.
    fn present(&mut self, generation: u64, cursor: usize, frame: &Frame) -> LoopResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    /// Presented frames in call order.
    pub(crate) frames: Vec<(usize, Frame)>,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(usize, Frame)] {
        &self.frames
    }

    /// Cursor values in presentation order.
    pub fn cursors(&self) -> Vec<usize> {
        self.frames.iter().map(|(c, _)| *c).collect()
    }
}

impl DisplaySink for InMemorySink {
    fn present(&mut self, _generation: u64, cursor: usize, frame: &Frame) -> LoopResult<()> {
        self.frames.push((cursor, frame.clone()));
        Ok(())
    }
}
