use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::{
    encode::sink::DisplaySink,
    foundation::error::{LoopError, LoopResult},
    frame::assemble::Frame,
};

/// Writes each distinct loop position once as `frame_NNN.png` under a directory.
///
/// Presenting the same cursor again is a no-op, so running a player for one full loop exports
/// the whole animation. A new generation starts over and overwrites the previous loop's files.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    generation: Option<u64>,
    written: BTreeSet<usize>,
}

impl PngSequenceSink {
    /// Create a sink writing into `dir` (created if missing).
    pub fn new(dir: impl Into<PathBuf>) -> LoopResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| {
            LoopError::encode(format!("create output dir '{}': {e}", dir.display()))
        })?;
        Ok(Self {
            dir,
            generation: None,
            written: BTreeSet::new(),
        })
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Generation of the loop currently being exported.
    pub fn generation(&self) -> Option<u64> {
        self.generation
    }

    /// Number of distinct frames of the current generation written so far.
    pub fn written(&self) -> usize {
        self.written.len()
    }

    /// Path a given loop position is written to.
    pub fn frame_path(&self, cursor: usize) -> PathBuf {
        self.dir.join(format!("frame_{cursor:03}.png"))
    }
}

impl DisplaySink for PngSequenceSink {
    fn present(&mut self, generation: u64, cursor: usize, frame: &Frame) -> LoopResult<()> {
        if self.generation != Some(generation) {
            self.generation = Some(generation);
            self.written.clear();
        }
        if self.written.contains(&cursor) {
            return Ok(());
        }
        frame.save_png(&self.frame_path(cursor))?;
        self.written.insert(cursor);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
