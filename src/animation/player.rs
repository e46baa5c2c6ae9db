use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crate::{
    animation::buffer::{AnimationBuffer, Completion, PlaybackState, Ticket},
    animation::clock::PlaybackClock,
    config::LoopConfig,
    encode::sink::DisplaySink,
    foundation::core::ControlParameters,
    foundation::error::{LoopError, LoopResult},
    frame::assemble::Frame,
    inference::batch::{build_thread_pool, render_trajectory},
    inference::pipeline::InferencePipeline,
    model::session::{ModelLoader, ModelSessions},
    trajectory::calibration::Calibration,
    trajectory::generator::generate,
};

/// Input from the external control surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlEvent {
    /// New slider values; regenerates the loop even if unchanged.
    SetParams(ControlParameters),
    /// Leave [`Player::run`].
    Stop,
}

struct BatchDone {
    ticket: Ticket,
    result: LoopResult<Vec<Frame>>,
}

struct Engine {
    pipeline: InferencePipeline,
    pool: Arc<rayon::ThreadPool>,
}

/// Drives trajectory regeneration and cyclic playback from a single control thread.
///
/// Batches run on a rayon pool and report back over a channel; only [`Player::poll`] touches
/// the buffer with their results, so buffer and cursor are never shared across threads.
pub struct Player {
    buffer: AnimationBuffer,
    clock: PlaybackClock,
    engine: Option<Engine>,
    calibration: Calibration,
    params: ControlParameters,
    tx: mpsc::Sender<BatchDone>,
    rx: mpsc::Receiver<BatchDone>,
}

impl Player {
    /// Load models through `loader` and start generating the initial loop.
    ///
    /// A model load failure does not fail construction: the player enters the permanent
    /// [`PlaybackState::Unavailable`] state instead. Invalid configuration is an error.
    pub fn new(loader: &dyn ModelLoader, config: LoopConfig) -> LoopResult<Self> {
        config.validate()?;
        let sessions = loader.load(&config.contract);
        Self::build(sessions, config)
    }

    /// Start from already loaded sessions.
    pub fn with_sessions(sessions: ModelSessions, config: LoopConfig) -> LoopResult<Self> {
        config.validate()?;
        Self::build(Ok(sessions), config)
    }

    fn build(sessions: LoopResult<ModelSessions>, config: LoopConfig) -> LoopResult<Self> {
        let (tx, rx) = mpsc::channel();
        let mut player = Self {
            buffer: AnimationBuffer::new(config.calibration.frame_count),
            clock: PlaybackClock::new(config.player.fps),
            engine: None,
            calibration: config.calibration,
            params: config.player.initial,
            tx,
            rx,
        };

        match sessions {
            Ok(sessions) => {
                let pool = build_thread_pool(config.player.threads)?;
                let pipeline = InferencePipeline::new(sessions, config.contract)?;
                tracing::info!("model sessions loaded");
                player.engine = Some(Engine {
                    pipeline,
                    pool: Arc::new(pool),
                });
                player.dispatch()?;
            }
            Err(error) => {
                tracing::error!(%error, "model sessions unavailable");
                player.buffer.mark_unavailable();
            }
        }
        Ok(player)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> PlaybackState {
        self.buffer.state()
    }

    /// Parameters of the most recent control input.
    pub fn params(&self) -> ControlParameters {
        self.params
    }

    /// Read-only view of the frame buffer.
    pub fn buffer(&self) -> &AnimationBuffer {
        &self.buffer
    }

    /// Playback cursor.
    pub fn cursor(&self) -> usize {
        self.buffer.cursor()
    }

    /// Return `true` while a consumer should show a loading indicator.
    pub fn is_loading(&self) -> bool {
        self.buffer.is_loading()
    }

    /// Apply new control parameters: clear the loop and dispatch a fresh batch.
    ///
    /// Any batch still in flight keeps running but its result will be discarded on arrival.
    pub fn set_params(&mut self, params: ControlParameters) -> LoopResult<()> {
        let params = ControlParameters::new(params.time_phase, params.amplitude)?;
        self.params = params;
        if self.engine.is_none() {
            return Err(LoopError::model_load(
                "models are unavailable; parameters cannot be applied",
            ));
        }
        self.dispatch()
    }

    fn dispatch(&mut self) -> LoopResult<()> {
        let Some(engine) = self.engine.as_ref() else {
            return Ok(());
        };
        let trajectory = generate(self.params, &self.calibration)?;
        let ticket = self.buffer.begin(self.params)?;
        self.clock.reset();
        tracing::debug!(
            generation = ticket.generation,
            time_phase = self.params.time_phase,
            amplitude = self.params.amplitude,
            points = trajectory.len(),
            "dispatching batch"
        );

        let pipeline = engine.pipeline.clone();
        let pool = engine.pool.clone();
        let tx = self.tx.clone();
        engine.pool.spawn(move || {
            let result = render_trajectory(&pipeline, &trajectory, &pool);
            // The player may be gone; its batches no longer matter then.
            let _ = tx.send(BatchDone { ticket, result });
        });
        Ok(())
    }

    fn handle(&mut self, done: BatchDone) -> Completion {
        let completion = self.buffer.complete(done.ticket, done.result);
        match &completion {
            Completion::Installed { generation } => {
                self.clock.reset();
                tracing::debug!(generation, frames = self.buffer.len(), "loop installed");
            }
            Completion::Failed { generation, error } => {
                tracing::warn!(generation, %error, "batch failed; loop stays empty");
            }
            Completion::Stale {
                generation,
                current,
            } => {
                tracing::debug!(generation, current, "discarding stale batch");
            }
        }
        completion
    }

    /// Apply every batch that has finished since the last call.
    pub fn poll(&mut self) -> Vec<Completion> {
        let mut out = Vec::new();
        while let Ok(done) = self.rx.try_recv() {
            out.push(self.handle(done));
        }
        out
    }

    /// Block until the current generation installs or fails, or `timeout` passes.
    ///
    /// Stale batches arriving in the meantime are discarded. Returns the resulting state.
    pub fn wait_ready(&mut self, timeout: Duration) -> PlaybackState {
        let deadline = Instant::now() + timeout;
        self.poll();
        while self.buffer.state() == PlaybackState::Generating {
            let left = deadline.saturating_duration_since(Instant::now());
            if left.is_zero() {
                break;
            }
            match self.rx.recv_timeout(left) {
                Ok(done) => {
                    self.handle(done);
                }
                Err(_) => break,
            }
        }
        self.buffer.state()
    }

    /// Advance the cursor by the ticks due at `now`. Returns the number of ticks applied.
    pub fn tick(&mut self, now: Instant) -> u64 {
        if self.buffer.state() != PlaybackState::Ready {
            return 0;
        }
        let due = self.clock.due_ticks(now);
        self.buffer.advance(due);
        due
    }

    /// Hand the frame under the cursor to `sink`. Returns `false` when nothing is installed.
    pub fn present(&self, sink: &mut dyn DisplaySink) -> LoopResult<bool> {
        match self.buffer.current() {
            Some((cursor, frame)) => {
                sink.present(self.buffer.generation(), cursor, frame)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Control loop: apply control events, install finished batches, tick and present.
    ///
    /// Returns when [`ControlEvent::Stop`] arrives or the control channel disconnects.
    pub fn run(
        &mut self,
        controls: &mpsc::Receiver<ControlEvent>,
        sink: &mut dyn DisplaySink,
    ) -> LoopResult<()> {
        let idle = self.clock.interval();
        loop {
            loop {
                match controls.try_recv() {
                    Ok(ControlEvent::SetParams(p)) => {
                        if let Err(error) = self.set_params(p) {
                            tracing::warn!(%error, "control input rejected");
                        }
                    }
                    Ok(ControlEvent::Stop) | Err(mpsc::TryRecvError::Disconnected) => {
                        return Ok(());
                    }
                    Err(mpsc::TryRecvError::Empty) => break,
                }
            }

            self.poll();
            self.tick(Instant::now());
            self.present(sink)?;

            let wake = self
                .clock
                .next_deadline()
                .map(|d| d.saturating_duration_since(Instant::now()))
                .unwrap_or(idle);
            std::thread::sleep(wake.min(idle));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/player.rs"]
mod tests;
