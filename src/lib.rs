//! latent-loop animates a closed path through the latent space of a two-stage generative model.
//!
//! Two integer controls (time phase and amplitude, both in `[1, 100]`) pick a harmonic path of
//! 100 latent points. Each point runs through an expand model and a decoder model, the planar
//! decoder output is packed into RGBA, and the resulting loop plays back at a fixed rate.
//!
//! # Pipeline overview
//!
//! 1. **Trajectory**: `ControlParameters -> Trajectory` (pure, deterministic)
//! 2. **Inference**: `LatentPoint -> InferenceResult` via two [`InferenceSession`] calls
//! 3. **Assembly**: `InferenceResult -> Frame` (channel-planar RGB to interleaved RGBA8)
//! 4. **Playback**: [`Player`] installs complete loops atomically and cycles the cursor
//!
//! The neural-network runtime is not part of this crate. Embedders implement
//! [`InferenceSession`] (and optionally [`ModelLoader`]) over whatever executes the graphs.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod foundation;

/// Frame buffer state machine and playback.
pub mod animation;
/// Display and export sinks.
pub mod encode;
/// Decoder output to pixels.
pub mod frame;
/// Two-stage inference.
pub mod inference;
/// Model runtime seam.
pub mod model;
/// Latent path generation.
pub mod trajectory;

pub use crate::animation::buffer::{AnimationBuffer, Completion, PlaybackState, Ticket};
pub use crate::animation::clock::PlaybackClock;
pub use crate::animation::player::{ControlEvent, Player};
pub use crate::config::{LoopConfig, PlayerOpts};
pub use crate::encode::png::PngSequenceSink;
pub use crate::encode::sink::{DisplaySink, InMemorySink};
pub use crate::foundation::core::{
    Canvas, ControlParameters, Fps, LatentPoint, PARAM_MAX, PARAM_MIN,
};
pub use crate::foundation::error::{LoopError, LoopResult, Stage};
pub use crate::frame::assemble::{Frame, InferenceResult, assemble, assemble_planes};
pub use crate::inference::batch::{build_thread_pool, render_trajectory};
pub use crate::inference::pipeline::InferencePipeline;
pub use crate::model::contract::{ModelContract, StageContract};
pub use crate::model::session::{FnSession, InferenceSession, ModelLoader, ModelSessions};
pub use crate::model::tensor::{NamedTensors, Tensor};
pub use crate::trajectory::calibration::Calibration;
pub use crate::trajectory::generator::{Trajectory, generate, generate_raw, oscillation_center};
