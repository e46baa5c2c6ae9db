use rayon::prelude::*;

use crate::{
    foundation::error::{LoopError, LoopResult},
    frame::assemble::Frame,
    inference::pipeline::InferencePipeline,
    trajectory::generator::Trajectory,
};

/// Render every point of `trajectory` on `pool`.
///
/// All points are dispatched together. The returned frames are index-aligned with the
/// trajectory regardless of completion order, and any single failure fails the whole batch.
#[tracing::instrument(skip_all, fields(points = trajectory.len()))]
pub fn render_trajectory(
    pipeline: &InferencePipeline,
    trajectory: &Trajectory,
    pool: &rayon::ThreadPool,
) -> LoopResult<Vec<Frame>> {
    pool.install(|| {
        trajectory
            .points()
            .par_iter()
            .map(|point| pipeline.render(*point))
            .collect::<LoopResult<Vec<_>>>()
    })
}

/// Build the worker pool inference batches run on.
pub fn build_thread_pool(threads: Option<usize>) -> LoopResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(LoopError::validation(
            "player 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new().thread_name(|i| format!("latent-infer-{i}"));
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| LoopError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/inference/batch.rs"]
mod tests;
