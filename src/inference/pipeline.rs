use std::sync::Arc;

use crate::{
    foundation::core::LatentPoint,
    foundation::error::{LoopError, LoopResult, Stage},
    frame::assemble::{Frame, InferenceResult, assemble},
    model::contract::{ModelContract, StageContract},
    model::session::{InferenceSession, ModelSessions},
    model::tensor::{NamedTensors, Tensor},
};

/// Latent point -> expand -> decode -> raw planar image.
///
/// The pipeline holds no per-call state, so one instance can serve any number of concurrent
/// calls. Nothing is cached: inferring the same point twice runs both models twice.
#[derive(Clone, Debug)]
pub struct InferencePipeline {
    sessions: ModelSessions,
    contract: Arc<ModelContract>,
}

impl InferencePipeline {
    /// Create a pipeline over loaded sessions.
    pub fn new(sessions: ModelSessions, contract: ModelContract) -> LoopResult<Self> {
        contract.validate()?;
        Ok(Self {
            sessions,
            contract: Arc::new(contract),
        })
    }

    /// Contract the pipeline feeds and checks against.
    pub fn contract(&self) -> &ModelContract {
        &self.contract
    }

    /// Run both stages for one latent point.
    pub fn infer(&self, point: LatentPoint) -> LoopResult<InferenceResult> {
        let c = &*self.contract;

        let z = Tensor::vector(point.to_f32().to_vec())
            .reshape(c.expand.input_shape.clone())
            .map_err(|e| LoopError::inference(Stage::Expand, e))?;
        let hidden = run_stage(&*self.sessions.expand, Stage::Expand, &c.expand, z)?;

        let hidden = hidden
            .reshape(c.decode.input_shape.clone())
            .map_err(|e| LoopError::inference(Stage::Decode, e))?;
        let decoded = run_stage(&*self.sessions.decode, Stage::Decode, &c.decode, hidden)?;

        InferenceResult::new(c.canvas, decoded.into_data())
    }

    /// Infer one point and assemble the displayable frame.
    pub fn render(&self, point: LatentPoint) -> LoopResult<Frame> {
        self.infer(point).map(|r| assemble(&r))
    }
}

fn run_stage(
    session: &dyn InferenceSession,
    stage: Stage,
    contract: &StageContract,
    input: Tensor,
) -> LoopResult<Tensor> {
    let feeds = NamedTensors::from([(contract.input.clone(), input)]);
    let mut outputs = session
        .run(feeds)
        .map_err(|e| LoopError::inference(stage, e))?;

    let out = outputs.remove(&contract.output).ok_or_else(|| {
        LoopError::inference(
            stage,
            anyhow::anyhow!("model returned no '{}' output", contract.output),
        )
    })?;
    if out.len() != contract.output_len {
        return Err(LoopError::inference(
            stage,
            anyhow::anyhow!(
                "output '{}' has {} values, expected {}",
                contract.output,
                out.len(),
                contract.output_len
            ),
        ));
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/inference/pipeline.rs"]
mod tests;
