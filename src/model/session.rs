use std::sync::Arc;

use crate::{
    foundation::error::LoopResult, model::contract::ModelContract, model::tensor::NamedTensors,
};

/// A loaded, pre-trained model that maps named input tensors to named output tensors.
///
/// Implementations must be safe to call from several worker threads at once; a session is
/// shared read-only by every in-flight inference. Runtime-specific failures are reported as
/// [`anyhow::Error`] and wrapped by the pipeline with the stage they came from.
pub trait InferenceSession: Send + Sync {
    /// Run the model once.
    fn run(&self, inputs: NamedTensors) -> anyhow::Result<NamedTensors>;
}

/// Adapts a closure into an [`InferenceSession`].
pub struct FnSession<F>(F);

impl<F> FnSession<F>
where
    F: Fn(NamedTensors) -> anyhow::Result<NamedTensors> + Send + Sync,
{
    /// Wrap `f`.
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> InferenceSession for FnSession<F>
where
    F: Fn(NamedTensors) -> anyhow::Result<NamedTensors> + Send + Sync,
{
    fn run(&self, inputs: NamedTensors) -> anyhow::Result<NamedTensors> {
        (self.0)(inputs)
    }
}

/// The two sessions of the generative chain.
#[derive(Clone)]
pub struct ModelSessions {
    /// Latent expansion stage.
    pub expand: Arc<dyn InferenceSession>,
    /// Image decoder stage.
    pub decode: Arc<dyn InferenceSession>,
}

impl std::fmt::Debug for ModelSessions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelSessions").finish_non_exhaustive()
    }
}

impl ModelSessions {
    /// Bundle two sessions.
    pub fn new(
        expand: impl InferenceSession + 'static,
        decode: impl InferenceSession + 'static,
    ) -> Self {
        Self {
            expand: Arc::new(expand),
            decode: Arc::new(decode),
        }
    }
}

/// Produces the two sessions once at startup.
///
/// Errors must be [`LoopError::ModelLoad`](crate::LoopError::ModelLoad); the player treats them
/// as permanent.
pub trait ModelLoader {
    /// Load both stages for `contract`.
    fn load(&self, contract: &ModelContract) -> LoopResult<ModelSessions>;
}

impl<F> ModelLoader for F
where
    F: Fn(&ModelContract) -> LoopResult<ModelSessions>,
{
    fn load(&self, contract: &ModelContract) -> LoopResult<ModelSessions> {
        self(contract)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/session.rs"]
mod tests;
