use std::fmt;

/// Convenience result type used across latent-loop.
pub type LoopResult<T> = Result<T, LoopError>;

/// Which of the two model invocations an [`LoopError::Inference`] came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Latent-expansion model (`[2] -> [512]`).
    Expand,
    /// Image decoder model (`[1, 512] -> [3 * 256 * 256]`).
    Decode,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expand => f.write_str("expand"),
            Self::Decode => f.write_str("decode"),
        }
    }
}

/// Top-level error taxonomy used by the animation engine.
#[derive(thiserror::Error, Debug)]
pub enum LoopError {
    /// Invalid user-provided parameters, options or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// The two inference sessions could not be obtained at startup.
    #[error("model load error: {0}")]
    ModelLoad(String),

    /// A single model invocation failed; the whole trajectory batch fails with it.
    #[error("inference error in stage {stage}: {source:#}")]
    Inference {
        /// Stage that failed.
        stage: Stage,
        /// Underlying runtime error.
        #[source]
        source: anyhow::Error,
    },

    /// A buffer reached a component with a shape it does not accept.
    #[error("precondition violated: {0}")]
    Precondition(String),

    /// Errors raised by display or export sinks.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LoopError {
    /// Build a [`LoopError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LoopError::ModelLoad`] value.
    pub fn model_load(msg: impl Into<String>) -> Self {
        Self::ModelLoad(msg.into())
    }

    /// Build a [`LoopError::Inference`] value for `stage`.
    pub fn inference(stage: Stage, source: impl Into<anyhow::Error>) -> Self {
        Self::Inference {
            stage,
            source: source.into(),
        }
    }

    /// Build a [`LoopError::Precondition`] value.
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    /// Build a [`LoopError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Stage of a failed inference, if this is an inference error.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::Inference { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
