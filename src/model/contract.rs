use crate::{
    foundation::core::Canvas,
    foundation::error::{LoopError, LoopResult},
    model::tensor::element_count,
};

/// Slot names and tensor shapes of one model stage.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StageContract {
    /// Name of the single input slot.
    pub input: String,
    /// Shape the input tensor is fed with.
    pub input_shape: Vec<usize>,
    /// Name of the single output slot.
    pub output: String,
    /// Element count the output tensor must have.
    pub output_len: usize,
}

/// Interface of the two shipped model artifacts.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ModelContract {
    /// Latent expansion stage, `[2] -> [512]`.
    pub expand: StageContract,
    /// Decoder stage, `[1, 512] -> [3 * H * W]` channel-planar.
    pub decode: StageContract,
    /// Image size produced by the decoder.
    pub canvas: Canvas,
}

impl Default for ModelContract {
    fn default() -> Self {
        let canvas = Canvas::default();
        Self {
            expand: StageContract {
                input: "fc3_input0".to_string(),
                input_shape: vec![2],
                output: "fc3_output0".to_string(),
                output_len: 512,
            },
            decode: StageContract {
                input: "decoder_input0".to_string(),
                input_shape: vec![1, 512],
                output: "decoder_output0".to_string(),
                output_len: 3 * canvas.pixel_count(),
            },
            canvas,
        }
    }
}

impl ModelContract {
    /// Check that the two stages chain into each other and into the canvas.
    pub fn validate(&self) -> LoopResult<()> {
        if element_count(&self.expand.input_shape) != 2 {
            return Err(LoopError::validation(format!(
                "expand input shape {:?} must hold exactly 2 latent values",
                self.expand.input_shape
            )));
        }
        if element_count(&self.decode.input_shape) != self.expand.output_len {
            return Err(LoopError::validation(format!(
                "decode input shape {:?} does not match expand output length {}",
                self.decode.input_shape, self.expand.output_len
            )));
        }
        let want = self.planar_len();
        if self.decode.output_len != want {
            return Err(LoopError::validation(format!(
                "decode output length {} must be 3 * {}x{} = {want}",
                self.decode.output_len, self.canvas.width, self.canvas.height
            )));
        }
        for (what, name) in [
            ("expand input", &self.expand.input),
            ("expand output", &self.expand.output),
            ("decode input", &self.decode.input),
            ("decode output", &self.decode.output),
        ] {
            if name.trim().is_empty() {
                return Err(LoopError::validation(format!("{what} slot name must be non-empty")));
            }
        }
        Ok(())
    }

    /// Length of a channel-planar RGB buffer for the canvas.
    pub fn planar_len(&self) -> usize {
        3 * self.canvas.pixel_count()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/contract.rs"]
mod tests;
