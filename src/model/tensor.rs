use std::collections::BTreeMap;

use crate::foundation::error::{LoopError, LoopResult};

/// Named tensors passed into and out of a model invocation.
pub type NamedTensors = BTreeMap<String, Tensor>;

/// Dense row-major `f32` tensor.
#[derive(Clone, Debug, PartialEq)]
pub struct Tensor {
    shape: Vec<usize>,
    data: Vec<f32>,
}

impl Tensor {
    /// Create a tensor, checking that `data` fills `shape` exactly.
    pub fn new(shape: impl Into<Vec<usize>>, data: Vec<f32>) -> LoopResult<Self> {
        let shape = shape.into();
        let want = element_count(&shape);
        if data.len() != want {
            return Err(LoopError::validation(format!(
                "tensor data has {} elements, shape {shape:?} needs {want}",
                data.len()
            )));
        }
        Ok(Self { shape, data })
    }

    /// Rank-1 tensor over `data`.
    pub fn vector(data: Vec<f32>) -> Self {
        Self {
            shape: vec![data.len()],
            data,
        }
    }

    /// Relabel the tensor with a new shape of the same element count. Data is not copied.
    pub fn reshape(self, shape: impl Into<Vec<usize>>) -> LoopResult<Self> {
        Self::new(shape, self.data)
    }

    /// Tensor dimensions.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Flat element view.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Return `true` for a zero-element tensor.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Take the flat element buffer.
    pub fn into_data(self) -> Vec<f32> {
        self.data
    }
}

/// Product of all dimensions (1 for a scalar shape).
pub fn element_count(shape: &[usize]) -> usize {
    shape.iter().product()
}

#[cfg(test)]
#[path = "../../tests/unit/model/tensor.rs"]
mod tests;
