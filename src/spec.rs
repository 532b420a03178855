use burn::tensor::{DType, TensorData};
use serde::{Deserialize, Serialize};

use crate::error::WorkerError;

/// Description of one model input: positional name, shape and dtype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TensorSpec {
    pub name: String,
    pub shape: Vec<usize>,
    pub dtype: DType,
}

impl TensorSpec {
    pub fn new(name: impl Into<String>, shape: impl Into<Vec<usize>>, dtype: DType) -> Self {
        Self {
            name: name.into(),
            shape: shape.into(),
            dtype,
        }
    }

    pub fn num_elements(&self) -> usize {
        self.shape.iter().product()
    }

    pub fn matches(&self, data: &TensorData) -> bool {
        data.shape == self.shape && data.dtype == self.dtype
    }
}

/// Check a batch of raw inputs against the model's specs before the engine
/// sees them: arity first, then per-index shape and dtype.
pub(crate) fn check_inputs(
    specs: &[TensorSpec],
    inputs: &[TensorData],
) -> Result<(), WorkerError> {
    if inputs.len() != specs.len() {
        return Err(WorkerError::InputArity {
            expected: specs.len(),
            actual: inputs.len(),
        });
    }
    for (index, (spec, data)) in specs.iter().zip(inputs).enumerate() {
        if !spec.matches(data) {
            return Err(WorkerError::InputMismatch {
                index,
                name: spec.name.clone(),
                expected_shape: spec.shape.clone(),
                expected_dtype: spec.dtype,
                actual_shape: data.shape.clone(),
                actual_dtype: data.dtype,
            });
        }
    }
    Ok(())
}
