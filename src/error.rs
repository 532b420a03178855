use burn::tensor::DType;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("model failed to load: {0}")]
    LoadFailed(anyhow::Error),
    #[error("no model is loaded")]
    ModelNotLoaded,
    #[error("prediction failed: {0}")]
    PredictFailed(anyhow::Error),
    #[error("expected {expected} input tensor(s), got {actual}")]
    InputArity { expected: usize, actual: usize },
    #[error(
        "input {index} ({name}) expects shape {expected_shape:?} and dtype {expected_dtype:?}, \
         got shape {actual_shape:?} and dtype {actual_dtype:?}"
    )]
    InputMismatch {
        index: usize,
        name: String,
        expected_shape: Vec<usize>,
        expected_dtype: DType,
        actual_shape: Vec<usize>,
        actual_dtype: DType,
    },
    #[error("worker thread is gone")]
    Disconnected,
}
