use burn::prelude::Backend;
use burn::tensor::TensorData;

use crate::error::WorkerError;
use crate::model::InferenceModel;
use crate::profile::{PredictTiming, ProfileReport};
use crate::spec::TensorSpec;

/// Result of one prediction: output buffers in the model's output order plus
/// the timing the worker measured for the call.
#[derive(Debug, Clone)]
pub struct Prediction {
    pub outputs: Vec<TensorData>,
    pub timing: PredictTiming,
}

pub(crate) type Reply<T> = crossbeam::channel::Sender<Result<T, WorkerError>>;

/// The wire between handle and worker. Each variant carries its own reply
/// channel so the handle can block on exactly the type it asked for.
pub(crate) enum Request<B: Backend, M: InferenceModel<B>> {
    Load {
        artifact: M::Artifact,
        device: B::Device,
        reply: Reply<()>,
    },
    Inputs {
        reply: Reply<Vec<TensorSpec>>,
    },
    Profiling {
        reply: Reply<ProfileReport>,
    },
    Predict {
        inputs: Vec<TensorData>,
        reply: Reply<Prediction>,
    },
}
