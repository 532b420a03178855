//! Worker-thread model host.
//!
//! A [`ModelWorker`] owns a dedicated thread that loads a pre-trained model and
//! answers inference requests dispatched from the controlling thread. The
//! protocol has four operations:
//! 1. Load a model artifact with [`WorkerHandle::load`] (replacing any model
//!    loaded before).
//! 2. Inspect the model's input layout with [`WorkerHandle::inputs`].
//! 3. Run one prediction with [`WorkerHandle::predict`], collecting the output
//!    buffers and their timing metadata.
//! 4. Fetch accumulated timings with [`WorkerHandle::profiling_results`].
//!
//! The engine is reached through the [`InferenceModel`] trait; numeric data
//! crosses the thread boundary as [`TensorData`].
mod error;
mod model;
mod profile;
mod protocol;
mod spec;
mod worker;


pub use error::WorkerError;
pub use model::InferenceModel;
pub use profile::{PredictTiming, ProfileEntry, ProfileReport};
pub use protocol::Prediction;
pub use spec::TensorSpec;
pub use worker::{ModelWorker, WorkerHandle};

pub use burn::tensor::{DType, TensorData};
