use burn::prelude::Backend;
use burn::tensor::TensorData;

use crate::profile::ProfileEntry;
use crate::spec::TensorSpec;

/// The seam between the worker and the inference engine.
///
/// Implementations own whatever the engine needs for one loaded model. Raw
/// numeric data arrives as [`TensorData`] in the order given by
/// [`input_specs`](Self::input_specs); the worker has already checked shapes
/// and dtypes against those specs. Outputs must be owned buffers, detached
/// from any engine-internal memory, so they can cross the thread boundary.
pub trait InferenceModel<B: Backend>: Sized + Send + 'static {
    /// Everything needed to construct the model (weights, config, ...).
    type Artifact: Send + 'static;
    type Error: Into<anyhow::Error> + Send;

    /// Load the model from the artifact onto the given device.
    fn load(artifact: &Self::Artifact, device: &B::Device) -> Result<Self, Self::Error>;

    /// Describe the inputs one prediction expects, in positional order.
    fn input_specs(&self) -> Vec<TensorSpec>;

    /// Run one prediction. Inputs are consumed; any transient tensors built
    /// from them must not outlive the call.
    fn predict(&mut self, inputs: Vec<TensorData>) -> Result<Vec<TensorData>, Self::Error>;

    /// Engine-reported per-op profiling entries, if the engine keeps any.
    fn profile(&self) -> Vec<ProfileEntry> {
        Vec::new()
    }
}
