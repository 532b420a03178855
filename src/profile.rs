use std::time::Duration;

use serde::{Deserialize, Serialize};

/// One engine-reported profiling entry, typically a single operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileEntry {
    pub name: String,
    pub duration: Duration,
}

/// Timing measured by the worker for one prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictTiming {
    /// Time spent inside the engine call.
    pub inference: Duration,
    /// Time for the whole request, including input validation.
    pub total: Duration,
}

/// Everything the worker knows about the currently loaded model's timings.
/// History starts over whenever a new model is loaded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileReport {
    /// How long the current model took to load.
    pub load: Option<Duration>,
    /// Per-op entries reported by the engine, if any.
    pub entries: Vec<ProfileEntry>,
    /// One record per prediction since the model was loaded.
    pub predictions: Vec<PredictTiming>,
}
