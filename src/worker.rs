use std::marker::PhantomData;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use burn::prelude::Backend;
use burn::tensor::TensorData;

use crate::error::WorkerError;
use crate::model::InferenceModel;
use crate::profile::{PredictTiming, ProfileReport};
use crate::protocol::{Prediction, Reply, Request};
use crate::spec::{self, TensorSpec};

/// Owns the worker thread. Requests go through the [`WorkerHandle`] it derefs
/// to; dropping the worker shuts the thread down and joins it.
pub struct ModelWorker<B: Backend, M: InferenceModel<B>> {
    handle: WorkerHandle<B, M>,
    shutdown_tx: crossbeam::channel::Sender<()>,
    join_handle: Option<JoinHandle<()>>,
}

impl<B: Backend, M: InferenceModel<B>> ModelWorker<B, M> {
    /// Spawn the worker thread with no model loaded.
    pub fn spawn() -> Self {
        let (tx, rx) = crossbeam::channel::unbounded::<Request<B, M>>();
        let (shutdown_tx, shutdown_rx) = crossbeam::channel::unbounded::<()>();
        let join_handle = std::thread::spawn(move || {
            let mut state = WorkerState::<B, M>::new();
            loop {
                crossbeam::channel::select! {
                    recv(rx) -> msg => {
                        match msg {
                            Ok(request) => state.handle(request),
                            Err(_) => break,
                        }
                    }
                    recv(shutdown_rx) -> _ => {
                        break;
                    }
                }
            }
        });
        Self {
            handle: WorkerHandle { tx },
            shutdown_tx,
            join_handle: Some(join_handle),
        }
    }

    /// A cloneable handle that outlives borrows of the worker itself.
    pub fn handle(&self) -> WorkerHandle<B, M> {
        self.handle.clone()
    }
}

impl<B: Backend, M: InferenceModel<B>> std::ops::Deref for ModelWorker<B, M> {
    type Target = WorkerHandle<B, M>;

    fn deref(&self) -> &Self::Target {
        &self.handle
    }
}

impl<B: Backend, M: InferenceModel<B>> Drop for ModelWorker<B, M> {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(());
        if let Some(join_handle) = self.join_handle.take() {
            let _ = join_handle.join();
        }
    }
}

/// Client side of the protocol. Every call sends one request and blocks on
/// its reply; errors raised on the worker come back as [`WorkerError`].
pub struct WorkerHandle<B: Backend, M: InferenceModel<B>> {
    tx: crossbeam::channel::Sender<Request<B, M>>,
}

impl<B: Backend, M: InferenceModel<B>> Clone for WorkerHandle<B, M> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<B: Backend, M: InferenceModel<B>> WorkerHandle<B, M> {
    fn request<T>(&self, build: impl FnOnce(Reply<T>) -> Request<B, M>) -> Result<T, WorkerError> {
        let (reply_tx, reply_rx) = crossbeam::channel::bounded(1);
        self.tx
            .send(build(reply_tx))
            .map_err(|_| WorkerError::Disconnected)?;
        reply_rx.recv().map_err(|_| WorkerError::Disconnected)?
    }

    /// Load a model from its artifact onto the given device, replacing any
    /// previously loaded model.
    pub fn load(&self, artifact: M::Artifact, device: B::Device) -> Result<(), WorkerError> {
        self.request(|reply| Request::Load {
            artifact,
            device,
            reply,
        })
    }

    /// Input specs of the loaded model, captured at load time.
    pub fn inputs(&self) -> Result<Vec<TensorSpec>, WorkerError> {
        self.request(|reply| Request::Inputs { reply })
    }

    /// Timings for the loaded model: load duration, engine entries and one
    /// record per prediction since the load.
    pub fn profiling_results(&self) -> Result<ProfileReport, WorkerError> {
        self.request(|reply| Request::Profiling { reply })
    }

    /// Run one prediction. Inputs must match the model's specs positionally.
    pub fn predict(&self, inputs: Vec<TensorData>) -> Result<Prediction, WorkerError> {
        self.request(|reply| Request::Predict { inputs, reply })
    }

    /// Convenience for single-input models.
    pub fn predict_one(&self, input: TensorData) -> Result<Prediction, WorkerError> {
        self.predict(vec![input])
    }
}

struct WorkerState<B: Backend, M: InferenceModel<B>> {
    model: Option<M>,
    specs: Vec<TensorSpec>,
    load_time: Option<Duration>,
    history: Vec<PredictTiming>,
    _backend: PhantomData<B>,
}

impl<B: Backend, M: InferenceModel<B>> WorkerState<B, M> {
    fn new() -> Self {
        Self {
            model: None,
            specs: Vec::new(),
            load_time: None,
            history: Vec::new(),
            _backend: PhantomData,
        }
    }

    fn handle(&mut self, request: Request<B, M>) {
        match request {
            Request::Load {
                artifact,
                device,
                reply,
            } => {
                let _ = reply.send(self.load(&artifact, &device));
            }
            Request::Inputs { reply } => {
                let result = match self.model {
                    Some(_) => Ok(self.specs.clone()),
                    None => Err(WorkerError::ModelNotLoaded),
                };
                let _ = reply.send(result);
            }
            Request::Profiling { reply } => {
                let result = match &self.model {
                    Some(model) => Ok(ProfileReport {
                        load: self.load_time,
                        entries: model.profile(),
                        predictions: self.history.clone(),
                    }),
                    None => Err(WorkerError::ModelNotLoaded),
                };
                let _ = reply.send(result);
            }
            Request::Predict { inputs, reply } => {
                let _ = reply.send(self.predict(inputs));
            }
        }
    }

    fn load(&mut self, artifact: &M::Artifact, device: &B::Device) -> Result<(), WorkerError> {
        // The previous model must be gone before the new one is built.
        if self.model.take().is_some() {
            log::debug!("dropping previously loaded model");
        }
        self.specs.clear();
        self.load_time = None;
        self.history.clear();

        let started = Instant::now();
        match M::load(artifact, device) {
            Ok(model) => {
                let elapsed = started.elapsed();
                self.specs = model.input_specs();
                self.load_time = Some(elapsed);
                self.model = Some(model);
                log::info!(
                    "model loaded in {elapsed:?} ({} input(s))",
                    self.specs.len()
                );
                Ok(())
            }
            Err(e) => {
                let e = e.into();
                log::error!("model load failed: {e:#}");
                Err(WorkerError::LoadFailed(e))
            }
        }
    }

    fn predict(&mut self, inputs: Vec<TensorData>) -> Result<Prediction, WorkerError> {
        let started = Instant::now();
        let model = self.model.as_mut().ok_or(WorkerError::ModelNotLoaded)?;
        spec::check_inputs(&self.specs, &inputs)?;

        let engine_started = Instant::now();
        let outputs = model.predict(inputs).map_err(|e| {
            let e = e.into();
            log::error!("prediction failed: {e:#}");
            WorkerError::PredictFailed(e)
        })?;
        let timing = PredictTiming {
            inference: engine_started.elapsed(),
            total: started.elapsed(),
        };
        self.history.push(timing);
        log::debug!("prediction finished in {:?}", timing.total);
        Ok(Prediction { outputs, timing })
    }
}
