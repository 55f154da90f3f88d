//! Model residency and the reload decision.
//!
//! At most one model is resident at a time. A reload is triggered by the
//! first run or by the parameter dirty flag, and always releases the previous
//! model before loading the next one, so a failed load leaves the cache empty
//! rather than half-initialized.

use crate::error::Result;
use crate::infer::TASK_DOCVQA;
use crate::model::{ModelHandle, ModelSource, ModelSpec};
use crate::param::DonutParam;
use crate::zoo::ModelZoo;
use candle_core::{DType, Device};
use log::{debug, info, warn};

/// The load-relevant parameter values a resident model was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSnapshot {
    pub model_name: String,
    pub task_name: String,
    pub cuda: bool,
}

impl ParamSnapshot {
    fn of(param: &DonutParam) -> Self {
        Self {
            model_name: param.model_name.clone(),
            task_name: param.task_name.clone(),
            cuda: param.cuda,
        }
    }
}

pub struct ModelCache {
    zoo: ModelZoo,
    handle: Option<ModelHandle>,
    snapshot: Option<ParamSnapshot>,
}

impl ModelCache {
    pub fn new(zoo: ModelZoo) -> Self {
        Self {
            zoo,
            handle: None,
            snapshot: None,
        }
    }

    pub fn zoo(&self) -> &ModelZoo {
        &self.zoo
    }

    pub fn is_loaded(&self) -> bool {
        self.handle.is_some()
    }

    /// The parameters the resident model was loaded from, if any.
    pub fn snapshot(&self) -> Option<&ParamSnapshot> {
        self.snapshot.as_ref()
    }

    /// Returns the resident model, reloading it first when the parameters
    /// are dirty or nothing is loaded yet.
    ///
    /// A successful reload resolves the task name of registry-known
    /// checkpoints and clears `param.update`; a failed one propagates the
    /// error and leaves the cache empty but ready for the next attempt.
    pub fn ensure_loaded(
        &mut self,
        param: &mut DonutParam,
        source: &dyn ModelSource,
    ) -> Result<&mut ModelHandle> {
        if self.handle.is_none() || param.update {
            self.reload(param, source)?;
        }
        Ok(self
            .handle
            .as_mut()
            .expect("a model is resident after a successful load"))
    }

    fn reload(&mut self, param: &mut DonutParam, source: &dyn ModelSource) -> Result<()> {
        // release the previous model's device memory before loading
        self.handle = None;
        self.snapshot = None;

        let spec = ModelSpec::resolve(&param.model_name, &param.custom_model_folder);
        let (device, dtype) = select_device(param.cuda);
        info!("loading model {spec:?} on {device:?} ({dtype:?})");
        let model = source.load(&spec, &device, dtype)?;
        info!("model loaded");

        if let ModelSpec::Pretrained(model_name) = &spec {
            // a registry-known checkpoint always resolves to its own task,
            // even over an explicitly supplied one
            if let Some(task_name) = self.zoo.default_task(model_name) {
                debug!("task '{task_name}' resolved from the model zoo");
                param.task_name = task_name.to_string();
            }
        }
        if param.task_name != TASK_DOCVQA && !param.prompt.is_empty() {
            warn!(
                "the prompt is only used by the document visual question \
                 answering task, task '{}' ignores it",
                param.task_name
            );
        }

        param.update = false;
        self.snapshot = Some(ParamSnapshot::of(param));
        self.handle = Some(ModelHandle {
            model,
            device,
            dtype,
        });
        Ok(())
    }
}

/// Picks the execution device and precision for a load.
///
/// Accelerator availability is an external fact that can change between
/// runs, so it is probed on every reload instead of trusting the stored
/// flag. Half precision is only used on the accelerator.
fn select_device(cuda: bool) -> (Device, DType) {
    if cuda {
        match Device::new_cuda(0) {
            Ok(device) => return (device, DType::F16),
            Err(error) => warn!("cuda requested but unavailable, using cpu: {error}"),
        }
    }
    (Device::Cpu, DType::F32)
}
