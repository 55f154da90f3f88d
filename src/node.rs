//! The workflow node tying parameters, cache and inference together.

use crate::cache::ModelCache;
use crate::config::{self, ConfigForm, FormField};
use crate::error::Result;
use crate::infer;
use crate::model::ModelSource;
use crate::param::DonutParam;
use crate::preprocess::RasterImage;
use crate::zoo::ModelZoo;
use std::collections::HashMap;

/// The capability surface a host application drives a node through.
pub trait WorkflowNode {
    /// Applies host-marshaled parameter values.
    fn configure(&mut self, values: &HashMap<String, String>) -> Result<()>;
    /// Processes one image and returns the prediction payload.
    fn run(&mut self, image: &RasterImage) -> Result<serde_json::Value>;
}

/// A Donut inference node.
///
/// Execution is synchronous and single-threaded; the node is `Send` so a
/// host can move it onto a worker thread, but concurrent runs must be
/// serialized by the host.
pub struct DonutNode {
    param: DonutParam,
    cache: ModelCache,
    source: Box<dyn ModelSource>,
}

impl DonutNode {
    pub fn new(source: Box<dyn ModelSource>) -> Self {
        Self::with_param(source, DonutParam::default())
    }

    pub fn with_param(source: Box<dyn ModelSource>, param: DonutParam) -> Self {
        Self {
            param,
            cache: ModelCache::new(ModelZoo::pretrained()),
            source,
        }
    }

    pub fn param(&self) -> &DonutParam {
        &self.param
    }

    /// Folds a submitted configuration form into the parameters.
    pub fn apply_form(&mut self, form: &ConfigForm) {
        config::apply(self.cache.zoo(), form, &mut self.param);
    }

    /// Describes the parameter-editing form for the front-end in use.
    pub fn form_schema(&self) -> Vec<FormField> {
        config::form_schema(self.cache.zoo(), &self.param)
    }
}

impl WorkflowNode for DonutNode {
    fn configure(&mut self, values: &HashMap<String, String>) -> Result<()> {
        self.param.set_values(values)
    }

    fn run(&mut self, image: &RasterImage) -> Result<serde_json::Value> {
        let handle = self.cache.ensure_loaded(&mut self.param, &*self.source)?;
        infer::infer(
            handle.model.as_mut(),
            image,
            &self.param.task_name,
            &self.param.prompt,
        )
    }
}
