//! HuggingFace API

use crate::error::{DonutError, Result};
use crate::model::{InferenceModel, ModelSource, ModelSpec};
use candle_core::{DType, Device};
use hf_hub::api::sync::ApiBuilder;
use log::debug;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.json";
pub const TOKENIZER_FILE: &str = "tokenizer.json";
pub const WEIGHTS_FILE: &str = "model.safetensors";

/// The files a Donut checkpoint is made of, resolved to local paths.
pub struct ModelFiles {
    pub config: PathBuf,
    pub tokenizer: PathBuf,
    pub weights: PathBuf,
}

/// A model backend constructible from checkpoint files.
///
/// Backends implement `from_files`; the provided constructors resolve the
/// files from a Hugging Face repo or a custom model folder.
pub trait HfModel {
    fn from_hf(repo_name: &str, device: &Device, dtype: DType) -> Result<Self>
    where
        Self: Sized,
    {
        let api = ApiBuilder::new().with_progress(true).build()?;
        let repo = api.model(repo_name.to_string());
        debug!("using model from HuggingFace repo '{repo_name}'");
        let files = ModelFiles {
            config: repo.get(CONFIG_FILE)?,
            tokenizer: repo.get(TOKENIZER_FILE)?,
            weights: repo.get(WEIGHTS_FILE)?,
        };
        debug!("resolved config, tokenizer and weights for '{repo_name}'");
        Self::from_files(files, device, dtype)
    }

    fn from_local_dir(dir: &Path, device: &Device, dtype: DType) -> Result<Self>
    where
        Self: Sized,
    {
        let files = ModelFiles {
            config: local_file(dir, CONFIG_FILE)?,
            tokenizer: local_file(dir, TOKENIZER_FILE)?,
            weights: local_file(dir, WEIGHTS_FILE)?,
        };
        debug!("using custom model folder {dir:?}");
        Self::from_files(files, device, dtype)
    }

    fn from_files(files: ModelFiles, device: &Device, dtype: DType) -> Result<Self>
    where
        Self: Sized;
}

fn local_file(dir: &Path, file_name: &str) -> Result<PathBuf> {
    let path = dir.join(file_name);
    if path.is_file() {
        Ok(path)
    } else {
        Err(DonutError::Load(format!(
            "missing '{file_name}' in custom model folder {dir:?}"
        )))
    }
}

/// [`ModelSource`] dispatching checkpoint names to the Hub and custom folders
/// to the local filesystem, for any [`HfModel`] backend.
pub struct HubSource<M> {
    _backend: PhantomData<M>,
}

impl<M> HubSource<M> {
    pub fn new() -> Self {
        Self {
            _backend: PhantomData,
        }
    }
}

impl<M> Default for HubSource<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> ModelSource for HubSource<M>
where
    M: HfModel + InferenceModel + Send + 'static,
{
    fn load(
        &self,
        spec: &ModelSpec,
        device: &Device,
        dtype: DType,
    ) -> Result<Box<dyn InferenceModel>> {
        let model = match spec {
            ModelSpec::Pretrained(repo_name) => M::from_hf(repo_name, device, dtype)?,
            ModelSpec::LocalDir(dir) => M::from_local_dir(dir, device, dtype)?,
        };
        Ok(Box::new(model))
    }
}
