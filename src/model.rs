//! The collaborator seam between the node and a model backend.
//!
//! The Donut architecture itself (Swin encoder, BART decoder, tokenizer,
//! generation loop) lives in backend crates; the node only needs something it
//! can load per the current parameters and invoke once per image.

use crate::error::Result;
use crate::preprocess::RasterImage;
use candle_core::{DType, Device};
use std::path::PathBuf;

/// Raw model output: one structured prediction per generated sequence.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ModelOutput {
    pub predictions: Vec<serde_json::Value>,
}

/// A loaded document understanding model.
///
/// `inference` is single-shot and gradient-free; implementations must not
/// retain the image past the call.
pub trait InferenceModel: Send {
    fn inference(&mut self, image: &RasterImage, prompt: &str) -> Result<ModelOutput>;
}

/// Where to load model weights from, after applying the precedence rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSpec {
    /// A checkpoint name looked up on the Hugging Face Hub.
    Pretrained(String),
    /// A local folder holding a custom-trained checkpoint.
    LocalDir(PathBuf),
}

impl ModelSpec {
    /// A non-empty custom model folder overrides the checkpoint name.
    pub fn resolve(model_name: &str, custom_model_folder: &str) -> Self {
        if custom_model_folder.is_empty() {
            Self::Pretrained(model_name.to_string())
        } else {
            Self::LocalDir(PathBuf::from(custom_model_folder))
        }
    }
}

/// Loads models; failures surface as [`crate::error::DonutError::Load`].
pub trait ModelSource: Send {
    fn load(
        &self,
        spec: &ModelSpec,
        device: &Device,
        dtype: DType,
    ) -> Result<Box<dyn InferenceModel>>;
}

/// A resident model tagged with the device and precision it was loaded under.
/// Replaced wholesale on reload, never patched in place.
pub struct ModelHandle {
    pub model: Box<dyn InferenceModel>,
    pub device: Device,
    pub dtype: DType,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_spec_resolution_precedence() {
        assert_eq!(
            ModelSpec::resolve("naver-clova-ix/donut-base-finetuned-docvqa", ""),
            ModelSpec::Pretrained("naver-clova-ix/donut-base-finetuned-docvqa".to_string())
        );
        assert_eq!(
            ModelSpec::resolve("naver-clova-ix/donut-base-finetuned-docvqa", "/models/custom"),
            ModelSpec::LocalDir(PathBuf::from("/models/custom"))
        );
    }
}
