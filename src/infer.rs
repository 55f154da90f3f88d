//! Prompt template construction and single-image inference.

use crate::error::{DonutError, Result};
use crate::model::InferenceModel;
use crate::preprocess::RasterImage;
use log::debug;

/// The document visual question answering task, the only one whose prompt
/// template carries a question slot.
pub const TASK_DOCVQA: &str = "docvqa";

/// Builds the decoder prompt for a task.
///
/// `docvqa` embeds the lower-cased question between question tags and opens
/// the answer tag; every other task prompts with its bare task tag.
pub fn build_prompt(task_name: &str, prompt: &str) -> String {
    if task_name == TASK_DOCVQA {
        format!(
            "<s_{task_name}><s_question>{}</s_question><s_answer>",
            prompt.to_lowercase()
        )
    } else {
        format!("<s_{task_name}>")
    }
}

/// Runs the model once on an image and returns its first prediction.
pub fn infer(
    model: &mut dyn InferenceModel,
    image: &RasterImage,
    task_name: &str,
    prompt: &str,
) -> Result<serde_json::Value> {
    let prompt = build_prompt(task_name, prompt);
    debug!("running inference with prompt '{prompt}'");
    let output = model.inference(image, &prompt)?;
    output
        .predictions
        .into_iter()
        .next()
        .ok_or_else(|| DonutError::Inference("the model returned no predictions".to_string()))
}
