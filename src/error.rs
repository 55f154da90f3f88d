use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DonutError {
    #[error("invalid value {value:?} for parameter '{field}'")]
    Parse { field: String, value: String },
    #[error("model loading failed: {0}")]
    Load(String),
    #[error("inference failed: {0}")]
    Inference(String),
    #[error("Candle error: {0}")]
    CandleError(#[from] candle_core::Error),
    #[error("Image error: {0}")]
    ImageError(#[from] image::ImageError),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Json deser error: {0}")]
    JsonDeserError(#[from] serde_json::Error),
    #[error("Hugging Face Hub error: {0}")]
    ApiError(#[from] hf_hub::api::sync::ApiError),
}

pub type Result<T> = std::result::Result<T, DonutError>;
