#[cfg(feature = "accelerate")]
extern crate accelerate_src;
#[cfg(feature = "mkl")]
extern crate intel_mkl_src;

pub mod cache;
pub mod config;
pub mod error;
pub mod hf;
pub mod infer;
pub mod model;
pub mod node;
pub mod param;
pub mod preprocess;
pub mod zoo;

pub use error::Result;
