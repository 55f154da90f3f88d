use crate::error::Result;
use candle_core::{Device, Tensor};
use image::{io::Reader, DynamicImage};
use std::path::Path;

const IMAGENET_MEAN: [f32; 3] = [0.485, 0.456, 0.406];
const IMAGENET_STD: [f32; 3] = [0.229, 0.224, 0.225];

/// A decoded raster image, H×W×C interleaved bytes.
///
/// This is the hand-off format between the host's image input and a model
/// backend; the node never keeps a reference to it past one run.
#[derive(Debug, Clone)]
pub struct RasterImage {
    pub data: Vec<u8>,
    pub height: usize,
    pub width: usize,
    pub channels: usize,
}

impl RasterImage {
    /// Wraps a raw H×W×C buffer; the buffer length must match the dimensions.
    pub fn from_raw(data: Vec<u8>, height: usize, width: usize, channels: usize) -> Self {
        debug_assert_eq!(data.len(), height * width * channels);
        Self {
            data,
            height,
            width,
            channels,
        }
    }

    /// Loads an image into a 3-channel RGB tensor on the given device,
    /// normalized with the ImageNet mean and standard deviation.
    pub fn to_tensor(&self, device: &Device) -> Result<Tensor> {
        let data = Tensor::from_slice(
            &self.data,
            (self.height, self.width, self.channels),
            device,
        )?
        .permute((2, 0, 1))?;
        let mean = Tensor::new(&IMAGENET_MEAN, device)?.reshape((3, 1, 1))?;
        let std = Tensor::new(&IMAGENET_STD, device)?.reshape((3, 1, 1))?;
        let tensor = (data.to_dtype(candle_core::DType::F32)? / 255.)?
            .broadcast_sub(&mean)?
            .broadcast_div(&std)?;
        Ok(tensor)
    }
}

impl From<DynamicImage> for RasterImage {
    fn from(image: DynamicImage) -> Self {
        let image = image.to_rgb8();
        let (width, height) = image.dimensions();
        Self::from_raw(image.into_raw(), height as usize, width as usize, 3)
    }
}

/// Loads and decodes an image from a path into RGB bytes.
pub fn read_image<P: AsRef<Path>>(image_path: P) -> Result<RasterImage> {
    let image = Reader::open(image_path)?.decode()?;
    Ok(image.into())
}
