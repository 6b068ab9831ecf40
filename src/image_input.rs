//! # Image Input Module
//!
//! Loads fruit photos from disk or a URL, validates their format and turns them
//! into the normalized tensor the classifier expects.

use image::imageops::FilterType;
use image::ImageFormat;
use log::{debug, info};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::path::Path;
use std::time::Duration;

use crate::errors::NutritionError;

/// Width and height the classifier was trained on
pub const MODEL_INPUT_SIZE: u32 = 224;
/// Number of color channels fed to the classifier
pub const MODEL_CHANNELS: usize = 3;
/// Divisor mapping 8-bit channel values into [0, 1]
pub const PIXEL_SCALE: f32 = 255.0;
/// Timeout for downloading an image from a URL
pub const IMAGE_DOWNLOAD_TIMEOUT_SECS: u64 = 10;

/// A single-item batch of RGB pixels in height, width, channel order
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTensor {
    /// Row-major `[height][width][channel]` values in [0, 1]
    pub data: Vec<f32>,
    pub height: usize,
    pub width: usize,
}

impl ImageTensor {
    /// Shape including the leading batch dimension
    pub fn shape(&self) -> [usize; 4] {
        [1, self.height, self.width, MODEL_CHANNELS]
    }

    /// RGB values of the pixel at `(row, col)`
    pub fn pixel(&self, row: usize, col: usize) -> [f32; 3] {
        let start = (row * self.width + col) * MODEL_CHANNELS;
        [self.data[start], self.data[start + 1], self.data[start + 2]]
    }
}

/// Read image bytes from a local file
pub fn load_image_from_path(path: impl AsRef<Path>) -> Result<Vec<u8>, NutritionError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(NutritionError::ImageLoad(format!(
            "Failed to read image from path: file not found: {}",
            path.display()
        )));
    }

    std::fs::read(path).map_err(|e| {
        NutritionError::ImageLoad(format!("Failed to read image from path {}: {e}", path.display()))
    })
}

/// Download image bytes from a URL
///
/// # Errors
///
/// Returns `NutritionError::ImageLoad` on transport failure, non-success
/// status, or a `Content-Type` that is not `image/*`.
pub async fn load_image_from_url(client: &Client, url: &str) -> Result<Vec<u8>, NutritionError> {
    info!("Downloading image from {}", url);

    let response = client
        .get(url)
        .timeout(Duration::from_secs(IMAGE_DOWNLOAD_TIMEOUT_SECS))
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| NutritionError::ImageLoad(format!("Failed to download image from URL: {e}")))?;

    let is_image = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|content_type| content_type.starts_with("image/"));
    if !is_image {
        return Err(NutritionError::ImageLoad(
            "Failed to download image from URL: URL is not an image.".to_string(),
        ));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| NutritionError::ImageLoad(format!("Failed to download image from URL: {e}")))?;
    Ok(bytes.to_vec())
}

/// Check whether the bytes are a JPEG or PNG image
pub fn is_supported_image_format(bytes: &[u8]) -> bool {
    match image::guess_format(bytes) {
        Ok(format) => {
            let supported = matches!(format, ImageFormat::Jpeg | ImageFormat::Png);
            debug!("Detected image format {:?}, supported: {}", format, supported);
            supported
        }
        Err(e) => {
            debug!("Could not determine image format: {}", e);
            false
        }
    }
}

/// Decode, convert to RGB, resize to 224x224 and scale into [0, 1]
pub fn preprocess_image(bytes: &[u8]) -> Result<ImageTensor, NutritionError> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| NutritionError::ImageLoad(format!("Failed to decode image: {e}")))?;

    let resized = decoded.to_rgb8();
    let resized = image::imageops::resize(
        &resized,
        MODEL_INPUT_SIZE,
        MODEL_INPUT_SIZE,
        FilterType::CatmullRom,
    );

    let data = resized
        .pixels()
        .flat_map(|pixel| pixel.0)
        .map(|channel| f32::from(channel) / PIXEL_SCALE)
        .collect();

    Ok(ImageTensor {
        data,
        height: MODEL_INPUT_SIZE as usize,
        width: MODEL_INPUT_SIZE as usize,
    })
}
