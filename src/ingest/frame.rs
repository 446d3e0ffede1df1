//! Decoded image data handed from ingest to detection

use image::{GrayImage, RgbImage};

/// A decoded still image, height x width x 3 (RGB8)
#[derive(Debug, Clone)]
pub struct DecodedImage {
    rgb: RgbImage,
}

impl DecodedImage {
    /// Wrap an already decoded RGB buffer
    pub fn new(rgb: RgbImage) -> Self {
        Self { rgb }
    }

    /// Image width in pixels
    pub fn width(&self) -> u32 {
        self.rgb.width()
    }

    /// Image height in pixels
    pub fn height(&self) -> u32 {
        self.rgb.height()
    }

    /// Get image dimensions as (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        self.rgb.dimensions()
    }

    /// Number of color channels per pixel
    pub fn channels(&self) -> u8 {
        3
    }

    pub fn as_rgb(&self) -> &RgbImage {
        &self.rgb
    }

    /// Grayscale copy for detectors that work on luminance
    pub fn to_luma(&self) -> GrayImage {
        image::DynamicImage::ImageRgb8(self.rgb.clone()).to_luma8()
    }
}
