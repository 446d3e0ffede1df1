//! rqrr detector backend
//!
//! Wraps the pure-Rust `rqrr` crate behind [`QrDetector`]. rqrr finds the
//! finder-pattern grids first and decodes each one separately, so a grid that
//! fails to decode is still reported with its corners.

use image::GrayImage;
use std::time::Instant;
use tracing::{debug, warn};

use super::{DetectionError, Point, QrDetector, RawDetection};

/// Default pixel limit (64 megapixels)
pub const DEFAULT_MAX_PIXELS: u64 = 64_000_000;

/// Configuration for the rqrr backend
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Refuse images with more pixels than this
    pub max_pixels: u64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            max_pixels: DEFAULT_MAX_PIXELS,
        }
    }
}

/// QR detector backed by `rqrr`
#[derive(Debug, Clone, Default)]
pub struct RqrrDetector {
    config: DetectorConfig,
}

impl RqrrDetector {
    /// Create a detector with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detector with custom configuration
    pub fn with_config(config: DetectorConfig) -> Self {
        Self { config }
    }
}

impl QrDetector for RqrrDetector {
    fn name(&self) -> &str {
        "rqrr"
    }

    fn detect_and_decode_multi(&self, image: &GrayImage) -> Result<Vec<RawDetection>, DetectionError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(DetectionError::EmptyImage);
        }

        let pixels = width as u64 * height as u64;
        if pixels > self.config.max_pixels {
            return Err(DetectionError::TooLarge {
                pixels,
                limit: self.config.max_pixels,
            });
        }

        let start = Instant::now();

        let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
            width as usize,
            height as usize,
            |x, y| image.get_pixel(x as u32, y as u32).0[0],
        );
        let grids = prepared.detect_grids();

        let detections: Vec<RawDetection> = grids
            .iter()
            .map(|grid| {
                let corners = grid.bounds.map(|p| Point::new(p.x as f32, p.y as f32));
                // Payloads are raw bytes; only ECC/format failures count as undecodable
                let mut payload = Vec::new();
                let text = match grid.decode_to(&mut payload) {
                    Ok(_meta) => Some(String::from_utf8_lossy(&payload).into_owned()),
                    Err(e) => {
                        warn!("Located QR region at ({}, {}) but could not decode it: {}", corners[0].x, corners[0].y, e);
                        None
                    }
                };
                RawDetection { text, corners }
            })
            .collect();

        debug!(
            "rqrr scanned {}x{} in {:?}: {} grids",
            width,
            height,
            start.elapsed(),
            detections.len()
        );

        Ok(detections)
    }
}
