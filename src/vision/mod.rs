//! Vision Layer
//!
//! Locates and decodes QR codes in a decoded image. The actual detection is
//! delegated to a [`QrDetector`] backend; this module only normalizes what the
//! backend reports into [`DetectionResult`]s.

pub mod annotate;
pub mod detection;
pub mod pipeline;
pub mod report;

use image::GrayImage;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::ingest::DecodedImage;

pub use annotate::draw_qr_boxes;
pub use pipeline::{ScanError, ScanPipeline, ScanReport};

/// A point in image pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// One located QR code as reported by a detector backend
#[derive(Debug, Clone, PartialEq)]
pub struct RawDetection {
    /// Decoded payload, `None` if the region could not be decoded
    pub text: Option<String>,
    /// Quadrilateral corners in image coordinates
    pub corners: [Point; 4],
}

/// One located QR code: its payload and boundary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionResult {
    /// Decoded payload; empty when the code was located but not decodable
    pub decoded_text: String,
    /// Quadrilateral corners in image coordinates
    pub corners: [Point; 4],
}

impl DetectionResult {
    /// Whether the payload was successfully decoded
    pub fn is_decoded(&self) -> bool {
        !self.decoded_text.is_empty()
    }

    /// Axis-aligned bounding box (x, y, width, height) of the corners
    pub fn bounding_box(&self) -> (f32, f32, f32, f32) {
        let min_x = self.corners.iter().map(|p| p.x).fold(f32::INFINITY, f32::min);
        let min_y = self.corners.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
        let max_x = self.corners.iter().map(|p| p.x).fold(f32::NEG_INFINITY, f32::max);
        let max_y = self.corners.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);

        (min_x, min_y, max_x - min_x, max_y - min_y)
    }
}

impl From<RawDetection> for DetectionResult {
    fn from(raw: RawDetection) -> Self {
        Self {
            decoded_text: raw.text.unwrap_or_default(),
            corners: raw.corners,
        }
    }
}

/// Failures reported by a detector backend
#[derive(Debug, Error)]
pub enum DetectionError {
    #[error("image has no pixels")]
    EmptyImage,
    #[error("image has {pixels} pixels, limit is {limit}")]
    TooLarge { pixels: u64, limit: u64 },
    #[error("{backend} failed: {message}")]
    Backend { backend: String, message: String },
}

/// Any QR detector able to locate and decode every code in one image
pub trait QrDetector {
    /// Short backend name for logs and the UI
    fn name(&self) -> &str;

    /// Locate and decode all QR-like regions in a grayscale image
    fn detect_and_decode_multi(&self, image: &GrayImage) -> Result<Vec<RawDetection>, DetectionError>;
}

/// Run `detector` over `image` and normalize its output.
///
/// Zero detections is an empty list, not an error. With `keep_undecoded`
/// unset, regions whose payload could not be decoded are dropped.
pub fn detect_qr_codes(
    detector: &dyn QrDetector,
    image: &DecodedImage,
    keep_undecoded: bool,
) -> Result<Vec<DetectionResult>, DetectionError> {
    let gray = image.to_luma();
    let raw = detector.detect_and_decode_multi(&gray)?;
    let located = raw.len();

    let results: Vec<DetectionResult> = raw
        .into_iter()
        .map(DetectionResult::from)
        .filter(|r| keep_undecoded || r.is_decoded())
        .collect();

    debug!(
        "{} located {} regions, keeping {}",
        detector.name(),
        located,
        results.len()
    );

    Ok(results)
}
