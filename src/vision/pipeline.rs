//! Scan pipeline: bytes in, detection report out
//!
//! Every call is independent. Nothing is cached between scans.

use std::path::Path;
use std::time::Instant;
use thiserror::Error;
use tracing::info;

use super::detection::{DetectorConfig, RqrrDetector};
use super::{detect_qr_codes, DetectionError, DetectionResult, QrDetector};
use crate::config::DetectionSettings;
use crate::ingest::{self, DecodedImage, IngestError};

/// Errors that end a scan. No partial results are returned.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Decode(#[from] IngestError),
    #[error("QR detection failed: {0}")]
    Detection(#[from] DetectionError),
}

/// Result of scanning one image
#[derive(Debug, Clone, PartialEq)]
pub struct ScanReport {
    /// Located codes, in backend order
    pub results: Vec<DetectionResult>,
    /// Source image width in pixels
    pub width: u32,
    /// Source image height in pixels
    pub height: u32,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}

impl ScanReport {
    /// Number of located codes
    pub fn count(&self) -> usize {
        self.results.len()
    }

    /// Number of codes whose payload was decoded
    pub fn decoded_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_decoded()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Ingest + detection, one image per call
pub struct ScanPipeline {
    detector: Box<dyn QrDetector>,
    keep_undecoded: bool,
}

impl ScanPipeline {
    /// Pipeline using the rqrr backend with default settings
    pub fn new() -> Self {
        Self::with_settings(&DetectionSettings::default())
    }

    /// Pipeline using the rqrr backend configured from settings
    pub fn with_settings(settings: &DetectionSettings) -> Self {
        let detector = RqrrDetector::with_config(DetectorConfig {
            max_pixels: settings.max_pixels,
        });
        Self::with_detector(Box::new(detector), settings.keep_undecoded)
    }

    /// Pipeline with a caller-provided detector backend
    pub fn with_detector(detector: Box<dyn QrDetector>, keep_undecoded: bool) -> Self {
        Self {
            detector,
            keep_undecoded,
        }
    }

    pub fn detector_name(&self) -> &str {
        self.detector.name()
    }

    /// Decode `bytes` and detect every QR code in the resulting image
    pub fn scan_bytes(&self, bytes: &[u8]) -> Result<(DecodedImage, ScanReport), ScanError> {
        let image = ingest::decode_image(bytes)?;
        let report = self.scan_image(&image)?;
        Ok((image, report))
    }

    /// Read `path` and scan it
    pub fn scan_file(&self, path: &Path) -> Result<(DecodedImage, ScanReport), ScanError> {
        let image = ingest::load_image_file(path)?;
        let report = self.scan_image(&image)?;
        Ok((image, report))
    }

    /// Detect every QR code in an already decoded image
    pub fn scan_image(&self, image: &DecodedImage) -> Result<ScanReport, ScanError> {
        let start = Instant::now();
        let results = detect_qr_codes(self.detector.as_ref(), image, self.keep_undecoded)?;
        let processing_time = start.elapsed();

        info!(
            "Scanned {}x{} image with {} in {:?}: {} QR codes",
            image.width(),
            image.height(),
            self.detector.name(),
            processing_time,
            results.len()
        );

        Ok(ScanReport {
            results,
            width: image.width(),
            height: image.height(),
            processing_time_ms: processing_time.as_millis() as u64,
        })
    }
}

impl Default for ScanPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{compose, encode_png, render_damaged_qr, row_of_codes};
    use crate::vision::mocks::{square, FailingDetector, FixedDetector};
    use crate::vision::RawDetection;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_no_codes_gives_empty_report() {
        let bytes = encode_png(&RgbImage::from_pixel(120, 80, Rgb([255, 255, 255])));
        let (_, report) = ScanPipeline::new().scan_bytes(&bytes).unwrap();

        assert!(report.is_empty());
        assert_eq!(report.count(), 0);
        assert_eq!((report.width, report.height), (120, 80));
    }

    #[test]
    fn test_known_codes_are_decoded() {
        let texts = ["https://example.com", "WIFI:S:lab;;", "12345"];
        let bytes = encode_png(&row_of_codes(&texts));
        let (_, report) = ScanPipeline::new().scan_bytes(&bytes).unwrap();

        assert_eq!(report.count(), texts.len());
        assert_eq!(report.decoded_count(), texts.len());
        for result in &report.results {
            assert!(texts.contains(&result.decoded_text.as_str()));
        }
    }

    #[test]
    fn test_corrupted_bytes_fail_with_decode_error() {
        let mut bytes = encode_png(&row_of_codes(&["payload"]));
        for b in bytes.iter_mut().take(16) {
            *b = 0;
        }

        let result = ScanPipeline::new().scan_bytes(&bytes);
        assert!(matches!(result, Err(ScanError::Decode(IngestError::Decode(_)))));
    }

    #[test]
    fn test_scan_is_idempotent() {
        let bytes = encode_png(&row_of_codes(&["same", "input"]));
        let pipeline = ScanPipeline::new();

        let (_, first) = pipeline.scan_bytes(&bytes).unwrap();
        let (_, second) = pipeline.scan_bytes(&bytes).unwrap();
        assert_eq!(first.results, second.results);
        assert_eq!(first.count(), 2);
    }

    #[test]
    fn test_degraded_region_reports_corners_only() {
        let detector = FixedDetector(vec![RawDetection { text: None, corners: square(10.0, 10.0, 30.0) }]);
        let pipeline = ScanPipeline::with_detector(Box::new(detector), true);
        let bytes = encode_png(&RgbImage::new(64, 64));

        let (_, report) = pipeline.scan_bytes(&bytes).unwrap();
        assert_eq!(report.count(), 1);
        assert_eq!(report.decoded_count(), 0);
        assert!(report.results[0].decoded_text.is_empty());
        assert_eq!(report.results[0].corners, square(10.0, 10.0, 30.0));
    }

    #[test]
    fn test_damaged_code_reports_corners_only() {
        let tile = render_damaged_qr("degrade me please, this is a longer payload", 4);
        let canvas = compose(tile.width() + 40, tile.height() + 40, &[(&tile, 20, 20)]);
        let (_, report) = ScanPipeline::new().scan_bytes(&encode_png(&canvas)).unwrap();

        assert_eq!(report.count(), 1);
        assert_eq!(report.decoded_count(), 0);
        assert!(report.results[0].decoded_text.is_empty());
        let (_, _, w, h) = report.results[0].bounding_box();
        assert!(w > 0.0 && h > 0.0);

        let strict = ScanPipeline::with_settings(&DetectionSettings {
            keep_undecoded: false,
            ..Default::default()
        });
        let (_, report) = strict.scan_bytes(&encode_png(&canvas)).unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn test_detection_failure_surfaces() {
        let pipeline = ScanPipeline::with_detector(Box::new(FailingDetector), true);
        let bytes = encode_png(&RgbImage::new(16, 16));

        let result = pipeline.scan_bytes(&bytes);
        assert!(matches!(result, Err(ScanError::Detection(_))));
    }

    #[test]
    fn test_settings_drop_undecoded() {
        let settings = DetectionSettings {
            keep_undecoded: false,
            ..Default::default()
        };
        let pipeline = ScanPipeline::with_settings(&settings);
        assert_eq!(pipeline.detector_name(), "rqrr");

        let bytes = encode_png(&row_of_codes(&["only"]));
        let (_, report) = pipeline.scan_bytes(&bytes).unwrap();
        assert_eq!(report.count(), 1);
        assert_eq!(report.results[0].decoded_text, "only");
    }
}
