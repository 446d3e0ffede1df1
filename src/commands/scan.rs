//! Scan command - detect QR codes in one image from the terminal.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::ingest;
use crate::vision::{draw_qr_boxes, report, ScanPipeline, ScanReport};

/// Arguments for `qr-lens scan`.
#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Image to scan (PNG, JPEG, ...)
    pub image: PathBuf,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    /// Write a copy of the image with the detected codes outlined
    #[arg(long, value_name = "OUT")]
    pub annotate: Option<PathBuf>,

    /// Leave out codes that were located but could not be decoded
    #[arg(long)]
    pub drop_undecoded: bool,
}

/// Run the scan command, printing to stdout.
pub fn run(args: &ScanArgs, config: &AppConfig) -> Result<ScanReport> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_with_output(args, config, &mut out)
}

/// Run the scan command, printing to `out`.
pub fn run_with_output<W: Write>(args: &ScanArgs, config: &AppConfig, out: &mut W) -> Result<ScanReport> {
    if !ingest::is_supported_extension(&args.image) {
        warn!("{:?} does not look like a PNG or JPEG, trying anyway", args.image);
    }

    let mut settings = config.detection.clone();
    if args.drop_undecoded {
        settings.keep_undecoded = false;
    }

    let pipeline = ScanPipeline::with_settings(&settings);
    let (image, scan) = pipeline
        .scan_file(&args.image)
        .with_context(|| format!("Failed to scan {}", args.image.display()))?;

    if args.json {
        writeln!(out, "{}", report::render_json(&scan)?)?;
    } else {
        write!(out, "{}", report::render_text(&scan))?;
    }

    if let Some(path) = &args.annotate {
        let annotated = draw_qr_boxes(image.as_rgb(), &scan.results, &config.annotation);
        annotated
            .save(path)
            .with_context(|| format!("Failed to write annotated image {}", path.display()))?;
        info!("Annotated image written to {:?}", path);
    }

    Ok(scan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{encode_png, row_of_codes};
    use crate::vision::ScanError;
    use tempfile::TempDir;

    fn args_for(image: PathBuf) -> ScanArgs {
        ScanArgs {
            image,
            json: false,
            annotate: None,
            drop_undecoded: false,
        }
    }

    fn write_codes(dir: &TempDir, texts: &[&str]) -> PathBuf {
        let path = dir.path().join("codes.png");
        std::fs::write(&path, encode_png(&row_of_codes(texts))).unwrap();
        path
    }

    #[test]
    fn test_text_output() {
        let dir = TempDir::new().unwrap();
        let args = args_for(write_codes(&dir, &["cli"]));

        let mut out = Vec::new();
        let scan = run_with_output(&args, &AppConfig::default(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(scan.count(), 1);
        assert_eq!(text, "QR Codes Found: 1\n1. cli\n");
    }

    #[test]
    fn test_json_output_and_annotation() {
        let dir = TempDir::new().unwrap();
        let annotated = dir.path().join("annotated.png");
        let mut args = args_for(write_codes(&dir, &["one", "two"]));
        args.json = true;
        args.annotate = Some(annotated.clone());

        let mut out = Vec::new();
        run_with_output(&args, &AppConfig::default(), &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["count"], 2);
        let written = ingest::load_image_file(&annotated).unwrap();
        assert_eq!(written.width(), value["width"].as_u64().unwrap() as u32);
    }

    #[test]
    fn test_invalid_image_is_decode_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not a png").unwrap();

        let mut out = Vec::new();
        let err = run_with_output(&args_for(path), &AppConfig::default(), &mut out).unwrap_err();

        assert!(matches!(err.downcast_ref::<ScanError>(), Some(ScanError::Decode(_))));
        assert!(out.is_empty());
    }
}
