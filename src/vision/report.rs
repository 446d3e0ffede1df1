//! Text and JSON rendering of scan results

use serde::Serialize;

use super::{DetectionResult, ScanReport};

/// Placeholder shown for a located code with no payload
pub const UNDECODED_PLACEHOLDER: &str = "<undecodable>";

/// Warning shown when nothing was found
pub const NO_CODES_MESSAGE: &str = "No QR codes detected. Try a clearer image.";

/// Display text of one result
pub fn display_text(result: &DetectionResult) -> &str {
    if result.is_decoded() {
        &result.decoded_text
    } else {
        UNDECODED_PLACEHOLDER
    }
}

/// Numbered lines, starting at 1: `"1. payload"`
pub fn format_results(results: &[DetectionResult]) -> Vec<String> {
    results
        .iter()
        .enumerate()
        .map(|(idx, result)| format!("{}. {}", idx + 1, display_text(result)))
        .collect()
}

/// Label drawn next to a box: `"1: payload"`
pub fn box_label(index: usize, result: &DetectionResult) -> String {
    format!("{}: {}", index + 1, display_text(result))
}

/// Plain-text summary for terminals
pub fn render_text(report: &ScanReport) -> String {
    let mut out = format!("QR Codes Found: {}\n", report.count());
    if report.is_empty() {
        out.push_str(NO_CODES_MESSAGE);
        out.push('\n');
    } else {
        for line in format_results(&report.results) {
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}

/// JSON shape of a scan: the count plus the report fields
#[derive(Serialize)]
struct JsonReport<'a> {
    count: usize,
    width: u32,
    height: u32,
    results: &'a [DetectionResult],
}

impl<'a> From<&'a ScanReport> for JsonReport<'a> {
    fn from(report: &'a ScanReport) -> Self {
        Self {
            count: report.count(),
            width: report.width,
            height: report.height,
            results: &report.results,
        }
    }
}

/// Pretty JSON with the count, image size and results
pub fn render_json(report: &ScanReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport::from(report))
}
