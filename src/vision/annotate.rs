//! Draws detected QR boundaries onto a copy of the scanned image

use ab_glyph::{FontRef, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut, draw_text_mut};
use tracing::warn;

use super::{report, DetectionResult};
use crate::config::AnnotationSettings;

/// Label font embedded into the binary
const LABEL_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

/// Label height in pixels
const LABEL_SCALE: f32 = 16.0;

fn label_font() -> Option<FontRef<'static>> {
    match FontRef::try_from_slice(LABEL_FONT) {
        Ok(font) => Some(font),
        Err(e) => {
            warn!("Label font unusable, drawing boxes only: {}", e);
            None
        }
    }
}

/// Return a copy of `image` with each result's quadrilateral outlined, a
/// marker on its first corner and a `"n: text"` label just above it.
pub fn draw_qr_boxes(image: &RgbImage, results: &[DetectionResult], style: &AnnotationSettings) -> RgbImage {
    let mut output = image.clone();
    let box_color = Rgb(style.box_color);
    let label_color = Rgb(style.label_color);
    let thickness = style.thickness.max(1) as i32;
    let font = label_font();

    for (idx, result) in results.iter().enumerate() {
        let corners = &result.corners;
        for i in 0..corners.len() {
            let a = corners[i];
            let b = corners[(i + 1) % corners.len()];
            draw_thick_segment(&mut output, (a.x, a.y), (b.x, b.y), thickness, box_color);
        }

        let anchor = corners[0];
        draw_filled_circle_mut(
            &mut output,
            (anchor.x.round() as i32, anchor.y.round() as i32),
            thickness + 1,
            label_color,
        );

        if let Some(ref font) = font {
            let x = anchor.x.round() as i32;
            let y = anchor.y.round() as i32 - LABEL_SCALE as i32 - thickness;
            let label = report::box_label(idx, result);
            draw_text_mut(&mut output, label_color, x, y, PxScale::from(LABEL_SCALE), font, &label);
        }
    }

    output
}

/// Stroke a segment `thickness` pixels wide by drawing offset copies
fn draw_thick_segment(img: &mut RgbImage, start: (f32, f32), end: (f32, f32), thickness: i32, color: Rgb<u8>) {
    let lo = -(thickness - 1) / 2;
    let hi = thickness / 2;
    for dy in lo..=hi {
        for dx in lo..=hi {
            let (dx, dy) = (dx as f32, dy as f32);
            draw_line_segment_mut(img, (start.0 + dx, start.1 + dy), (end.0 + dx, end.1 + dy), color);
        }
    }
}
