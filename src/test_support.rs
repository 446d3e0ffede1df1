//! Synthetic image builders shared by unit tests.

use image::{GrayImage, Luma, Rgb, RgbImage};
use std::io::Cursor;

/// Quiet zone around a rendered code, in modules
const QUIET_ZONE: u32 = 4;

/// Render `payload` as a black-on-white QR code with a quiet zone.
///
/// `flip(mx, my, modules)` inverts the module at (mx, my) when it returns true.
fn render_modules(payload: &[u8], module_px: u32, flip: impl Fn(u32, u32, u32) -> bool) -> GrayImage {
    let code = qrcode::QrCode::new(payload).expect("payload fits in a QR code");
    let modules = code.width() as u32;
    let colors = code.to_colors();
    let side = (modules + 2 * QUIET_ZONE) * module_px;

    let mut img = GrayImage::from_pixel(side, side, Luma([255]));
    for my in 0..modules {
        for mx in 0..modules {
            let dark = colors[(my * modules + mx) as usize] == qrcode::Color::Dark;
            if dark == flip(mx, my, modules) {
                continue;
            }
            let x0 = (mx + QUIET_ZONE) * module_px;
            let y0 = (my + QUIET_ZONE) * module_px;
            for y in y0..y0 + module_px {
                for x in x0..x0 + module_px {
                    img.put_pixel(x, y, Luma([0]));
                }
            }
        }
    }
    img
}

/// Render `text` as a clean QR code.
pub(crate) fn render_qr(text: &str, module_px: u32) -> GrayImage {
    render_modules(text.as_bytes(), module_px, |_, _, _| false)
}

/// Render arbitrary bytes, including payloads that are not UTF-8.
pub(crate) fn render_qr_bytes(payload: &[u8], module_px: u32) -> GrayImage {
    render_modules(payload, module_px, |_, _, _| false)
}

/// Render `text` with a checkerboard of data modules inverted.
///
/// Finder, timing and format areas (the outer 9 modules on every side) stay
/// intact, so the grid is still located but its codewords are beyond repair.
pub(crate) fn render_damaged_qr(text: &str, module_px: u32) -> GrayImage {
    render_modules(text.as_bytes(), module_px, |mx, my, modules| {
        let inner = |v: u32| v >= 9 && v + 9 < modules;
        inner(mx) && inner(my) && (mx + my) % 2 == 0
    })
}

/// Paste grayscale tiles onto a white RGB canvas at the given offsets.
pub(crate) fn compose(width: u32, height: u32, tiles: &[(&GrayImage, u32, u32)]) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));
    for (tile, ox, oy) in tiles {
        for (x, y, px) in tile.enumerate_pixels() {
            let v = px.0[0];
            canvas.put_pixel(ox + x, oy + y, Rgb([v, v, v]));
        }
    }
    canvas
}

/// Lay out one code per text in a single row.
pub(crate) fn row_of_codes(texts: &[&str]) -> RgbImage {
    const GAP: u32 = 40;
    const MODULE_PX: u32 = 4;

    let tiles: Vec<GrayImage> = texts.iter().map(|t| render_qr(t, MODULE_PX)).collect();
    let width = tiles.iter().map(|t| t.width() + GAP).sum::<u32>() + GAP;
    let height = tiles.iter().map(|t| t.height()).max().unwrap_or(0) + 2 * GAP;

    let mut placements = Vec::new();
    let mut x = GAP;
    for tile in &tiles {
        placements.push((tile, x, GAP));
        x += tile.width() + GAP;
    }
    compose(width, height, &placements)
}

/// Encode an RGB image as PNG bytes.
pub(crate) fn encode_png(img: &RgbImage) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img.clone())
        .write_to(&mut buf, image::ImageFormat::Png)
        .expect("PNG encoding succeeds");
    buf.into_inner()
}
