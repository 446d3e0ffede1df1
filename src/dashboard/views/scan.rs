//! Scan view - upload an image and inspect the detected QR codes

use egui::{Color32, Pos2, Rect, RichText, Vec2};
use std::path::PathBuf;

use crate::config::{AnnotationSettings, AppConfig};
use crate::dashboard::components::status_card::{CardStatus, StatusCard};
use crate::dashboard::state::{ScanSource, ScanViewState};
use crate::dashboard::theme::ThemeColors;
use crate::vision::{report, DetectionResult, ScanReport};

/// Render the scan view
pub fn render_scan_view(ui: &mut egui::Ui, view_state: &mut ScanViewState, config: &AppConfig) {
    ui.heading(RichText::new("QR Code Scanner").size(24.0).strong());
    ui.add_space(8.0);
    ui.label(
        RichText::new("Upload an image with one or more QR codes. Every code found is counted, decoded and outlined.")
            .size(14.0)
            .color(ThemeColors::TEXT_SECONDARY)
    );

    ui.add_space(16.0);
    render_upload_panel(ui, view_state);
    ui.add_space(16.0);

    if let Some(ref error) = view_state.last_error {
        ui.label(RichText::new(format!("Error: {}", error)).color(ThemeColors::ACCENT_ERROR).size(15.0));
        ui.add_space(8.0);
    }
    if let Some(ref notice) = view_state.notice {
        ui.label(RichText::new(notice).color(ThemeColors::ACCENT_WARNING).size(13.0));
        ui.add_space(8.0);
    }

    if view_state.report.is_none() {
        if view_state.last_error.is_none() {
            ui.label(
                RichText::new("Please upload an image to begin.")
                    .size(15.0)
                    .color(ThemeColors::TEXT_MUTED)
            );
        }
        return;
    }

    ensure_texture(ui.ctx(), view_state);

    egui::ScrollArea::vertical().show(ui, |ui| {
        render_images(ui, view_state, config);
        ui.add_space(16.0);
        if let Some(ref scan) = view_state.report {
            render_results(ui, scan);
        }
    });
}

/// Upload controls: a path box plus drag-and-drop
fn render_upload_panel(ui: &mut egui::Ui, view_state: &mut ScanViewState) {
    egui::Frame::none()
        .fill(ThemeColors::BG_MEDIUM)
        .rounding(egui::Rounding::same(8.0))
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label("Image:");
                let edit = ui.add(
                    egui::TextEdit::singleline(&mut view_state.path_input)
                        .hint_text("path/to/image.png")
                        .desired_width(360.0)
                );
                let submitted = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

                let can_scan = !view_state.path_input.trim().is_empty();
                if (ui.add_enabled(can_scan, egui::Button::new("Scan")).clicked() || submitted) && can_scan {
                    let path = PathBuf::from(view_state.path_input.trim());
                    view_state.pending = Some(ScanSource::Path(path));
                }

                if view_state.source_name.is_some() && ui.button("Clear").clicked() {
                    view_state.clear();
                }
            });

            ui.add_space(4.0);
            ui.label(
                RichText::new("...or drop a PNG / JPEG onto this window")
                    .size(12.0)
                    .color(ThemeColors::TEXT_MUTED)
            );
        });
}

/// Upload the decoded image to the GPU once per scan
fn ensure_texture(ctx: &egui::Context, view_state: &mut ScanViewState) {
    if view_state.texture.is_some() {
        return;
    }
    if let Some(ref image) = view_state.image {
        let (w, h) = image.dimensions();
        let color_image = egui::ColorImage::from_rgb([w as usize, h as usize], image.as_rgb().as_raw());
        view_state.texture = Some(ctx.load_texture("scan_image", color_image, egui::TextureOptions::LINEAR));
    }
}

/// Original and annotated images, side by side when there is room
fn render_images(ui: &mut egui::Ui, view_state: &ScanViewState, config: &AppConfig) {
    let (Some(texture), Some(scan)) = (&view_state.texture, &view_state.report) else {
        return;
    };

    if let Some(ref name) = view_state.source_name {
        ui.label(RichText::new(name).size(13.0).color(ThemeColors::TEXT_MUTED));
        ui.add_space(4.0);
    }

    let show_original = config.ui.show_original;
    let available_width = ui.available_width();

    if show_original && available_width > 800.0 {
        ui.columns(2, |columns| {
            image_panel(&mut columns[0], "Original", texture, None, &config.annotation);
            image_panel(&mut columns[1], "Detected", texture, Some(scan), &config.annotation);
        });
    } else {
        if show_original {
            image_panel(ui, "Original", texture, None, &config.annotation);
            ui.add_space(8.0);
        }
        image_panel(ui, "Detected", texture, Some(scan), &config.annotation);
    }
}

/// One framed image, optionally with detections painted on top
fn image_panel(
    ui: &mut egui::Ui,
    title: &str,
    texture: &egui::TextureHandle,
    scan: Option<&ScanReport>,
    style: &AnnotationSettings,
) {
    egui::Frame::none()
        .fill(ThemeColors::BG_MEDIUM)
        .rounding(egui::Rounding::same(8.0))
        .inner_margin(10.0)
        .show(ui, |ui| {
            ui.label(RichText::new(title).size(17.0).strong());
            ui.add_space(6.0);

            let tex_size = texture.size_vec2();
            let max_width = ui.available_width().max(1.0);
            let scale = (max_width / tex_size.x).min(1.0);
            let scaled_size = tex_size * scale;

            let (image_rect, _) = ui.allocate_exact_size(scaled_size, egui::Sense::hover());
            ui.painter().image(
                texture.id(),
                image_rect,
                Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                Color32::WHITE,
            );

            if let Some(scan) = scan {
                paint_detections(ui, image_rect, tex_size, &scan.results, style);
            }
        });
}

/// Outline each code and label it at its first corner
fn paint_detections(
    ui: &egui::Ui,
    image_rect: Rect,
    image_size: Vec2,
    results: &[DetectionResult],
    style: &AnnotationSettings,
) {
    let painter = ui.painter_at(image_rect);
    let box_color = rgb_to_color32(style.box_color);
    let label_color = rgb_to_color32(style.label_color);
    let stroke = egui::Stroke::new(style.thickness.max(1) as f32, box_color);

    for (idx, result) in results.iter().enumerate() {
        let points: Vec<Pos2> = result
            .corners
            .iter()
            .map(|p| image_to_screen(p.x, p.y, image_rect, image_size))
            .collect();
        painter.add(egui::Shape::closed_line(points.clone(), stroke));

        let anchor = points[0];
        painter.circle_filled(anchor, style.thickness.max(1) as f32 + 1.0, label_color);
        painter.text(
            anchor - Vec2::new(0.0, 4.0),
            egui::Align2::LEFT_BOTTOM,
            report::box_label(idx, result),
            egui::FontId::proportional(13.0),
            label_color,
        );
    }
}

/// Count card and decoded text list
fn render_results(ui: &mut egui::Ui, scan: &ScanReport) {
    ui.horizontal(|ui| {
        let status = if scan.is_empty() {
            CardStatus::Warning
        } else {
            CardStatus::Active
        };
        StatusCard::new("QR Codes Found", scan.count().to_string(), status)
            .with_caption(format!("{} decoded", scan.decoded_count()))
            .show(ui);

        ui.add_space(16.0);

        let undecoded = scan.count() - scan.decoded_count();
        let status = if undecoded > 0 { CardStatus::Warning } else { CardStatus::Inactive };
        StatusCard::new("Undecodable", undecoded.to_string(), status).show(ui);

        ui.add_space(16.0);

        StatusCard::new(
            "Processing Time",
            format!("{} ms", scan.processing_time_ms),
            CardStatus::Inactive,
        )
        .show(ui);
    });

    ui.add_space(16.0);

    if scan.is_empty() {
        ui.label(RichText::new(report::NO_CODES_MESSAGE).color(ThemeColors::ACCENT_WARNING).size(15.0));
        return;
    }

    ui.heading(RichText::new("Decoded Data").size(18.0));
    ui.add_space(8.0);
    for (line, result) in report::format_results(&scan.results).into_iter().zip(&scan.results) {
        let (x, y, w, h) = result.bounding_box();
        ui.label(RichText::new(line).monospace())
            .on_hover_text(format!("at ({:.0}, {:.0}), {:.0}x{:.0} px", x, y, w, h));
    }
}

/// Map image pixel coordinates into the rect the image is drawn in
pub fn image_to_screen(x: f32, y: f32, image_rect: Rect, image_size: Vec2) -> Pos2 {
    if image_size.x <= 0.0 || image_size.y <= 0.0 {
        return image_rect.min;
    }
    let sx = image_rect.width() / image_size.x;
    let sy = image_rect.height() / image_size.y;
    image_rect.min + Vec2::new(x * sx, y * sy)
}

fn rgb_to_color32(rgb: [u8; 3]) -> Color32 {
    Color32::from_rgb(rgb[0], rgb[1], rgb[2])
}
