//! Settings view - Detection and annotation preferences

use egui::RichText;
use std::path::Path;

use crate::config::{save_config, AppConfig};
use crate::dashboard::state::SettingsViewState;
use crate::dashboard::theme::ThemeColors;

/// Bounds of the pixel limit editor, in megapixels
const MIN_MEGAPIXELS: f64 = 0.1;
const MAX_MEGAPIXELS: f64 = 400.0;

fn pixels_to_megapixels(pixels: u64) -> f64 {
    pixels as f64 / 1_000_000.0
}

fn megapixels_to_pixels(megapixels: f64) -> u64 {
    (megapixels * 1_000_000.0).round() as u64
}

/// What the settings view changed this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SettingsChange {
    /// Detection settings changed; the pipeline must be rebuilt
    pub detection: bool,
}

/// Render the settings view
pub fn render_settings_view(
    ui: &mut egui::Ui,
    view_state: &mut SettingsViewState,
    config: &mut AppConfig,
    config_path: Option<&Path>,
) -> SettingsChange {
    let mut change = SettingsChange::default();

    ui.heading(RichText::new("Settings").size(24.0).strong());
    ui.add_space(8.0);
    ui.label(
        RichText::new("Configure detection and how results are drawn")
            .size(14.0)
            .color(ThemeColors::TEXT_SECONDARY)
    );

    ui.add_space(24.0);

    section(ui, "Detection", |ui| {
        if ui
            .checkbox(&mut config.detection.keep_undecoded, "Report codes that cannot be decoded")
            .on_hover_text("Located codes without a readable payload are listed with an empty text")
            .changed()
        {
            change.detection = true;
        }

        ui.horizontal(|ui| {
            ui.label("Max image size (megapixels):");
            let mut megapixels = pixels_to_megapixels(config.detection.max_pixels);
            let drag = egui::DragValue::new(&mut megapixels)
                .range(MIN_MEGAPIXELS..=MAX_MEGAPIXELS)
                .speed(0.1)
                .max_decimals(1);
            if ui.add(drag).changed() {
                config.detection.max_pixels = megapixels_to_pixels(megapixels);
                change.detection = true;
            }
        });
    });

    ui.add_space(12.0);

    let mut annotation_changed = false;
    section(ui, "Annotation", |ui| {
        ui.horizontal(|ui| {
            ui.label("Box color:");
            annotation_changed |= ui.color_edit_button_srgb(&mut config.annotation.box_color).changed();
            ui.add_space(16.0);
            ui.label("Label color:");
            annotation_changed |= ui.color_edit_button_srgb(&mut config.annotation.label_color).changed();
        });
        ui.horizontal(|ui| {
            ui.label("Thickness:");
            annotation_changed |= ui
                .add(egui::Slider::new(&mut config.annotation.thickness, 1..=8))
                .changed();
        });
        annotation_changed |= ui
            .checkbox(&mut config.ui.show_original, "Show original image next to detections")
            .changed();
    });

    if change.detection || annotation_changed {
        view_state.dirty = true;
        view_state.status = None;
    }

    ui.add_space(24.0);

    ui.horizontal(|ui| {
        let can_save = config_path.is_some() && view_state.dirty;
        if ui.add_enabled(can_save, egui::Button::new("Save")).clicked() {
            if let Some(path) = config_path {
                view_state.status = Some(match save_config(config, path) {
                    Ok(()) => {
                        view_state.dirty = false;
                        Ok(format!("Saved to {}", path.display()))
                    }
                    Err(e) => Err(format!("Failed to save: {}", e)),
                });
            }
        }

        if ui.button("Reset to defaults").clicked() {
            let defaults = AppConfig::default();
            change.detection |= defaults.detection != config.detection;
            *config = defaults;
            view_state.dirty = true;
            view_state.status = None;
        }
    });

    match &view_state.status {
        Some(Ok(msg)) => {
            ui.label(RichText::new(msg).color(ThemeColors::ACCENT_SUCCESS).size(13.0));
        }
        Some(Err(msg)) => {
            ui.label(RichText::new(msg).color(ThemeColors::ACCENT_ERROR).size(13.0));
        }
        None if config_path.is_none() => {
            ui.label(
                RichText::new("No configuration directory available; changes last for this session only")
                    .color(ThemeColors::TEXT_MUTED)
                    .size(13.0)
            );
        }
        None => {}
    }

    change
}

/// A framed settings group with a heading
fn section(ui: &mut egui::Ui, title: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::none()
        .fill(ThemeColors::BG_MEDIUM)
        .rounding(egui::Rounding::same(8.0))
        .inner_margin(16.0)
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.heading(RichText::new(title).size(16.0));
            ui.add_space(12.0);
            add_contents(ui);
        });
}
