//! Dashboard theme and styling
//!
//! Dark scanner theme: neutral slate backgrounds with a green accent that
//! matches the default detection box color.

use egui::style::WidgetVisuals;
use egui::{Color32, FontFamily, FontId, Rounding, Stroke, TextStyle, Visuals};

/// Scanner color palette
pub struct ThemeColors;

impl ThemeColors {
    // Backgrounds, darkest first
    pub const BG_DARK: Color32 = Color32::from_rgb(14, 17, 20);
    pub const BG_MEDIUM: Color32 = Color32::from_rgb(24, 28, 33);
    pub const BG_LIGHT: Color32 = Color32::from_rgb(34, 40, 46);
    pub const BG_HOVER: Color32 = Color32::from_rgb(44, 52, 60);

    // Accents
    pub const ACCENT_PRIMARY: Color32 = Color32::from_rgb(64, 214, 120);
    pub const ACCENT_SUCCESS: Color32 = Color32::from_rgb(64, 214, 120);
    pub const ACCENT_WARNING: Color32 = Color32::from_rgb(250, 184, 40);
    pub const ACCENT_ERROR: Color32 = Color32::from_rgb(238, 82, 83);

    // Text
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(232, 238, 242);
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(150, 162, 172);
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(96, 108, 118);

    pub const BORDER: Color32 = Color32::from_rgb(48, 56, 64);

    // Metric card dots
    pub const STATUS_FOUND: Color32 = Color32::from_rgb(64, 214, 120);
    pub const STATUS_IDLE: Color32 = Color32::from_rgb(150, 162, 172);
}

const WIDGET_ROUNDING: f32 = 6.0;

fn style_widget(widget: &mut WidgetVisuals, fill: Color32, text: Color32) {
    widget.bg_fill = fill;
    widget.weak_bg_fill = fill;
    widget.fg_stroke = Stroke::new(1.0, text);
    widget.rounding = Rounding::same(WIDGET_ROUNDING);
}

/// Apply the scanner theme to egui
pub fn apply_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    let mut visuals = Visuals::dark();

    visuals.window_fill = ThemeColors::BG_MEDIUM;
    visuals.panel_fill = ThemeColors::BG_DARK;
    visuals.faint_bg_color = ThemeColors::BG_LIGHT;
    // Text edits (the path box) sit on the darkest shade
    visuals.extreme_bg_color = ThemeColors::BG_DARK;

    let widgets = &mut visuals.widgets;
    style_widget(&mut widgets.noninteractive, ThemeColors::BG_MEDIUM, ThemeColors::TEXT_SECONDARY);
    style_widget(&mut widgets.inactive, ThemeColors::BG_LIGHT, ThemeColors::TEXT_PRIMARY);
    style_widget(&mut widgets.hovered, ThemeColors::BG_HOVER, ThemeColors::TEXT_PRIMARY);
    style_widget(&mut widgets.active, ThemeColors::ACCENT_PRIMARY, ThemeColors::BG_DARK);
    style_widget(&mut widgets.open, ThemeColors::BG_HOVER, ThemeColors::TEXT_PRIMARY);

    visuals.selection.bg_fill = color_with_alpha(ThemeColors::ACCENT_PRIMARY, 64);
    visuals.selection.stroke = Stroke::new(1.0, ThemeColors::ACCENT_PRIMARY);
    visuals.hyperlink_color = ThemeColors::ACCENT_PRIMARY;

    visuals.window_rounding = Rounding::same(8.0);
    visuals.window_shadow.blur = 8.0;
    visuals.window_stroke = Stroke::new(1.0, ThemeColors::BORDER);
    // Color pickers open as popups
    visuals.popup_shadow.blur = 4.0;
    visuals.menu_rounding = Rounding::same(WIDGET_ROUNDING);

    style.visuals = visuals;

    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(12.0, 6.0);
    style.spacing.window_margin = egui::Margin::same(16.0);

    // Decoded payloads are listed in monospace, so keep it close to body size
    style.text_styles = [
        (TextStyle::Small, FontId::new(12.0, FontFamily::Proportional)),
        (TextStyle::Body, FontId::new(15.0, FontFamily::Proportional)),
        (TextStyle::Monospace, FontId::new(14.0, FontFamily::Monospace)),
        (TextStyle::Button, FontId::new(15.0, FontFamily::Proportional)),
        (TextStyle::Heading, FontId::new(22.0, FontFamily::Proportional)),
    ]
    .into();

    ctx.set_style(style);
}

/// Same color with a different alpha
pub fn color_with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_with_alpha() {
        assert_eq!(color_with_alpha(ThemeColors::ACCENT_SUCCESS, 64).a(), 64);
        assert_eq!(color_with_alpha(ThemeColors::ACCENT_SUCCESS, 255), ThemeColors::ACCENT_SUCCESS);
    }

    #[test]
    fn test_style_widget() {
        let mut widget = Visuals::dark().widgets.inactive;
        style_widget(&mut widget, ThemeColors::BG_LIGHT, ThemeColors::TEXT_PRIMARY);
        assert_eq!(widget.bg_fill, ThemeColors::BG_LIGHT);
        assert_eq!(widget.weak_bg_fill, ThemeColors::BG_LIGHT);
        assert_eq!(widget.fg_stroke.color, ThemeColors::TEXT_PRIMARY);
    }
}
