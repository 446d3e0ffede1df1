//! Metric card: a title, a large value and a colored status dot

use egui::{Color32, RichText, Rounding, Vec2};
use crate::dashboard::theme::ThemeColors;

/// A card displaying one metric
pub struct StatusCard {
    pub title: String,
    pub value: String,
    pub status: CardStatus,
    pub caption: Option<String>,
}

/// Status types for cards
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CardStatus {
    Active,
    Inactive,
    Warning,
}

impl CardStatus {
    pub fn color(&self) -> Color32 {
        match self {
            CardStatus::Active => ThemeColors::STATUS_FOUND,
            CardStatus::Inactive => ThemeColors::STATUS_IDLE,
            CardStatus::Warning => ThemeColors::ACCENT_WARNING,
        }
    }
}

impl StatusCard {
    pub fn new(title: impl Into<String>, value: impl Into<String>, status: CardStatus) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            status,
            caption: None,
        }
    }

    /// Small line of text under the value
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        egui::Frame::none()
            .fill(ThemeColors::BG_MEDIUM)
            .rounding(Rounding::same(8.0))
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.set_min_width(160.0);

                ui.horizontal(|ui| {
                    let dot_center = ui.cursor().left_top() + Vec2::new(6.0, 10.0);
                    ui.painter().circle_filled(dot_center, 4.0, self.status.color());
                    ui.add_space(16.0);

                    ui.vertical(|ui| {
                        ui.label(
                            RichText::new(&self.title)
                                .size(12.0)
                                .color(ThemeColors::TEXT_MUTED)
                        );

                        ui.add_space(4.0);

                        ui.label(
                            RichText::new(&self.value)
                                .size(26.0)
                                .color(ThemeColors::TEXT_PRIMARY)
                                .strong()
                        );

                        if let Some(ref caption) = self.caption {
                            ui.add_space(4.0);
                            ui.label(
                                RichText::new(caption)
                                    .size(11.0)
                                    .color(self.status.color())
                            );
                        }
                    });
                });
            });
    }
}
