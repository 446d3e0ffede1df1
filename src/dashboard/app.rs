//! Dashboard application entry point

use eframe::egui;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::dashboard::components::render_sidebar;
use crate::dashboard::state::{DashboardState, DashboardView, ScanSource};
use crate::dashboard::theme::{self, color_with_alpha, ThemeColors};
use crate::dashboard::views::{render_scan_view, render_settings_view};
use crate::ingest;
use crate::vision::ScanPipeline;

/// The scanner window
pub struct ScannerApp {
    /// Current configuration (edited by the settings view)
    config: AppConfig,
    /// Where the configuration is saved, if a config directory exists
    config_path: Option<PathBuf>,
    /// Detection pipeline built from `config.detection`
    pipeline: ScanPipeline,
    /// Dashboard-specific state
    dashboard_state: DashboardState,
    /// Whether theme has been applied
    theme_applied: bool,
}

impl ScannerApp {
    /// Create a new scanner application
    pub fn new(config: AppConfig, config_path: Option<PathBuf>) -> Self {
        let pipeline = ScanPipeline::with_settings(&config.detection);
        Self {
            config,
            config_path,
            pipeline,
            dashboard_state: DashboardState::default(),
            theme_applied: false,
        }
    }

    /// Create eframe options for the scanner window
    pub fn options(config: &AppConfig) -> eframe::NativeOptions {
        eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([config.ui.window_width, config.ui.window_height])
                .with_min_inner_size([640.0, 420.0])
                .with_drag_and_drop(true)
                .with_title("QR Lens"),
            ..Default::default()
        }
    }

    /// Queue an image to be scanned on the next update
    pub fn queue(&mut self, source: ScanSource) {
        self.dashboard_state.scan.pending = Some(source);
        self.dashboard_state.current_view = DashboardView::Scan;
    }

    /// Scan the queued image, if any, replacing the previous results
    fn process_pending_scan(&mut self) {
        let Some(source) = self.dashboard_state.scan.pending.take() else {
            return;
        };

        let name = source.display_name();
        info!("Scanning {}", name);

        let scan_state = &mut self.dashboard_state.scan;
        scan_state.notice = None;

        let outcome = match source {
            ScanSource::Path(path) => {
                if !ingest::is_supported_extension(&path) {
                    scan_state.notice = Some(format!("{} is not a PNG or JPEG; trying anyway", name));
                }
                self.pipeline.scan_file(&path)
            }
            ScanSource::Bytes { name: ref file_name, ref bytes } => {
                if !ingest::is_supported_extension(std::path::Path::new(file_name)) {
                    scan_state.notice = Some(format!("{} is not a PNG or JPEG; trying anyway", name));
                }
                self.pipeline.scan_bytes(bytes)
            }
        };

        if let Err(ref e) = outcome {
            warn!("Scan of {} failed: {}", name, e);
        }
        scan_state.apply_outcome(name, outcome);
    }

    /// Pick up files dropped onto the window
    fn collect_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if dropped.is_empty() {
            return;
        }

        if let Some(source) = source_from_dropped(&dropped) {
            self.queue(source);
            if dropped.len() > 1 {
                info!("{} files dropped, scanning only the first", dropped.len());
            }
        }
    }

    /// Rebuild the pipeline after detection settings change
    fn rebuild_pipeline(&mut self) {
        self.pipeline = ScanPipeline::with_settings(&self.config.detection);
        info!(
            "Detection settings changed (keep_undecoded={}, max_pixels={})",
            self.config.detection.keep_undecoded, self.config.detection.max_pixels
        );
    }
}

impl eframe::App for ScannerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply theme once
        if !self.theme_applied {
            theme::apply_theme(ctx);
            self.theme_applied = true;
        }

        self.collect_dropped_files(ctx);
        self.process_pending_scan();

        let codes_found = self.dashboard_state.scan.report.as_ref().map(|r| r.count());

        egui::SidePanel::left("sidebar")
            .resizable(false)
            .default_width(180.0)
            .show(ctx, |ui| {
                render_sidebar(ui, &mut self.dashboard_state.current_view, codes_found);
            });

        let mut detection_changed = false;
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::Frame::none()
                .inner_margin(24.0)
                .show(ui, |ui| {
                    match self.dashboard_state.current_view {
                        DashboardView::Scan => {
                            render_scan_view(ui, &mut self.dashboard_state.scan, &self.config);
                        }
                        DashboardView::Settings => {
                            let change = render_settings_view(
                                ui,
                                &mut self.dashboard_state.settings,
                                &mut self.config,
                                self.config_path.as_deref(),
                            );
                            detection_changed = change.detection;
                        }
                    }
                });
        });

        if detection_changed {
            self.rebuild_pipeline();
        }

        paint_drop_hint(ctx);
    }
}

/// First dropped file as a scan source. Browser drops carry bytes, native drops a path.
fn source_from_dropped(files: &[egui::DroppedFile]) -> Option<ScanSource> {
    let file = files.first()?;

    if let Some(ref bytes) = file.bytes {
        let name = if file.name.is_empty() { "upload".to_string() } else { file.name.clone() };
        return Some(ScanSource::Bytes {
            name,
            bytes: bytes.to_vec(),
        });
    }

    file.path.clone().map(ScanSource::Path)
}

/// Dim the window while a file hovers over it
fn paint_drop_hint(ctx: &egui::Context) {
    let hovering = ctx.input(|i| !i.raw.hovered_files.is_empty());
    if !hovering {
        return;
    }

    let painter = ctx.layer_painter(egui::LayerId::new(egui::Order::Foreground, egui::Id::new("drop_hint")));
    let screen_rect = ctx.screen_rect();
    painter.rect_filled(screen_rect, 0.0, color_with_alpha(ThemeColors::BG_DARK, 200));
    painter.text(
        screen_rect.center(),
        egui::Align2::CENTER_CENTER,
        "Drop image to scan",
        egui::FontId::proportional(28.0),
        ThemeColors::ACCENT_PRIMARY,
    );
}

/// Run the scanner window
pub fn run_dashboard(config: AppConfig, config_path: Option<PathBuf>) -> Result<(), eframe::Error> {
    let options = ScannerApp::options(&config);
    let app = ScannerApp::new(config, config_path);
    eframe::run_native(
        "QR Lens",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{encode_png, row_of_codes};
    use std::sync::Arc;

    #[test]
    fn test_queued_bytes_are_scanned() {
        let mut app = ScannerApp::new(AppConfig::default(), None);
        app.dashboard_state.current_view = DashboardView::Settings;

        app.queue(ScanSource::Bytes {
            name: "codes.png".to_string(),
            bytes: encode_png(&row_of_codes(&["dropped"])),
        });
        assert_eq!(app.dashboard_state.current_view, DashboardView::Scan);

        app.process_pending_scan();
        let scan = &app.dashboard_state.scan;
        assert!(scan.pending.is_none());
        assert_eq!(scan.source_name.as_deref(), Some("codes.png"));
        assert_eq!(scan.report.as_ref().unwrap().results[0].decoded_text, "dropped");
        assert!(scan.notice.is_none());
    }

    #[test]
    fn test_invalid_upload_shows_error() {
        let mut app = ScannerApp::new(AppConfig::default(), None);
        app.queue(ScanSource::Bytes {
            name: "notes.txt".to_string(),
            bytes: b"hello".to_vec(),
        });

        app.process_pending_scan();
        let scan = &app.dashboard_state.scan;
        assert!(scan.report.is_none());
        assert!(scan.last_error.is_some());
        assert!(scan.notice.as_deref().unwrap().contains("notes.txt"));
    }

    #[test]
    fn test_nothing_pending_is_noop() {
        let mut app = ScannerApp::new(AppConfig::default(), None);
        app.process_pending_scan();
        assert!(app.dashboard_state.scan.source_name.is_none());
    }

    #[test]
    fn test_source_from_dropped_prefers_bytes() {
        let files = vec![egui::DroppedFile {
            name: "web.png".to_string(),
            bytes: Some(Arc::from(vec![1u8, 2, 3])),
            path: Some(PathBuf::from("/ignored.png")),
            ..Default::default()
        }];

        match source_from_dropped(&files) {
            Some(ScanSource::Bytes { name, bytes }) => {
                assert_eq!(name, "web.png");
                assert_eq!(bytes, vec![1, 2, 3]);
            }
            other => panic!("unexpected source {:?}", other),
        }
    }

    #[test]
    fn test_source_from_dropped_path() {
        let files = vec![
            egui::DroppedFile {
                path: Some(PathBuf::from("/tmp/first.jpg")),
                ..Default::default()
            },
            egui::DroppedFile {
                path: Some(PathBuf::from("/tmp/second.jpg")),
                ..Default::default()
            },
        ];

        assert!(matches!(
            source_from_dropped(&files),
            Some(ScanSource::Path(p)) if p == PathBuf::from("/tmp/first.jpg")
        ));
        assert!(source_from_dropped(&[]).is_none());
    }
}
