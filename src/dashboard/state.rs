//! Dashboard view state management
//!
//! Only display state lives here: the last loaded image, its report and the
//! textures used to draw them. Each scan replaces all of it.

use crate::ingest::DecodedImage;
use crate::vision::{ScanError, ScanReport};

/// Current view in the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardView {
    #[default]
    Scan,
    Settings,
}

impl DashboardView {
    /// Get the display name for this view
    pub fn name(&self) -> &'static str {
        match self {
            DashboardView::Scan => "Scan",
            DashboardView::Settings => "Settings",
        }
    }

    /// Get the icon character for this view
    pub fn icon(&self) -> &'static str {
        match self {
            DashboardView::Scan => "Q",
            DashboardView::Settings => "S",
        }
    }
}

/// An image waiting to be scanned on the next frame
#[derive(Debug, Clone)]
pub enum ScanSource {
    /// Bytes delivered by the UI (browser drops carry bytes, not paths)
    Bytes { name: String, bytes: Vec<u8> },
    /// A file on disk
    Path(std::path::PathBuf),
}

impl ScanSource {
    /// Name shown above the results
    pub fn display_name(&self) -> String {
        match self {
            ScanSource::Bytes { name, .. } => name.clone(),
            ScanSource::Path(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
        }
    }
}

/// Scan view state
#[derive(Default)]
pub struct ScanViewState {
    /// Path typed into the upload box
    pub path_input: String,
    /// Image queued by the UI for the next update
    pub pending: Option<ScanSource>,
    /// Name of the scanned image
    pub source_name: Option<String>,
    /// Decoded image of the last successful scan
    pub image: Option<DecodedImage>,
    /// Report of the last successful scan
    pub report: Option<ScanReport>,
    /// Texture for `image`, created lazily by the view
    pub texture: Option<egui::TextureHandle>,
    /// Error of the last scan
    pub last_error: Option<String>,
    /// Non-fatal notice (e.g. unexpected file type)
    pub notice: Option<String>,
}

impl ScanViewState {
    /// Replace everything shown with the outcome of a new scan
    pub fn apply_outcome(
        &mut self,
        source_name: String,
        outcome: Result<(DecodedImage, ScanReport), ScanError>,
    ) {
        self.source_name = Some(source_name);
        self.texture = None;

        match outcome {
            Ok((image, report)) => {
                self.image = Some(image);
                self.report = Some(report);
                self.last_error = None;
            }
            Err(e) => {
                self.image = None;
                self.report = None;
                self.last_error = Some(e.to_string());
            }
        }
    }

    /// Forget the current image and results
    pub fn clear(&mut self) {
        self.source_name = None;
        self.image = None;
        self.report = None;
        self.texture = None;
        self.last_error = None;
        self.notice = None;
    }
}

/// Settings view state
#[derive(Debug, Default)]
pub struct SettingsViewState {
    /// Unsaved changes exist
    pub dirty: bool,
    /// Result of the last save attempt
    pub status: Option<Result<String, String>>,
}

/// Combined dashboard state
#[derive(Default)]
pub struct DashboardState {
    /// Currently selected view
    pub current_view: DashboardView,
    pub scan: ScanViewState,
    pub settings: SettingsViewState,
}
