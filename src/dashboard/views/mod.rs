//! Dashboard views

pub mod scan;
pub mod settings;

pub use scan::render_scan_view;
pub use settings::render_settings_view;
