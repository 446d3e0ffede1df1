//! Dashboard UI Module
//!
//! The scanner window: upload an image, see the detected codes outlined and
//! listed, and tune detection and drawing settings.

pub mod app;
pub mod state;
pub mod theme;
pub mod views;
pub mod components;

pub use app::run_dashboard;
