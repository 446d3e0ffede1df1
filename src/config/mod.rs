//! Application Configuration
//!
//! User settings and preferences stored in TOML format.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::vision::detection::DEFAULT_MAX_PIXELS;

/// Name of the configuration file inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Detection settings
    pub detection: DetectionSettings,
    /// Annotation drawing settings
    pub annotation: AnnotationSettings,
    /// Window settings
    pub ui: UiSettings,
}

/// Detection-related settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionSettings {
    /// Report regions that were located but could not be decoded
    pub keep_undecoded: bool,
    /// Largest image (in pixels) handed to the detector
    pub max_pixels: u64,
}

impl Default for DetectionSettings {
    fn default() -> Self {
        Self {
            keep_undecoded: true,
            max_pixels: DEFAULT_MAX_PIXELS,
        }
    }
}

/// How detected codes are drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationSettings {
    /// Outline color (RGB)
    pub box_color: [u8; 3],
    /// Label and anchor color (RGB)
    pub label_color: [u8; 3],
    /// Outline thickness in pixels
    pub thickness: u32,
}

impl Default for AnnotationSettings {
    fn default() -> Self {
        Self {
            box_color: [0, 255, 0],
            label_color: [255, 0, 0],
            thickness: 2,
        }
    }
}

/// Window settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    pub window_width: f32,
    pub window_height: f32,
    /// Show the unannotated image next to the annotated one
    pub show_original: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            window_width: 1100.0,
            window_height: 700.0,
            show_original: true,
        }
    }
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Save configuration to file
pub fn save_config(config: &AppConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Get the configuration directory
pub fn get_config_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "qrlens", "QrLens")
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

    let config_dir = proj_dirs.config_dir().to_path_buf();
    std::fs::create_dir_all(&config_dir)?;

    Ok(config_dir)
}

/// Default location of the configuration file
pub fn default_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load configuration from file, falling back to defaults if it is missing or invalid
pub fn load_or_default(path: &Path) -> AppConfig {
    if !path.exists() {
        info!("No configuration at {:?}, using defaults", path);
        return AppConfig::default();
    }

    match load_config(path) {
        Ok(config) => {
            info!("Loaded configuration from {:?}", path);
            config
        }
        Err(e) => {
            warn!("Ignoring invalid configuration {:?}: {}", path, e);
            AppConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_app_config() {
        let config = AppConfig::default();

        assert!(config.detection.keep_undecoded);
        assert_eq!(config.detection.max_pixels, DEFAULT_MAX_PIXELS);

        assert_eq!(config.annotation.box_color, [0, 255, 0]);
        assert_eq!(config.annotation.label_color, [255, 0, 0]);
        assert_eq!(config.annotation.thickness, 2);

        assert!((config.ui.window_width - 1100.0).abs() < 0.01);
        assert!(config.ui.show_original);
    }

    #[test]
    fn test_config_with_custom_values() {
        let mut config = AppConfig::default();
        config.detection.keep_undecoded = false;
        config.annotation.thickness = 4;
        config.annotation.box_color = [1, 2, 3];

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let parsed: AppConfig = toml::from_str("[annotation]\nthickness = 5\n").unwrap();

        assert_eq!(parsed.annotation.thickness, 5);
        assert_eq!(parsed.annotation.box_color, [0, 255, 0]);
        assert!(parsed.detection.keep_undecoded);
        assert_eq!(parsed.ui, UiSettings::default());
    }

    #[test]
    fn test_save_and_load_config() {
        let mut config = AppConfig::default();
        config.ui.show_original = false;

        let temp_file = NamedTempFile::new().unwrap();
        save_config(&config, temp_file.path()).unwrap();
        let loaded = load_config(temp_file.path()).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/path/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "this is not valid toml {{{{").unwrap();

        let result = load_config(temp_file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_or_default_falls_back() {
        assert_eq!(load_or_default(Path::new("/nonexistent/config.toml")), AppConfig::default());

        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[detection]\nkeep_undecoded = \"yes\"").unwrap();
        assert_eq!(load_or_default(temp_file.path()), AppConfig::default());
    }
}
