//! Shared configuration types consumed across the vignette workspace.
//!
//! These structures describe a vignette request plus the preview, output and telemetry
//! preferences around it. They serialize to JSON so a look can be saved once and reapplied
//! from the CLI.

use crate::{color::RgbColor, shape::VignetteShape};

use anyhow::{Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

/// Parameters of the vignette figure and its transition band.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VignetteSettings {
    /// Figure traced by the band.
    pub shape: VignetteShape,
    /// Rotation of the figure about its centre in degrees (ignored for circles).
    pub orientation_degrees: f64,
    /// Size of the untouched inner region as a percentage of the image width/height.
    pub coverage_percent: f64,
    /// Thickness of the transition band in pixels. Must be positive.
    pub band_width_pixels: f64,
    /// Number of discrete sub-bands approximating the blend. Must be positive.
    pub gradation_steps: u32,
    /// Horizontal centre displacement as a percentage of half the image width.
    pub center_offset_x_percent: f64,
    /// Vertical centre displacement as a percentage of half the image height.
    pub center_offset_y_percent: f64,
    /// Color applied outside the outermost boundary.
    pub border_color: RgbColor,
}

impl Default for VignetteSettings {
    fn default() -> Self {
        Self {
            shape: VignetteShape::Ellipse,
            orientation_degrees: 0.0,
            coverage_percent: 70.0,
            band_width_pixels: 40.0,
            gradation_steps: 16,
            center_offset_x_percent: 0.0,
            center_offset_y_percent: 0.0,
            border_color: RgbColor::default(),
        }
    }
}

/// Preview rendering preferences.
///
/// The preview is rendered on a copy of the image scaled to fit a square viewport; band width
/// and step count are scaled by the same factor so it matches the full-resolution render.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PreviewSettings {
    /// Also write a viewport-sized preview next to every output.
    pub enabled: bool,
    /// Edge length of the square viewport the preview must fit in.
    pub viewport: u32,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            viewport: 600,
        }
    }
}

/// Encoding preferences for rendered images.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputSettings {
    /// Output format: "png", "jpeg", or "bmp".
    pub format: String,
    /// JPEG quality (1-100, only used when format is jpeg).
    pub jpeg_quality: u8,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: "png".to_string(),
            jpeg_quality: 90,
        }
    }
}

/// Settings controlling optional runtime telemetry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetrySettings {
    /// Whether telemetry timing logs are enabled.
    pub enabled: bool,
    /// Logging level for telemetry output (error, warn, info, debug, trace).
    pub level: String,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "debug".to_string(),
        }
    }
}

impl TelemetrySettings {
    /// Resolve the configured level string into a `LevelFilter`.
    pub fn level_filter(&self) -> LevelFilter {
        match self.level.trim().to_ascii_lowercase().as_str() {
            "off" => LevelFilter::Off,
            "error" => LevelFilter::Error,
            "warn" | "warning" => LevelFilter::Warn,
            "info" => LevelFilter::Info,
            "trace" => LevelFilter::Trace,
            _ => LevelFilter::Debug,
        }
    }
}

/// Persistent application settings consumed by the CLI.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppSettings {
    pub vignette: VignetteSettings,
    pub preview: PreviewSettings,
    pub output: OutputSettings,
    pub telemetry: TelemetrySettings,
}

impl AppSettings {
    /// Load settings from a JSON file. Missing sections fall back to their defaults.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse settings JSON at {}", path.display()))
    }

    /// Serialize settings to disk in pretty-printed JSON, overwriting any existing file.
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let payload =
            serde_json::to_string_pretty(self).context("failed to serialize settings JSON")?;
        fs::write(path, payload)
            .with_context(|| format!("failed to write settings file {}", path.display()))?;
        Ok(())
    }
}

/// Returns the default path for persisted settings (`config/vignette_settings.json`).
pub fn default_settings_path() -> PathBuf {
    env::current_dir()
        .map(|dir| dir.join("config/vignette_settings.json"))
        .unwrap_or_else(|_| PathBuf::from("config/vignette_settings.json"))
}
