//! Configuration loading and CLI override logic.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use log::info;
use vignette_utils::{
    config::{AppSettings, default_settings_path},
    normalize_path,
    output::OutputFormat,
};

use crate::{args::VignetteArgs, color::parse_color_spec};

/// Load application settings from a file or use defaults.
pub fn load_settings(config_path: Option<&PathBuf>) -> Result<AppSettings> {
    if let Some(path) = config_path {
        let resolved = normalize_path(path)?;
        let settings = AppSettings::load_from_path(&resolved)?;
        info!("Loaded settings from {}", resolved.display());
        return Ok(settings);
    }

    let default_path = default_settings_path();
    if !default_path.exists() {
        return Ok(AppSettings::default());
    }
    let settings = AppSettings::load_from_path(&default_path).with_context(|| {
        format!(
            "failed to load default settings from {}",
            default_path.display()
        )
    })?;
    info!("Loaded settings from {}", default_path.display());
    Ok(settings)
}

/// Apply command-line arguments on top of loaded or default settings.
///
/// Malformed colors and formats are errors.
pub fn apply_cli_overrides(settings: &mut AppSettings, args: &VignetteArgs) -> Result<()> {
    if args.telemetry {
        settings.telemetry.enabled = true;
    }
    if let Some(level) = args.telemetry_level.as_deref().map(str::trim)
        && !level.is_empty()
    {
        let lower = level.to_ascii_lowercase();
        if lower == "off" {
            settings.telemetry.enabled = false;
        }
        settings.telemetry.level = lower;
    }

    let vignette = &mut settings.vignette;
    if let Some(shape) = args.shape {
        vignette.shape = shape;
    }
    if let Some(orientation) = args.orientation {
        vignette.orientation_degrees = orientation;
    }
    if let Some(coverage) = args.coverage {
        vignette.coverage_percent = coverage;
    }
    if let Some(band) = args.band_width {
        vignette.band_width_pixels = band;
    }
    if let Some(steps) = args.steps {
        vignette.gradation_steps = steps;
    }
    if let Some(x) = args.center_x {
        vignette.center_offset_x_percent = x;
    }
    if let Some(y) = args.center_y {
        vignette.center_offset_y_percent = y;
    }
    if let Some(raw) = args.border_color.as_deref() {
        vignette.border_color =
            parse_color_spec(raw).map_err(|err| anyhow!("invalid --border-color: {err}"))?;
    }

    if let Some(format) = args.output_format.as_deref() {
        let parsed: OutputFormat = format
            .parse()
            .map_err(|err| anyhow!("invalid --output-format: {err}"))?;
        settings.output.format = parsed.name().to_string();
    }
    if let Some(quality) = args.jpeg_quality {
        settings.output.jpeg_quality = quality;
    }

    if args.preview {
        settings.preview.enabled = true;
    }
    if let Some(viewport) = args.viewport {
        settings.preview.viewport = viewport;
    }
    Ok(())
}
