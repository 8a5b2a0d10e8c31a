//! Common helpers shared across the vignette crates.

/// Color values, hex parsing, and HSV conversion.
pub mod color;
/// Persisted settings management.
pub mod config;
/// Image decoding, pixel normalization, and preview sizing.
pub mod image_utils;
/// Image encoding and output naming.
pub mod output;
/// The set of vignette figures.
pub mod shape;
/// Instrumentation helpers for optional performance tracing.
pub mod telemetry;

use std::path::{Path, PathBuf};

use anyhow::Result;
use log::LevelFilter;

pub use color::{RgbColor, hsv_to_rgb, parse_hex_color};
pub use config::{
    AppSettings, OutputSettings, PreviewSettings, TelemetrySettings, VignetteSettings,
    default_settings_path,
};
pub use image_utils::{
    ImageFormatError, PixelLayout, load_image, preview_dimensions, preview_scale_factor,
    resize_for_preview, rgb_from_raw, rgb_to_raw, to_rgb_pixels,
};
pub use output::{
    OutputFormat, OutputOptions, OutputPaths, append_suffix_to_filename, output_path_for,
    preview_path_for, save_rgb_image,
};
pub use shape::VignetteShape;
pub use telemetry::{
    TimingGuard, configure as configure_telemetry, telemetry_allows, telemetry_enabled,
    telemetry_level, timing_guard, timing_guard_if,
};

/// Initialize logging once.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` applies. Calling this a second time is a
/// no-op.
pub fn init_logging(default_filter: LevelFilter) -> Result<()> {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_filter.as_str()),
    );
    builder.filter_module(telemetry::TELEMETRY_TARGET, LevelFilter::Trace);
    // Already initialized (tests, repeated calls): keep the existing logger.
    let _ = builder.try_init();
    Ok(())
}

/// Validate that a path exists and resolve it to an absolute path.
pub fn normalize_path<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    anyhow::ensure!(path.exists(), "path does not exist: {}", path.display());
    Ok(path.canonicalize()?)
}
