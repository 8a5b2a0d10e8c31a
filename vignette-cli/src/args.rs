//! Command-line argument definitions for vignette-cli.

use clap::{ArgAction, Parser};
use std::path::PathBuf;
use vignette_utils::shape::VignetteShape;

/// Apply a shaped vignette to images or directories of images.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct VignetteArgs {
    /// Path to an image file or a directory containing images.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Directory for rendered images. Defaults to each source image's directory.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Optional settings JSON. Defaults to `config/vignette_settings.json` when present, otherwise built-in parameters.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Figure traced by the band: circle, ellipse, diamond, square, rectangle.
    #[arg(long)]
    pub shape: Option<VignetteShape>,

    /// Rotation of the figure in degrees (ignored for circles).
    #[arg(long, allow_negative_numbers = true)]
    pub orientation: Option<f64>,

    /// Inner preserved region as a percentage of the image width/height.
    #[arg(long)]
    pub coverage: Option<f64>,

    /// Thickness of the transition band in pixels.
    #[arg(long)]
    pub band_width: Option<f64>,

    /// Number of discrete sub-bands approximating the blend.
    #[arg(long)]
    pub steps: Option<u32>,

    /// Horizontal centre offset as a percentage of half the width.
    #[arg(long, allow_negative_numbers = true)]
    pub center_x: Option<f64>,

    /// Vertical centre offset as a percentage of half the height.
    #[arg(long, allow_negative_numbers = true)]
    pub center_y: Option<f64>,

    /// Border color outside the figure (accepts #RRGGBB, rgb(), hsv(), or r,g,b).
    #[arg(long, value_name = "COLOR")]
    pub border_color: Option<String>,

    /// Output image format: png, jpeg, bmp.
    #[arg(long)]
    pub output_format: Option<String>,

    /// JPEG quality when saving as JPEG (1-100).
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub jpeg_quality: Option<u8>,

    /// Also write a viewport-sized preview next to each output.
    #[arg(long, action = ArgAction::SetTrue)]
    pub preview: bool,

    /// Edge length of the square preview viewport in pixels.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub viewport: Option<u32>,

    /// Write the run summary to a JSON file instead of stdout.
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Enable telemetry timing logs (defaults to settings file).
    #[arg(long, action = ArgAction::SetTrue)]
    pub telemetry: bool,

    /// Override telemetry logging level (error, warn, info, debug, trace).
    #[arg(long, value_name = "LEVEL")]
    pub telemetry_level: Option<String>,
}
