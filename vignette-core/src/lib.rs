//! Core vignette engine.
//!
//! Classifies every pixel against a set of nested figure boundaries and blends it toward a
//! border color with raised-cosine weights. The engine works on in-memory RGB buffers only;
//! decoding and encoding live in `vignette-utils`.

/// Pixel classification and blending.
pub mod compositor;
/// Transform parameters and validation.
pub mod config;
/// Error types for rejected transforms.
pub mod error;
/// Per-shape inner size, band extent, and containment rules.
pub mod geometry;
/// Step boundaries and blend weights.
pub mod gradation;
/// Pixel to figure-local coordinate mapping.
pub mod transform;

pub use compositor::{Compositor, PixelClass, apply_vignette};
pub use config::{MAX_GRADATION_STEPS, VignetteConfig};
pub use error::VignetteError;
pub use geometry::{Axes, ShapeGeometry};
pub use gradation::GradationTable;
pub use transform::FigureFrame;

/// Returns the crate version for diagnostics.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
