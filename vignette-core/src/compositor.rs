//! Per-pixel classification and blending.

use image::RgbImage;
use log::Level;
use rayon::prelude::*;
use vignette_utils::telemetry::timing_guard;

use crate::{
    config::VignetteConfig,
    error::{Result, VignetteError},
    geometry::ShapeGeometry,
    gradation::GradationTable,
    transform::FigureFrame,
};

/// Where a pixel falls relative to the nested boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelClass {
    /// Inside the inner boundary; the source pixel is kept.
    Interior,
    /// Inside boundary `step` (`1..=steps`) but outside every smaller one. Blended with the
    /// weights of index `step - 1`.
    Band { step: usize },
    /// Outside the outer boundary; replaced by the border color.
    Exterior,
}

/// A validated, ready-to-run vignette for one image size.
///
/// Immutable once built; reusable for any number of images of the same size.
#[derive(Debug, Clone)]
pub struct Compositor {
    config: VignetteConfig,
    geometry: &'static ShapeGeometry,
    table: GradationTable,
    frame: FigureFrame,
    width: u32,
    height: u32,
}

impl Compositor {
    /// Validate `config` and derive its gradation table and frame for a `width x height` image.
    pub fn new(config: &VignetteConfig, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(VignetteError::EmptyImage { width, height });
        }
        config.validate()?;

        let geometry = ShapeGeometry::of(config.shape);
        let table = GradationTable::build(geometry, config, width, height);
        if table
            .boundaries()
            .iter()
            .any(|b| !(b.major.is_finite() && b.minor.is_finite()))
        {
            return Err(VignetteError::InvalidConfig(format!(
                "{} boundaries are not finite for a {width}x{height} image",
                config.shape
            )));
        }

        Ok(Self {
            config: *config,
            geometry,
            table,
            frame: FigureFrame::new(config, width, height),
            width,
            height,
        })
    }

    pub fn config(&self) -> &VignetteConfig {
        &self.config
    }

    pub fn table(&self) -> &GradationTable {
        &self.table
    }

    pub fn frame(&self) -> &FigureFrame {
        &self.frame
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Classify the pixel at `(col, row)`.
    ///
    /// Boundaries are tested from the inside out and the first one containing the point wins.
    /// A point that is inside the outer boundary yet matches no step (only possible with
    /// degenerate geometry) is treated as exterior.
    pub fn classify(&self, col: u32, row: u32) -> PixelClass {
        let (x, y) = self.frame.local(col, row);
        let g = self.geometry;
        let steps = self.table.steps();

        if g.contains(x, y, self.table.inner()) {
            return PixelClass::Interior;
        }
        if !g.contains(x, y, self.table.outer()) {
            return PixelClass::Exterior;
        }
        (1..=steps)
            .find(|&step| g.contains(x, y, self.table.boundary(step)))
            .map_or(PixelClass::Exterior, |step| PixelClass::Band { step })
    }

    /// Output color for a pixel of class `class` whose source color is `src`.
    #[inline]
    pub fn shade(&self, class: PixelClass, src: [u8; 3]) -> [u8; 3] {
        let border = self.config.border_color.channels();
        match class {
            PixelClass::Interior => src,
            PixelClass::Exterior => border,
            PixelClass::Band { step } => {
                let (image_w, border_w) = self.table.weights(step - 1);
                let blend = |s: u8, b: u8| {
                    (s as f64 * image_w + b as f64 * border_w)
                        .round()
                        .clamp(0.0, 255.0) as u8
                };
                [
                    blend(src[0], border[0]),
                    blend(src[1], border[1]),
                    blend(src[2], border[2]),
                ]
            }
        }
    }

    /// Shade a packed, row-major RGB buffer of this compositor's size into a new buffer.
    pub fn composite_pixels(&self, pixels: &[u8]) -> Result<Vec<u8>> {
        let row_bytes = self.width as usize * 3;
        let expected = row_bytes * self.height as usize;
        if pixels.len() != expected {
            return Err(VignetteError::DimensionMismatch {
                expected,
                actual: pixels.len(),
            });
        }

        let _guard = timing_guard(
            format!(
                "composite {} {}x{} ({} steps)",
                self.config.shape,
                self.width,
                self.height,
                self.table.steps()
            ),
            Level::Debug,
        );

        let mut out = vec![0u8; expected];
        out.par_chunks_mut(row_bytes)
            .zip(pixels.par_chunks(row_bytes))
            .enumerate()
            .for_each(|(row, (dst_row, src_row))| {
                for (col, (dst, src)) in dst_row
                    .chunks_exact_mut(3)
                    .zip(src_row.chunks_exact(3))
                    .enumerate()
                {
                    let class = self.classify(col as u32, row as u32);
                    dst.copy_from_slice(&self.shade(class, [src[0], src[1], src[2]]));
                }
            });
        Ok(out)
    }

    /// Shade `image`, returning a new image of the same size.
    pub fn composite(&self, image: &RgbImage) -> Result<RgbImage> {
        let (w, h) = image.dimensions();
        if (w, h) != (self.width, self.height) {
            return Err(VignetteError::DimensionMismatch {
                expected: self.width as usize * self.height as usize * 3,
                actual: w as usize * h as usize * 3,
            });
        }
        let pixels = self.composite_pixels(image.as_raw())?;
        RgbImage::from_raw(w, h, pixels).ok_or(VignetteError::DimensionMismatch {
            expected: w as usize * h as usize * 3,
            actual: 0,
        })
    }
}

/// Apply the vignette described by `config` to `image`.
pub fn apply_vignette(image: &RgbImage, config: &VignetteConfig) -> Result<RgbImage> {
    let (width, height) = image.dimensions();
    Compositor::new(config, width, height)?.composite(image)
}
