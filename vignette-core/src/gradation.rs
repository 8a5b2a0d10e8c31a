//! Nested step boundaries and raised-cosine blend weights for the transition band.

use std::f64::consts::PI;

use log::debug;

use crate::{
    config::VignetteConfig,
    geometry::{Axes, ShapeGeometry},
};

/// Boundaries and weights derived from one configuration and image size.
///
/// Holds `steps + 1` boundaries (step 0 is the inner edge, step `steps` the outer edge),
/// `steps` midpoint axes, and a pair of weights per step that always sum to one.
#[derive(Debug, Clone, PartialEq)]
pub struct GradationTable {
    boundaries: Vec<Axes>,
    midpoints: Vec<Axes>,
    image_weights: Vec<f64>,
    border_weights: Vec<f64>,
}

impl GradationTable {
    /// Derive the table for `config` on a `width x height` image.
    ///
    /// The config must already be validated: a zero step count or band width would divide by
    /// zero here.
    pub fn build(
        geometry: &ShapeGeometry,
        config: &VignetteConfig,
        width: u32,
        height: u32,
    ) -> Self {
        let (w, h) = (width as f64, height as f64);
        let coverage = config.coverage_percent;
        let band = config.band_width_pixels;
        let steps = config.gradation_steps as usize;

        let inner = geometry.inner_size(w, h, coverage);
        let extent = geometry.band_extent(inner, band, w, coverage);
        let step_x = extent.major / steps as f64;
        let step_y = extent.minor / steps as f64;
        let axes_at = |t: f64| Axes::new(inner.major + t * step_x, inner.minor + t * step_y);

        let boundaries: Vec<Axes> = (0..=steps).map(|i| axes_at(i as f64)).collect();
        let midpoints: Vec<Axes> = (0..steps).map(|i| axes_at(i as f64 + 0.5)).collect();
        let image_weights: Vec<f64> = midpoints
            .iter()
            .map(|mid| 0.5 * (1.0 + (PI / band * (mid.major - inner.major)).cos()))
            .collect();
        let border_weights = image_weights.iter().map(|w| 1.0 - w).collect();

        debug!(
            "Built {} gradation steps for {}: inner {:.2}x{:.2}, band {:.2}x{:.2}",
            steps, config.shape, inner.major, inner.minor, extent.major, extent.minor
        );

        Self {
            boundaries,
            midpoints,
            image_weights,
            border_weights,
        }
    }

    pub fn steps(&self) -> usize {
        self.image_weights.len()
    }

    /// Boundary at `step` (`0..=steps`).
    pub fn boundary(&self, step: usize) -> Axes {
        self.boundaries[step]
    }

    pub fn inner(&self) -> Axes {
        self.boundaries[0]
    }

    pub fn outer(&self) -> Axes {
        self.boundaries[self.boundaries.len() - 1]
    }

    pub fn boundaries(&self) -> &[Axes] {
        &self.boundaries
    }

    pub fn midpoints(&self) -> &[Axes] {
        &self.midpoints
    }

    pub fn image_weights(&self) -> &[f64] {
        &self.image_weights
    }

    pub fn border_weights(&self) -> &[f64] {
        &self.border_weights
    }

    /// `(image, border)` weight pair for step `index` (`0..steps`).
    #[inline]
    pub fn weights(&self, index: usize) -> (f64, f64) {
        (self.image_weights[index], self.border_weights[index])
    }

    /// Band thickness along each axis, i.e. outer minus inner boundary.
    pub fn band_extent(&self) -> Axes {
        let (inner, outer) = (self.inner(), self.outer());
        Axes::new(outer.major - inner.major, outer.minor - inner.minor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vignette_utils::shape::VignetteShape;

    fn table(shape: VignetteShape, band: f64, steps: u32, w: u32, h: u32) -> GradationTable {
        let config = VignetteConfig {
            shape,
            coverage_percent: 60.0,
            band_width_pixels: band,
            gradation_steps: steps,
            ..VignetteConfig::default()
        };
        GradationTable::build(ShapeGeometry::of(shape), &config, w, h)
    }

    #[test]
    fn single_step_circle_weights_half() {
        let t = table(VignetteShape::Circle, 2.0, 1, 10, 10);
        assert_eq!(t.steps(), 1);
        assert_eq!(t.boundaries(), &[Axes::new(3.0, 3.0), Axes::new(5.0, 5.0)]);
        assert_eq!(t.midpoints(), &[Axes::new(4.0, 4.0)]);
        let (image, border) = t.weights(0);
        assert!((image - 0.5).abs() < 1e-12);
        assert!((border - 0.5).abs() < 1e-12);
    }

    #[test]
    fn boundaries_grow_outward() {
        let t = table(VignetteShape::Ellipse, 30.0, 12, 400, 300);
        assert_eq!(t.boundaries().len(), 13);
        assert_eq!(t.midpoints().len(), 12);
        for pair in t.boundaries().windows(2) {
            assert!(pair[1].major > pair[0].major);
            assert!(pair[1].minor > pair[0].minor);
        }
        let extent = t.band_extent();
        assert!((extent.major - 30.0).abs() < 1e-9);
        assert!((extent.minor - 30.0).abs() < 1e-9);
    }

    #[test]
    fn equal_axis_shapes_keep_identical_sequences() {
        for shape in [VignetteShape::Circle, VignetteShape::Square] {
            let t = table(shape, 10.0, 5, 320, 200);
            for axes in t.boundaries().iter().chain(t.midpoints()) {
                assert_eq!(axes.major, axes.minor);
            }
        }
    }

    #[test]
    fn weights_fall_from_image_to_border() {
        let t = table(VignetteShape::Rectangle, 40.0, 16, 640, 480);
        let weights = t.image_weights();
        assert!(weights[0] > 0.99);
        assert!(weights[15] < 0.01);
        for pair in weights.windows(2) {
            assert!(pair[1] <= pair[0]);
        }
        for (image, border) in weights.iter().zip(t.border_weights()) {
            assert!((image + border - 1.0).abs() < 1e-12);
        }
    }
}
