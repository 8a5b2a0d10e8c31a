//! Mapping from pixel coordinates into the figure's local frame.

use crate::config::VignetteConfig;

/// Centre and rotation of the figure on a particular image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureFrame {
    pub center_x: f64,
    pub center_y: f64,
    cos: f64,
    sin: f64,
}

impl FigureFrame {
    pub fn new(config: &VignetteConfig, width: u32, height: u32) -> Self {
        let center_x = width as f64 / 2.0 * (1.0 + config.center_offset_x_percent / 100.0);
        let center_y = height as f64 / 2.0 * (1.0 + config.center_offset_y_percent / 100.0);
        let theta = if config.shape.uses_orientation() {
            config.orientation_degrees.to_radians()
        } else {
            0.0
        };
        Self {
            center_x,
            center_y,
            cos: theta.cos(),
            sin: theta.sin(),
        }
    }

    /// Rotate `(col, row)` by the negative orientation about the centre and fold it into the
    /// first quadrant.
    #[inline]
    pub fn local(&self, col: u32, row: u32) -> (f64, f64) {
        let dx = col as f64 - self.center_x;
        let dy = row as f64 - self.center_y;
        let x = dx * self.cos + dy * self.sin;
        let y = -dx * self.sin + dy * self.cos;
        (x.abs(), y.abs())
    }
}
