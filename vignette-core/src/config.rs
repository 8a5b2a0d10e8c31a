//! The immutable description of a single vignette transform.

use crate::error::{Result, VignetteError};
use vignette_utils::{color::RgbColor, config::VignetteSettings, shape::VignetteShape};

/// Upper bound on `gradation_steps`; the gradation table holds one boundary per step.
pub const MAX_GRADATION_STEPS: u32 = 4096;

/// Parameters for one vignette render.
///
/// Values are plain data; [`VignetteConfig::validate`] decides whether they describe a render
/// that can be carried out. Building a [`crate::Compositor`] validates automatically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VignetteConfig {
    pub shape: VignetteShape,
    /// Rotation of the figure in degrees. Circles ignore it.
    pub orientation_degrees: f64,
    /// Inner preserved region as a percentage of the image width/height.
    pub coverage_percent: f64,
    /// Thickness of the transition band in pixels.
    pub band_width_pixels: f64,
    /// Number of discrete sub-bands.
    pub gradation_steps: u32,
    /// Centre displacement as a percentage of half the image width.
    pub center_offset_x_percent: f64,
    /// Centre displacement as a percentage of half the image height.
    pub center_offset_y_percent: f64,
    pub border_color: RgbColor,
}

impl Default for VignetteConfig {
    fn default() -> Self {
        Self::from(&VignetteSettings::default())
    }
}

impl From<&VignetteSettings> for VignetteConfig {
    fn from(settings: &VignetteSettings) -> Self {
        Self {
            shape: settings.shape,
            orientation_degrees: settings.orientation_degrees,
            coverage_percent: settings.coverage_percent,
            band_width_pixels: settings.band_width_pixels,
            gradation_steps: settings.gradation_steps,
            center_offset_x_percent: settings.center_offset_x_percent,
            center_offset_y_percent: settings.center_offset_y_percent,
            border_color: settings.border_color,
        }
    }
}

impl VignetteConfig {
    /// Reject configurations that would divide by zero or produce NaN weights.
    pub fn validate(&self) -> Result<()> {
        let numeric = [
            ("orientation_degrees", self.orientation_degrees),
            ("coverage_percent", self.coverage_percent),
            ("band_width_pixels", self.band_width_pixels),
            ("center_offset_x_percent", self.center_offset_x_percent),
            ("center_offset_y_percent", self.center_offset_y_percent),
        ];
        if let Some((name, value)) = numeric.iter().find(|(_, v)| !v.is_finite()) {
            return Err(VignetteError::InvalidConfig(format!(
                "{name} must be finite (got {value})"
            )));
        }
        if self.band_width_pixels <= 0.0 {
            return Err(VignetteError::InvalidConfig(format!(
                "band_width_pixels must be positive (got {})",
                self.band_width_pixels
            )));
        }
        if self.gradation_steps == 0 {
            return Err(VignetteError::InvalidConfig(
                "gradation_steps must be at least 1".to_string(),
            ));
        }
        if self.gradation_steps > MAX_GRADATION_STEPS {
            return Err(VignetteError::InvalidConfig(format!(
                "gradation_steps must be at most {MAX_GRADATION_STEPS} (got {})",
                self.gradation_steps
            )));
        }
        if self.coverage_percent < 0.0 {
            return Err(VignetteError::InvalidConfig(format!(
                "coverage_percent {} yields a negative inner boundary",
                self.coverage_percent
            )));
        }
        if self.shape == VignetteShape::Diamond && self.coverage_percent == 0.0 {
            return Err(VignetteError::InvalidConfig(
                "diamond needs a non-zero coverage_percent to derive its band".to_string(),
            ));
        }
        Ok(())
    }

    /// Config for rendering the same look at a different resolution.
    ///
    /// Band width is multiplied by `factor` and the step count rounded to match, kept within
    /// `1..=MAX_GRADATION_STEPS`. Percentages are resolution independent and stay as they are.
    pub fn scaled(&self, factor: f64) -> Self {
        let steps = (self.gradation_steps as f64 * factor).round();
        let steps = if steps.is_finite() {
            steps.clamp(1.0, MAX_GRADATION_STEPS as f64) as u32
        } else {
            1
        };
        Self {
            band_width_pixels: self.band_width_pixels * factor,
            gradation_steps: steps,
            ..*self
        }
    }
}
