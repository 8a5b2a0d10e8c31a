//! The closed set of vignette figures shared across the workspace.
//!
//! Only the shape *identity* lives here so that settings files and the CLI can name it; the
//! per-shape geometry is supplied by `vignette_core::geometry`.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Figure traced by the boundary between the preserved centre and the border.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum VignetteShape {
    Circle,
    #[default]
    Ellipse,
    Diamond,
    Square,
    Rectangle,
}

impl VignetteShape {
    /// Every shape, in the order they are presented to users.
    pub const ALL: [VignetteShape; 5] = [
        VignetteShape::Circle,
        VignetteShape::Ellipse,
        VignetteShape::Diamond,
        VignetteShape::Square,
        VignetteShape::Rectangle,
    ];

    pub fn as_label(self) -> &'static str {
        match self {
            VignetteShape::Circle => "Circle",
            VignetteShape::Ellipse => "Ellipse",
            VignetteShape::Diamond => "Diamond",
            VignetteShape::Square => "Square",
            VignetteShape::Rectangle => "Rectangle",
        }
    }

    /// Orientation has no visible effect on a circle.
    pub fn uses_orientation(self) -> bool {
        !matches!(self, VignetteShape::Circle)
    }

    /// Shapes whose major and minor axes are forced to the same length.
    pub fn has_equal_axes(self) -> bool {
        matches!(self, VignetteShape::Circle | VignetteShape::Square)
    }
}

impl fmt::Display for VignetteShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_label().to_ascii_lowercase())
    }
}

impl FromStr for VignetteShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "circle" => Ok(VignetteShape::Circle),
            "ellipse" => Ok(VignetteShape::Ellipse),
            "diamond" | "rhombus" => Ok(VignetteShape::Diamond),
            "square" => Ok(VignetteShape::Square),
            "rectangle" | "rect" => Ok(VignetteShape::Rectangle),
            other => Err(format!(
                "unknown vignette shape '{other}'; expected circle, ellipse, diamond, square, or rectangle"
            )),
        }
    }
}
