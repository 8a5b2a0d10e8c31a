//! Per-shape geometry: inner boundary size, band extent, and point containment.
//!
//! Each [`VignetteShape`] maps to a [`ShapeGeometry`] record holding three plain function
//! pointers. The records live in a static table, so looking up a shape is an index and the
//! compositor never branches on the shape inside its pixel loop.

use vignette_utils::shape::VignetteShape;

/// Half-lengths of a figure along its local x (major) and y (minor) axes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Axes {
    pub major: f64,
    pub minor: f64,
}

impl Axes {
    pub const fn new(major: f64, minor: f64) -> Self {
        Self { major, minor }
    }
}

/// `(width, height, coverage_percent) -> inner half axes`
pub type InnerSizeFn = fn(f64, f64, f64) -> Axes;
/// `(inner, band_width_pixels, image_width, coverage_percent) -> band thickness per axis`
pub type BandExtentFn = fn(Axes, f64, f64, f64) -> Axes;
/// `(|x|, |y|, boundary) -> inside?`
pub type ContainsFn = fn(f64, f64, Axes) -> bool;

/// The three pure functions describing one figure.
#[derive(Clone, Copy)]
pub struct ShapeGeometry {
    pub shape: VignetteShape,
    inner_size: InnerSizeFn,
    band_extent: BandExtentFn,
    contains: ContainsFn,
}

impl std::fmt::Debug for ShapeGeometry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShapeGeometry")
            .field("shape", &self.shape)
            .finish_non_exhaustive()
    }
}

impl ShapeGeometry {
    /// Lookup the geometry record for `shape`.
    pub fn of(shape: VignetteShape) -> &'static ShapeGeometry {
        match shape {
            VignetteShape::Circle => &GEOMETRY[0],
            VignetteShape::Ellipse => &GEOMETRY[1],
            VignetteShape::Diamond => &GEOMETRY[2],
            VignetteShape::Square => &GEOMETRY[3],
            VignetteShape::Rectangle => &GEOMETRY[4],
        }
    }

    pub fn inner_size(&self, width: f64, height: f64, coverage_percent: f64) -> Axes {
        (self.inner_size)(width, height, coverage_percent)
    }

    pub fn band_extent(
        &self,
        inner: Axes,
        band_width_pixels: f64,
        image_width: f64,
        coverage_percent: f64,
    ) -> Axes {
        (self.band_extent)(inner, band_width_pixels, image_width, coverage_percent)
    }

    /// Whether the folded point `(x, y)` (both non-negative) lies inside `boundary`.
    #[inline]
    pub fn contains(&self, x: f64, y: f64, boundary: Axes) -> bool {
        (self.contains)(x, y, boundary)
    }
}

static GEOMETRY: [ShapeGeometry; 5] = [
    ShapeGeometry {
        shape: VignetteShape::Circle,
        inner_size: equal_inner_size,
        band_extent: uniform_band,
        contains: inside_ellipse,
    },
    ShapeGeometry {
        shape: VignetteShape::Ellipse,
        inner_size: independent_inner_size,
        band_extent: uniform_band,
        contains: inside_ellipse,
    },
    ShapeGeometry {
        shape: VignetteShape::Diamond,
        inner_size: independent_inner_size,
        band_extent: extrapolated_band,
        contains: inside_diamond,
    },
    ShapeGeometry {
        shape: VignetteShape::Square,
        inner_size: equal_inner_size,
        band_extent: uniform_band,
        contains: inside_rectangle,
    },
    ShapeGeometry {
        shape: VignetteShape::Rectangle,
        inner_size: independent_inner_size,
        band_extent: uniform_band,
        contains: inside_rectangle,
    },
];

fn independent_inner_size(width: f64, height: f64, coverage_percent: f64) -> Axes {
    Axes::new(
        width * coverage_percent / 100.0 / 2.0,
        height * coverage_percent / 100.0 / 2.0,
    )
}

fn equal_inner_size(width: f64, height: f64, coverage_percent: f64) -> Axes {
    let raw = independent_inner_size(width, height, coverage_percent);
    let side = raw.major.min(raw.minor);
    Axes::new(side, side)
}

fn uniform_band(_inner: Axes, band_width_pixels: f64, _width: f64, _coverage: f64) -> Axes {
    Axes::new(band_width_pixels, band_width_pixels)
}

/// The outer major axis is extrapolated linearly by half the band and the minor axis follows
/// proportionally, so the band is thinner along the shorter axis.
fn extrapolated_band(inner: Axes, band_width_pixels: f64, width: f64, coverage: f64) -> Axes {
    let outer_major = width * coverage / 100.0 / 2.0 + band_width_pixels / 2.0;
    let outer_minor = inner.minor * outer_major / inner.major;
    Axes::new(outer_major - inner.major, outer_minor - inner.minor)
}

fn inside_ellipse(x: f64, y: f64, b: Axes) -> bool {
    let (u, v) = (x / b.major, y / b.minor);
    u * u + v * v < 1.0
}

fn inside_diamond(x: f64, y: f64, b: Axes) -> bool {
    x / b.major + y / b.minor < 1.0
}

fn inside_rectangle(x: f64, y: f64, b: Axes) -> bool {
    x <= b.major && y <= b.minor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_indexed_by_shape() {
        for shape in VignetteShape::ALL {
            assert_eq!(ShapeGeometry::of(shape).shape, shape);
        }
    }

    #[test]
    fn equal_axis_shapes_take_the_shorter_side() {
        for shape in VignetteShape::ALL {
            let inner = ShapeGeometry::of(shape).inner_size(200.0, 100.0, 50.0);
            if shape.has_equal_axes() {
                assert_eq!(inner, Axes::new(25.0, 25.0), "{shape}");
            } else {
                assert_eq!(inner, Axes::new(50.0, 25.0), "{shape}");
            }
        }
    }

    #[test]
    fn diamond_band_is_asymmetric() {
        let geometry = ShapeGeometry::of(VignetteShape::Diamond);
        let inner = geometry.inner_size(200.0, 100.0, 50.0);
        let band = geometry.band_extent(inner, 4.0, 200.0, 50.0);
        assert!((band.major - 2.0).abs() < 1e-12);
        assert!((band.minor - 1.0).abs() < 1e-12);

        let ellipse = ShapeGeometry::of(VignetteShape::Ellipse);
        assert_eq!(
            ellipse.band_extent(inner, 4.0, 200.0, 50.0),
            Axes::new(4.0, 4.0)
        );
    }

    #[test]
    fn containment_rules() {
        let b = Axes::new(4.0, 2.0);
        let ellipse = ShapeGeometry::of(VignetteShape::Ellipse);
        assert!(ellipse.contains(3.9, 0.0, b));
        assert!(!ellipse.contains(4.0, 0.0, b));
        assert!(!ellipse.contains(3.0, 1.5, b));

        let diamond = ShapeGeometry::of(VignetteShape::Diamond);
        assert!(diamond.contains(1.9, 1.0, b));
        assert!(!diamond.contains(2.0, 1.0, b));

        let rect = ShapeGeometry::of(VignetteShape::Rectangle);
        assert!(rect.contains(4.0, 2.0, b));
        assert!(!rect.contains(4.01, 0.0, b));
    }
}
