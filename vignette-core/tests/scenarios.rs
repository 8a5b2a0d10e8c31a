use image::{Rgb, RgbImage};
use vignette_core::{Compositor, VignetteConfig, apply_vignette};
use vignette_utils::{color::RgbColor, shape::VignetteShape};

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

fn white(width: u32, height: u32) -> RgbImage {
    RgbImage::from_pixel(width, height, WHITE)
}

fn base_config(shape: VignetteShape) -> VignetteConfig {
    VignetteConfig {
        shape,
        orientation_degrees: 0.0,
        center_offset_x_percent: 0.0,
        center_offset_y_percent: 0.0,
        border_color: RgbColor::BLACK,
        ..VignetteConfig::default()
    }
}

#[test]
fn small_circle_has_white_centre_black_corner_and_one_gray_ring() {
    let config = VignetteConfig {
        coverage_percent: 60.0,
        band_width_pixels: 2.0,
        gradation_steps: 1,
        ..base_config(VignetteShape::Circle)
    };
    let out = apply_vignette(&white(10, 10), &config).expect("valid config");

    assert_eq!(out.get_pixel(5, 5), &WHITE);
    assert_eq!(out.get_pixel(0, 0), &BLACK);

    let mut ring = 0;
    for (col, row, px) in out.enumerate_pixels() {
        if *px == WHITE || *px == BLACK {
            continue;
        }
        ring += 1;
        // A single step blends at exactly half strength.
        assert_eq!(px, &Rgb([128, 128, 128]), "pixel ({col}, {row})");
        let (dx, dy) = (col as f64 - 5.0, row as f64 - 5.0);
        let r = (dx * dx + dy * dy).sqrt();
        assert!((3.0..5.0).contains(&r), "gray pixel at radius {r}");
    }
    assert!(ring > 0, "expected a blended ring");
    assert_eq!(out.get_pixel(1, 5), &Rgb([128, 128, 128]));
}

#[test]
fn full_coverage_rectangle_leaves_every_pixel_untouched() {
    let config = VignetteConfig {
        coverage_percent: 100.0,
        band_width_pixels: 1.0,
        gradation_steps: 1,
        ..base_config(VignetteShape::Rectangle)
    };
    let out = apply_vignette(&white(10, 10), &config).expect("valid config");
    assert!(out.pixels().all(|px| *px == WHITE));
}

#[test]
fn diamond_band_differs_per_axis_while_others_are_uniform() {
    let with_shape = |shape| VignetteConfig {
        coverage_percent: 50.0,
        band_width_pixels: 4.0,
        gradation_steps: 3,
        ..base_config(shape)
    };

    let diamond = Compositor::new(&with_shape(VignetteShape::Diamond), 200, 100).unwrap();
    let extent = diamond.table().band_extent();
    assert!((extent.major - 2.0).abs() < 1e-9);
    assert!((extent.minor - 1.0).abs() < 1e-9);
    assert!((extent.major - extent.minor).abs() > 0.5);

    for shape in [
        VignetteShape::Circle,
        VignetteShape::Ellipse,
        VignetteShape::Square,
        VignetteShape::Rectangle,
    ] {
        let compositor = Compositor::new(&with_shape(shape), 200, 100).unwrap();
        let extent = compositor.table().band_extent();
        assert!(
            (extent.major - extent.minor).abs() < 1e-9,
            "{shape} band should be uniform, got {extent:?}"
        );
        assert!((extent.major - 4.0).abs() < 1e-9);
    }
}

#[test]
fn repeated_runs_are_bit_identical() {
    let mut source = RgbImage::new(64, 48);
    for (col, row, px) in source.enumerate_pixels_mut() {
        *px = Rgb([(col * 4) as u8, (row * 5) as u8, ((col + row) * 3) as u8]);
    }
    let snapshot = source.clone();
    let config = VignetteConfig {
        shape: VignetteShape::Diamond,
        orientation_degrees: 17.0,
        coverage_percent: 45.0,
        band_width_pixels: 12.0,
        gradation_steps: 6,
        center_offset_x_percent: 10.0,
        center_offset_y_percent: -5.0,
        border_color: RgbColor::new(20, 20, 240),
    };

    let first = apply_vignette(&source, &config).unwrap();
    let second = apply_vignette(&source, &config).unwrap();
    assert_eq!(first, second);
    assert_eq!(source, snapshot, "source must not be modified");

    let compositor = Compositor::new(&config, 64, 48).unwrap();
    assert_eq!(compositor.composite(&source).unwrap(), first);
    assert_eq!(compositor.composite(&source).unwrap(), first);
}
