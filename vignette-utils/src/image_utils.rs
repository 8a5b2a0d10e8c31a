//! Image I/O adapter: decoding, channel normalization, and preview sizing.
//!
//! The vignette engine only ever sees packed RGB triples. Everything here exists to get pixels
//! into that shape (and back out), and to reject sources that cannot be represented faithfully.

use std::path::Path;

use anyhow::{Context, Result};
use image::{DynamicImage, RgbImage, imageops::FilterType};
use thiserror::Error;

/// Failures raised while normalizing a source buffer into RGB triples.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImageFormatError {
    #[error("unsupported image format: {format} (only 24-bit and 32-bit 8-bit colour images are supported)")]
    Unsupported { format: String },
    #[error("pixel buffer too small (expected at least {expected} bytes, got {actual})")]
    Truncated { expected: usize, actual: usize },
    #[error("row stride {stride} is smaller than the minimum of {minimum} bytes")]
    InvalidStride { stride: usize, minimum: usize },
    #[error("image dimensions must be non-zero")]
    EmptyImage,
}

/// Byte order of a raw, packed 8-bit-per-channel pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelLayout {
    /// 24 bits per pixel, R G B.
    Rgb24,
    /// 24 bits per pixel, B G R (the usual order of decoded bitmap memory).
    Bgr24,
    /// 32 bits per pixel, R G B A. Alpha is discarded.
    Rgba32,
    /// 32 bits per pixel, B G R A. Alpha is discarded.
    Bgra32,
}

impl PixelLayout {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelLayout::Rgb24 | PixelLayout::Bgr24 => 3,
            PixelLayout::Rgba32 | PixelLayout::Bgra32 => 4,
        }
    }

    /// Pick the BGR-ordered layout for a bit depth, rejecting anything but 24 and 32.
    pub fn bgr_for_bits_per_pixel(bits: u16) -> Result<Self, ImageFormatError> {
        match bits {
            24 => Ok(PixelLayout::Bgr24),
            32 => Ok(PixelLayout::Bgra32),
            other => Err(ImageFormatError::Unsupported {
                format: format!("{other} bits per pixel"),
            }),
        }
    }

    fn rgb_at(self, px: &[u8]) -> [u8; 3] {
        match self {
            PixelLayout::Rgb24 | PixelLayout::Rgba32 => [px[0], px[1], px[2]],
            PixelLayout::Bgr24 | PixelLayout::Bgra32 => [px[2], px[1], px[0]],
        }
    }
}

/// Normalize a raw pixel buffer into an RGB image.
///
/// `stride` is the distance in bytes between the starts of consecutive rows and may include
/// padding. The final row only needs `width * bytes_per_pixel` bytes.
pub fn rgb_from_raw(
    bytes: &[u8],
    width: u32,
    height: u32,
    stride: usize,
    layout: PixelLayout,
) -> Result<RgbImage, ImageFormatError> {
    if width == 0 || height == 0 {
        return Err(ImageFormatError::EmptyImage);
    }
    let bpp = layout.bytes_per_pixel();
    let row_bytes = width as usize * bpp;
    if stride < row_bytes {
        return Err(ImageFormatError::InvalidStride {
            stride,
            minimum: row_bytes,
        });
    }
    let expected = stride * (height as usize - 1) + row_bytes;
    if bytes.len() < expected {
        return Err(ImageFormatError::Truncated {
            expected,
            actual: bytes.len(),
        });
    }

    let mut out = Vec::with_capacity(width as usize * height as usize * 3);
    for row in bytes.chunks(stride).take(height as usize) {
        for px in row[..row_bytes].chunks_exact(bpp) {
            out.extend_from_slice(&layout.rgb_at(px));
        }
    }
    RgbImage::from_raw(width, height, out).ok_or(ImageFormatError::Truncated {
        expected,
        actual: bytes.len(),
    })
}

/// Flatten an RGB image into a 24-bit buffer with the requested row stride.
///
/// Padding bytes at the end of each row are zeroed.
pub fn rgb_to_raw(image: &RgbImage, stride: usize) -> Result<Vec<u8>, ImageFormatError> {
    let row_bytes = image.width() as usize * 3;
    if stride < row_bytes {
        return Err(ImageFormatError::InvalidStride {
            stride,
            minimum: row_bytes,
        });
    }
    if stride == row_bytes {
        return Ok(image.as_raw().clone());
    }
    let mut out = vec![0u8; stride * image.height() as usize];
    for (dst, src) in out
        .chunks_exact_mut(stride)
        .zip(image.as_raw().chunks_exact(row_bytes))
    {
        dst[..row_bytes].copy_from_slice(src);
    }
    Ok(out)
}

/// Convert a decoded image into RGB triples, accepting only 24-bit and 32-bit 8-bit sources.
pub fn to_rgb_pixels(image: DynamicImage) -> Result<RgbImage, ImageFormatError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(ImageFormatError::EmptyImage);
    }
    match image {
        DynamicImage::ImageRgb8(rgb) => Ok(rgb),
        DynamicImage::ImageRgba8(rgba) => Ok(DynamicImage::ImageRgba8(rgba).into_rgb8()),
        other => Err(ImageFormatError::Unsupported {
            format: format!("{:?}", other.color()),
        }),
    }
}

/// Load an image from disk and normalize it to RGB triples.
///
/// # Arguments
///
/// * `path` - The path to the image file.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<RgbImage> {
    let path_ref = path.as_ref();
    let decoded = image::open(path_ref)
        .with_context(|| format!("failed to open image {}", path_ref.display()))?;
    let rgb = to_rgb_pixels(decoded).with_context(|| format!("cannot use {}", path_ref.display()))?;
    Ok(rgb)
}

/// Dimensions that fit `width x height` into a square viewport while keeping the aspect ratio.
///
/// The longer side becomes `viewport`; the shorter is scaled with integer arithmetic and never
/// drops below one pixel.
pub fn preview_dimensions(width: u32, height: u32, viewport: u32) -> (u32, u32) {
    let (w, h, v) = (width.max(1) as u64, height.max(1) as u64, viewport.max(1) as u64);
    if w > h {
        (v as u32, ((h * v) / w).max(1) as u32)
    } else {
        (((w * v) / h).max(1) as u32, v as u32)
    }
}

/// Uniform factor mapping full-resolution lengths onto the preview.
pub fn preview_scale_factor(original: (u32, u32), preview: (u32, u32)) -> f64 {
    let fx = preview.0 as f64 / original.0.max(1) as f64;
    let fy = preview.1 as f64 / original.1.max(1) as f64;
    fx.min(fy)
}

/// Resize an image to fit the viewport, returning the preview and its scale factor.
pub fn resize_for_preview(image: &RgbImage, viewport: u32) -> (RgbImage, f64) {
    let original = image.dimensions();
    let target = preview_dimensions(original.0, original.1, viewport);
    let resized = image::imageops::resize(image, target.0, target.1, FilterType::Triangle);
    (resized, preview_scale_factor(original, target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Rgb, RgbaImage};

    #[test]
    fn bgr_buffer_with_padding_is_normalized() {
        // Two pixels per row, 2 bytes of padding.
        let raw = [
            1, 2, 3, 4, 5, 6, 0xAA, 0xAA, //
            7, 8, 9, 10, 11, 12, 0xAA, 0xAA,
        ];
        let img = rgb_from_raw(&raw, 2, 2, 8, PixelLayout::Bgr24).unwrap();
        assert_eq!(img.get_pixel(0, 0), &Rgb([3, 2, 1]));
        assert_eq!(img.get_pixel(1, 0), &Rgb([6, 5, 4]));
        assert_eq!(img.get_pixel(1, 1), &Rgb([12, 11, 10]));
    }

    #[test]
    fn bgra_alpha_is_discarded() {
        let raw = [10, 20, 30, 0, 40, 50, 60, 255];
        let img = rgb_from_raw(&raw, 2, 1, 8, PixelLayout::Bgra32).unwrap();
        assert_eq!(img.as_raw(), &vec![30, 20, 10, 60, 50, 40]);
    }

    #[test]
    fn final_row_does_not_need_padding() {
        let raw = [1, 2, 3, 0, 4, 5, 6];
        let img = rgb_from_raw(&raw, 1, 2, 4, PixelLayout::Rgb24).unwrap();
        assert_eq!(img.as_raw(), &vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn raw_buffer_errors() {
        assert_eq!(
            rgb_from_raw(&[0; 5], 2, 1, 6, PixelLayout::Rgb24),
            Err(ImageFormatError::Truncated {
                expected: 6,
                actual: 5
            })
        );
        assert_eq!(
            rgb_from_raw(&[0; 12], 2, 2, 5, PixelLayout::Rgb24),
            Err(ImageFormatError::InvalidStride {
                stride: 5,
                minimum: 6
            })
        );
        assert_eq!(
            rgb_from_raw(&[], 0, 2, 0, PixelLayout::Rgb24),
            Err(ImageFormatError::EmptyImage)
        );
    }

    #[test]
    fn only_24_and_32_bit_depths_are_accepted() {
        assert_eq!(
            PixelLayout::bgr_for_bits_per_pixel(24),
            Ok(PixelLayout::Bgr24)
        );
        assert_eq!(
            PixelLayout::bgr_for_bits_per_pixel(32),
            Ok(PixelLayout::Bgra32)
        );
        assert!(matches!(
            PixelLayout::bgr_for_bits_per_pixel(8),
            Err(ImageFormatError::Unsupported { .. })
        ));
    }

    #[test]
    fn rgb_to_raw_pads_rows() {
        let img = RgbImage::from_pixel(1, 2, Rgb([9, 8, 7]));
        let raw = rgb_to_raw(&img, 4).unwrap();
        assert_eq!(raw, vec![9, 8, 7, 0, 9, 8, 7, 0]);
        assert_eq!(rgb_to_raw(&img, 3).unwrap(), img.as_raw().clone());
        assert!(rgb_to_raw(&img, 2).is_err());
    }

    #[test]
    fn decoded_formats_are_filtered() {
        let rgba = RgbaImage::from_pixel(2, 2, image::Rgba([1, 2, 3, 4]));
        let rgb = to_rgb_pixels(DynamicImage::ImageRgba8(rgba)).unwrap();
        assert_eq!(rgb.get_pixel(1, 1), &Rgb([1, 2, 3]));

        let gray = GrayImage::new(2, 2);
        assert!(matches!(
            to_rgb_pixels(DynamicImage::ImageLuma8(gray)),
            Err(ImageFormatError::Unsupported { .. })
        ));
    }

    #[test]
    fn preview_keeps_aspect_ratio() {
        assert_eq!(preview_dimensions(1200, 800, 600), (600, 400));
        assert_eq!(preview_dimensions(800, 1600, 600), (300, 600));
        assert_eq!(preview_dimensions(1000, 1000, 600), (600, 600));
        assert_eq!(preview_dimensions(10_000, 1, 600), (600, 1));
    }

    #[test]
    fn preview_scale_uses_the_tighter_axis() {
        let scale = preview_scale_factor((1200, 800), (600, 400));
        assert!((scale - 0.5).abs() < 1e-12);
        let scale = preview_scale_factor((1000, 1000), (600, 599));
        assert!((scale - 0.599).abs() < 1e-12);
    }

    #[test]
    fn resize_for_preview_reports_factor() {
        let img = RgbImage::from_pixel(1200, 600, Rgb([5, 5, 5]));
        let (preview, factor) = resize_for_preview(&img, 600);
        assert_eq!(preview.dimensions(), (600, 300));
        assert!((factor - 0.5).abs() < 1e-12);
    }
}
