//! Basic color utilities shared across the core engine and the CLI.

use serde::{Deserialize, Serialize};

/// Simple RGB color stored in 8-bit channels.
///
/// Alpha is never carried: vignette compositing ignores transparency entirely.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(default)]
pub struct RgbColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl RgbColor {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Channels in R, G, B order.
    pub const fn channels(self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }

    /// Builds a color from HSV values (hue in degrees, saturation/value 0.0..1.0).
    pub fn from_hsv(h: f32, s: f32, v: f32) -> Self {
        let (r, g, b) = hsv_to_rgb(h, s, v);
        Self::new(r, g, b)
    }

    /// Lowercase `#rrggbb` representation.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

impl Default for RgbColor {
    /// The predominantly blue border the effect starts out with.
    fn default() -> Self {
        Self::new(20, 20, 240)
    }
}

impl From<[u8; 3]> for RgbColor {
    fn from([red, green, blue]: [u8; 3]) -> Self {
        Self { red, green, blue }
    }
}

impl From<RgbColor> for image::Rgb<u8> {
    fn from(color: RgbColor) -> Self {
        image::Rgb(color.channels())
    }
}

/// Convert HSV (hue in degrees, saturation/value 0-1) to RGB channels (0-255).
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (u8, u8, u8) {
    if s <= 0.0 {
        let val = (v * 255.0).round().clamp(0.0, 255.0) as u8;
        return (val, val, val);
    }

    let hue = if h.is_nan() { 0.0 } else { h.rem_euclid(360.0) };
    let c = v * s;
    let x = c * (1.0 - ((hue / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r1, g1, b1) = match hue {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let to_byte = |value: f32| -> u8 { ((value + m) * 255.0).round().clamp(0.0, 255.0) as u8 };

    (to_byte(r1), to_byte(g1), to_byte(b1))
}

/// Parse a hexadecimal color string.
///
/// Accepts `#RGB`, `#RRGGBB`, and `#RRGGBBAA` (the alpha byte is validated, then dropped),
/// with or without a leading `#` or `0x`.
pub fn parse_hex_color(input: &str) -> Option<RgbColor> {
    let trimmed = input.trim();
    let hex = trimmed
        .strip_prefix('#')
        .or_else(|| trimmed.strip_prefix("0x"))
        .unwrap_or(trimmed)
        .replace('_', "");

    match hex.len() {
        3 => Some(RgbColor::new(
            replicate_nibble(hex.get(0..1)?)?,
            replicate_nibble(hex.get(1..2)?)?,
            replicate_nibble(hex.get(2..3)?)?,
        )),
        6 | 8 => {
            if hex.len() == 8 {
                parse_byte(hex.get(6..8)?)?;
            }
            Some(RgbColor::new(
                parse_byte(hex.get(0..2)?)?,
                parse_byte(hex.get(2..4)?)?,
                parse_byte(hex.get(4..6)?)?,
            ))
        }
        _ => None,
    }
}

fn parse_byte(slice: &str) -> Option<u8> {
    u8::from_str_radix(slice, 16).ok()
}

fn replicate_nibble(slice: &str) -> Option<u8> {
    let nib = u8::from_str_radix(slice, 16).ok()?;
    Some((nib << 4) | nib)
}
