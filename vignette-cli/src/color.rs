//! Border color parsing for the `--border-color` flag.

use vignette_utils::{RgbColor, parse_hex_color};

/// Parse a border color.
///
/// Accepts `#RRGGBB` (and the other hex forms), `rgb(r, g, b)`, `hsv(h, s, v)` and a bare
/// `r,g,b` triple. Any alpha component is ignored because the vignette never blends alpha.
pub fn parse_color_spec(raw: &str) -> Result<RgbColor, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("border color value is empty".to_string());
    }

    if let Some(color) = parse_hex_color(trimmed) {
        return Ok(color);
    }
    if let Some(args) = function_args(trimmed, "rgb").or_else(|| function_args(trimmed, "rgba")) {
        return rgb_triple(&args);
    }
    if let Some(args) = function_args(trimmed, "hsv") {
        let [h, s, v] = args.as_slice() else {
            return Err("hsv() requires three values: hue,saturation,value".to_string());
        };
        return Ok(RgbColor::from_hsv(hue(h)?, unit(s)?, unit(v)?));
    }
    if trimmed.contains(',') {
        let parts: Vec<&str> = trimmed.split(',').map(str::trim).collect();
        return rgb_triple(&parts);
    }

    Err(format!(
        "unrecognized color '{trimmed}'; expected #RRGGBB, rgb(), hsv(), or r,g,b"
    ))
}

fn function_args<'a>(input: &'a str, name: &str) -> Option<Vec<&'a str>> {
    let open = input.find('(')?;
    let inner = input.strip_suffix(')')?.get(open + 1..)?;
    if !input[..open].trim().eq_ignore_ascii_case(name) {
        return None;
    }
    Some(inner.split(',').map(str::trim).collect())
}

fn rgb_triple(parts: &[&str]) -> Result<RgbColor, String> {
    match parts {
        [r, g, b] | [r, g, b, _] => Ok(RgbColor::new(channel(r)?, channel(g)?, channel(b)?)),
        _ => Err(format!(
            "expected three color components, got {}",
            parts.len()
        )),
    }
}

fn channel(token: &str) -> Result<u8, String> {
    let value: f32 = token
        .parse()
        .map_err(|_| format!("invalid RGB component '{token}'"))?;
    if !(0.0..=255.0).contains(&value) {
        return Err(format!("RGB component '{token}' must be between 0 and 255"));
    }
    Ok(value.round() as u8)
}

fn hue(token: &str) -> Result<f32, String> {
    let lower = token.to_ascii_lowercase();
    let raw = lower
        .strip_suffix("deg")
        .or_else(|| lower.strip_suffix('°'))
        .unwrap_or(&lower)
        .trim();
    raw.parse::<f32>()
        .map(|h| h.rem_euclid(360.0))
        .map_err(|_| format!("invalid hue '{token}'"))
}

/// Saturation/value as `0..1`, `0..100`, or `N%`.
fn unit(token: &str) -> Result<f32, String> {
    if let Some(pct) = token.strip_suffix('%') {
        let pct: f32 = pct
            .trim()
            .parse()
            .map_err(|_| format!("invalid percentage '{token}'"))?;
        return Ok((pct / 100.0).clamp(0.0, 1.0));
    }
    let value: f32 = token
        .parse()
        .map_err(|_| format!("invalid component '{token}'"))?;
    let scaled = if value > 1.0 { value / 100.0 } else { value };
    Ok(scaled.clamp(0.0, 1.0))
}
