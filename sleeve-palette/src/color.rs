//! RGB/HSL conversions and hex encoding shared by every pipeline stage.
//!
//! HSL uses the usual piecewise definition: hue in degrees `[0, 360)`,
//! saturation and lightness in percent. All arithmetic is `f64` so the batch
//! and interactive paths agree bit for bit.

use std::str::FromStr;

use palette::Srgb;

use crate::error::InvalidHex;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

pub fn rgb_to_hsl(color: Srgb<u8>) -> Hsl {
    let r = f64::from(color.red) / 255.0;
    let g = f64::from(color.green) / 255.0;
    let b = f64::from(color.blue) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return Hsl {
            h: 0.0,
            s: 0.0,
            l: l * 100.0,
        };
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl {
        h: h * 60.0,
        s: s * 100.0,
        l: l * 100.0,
    }
}

/// Six-sector hue decomposition back to 8-bit channels.
pub fn hsl_to_rgb(hsl: Hsl) -> Srgb<u8> {
    let s = hsl.s / 100.0;
    let l = hsl.l / 100.0;
    let h = hsl.h.rem_euclid(360.0);

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    Srgb::new(to_channel(r + m), to_channel(g + m), to_channel(b + m))
}

// f64::round already rounds half away from zero.
fn to_channel(unit: f64) -> u8 {
    (unit * 255.0).round().clamp(0.0, 255.0) as u8
}

pub fn to_hex(color: Srgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

pub fn parse_hex(hex: &str) -> Result<Srgb<u8>, InvalidHex> {
    if hex.len() != 7 || !hex.starts_with('#') {
        return Err(InvalidHex(hex.to_string()));
    }
    Srgb::from_str(hex).map_err(|_| InvalidHex(hex.to_string()))
}

/// Shift the HSL lightness of `hex` by `delta` percentage points, clamped to
/// `[0, 100]`, keeping hue and saturation.
pub fn adjust_lightness(hex: &str, delta: f64) -> Result<String, InvalidHex> {
    let mut hsl = rgb_to_hsl(parse_hex(hex)?);
    hsl.l = (hsl.l + delta).clamp(0.0, 100.0);
    Ok(to_hex(hsl_to_rgb(hsl)))
}
