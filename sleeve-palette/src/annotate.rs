use palette::Srgb;

use crate::color::{rgb_to_hsl, to_hex};

/// A quantized cluster together with the metrics the classifier ranks on.
///
/// Fields are private so the metrics always agree with `hex`.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedColor {
    hex: String,
    h: f64,
    s: f64,
    l: f64,
    vibrance: f64,
}

impl AnnotatedColor {
    pub fn new(rgb: Srgb<u8>) -> Self {
        let hsl = rgb_to_hsl(rgb);
        Self {
            hex: to_hex(rgb),
            h: hsl.h,
            s: hsl.s,
            l: hsl.l,
            vibrance: vibrance(hsl.s, hsl.l),
        }
    }

    pub fn hex(&self) -> &str {
        &self.hex
    }

    pub fn hue(&self) -> f64 {
        self.h
    }

    pub fn saturation(&self) -> f64 {
        self.s
    }

    pub fn lightness(&self) -> f64 {
        self.l
    }

    pub fn vibrance(&self) -> f64 {
        self.vibrance
    }
}

/// Highest for saturated colors at mid lightness, zero for greys and for
/// pure black or white.
pub fn vibrance(s: f64, l: f64) -> f64 {
    let distance = if l > 50.0 { 100.0 - l } else { l };
    s * distance / 50.0
}

pub fn annotate(clusters: &[Srgb<u8>]) -> Vec<AnnotatedColor> {
    clusters.iter().copied().map(AnnotatedColor::new).collect()
}
