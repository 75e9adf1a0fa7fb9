use palette::Srgb;

use crate::color::rgb_to_hsl;

pub const MIN_ALPHA: u8 = 200;
pub const MIN_LIGHTNESS: f64 = 5.0;
pub const MAX_LIGHTNESS: f64 = 95.0;

/// Keep the opaque samples whose lightness is in `[5, 95]`.
pub fn representative_colors(samples: &[[u8; 4]]) -> Vec<Srgb<u8>> {
    samples
        .iter()
        .filter(|px| px[3] >= MIN_ALPHA)
        .map(|px| Srgb::new(px[0], px[1], px[2]))
        .filter(|color| {
            let l = rgb_to_hsl(*color).l;
            (MIN_LIGHTNESS..=MAX_LIGHTNESS).contains(&l)
        })
        .collect()
}
