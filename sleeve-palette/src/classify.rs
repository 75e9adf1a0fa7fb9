use crate::annotate::AnnotatedColor;
use crate::color::adjust_lightness;
use crate::error::{Degenerate, ExtractError};
use crate::model::{Palette, FOREGROUND};

/// Assign semantic roles to annotated clusters.
///
/// Clusters are told apart by their position in `colors`, not by value: two
/// clusters with the same hex are still different candidates, so the same
/// color can end up in two roles.
pub fn classify(colors: &[AnnotatedColor]) -> Result<Palette, ExtractError> {
    if colors.is_empty() {
        return Err(ExtractError::Degenerate(Degenerate::NoClusters));
    }

    let mut vibrant: Vec<usize> = (0..colors.len())
        .filter(|&i| {
            let c = &colors[i];
            c.saturation() > 25.0 && c.lightness() > 15.0 && c.lightness() < 85.0
        })
        .collect();
    vibrant.sort_by(|&a, &b| colors[b].vibrance().total_cmp(&colors[a].vibrance()));

    let mut dark: Vec<usize> = (0..colors.len())
        .filter(|&i| colors[i].lightness() < 50.0)
        .collect();
    dark.sort_by(|&a, &b| colors[a].lightness().total_cmp(&colors[b].lightness()));

    let accent_idx = vibrant.first().copied().unwrap_or(0);
    let accent = &colors[accent_idx];

    let background = match dark.first() {
        Some(&idx) if idx != accent_idx => {
            let base = &colors[idx];
            if base.lightness() > 30.0 {
                darken(base.hex(), 40.0)
            } else {
                base.hex().to_string()
            }
        }
        _ => darken(accent.hex(), 60.0),
    };

    let muted_idx = colors
        .iter()
        .enumerate()
        .find(|(i, c)| {
            *i != accent_idx
                && c.saturation() > 15.0
                && c.saturation() < 70.0
                && c.lightness() > 30.0
                && c.lightness() < 70.0
        })
        .map(|(i, _)| i)
        .unwrap_or(if colors.len() > 1 { 1 } else { accent_idx });
    let muted_base = &colors[muted_idx];
    let muted = if muted_base.lightness() > 60.0 {
        darken(muted_base.hex(), 20.0)
    } else {
        muted_base.hex().to_string()
    };

    Ok(Palette {
        background,
        foreground: FOREGROUND.to_string(),
        accent: accent.hex().to_string(),
        muted,
    })
}

// Hex strings held by an AnnotatedColor are always well formed.
fn darken(hex: &str, amount: f64) -> String {
    adjust_lightness(hex, -amount).unwrap_or_else(|_| hex.to_string())
}
