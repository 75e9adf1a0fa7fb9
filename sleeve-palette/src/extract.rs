use log::{debug, warn};

use crate::annotate::annotate;
use crate::classify::classify;
use crate::error::{Degenerate, ExtractError};
use crate::filter::representative_colors;
use crate::model::Palette;
use crate::quantize::median_cut;
use crate::sampler::sample_pixels;
use crate::source::ImageSource;

/// How a palette came about. Both variants carry a usable palette.
#[derive(Debug)]
pub enum Extraction {
    Extracted(Palette),
    Fallback { palette: Palette, cause: ExtractError },
}

impl Extraction {
    pub fn palette(&self) -> &Palette {
        match self {
            Extraction::Extracted(palette) => palette,
            Extraction::Fallback { palette, .. } => palette,
        }
    }

    pub fn into_palette(self) -> Palette {
        match self {
            Extraction::Extracted(palette) => palette,
            Extraction::Fallback { palette, .. } => palette,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Extraction::Fallback { .. })
    }
}

/// Run every stage and report the first failure instead of substituting.
pub fn try_extract_palette<S: ImageSource + ?Sized>(source: &S) -> Result<Palette, ExtractError> {
    let img = source.decode()?;
    let samples = sample_pixels(&img);

    let colors = representative_colors(&samples);
    if colors.is_empty() {
        return Err(ExtractError::Degenerate(Degenerate::NoSamples));
    }

    let clusters = median_cut(&colors);
    debug!(
        "{}: {} of {} samples kept, {} clusters",
        source.describe(),
        colors.len(),
        samples.len(),
        clusters.len()
    );

    classify(&annotate(&clusters))
}

pub fn extract<S: ImageSource + ?Sized>(source: &S) -> Extraction {
    match try_extract_palette(source) {
        Ok(palette) => Extraction::Extracted(palette),
        Err(cause) => {
            warn!(
                "Using fallback palette for {}: {}",
                source.describe(),
                cause
            );
            Extraction::Fallback {
                palette: Palette::fallback(),
                cause,
            }
        }
    }
}

/// Palette for `source`; never fails.
pub fn extract_palette<S: ImageSource + ?Sized>(source: &S) -> Palette {
    extract(source).into_palette()
}
