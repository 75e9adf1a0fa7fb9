use thiserror::Error;

/// Why an extraction could not produce a palette from the image itself.
///
/// Both kinds are resolved the same way by [`crate::extract_palette`]: the
/// fallback palette is substituted and a warning is logged.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("image could not be decoded: {0}")]
    Decode(String),

    #[error("image could not be read: {0}")]
    Io(#[from] std::io::Error),

    #[error("no usable colors: {0}")]
    Degenerate(Degenerate),
}

impl From<image::ImageError> for ExtractError {
    fn from(err: image::ImageError) -> Self {
        ExtractError::Decode(err.to_string())
    }
}

impl ExtractError {
    /// True for failures of the decoding capability rather than of the
    /// color analysis.
    pub fn is_decode(&self) -> bool {
        matches!(self, ExtractError::Decode(_) | ExtractError::Io(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Degenerate {
    #[error("every sample was transparent, near-black or near-white")]
    NoSamples,

    #[error("quantization produced no clusters")]
    NoClusters,
}

/// Rejected hex input to [`crate::adjust_lightness`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid hex color {0:?}")]
pub struct InvalidHex(pub String);
