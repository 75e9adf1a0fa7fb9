//! Cover-art palette extraction.
//!
//! An image is resampled to a fixed canvas, sparsely sampled, filtered,
//! median-cut into at most sixteen clusters and classified into four theme
//! roles. Every stage is a pure function so the same image always yields the
//! same palette, whichever caller decodes it.

pub mod annotate;
pub mod classify;
pub mod color;
pub mod error;
pub mod extract;
pub mod filter;
pub mod model;
pub mod quantize;
pub mod sampler;
pub mod source;

pub use annotate::AnnotatedColor;
pub use color::adjust_lightness;
pub use error::{Degenerate, ExtractError, InvalidHex};
pub use extract::{extract, extract_palette, try_extract_palette, Extraction};
pub use model::{Palette, FOREGROUND};
pub use source::ImageSource;
