use image::{imageops::FilterType, DynamicImage};

/// Side of the square analysis canvas every image is resampled to.
pub const CANVAS_SIZE: u32 = 200;

/// Only every `SAMPLE_STRIDE`-th pixel of the canvas is read.
pub const SAMPLE_STRIDE: usize = 4;

/// Resample `img` to the analysis canvas (aspect ratio is not kept) and return
/// the RGBA value of every `SAMPLE_STRIDE`-th pixel in row-major order.
pub fn sample_pixels(img: &DynamicImage) -> Vec<[u8; 4]> {
    let canvas = image::imageops::resize(img, CANVAS_SIZE, CANVAS_SIZE, FilterType::Triangle);

    canvas
        .as_raw()
        .chunks_exact(4)
        .step_by(SAMPLE_STRIDE)
        .map(|px| [px[0], px[1], px[2], px[3]])
        .collect()
}
