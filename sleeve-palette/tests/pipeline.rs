use std::io::Cursor;
use std::time::{SystemTime, UNIX_EPOCH};

use image::{DynamicImage, ImageBuffer, ImageFormat, Rgba};
use sleeve_palette::{
    extract, extract_palette, try_extract_palette, Degenerate, ExtractError, Palette,
};

fn solid(w: u32, h: u32, px: [u8; 4]) -> DynamicImage {
    DynamicImage::ImageRgba8(ImageBuffer::from_pixel(w, h, Rgba(px)))
}

fn png_bytes(img: &DynamicImage) -> Vec<u8> {
    let mut cursor = Cursor::new(Vec::<u8>::new());
    img.write_to(&mut cursor, ImageFormat::Png)
        .expect("png encoding should succeed");
    cursor.into_inner()
}

#[test]
fn test_uniform_red_cover() {
    let palette = extract_palette(&solid(200, 200, [200, 50, 50, 255]));
    assert_eq!(palette.accent, "#c83232");
    assert_eq!(palette.background, "#000000");
    assert_eq!(palette.muted, "#c83232");
    assert_eq!(palette.foreground, "#ffffff");
}

#[test]
fn test_source_resolution_does_not_matter_for_solid_color() {
    let small = extract_palette(&solid(17, 300, [200, 50, 50, 255]));
    let exact = extract_palette(&solid(200, 200, [200, 50, 50, 255]));
    assert_eq!(small, exact);
}

#[test]
fn test_two_tone_cover() {
    let img = DynamicImage::ImageRgba8(ImageBuffer::from_fn(200, 200, |x, _| {
        if x < 100 {
            Rgba([200, 50, 50, 255])
        } else {
            Rgba([30, 90, 220, 255])
        }
    }));
    // Blue is the most vibrant; red sits a hair darker in f64 lightness, so
    // it becomes the background (darkened, l > 30) and also the muted tone.
    let palette = extract_palette(&img);
    assert_eq!(
        palette,
        Palette {
            background: "#250909".to_string(),
            foreground: "#ffffff".to_string(),
            accent: "#1e5adc".to_string(),
            muted: "#c83232".to_string(),
        }
    );
}

#[test]
fn test_transparent_cover_falls_back() {
    let extraction = extract(&solid(120, 80, [200, 50, 50, 150]));
    assert!(extraction.is_fallback());
    assert_eq!(*extraction.palette(), Palette::fallback());
}

#[test]
fn test_white_cover_is_degenerate() {
    let result = try_extract_palette(&solid(64, 64, [255, 255, 255, 255]));
    assert!(matches!(
        result,
        Err(ExtractError::Degenerate(Degenerate::NoSamples))
    ));
    assert_eq!(
        extract_palette(&solid(64, 64, [255, 255, 255, 255])),
        Palette::fallback()
    );
}

#[test]
fn test_undecodable_bytes_fall_back() {
    let bytes = b"definitely-not-an-image".to_vec();
    let err = try_extract_palette(&bytes).unwrap_err();
    assert!(err.is_decode());
    assert_eq!(extract_palette(&bytes), Palette::fallback());
}

#[test]
fn test_missing_file_falls_back() {
    let path = std::env::temp_dir().join("sleeve_palette_missing_cover.png");
    assert!(try_extract_palette(&path).unwrap_err().is_decode());
    assert_eq!(extract_palette(&path), Palette::fallback());
}

#[test]
fn test_decoders_agree() {
    let img = DynamicImage::ImageRgba8(ImageBuffer::from_fn(240, 160, |x, y| {
        Rgba([(x % 256) as u8, (y * 2 % 256) as u8, ((x + y) % 256) as u8, 255])
    }));
    let bytes = png_bytes(&img);

    let nonce = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time should be valid")
        .as_nanos();
    let path = std::env::temp_dir().join(format!("sleeve_palette_{nonce}.png"));
    std::fs::write(&path, &bytes).expect("should write png fixture");

    let from_image = extract_palette(&img);
    let from_bytes = extract_palette(&bytes);
    let from_file = extract_palette(&path);
    let _ = std::fs::remove_file(&path);

    assert_eq!(from_image, from_bytes);
    assert_eq!(from_bytes, from_file);
    assert!(!from_image.is_fallback());
}

#[test]
fn test_every_field_is_a_hex_color() {
    let img = DynamicImage::ImageRgba8(ImageBuffer::from_fn(90, 90, |x, y| {
        Rgba([(x * 3) as u8, (y * 2) as u8, 128, 255])
    }));
    let palette = extract_palette(&img);
    for value in [
        &palette.background,
        &palette.foreground,
        &palette.accent,
        &palette.muted,
    ] {
        assert_eq!(value.len(), 7);
        assert!(value.starts_with('#'));
        assert!(value[1..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
    assert_eq!(palette.foreground, "#ffffff");
}
