use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use sleeve_palette::{Palette, FOREGROUND};

/// Catalog id to palette. Ordered so the written artifact is stable.
pub type PaletteMap = BTreeMap<String, Palette>;

/// Parse a map and check every value is a lowercase `#rrggbb` color with the
/// fixed foreground.
pub fn parse_palette_map(bytes: &[u8]) -> Result<PaletteMap> {
    let map: PaletteMap = serde_json::from_slice(bytes).context("Palette map is not valid JSON")?;
    for (id, palette) in &map {
        check_palette(palette).with_context(|| format!("Invalid palette for {id:?}"))?;
    }
    Ok(map)
}

fn check_palette(palette: &Palette) -> Result<()> {
    for (name, value) in [
        ("background", &palette.background),
        ("foreground", &palette.foreground),
        ("accent", &palette.accent),
        ("muted", &palette.muted),
    ] {
        let well_formed = value.len() == 7
            && value.starts_with('#')
            && value[1..]
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c));
        if !well_formed {
            bail!("{name} {value:?} is not a #rrggbb color");
        }
    }
    if palette.foreground != FOREGROUND {
        bail!("foreground must be {FOREGROUND}, got {}", palette.foreground);
    }
    Ok(())
}

pub fn load_palette_map(path: &Path) -> Result<PaletteMap> {
    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read palette map {}", path.display()))?;
    parse_palette_map(&bytes)
}

pub fn save_palette_map(map: &PaletteMap, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(map)?;
    write_atomic(path, json.as_bytes())
}

/// Write through a sibling temp file so readers never see a partial file.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = Path::new(&temp_name);

    fs::write(temp_path, contents)
        .with_context(|| format!("Failed to write {}", temp_path.display()))?;
    fs::rename(temp_path, path)
        .with_context(|| format!("Failed to move {} into place", path.display()))?;
    Ok(())
}
