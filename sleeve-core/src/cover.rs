//! Where a catalog entry's artwork comes from, and how it is decoded.

use std::io::Read;
use std::path::{Path, PathBuf};

use image::DynamicImage;
use lofty::file::TaggedFileExt;
use sleeve_palette::{ExtractError, ImageSource};

/// Remote covers larger than this are refused.
const MAX_REMOTE_COVER_BYTES: u64 = 32 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverSource {
    /// An image file on disk.
    File(PathBuf),
    /// The first picture embedded in an audio file's tags.
    Embedded(PathBuf),
    /// An http(s) URL.
    Url(String),
}

impl CoverSource {
    /// `http://` and `https://` references become [`CoverSource::Url`];
    /// anything else is a file path, resolved against `base_dir` when relative.
    pub fn from_reference(reference: &str, base_dir: &Path) -> Self {
        if reference.starts_with("http://") || reference.starts_with("https://") {
            return CoverSource::Url(reference.to_string());
        }
        let path = Path::new(reference);
        if path.is_absolute() {
            CoverSource::File(path.to_path_buf())
        } else {
            CoverSource::File(base_dir.join(path))
        }
    }
}

impl ImageSource for CoverSource {
    fn decode(&self) -> Result<DynamicImage, ExtractError> {
        match self {
            CoverSource::File(path) => path.decode(),
            CoverSource::Embedded(path) => {
                let bytes = read_embedded_cover_art(path).ok_or_else(|| {
                    ExtractError::Decode(format!("no embedded picture in {}", path.display()))
                })?;
                bytes.decode()
            }
            CoverSource::Url(url) => fetch_remote_cover(url)?.decode(),
        }
    }

    fn describe(&self) -> String {
        match self {
            CoverSource::File(path) => path.display().to_string(),
            CoverSource::Embedded(path) => format!("{} (embedded)", path.display()),
            CoverSource::Url(url) => url.clone(),
        }
    }
}

/// Picture data of the primary tag, else of the first tag that has one.
pub fn read_embedded_cover_art(path: &Path) -> Option<Vec<u8>> {
    let tagged_file = match lofty::read_from_path(path) {
        Ok(file) => file,
        Err(err) => {
            log::debug!("Could not read tags from {}: {}", path.display(), err);
            return None;
        }
    };

    if let Some(tag) = tagged_file.primary_tag() {
        if let Some(picture) = tag.pictures().first() {
            return Some(picture.data().to_vec());
        }
    }

    for tag in tagged_file.tags() {
        if let Some(picture) = tag.pictures().first() {
            return Some(picture.data().to_vec());
        }
    }

    None
}

fn fetch_remote_cover(url: &str) -> Result<Vec<u8>, ExtractError> {
    let response = ureq::get(url)
        .call()
        .map_err(|err| ExtractError::Decode(format!("failed to fetch {url}: {err}")))?;
    read_capped(response.into_reader(), MAX_REMOTE_COVER_BYTES, url)
}

/// Read at most `limit` bytes; anything longer is refused rather than cut.
fn read_capped(reader: impl Read, limit: u64, origin: &str) -> Result<Vec<u8>, ExtractError> {
    let mut bytes = Vec::new();
    reader.take(limit + 1).read_to_end(&mut bytes)?;
    if bytes.len() as u64 > limit {
        return Err(ExtractError::Decode(format!(
            "cover at {origin} is larger than {} MiB",
            limit / (1024 * 1024)
        )));
    }
    Ok(bytes)
}
