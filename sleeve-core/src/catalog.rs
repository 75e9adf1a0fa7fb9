use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use thiserror::Error;

use crate::cover::{read_embedded_cover_art, CoverSource};
use crate::slug::sanitize_slug;

const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];
const AUDIO_EXTENSIONS: [&str; 6] = ["mp3", "flac", "m4a", "ogg", "opus", "wav"];

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("duplicate catalog id {0:?}")]
    DuplicateId(String),

    #[error("catalog id {id:?} shares the selector {slug:?} with {existing:?}")]
    SelectorClash {
        id: String,
        existing: String,
        slug: String,
    },

    #[error("failed to read manifest {path}: {source}")]
    ManifestIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid manifest {path}: {source}")]
    ManifestFormat {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: String,
    pub cover: CoverSource,
}

/// Albums to theme. Ids are unique, and so are their sanitized forms, since
/// those name the stylesheet selectors.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    ids: HashSet<String>,
    slugs: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct ManifestEntry {
    id: String,
    image: String,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: impl Into<String>, cover: CoverSource) -> Result<(), CatalogError> {
        let id = id.into();
        if self.ids.contains(&id) {
            return Err(CatalogError::DuplicateId(id));
        }
        let slug = sanitize_slug(&id);
        if let Some(existing) = self.slugs.get(&slug) {
            return Err(CatalogError::SelectorClash {
                id,
                existing: existing.clone(),
                slug,
            });
        }
        self.ids.insert(id.clone());
        self.slugs.insert(slug, id.clone());
        self.entries.push(CatalogEntry { id, cover });
        Ok(())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// True when `id` or another id with the same sanitized form is present.
    pub fn claims(&self, id: &str) -> bool {
        self.ids.contains(id) || self.slugs.contains_key(&sanitize_slug(id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Load a JSON array of `{"id": ..., "image": ...}` objects. Relative
    /// image paths are resolved against the manifest's directory.
    pub fn from_manifest(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path).map_err(|source| CatalogError::ManifestIo {
            path: path.to_path_buf(),
            source,
        })?;
        let items: Vec<ManifestEntry> =
            serde_json::from_str(&raw).map_err(|source| CatalogError::ManifestFormat {
                path: path.to_path_buf(),
                source,
            })?;

        let base_dir = path.parent().unwrap_or(Path::new("."));
        let mut catalog = Catalog::new();
        for item in items {
            catalog.push(item.id, CoverSource::from_reference(&item.image, base_dir))?;
        }
        Ok(catalog)
    }

    /// Walk `root` and turn every album directory into an entry.
    ///
    /// A directory counts as an album when it holds a cover image, or failing
    /// that an audio file with embedded artwork. Ids are the sanitized
    /// directory names; clashes get a numeric suffix.
    pub fn scan_library(root: &Path) -> Result<Self> {
        let mut found = Vec::new();
        scan_directory(root, &mut found)
            .with_context(|| format!("Failed to scan library {}", root.display()))?;

        let mut catalog = Catalog::new();
        for (dir, cover) in found {
            let name = dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let base = sanitize_slug(&name);
            let mut id = base.clone();
            let mut n = 2;
            while catalog.claims(&id) {
                id = format!("{base}-{n}");
                n += 1;
            }
            if id != base {
                log::warn!(
                    "Album id {:?} already taken, using {:?} for {}",
                    base,
                    id,
                    dir.display()
                );
            }
            catalog.push(id, cover)?;
        }

        catalog.entries.sort_by(|a, b| a.id.cmp(&b.id));
        log::info!("Found {} albums under {}", catalog.len(), root.display());
        Ok(catalog)
    }
}

impl IntoIterator for Catalog {
    type Item = CatalogEntry;
    type IntoIter = std::vec::IntoIter<CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

// Symlinked directories are not followed.
fn scan_directory(dir: &Path, found: &mut Vec<(PathBuf, CoverSource)>) -> Result<()> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)?.filter_map(|entry| entry.ok()) {
        let path = entry.path();
        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(_) => continue,
        };
        if file_type.is_dir() {
            dirs.push(path);
        } else if file_type.is_symlink() && path.is_dir() {
            log::debug!("Not following directory link {}", path.display());
        } else {
            files.push(path);
        }
    }
    dirs.sort();
    files.sort();

    if let Some(cover) = pick_cover_image(&files) {
        found.push((dir.to_path_buf(), CoverSource::File(cover)));
    } else if let Some(track) = files
        .iter()
        .filter(|p| has_extension(p, &AUDIO_EXTENSIONS))
        .find(|p| read_embedded_cover_art(p).is_some())
    {
        found.push((dir.to_path_buf(), CoverSource::Embedded(track.clone())));
    }

    for sub in dirs {
        scan_directory(&sub, found)?;
    }
    Ok(())
}

fn pick_cover_image(files: &[PathBuf]) -> Option<PathBuf> {
    let images: Vec<&PathBuf> = files
        .iter()
        .filter(|p| has_extension(p, &IMAGE_EXTENSIONS))
        .collect();

    images
        .iter()
        .find(|p| is_common_cover_name(p))
        .or_else(|| images.first())
        .map(|p| (*p).clone())
}

fn is_common_cover_name(path: &Path) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    name.starts_with("cover")
        || name.starts_with("folder")
        || name.starts_with("front")
        || name.contains("album")
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_dir(name: &str) -> PathBuf {
        let nonce = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be valid")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("sleeve_{name}_{nonce}"));
        fs::create_dir_all(&dir).expect("should create temp dir");
        dir
    }

    #[test]
    fn test_push_rejects_duplicate_ids() {
        let mut catalog = Catalog::new();
        catalog
            .push("kid-a", CoverSource::Url("https://x/a.jpg".into()))
            .unwrap();
        let err = catalog
            .push("kid-a", CoverSource::Url("https://x/b.jpg".into()))
            .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(id) if id == "kid-a"));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_push_rejects_ids_sharing_a_selector() {
        let mut catalog = Catalog::new();
        catalog
            .push("Kid A", CoverSource::Url("https://x/a.jpg".into()))
            .unwrap();
        let err = catalog
            .push("kid-a", CoverSource::Url("https://x/b.jpg".into()))
            .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::SelectorClash { ref id, ref existing, ref slug }
                if id == "kid-a" && existing == "Kid A" && slug == "kid-a"
        ));
        assert_eq!(catalog.len(), 1);
        assert!(catalog.claims("KID A"));
        assert!(!catalog.contains("KID A"));
    }

    #[test]
    fn test_pick_cover_prefers_common_names() {
        let files = vec![
            PathBuf::from("/a/01 - intro.flac"),
            PathBuf::from("/a/back.jpg"),
            PathBuf::from("/a/Folder.JPG"),
        ];
        assert_eq!(pick_cover_image(&files), Some(PathBuf::from("/a/Folder.JPG")));

        let files = vec![PathBuf::from("/a/scan2.png"), PathBuf::from("/a/notes.txt")];
        assert_eq!(pick_cover_image(&files), Some(PathBuf::from("/a/scan2.png")));

        assert_eq!(pick_cover_image(&[PathBuf::from("/a/track.mp3")]), None);
    }

    #[test]
    fn test_manifest_resolves_relative_paths() {
        let dir = unique_temp_dir("manifest");
        let manifest = dir.join("catalog.json");
        fs::write(
            &manifest,
            r#"[
                {"id": "in-rainbows", "image": "covers/in-rainbows.jpg"},
                {"id": "blue-lines", "image": "https://cdn.example.com/blue-lines.jpg"}
            ]"#,
        )
        .unwrap();

        let catalog = Catalog::from_manifest(&manifest).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.entries()[0].cover,
            CoverSource::File(dir.join("covers/in-rainbows.jpg"))
        );
        assert_eq!(
            catalog.entries()[1].cover,
            CoverSource::Url("https://cdn.example.com/blue-lines.jpg".into())
        );
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_manifest_rejects_duplicates_and_bad_json() {
        let dir = unique_temp_dir("manifest_bad");
        let dup = dir.join("dup.json");
        fs::write(&dup, r#"[{"id": "a", "image": "a.jpg"}, {"id": "a", "image": "b.jpg"}]"#)
            .unwrap();
        assert!(matches!(
            Catalog::from_manifest(&dup),
            Err(CatalogError::DuplicateId(_))
        ));

        let bad = dir.join("bad.json");
        fs::write(&bad, "{not json").unwrap();
        assert!(matches!(
            Catalog::from_manifest(&bad),
            Err(CatalogError::ManifestFormat { .. })
        ));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_scan_library_finds_album_directories() {
        let root = unique_temp_dir("library");
        let album_a = root.join("Radiohead").join("OK Computer");
        let album_b = root.join("Massive Attack").join("Blue Lines");
        let empty = root.join("Massive Attack").join("Notes");
        for dir in [&album_a, &album_b, &empty] {
            fs::create_dir_all(dir).unwrap();
        }
        fs::write(album_a.join("cover.jpg"), b"jpg").unwrap();
        fs::write(album_b.join("scan.png"), b"png").unwrap();
        fs::write(empty.join("readme.txt"), b"txt").unwrap();

        let catalog = Catalog::scan_library(&root).unwrap();
        let ids: Vec<&str> = catalog.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["blue-lines", "ok-computer"]);
        assert_eq!(
            catalog.entries()[1].cover,
            CoverSource::File(album_a.join("cover.jpg"))
        );
        let _ = fs::remove_dir_all(&root);
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_library_does_not_follow_directory_links() {
        let root = unique_temp_dir("library_loop");
        let album = root.join("Album");
        fs::create_dir_all(&album).unwrap();
        fs::write(album.join("cover.jpg"), b"jpg").unwrap();
        std::os::unix::fs::symlink(&album, album.join("loop")).unwrap();

        let catalog = Catalog::scan_library(&root).unwrap();
        let ids: Vec<&str> = catalog.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["album"]);
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_scan_library_suffixes_clashing_ids() {
        let root = unique_temp_dir("library_clash");
        let first = root.join("A").join("Greatest Hits");
        let second = root.join("B").join("Greatest Hits");
        for dir in [&first, &second] {
            fs::create_dir_all(dir).unwrap();
            fs::write(dir.join("front.png"), b"png").unwrap();
        }

        let catalog = Catalog::scan_library(&root).unwrap();
        let ids: Vec<&str> = catalog.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["greatest-hits", "greatest-hits-2"]);
        assert_eq!(
            catalog.entries()[1].cover,
            CoverSource::File(second.join("front.png"))
        );
        let _ = fs::remove_dir_all(&root);
    }
}
