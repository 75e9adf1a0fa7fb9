//! Caller-owned cache of the pregenerated palette map.
//!
//! The map is loaded at most once per cache: every lookup issued before the
//! load completes waits on the same in-flight load. Afterwards lookups are
//! plain reads of an immutable map. A failed load leaves the cache empty and
//! the next lookup tries again.

use std::future::Future;
use std::path::PathBuf;

use anyhow::Result;
use sleeve_palette::{extract_palette, ImageSource, Palette};
use tokio::sync::OnceCell;

use crate::store::{parse_palette_map, PaletteMap};

/// Produces the persisted palette map, e.g. from disk or over the network.
pub trait MapLoader: Send + Sync {
    fn load(&self) -> impl Future<Output = Result<PaletteMap>> + Send;
}

/// Reads the JSON map written by the batch driver.
#[derive(Debug, Clone)]
pub struct FileMapLoader {
    path: PathBuf,
}

impl FileMapLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl MapLoader for FileMapLoader {
    async fn load(&self) -> Result<PaletteMap> {
        let bytes = tokio::fs::read(&self.path).await?;
        let map = parse_palette_map(&bytes)?;
        log::info!(
            "Loaded {} palettes from {}",
            map.len(),
            self.path.display()
        );
        Ok(map)
    }
}

pub struct PaletteCache<L> {
    loader: L,
    map: OnceCell<PaletteMap>,
}

impl<L: MapLoader> PaletteCache<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            map: OnceCell::new(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.map.initialized()
    }

    /// Non-blocking read: `None` until the map has loaded, or when it has no
    /// entry for `id`.
    pub fn get(&self, id: &str) -> Option<&Palette> {
        self.map.get()?.get(id)
    }

    /// Load the map unless it already is, sharing one load between all
    /// concurrent callers.
    pub async fn load(&self) -> Result<&PaletteMap> {
        self.map.get_or_try_init(|| self.loader.load()).await
    }

    /// Wait for the map, then look `id` up. Load failures are logged and
    /// reported as "not available".
    pub async fn lookup(&self, id: &str) -> Option<Palette> {
        match self.load().await {
            Ok(map) => map.get(id).cloned(),
            Err(err) => {
                log::warn!("Palette map unavailable: {:#}", err);
                None
            }
        }
    }

    /// Pregenerated palette for `id` if there is one, otherwise extract one
    /// from `cover` on the blocking pool. Fresh results are not stored.
    pub async fn resolve<S>(&self, id: &str, cover: S) -> Palette
    where
        S: ImageSource + Send + 'static,
    {
        if let Some(palette) = self.lookup(id).await {
            return palette;
        }

        log::debug!("No pregenerated palette for {}, extracting", id);
        match tokio::task::spawn_blocking(move || extract_palette(&cover)).await {
            Ok(palette) => palette,
            Err(err) => {
                log::warn!("Extraction for {} failed: {}", id, err);
                Palette::fallback()
            }
        }
    }
}
