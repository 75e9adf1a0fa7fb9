use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use log::{debug, info, warn};
use sleeve_palette::{extract, Extraction, Palette};
use tokio::sync::Semaphore;

use crate::catalog::Catalog;
use crate::store::{save_palette_map, write_atomic, PaletteMap};
use crate::stylesheet::render_stylesheet;

/// Result of one pass over a catalog. `palettes` has exactly one entry per
/// catalog entry; `fallbacks` lists the ids that got the default palette.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub palettes: PaletteMap,
    pub fallbacks: Vec<String>,
}

impl BatchReport {
    pub fn extracted(&self) -> usize {
        self.palettes.len() - self.fallbacks.len()
    }

    /// Persist the map as JSON and the derived stylesheet next to it.
    pub fn write(&self, map_path: &Path, stylesheet_path: &Path, prefix: &str) -> Result<()> {
        save_palette_map(&self.palettes, map_path)?;
        write_atomic(
            stylesheet_path,
            render_stylesheet(&self.palettes, prefix).as_bytes(),
        )?;
        info!(
            "Wrote {} palettes to {} and {}",
            self.palettes.len(),
            map_path.display(),
            stylesheet_path.display()
        );
        Ok(())
    }
}

pub fn default_worker_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Extract a palette for every catalog entry with at most `workers`
/// extractions running at once. A failing entry gets the fallback palette and
/// never stops the others.
pub async fn generate_palettes(catalog: Catalog, workers: usize) -> BatchReport {
    let workers = if workers == 0 {
        default_worker_count()
    } else {
        workers
    };
    let total = catalog.len();
    info!("Extracting {} palettes with {} workers", total, workers);

    let semaphore = Arc::new(Semaphore::new(workers));
    let mut tasks = Vec::with_capacity(total);

    for entry in catalog {
        let semaphore = semaphore.clone();
        let cover = entry.cover;
        let handle = tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await;
            tokio::task::spawn_blocking(move || extract(&cover)).await
        });
        tasks.push((entry.id, handle));
    }

    let mut report = BatchReport::default();
    for (done, (id, handle)) in tasks.into_iter().enumerate() {
        let palette = match handle.await {
            Ok(Ok(Extraction::Extracted(palette))) => palette,
            Ok(Ok(Extraction::Fallback { palette, .. })) => {
                report.fallbacks.push(id.clone());
                palette
            }
            Ok(Err(err)) | Err(err) => {
                warn!("Extraction task for {} failed: {}", id, err);
                report.fallbacks.push(id.clone());
                Palette::fallback()
            }
        };
        debug!("[{}/{}] {}: accent {}", done + 1, total, id, palette.accent);
        report.palettes.insert(id, palette);
    }

    info!(
        "Extracted {} palettes, {} used the fallback",
        report.extracted(),
        report.fallbacks.len()
    );
    report
}
