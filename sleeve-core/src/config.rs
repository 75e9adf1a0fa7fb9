//! Settings for a palette generation run.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::batch::default_worker_count;
use crate::catalog::Catalog;
use crate::stylesheet::DEFAULT_SELECTOR_PREFIX;

/// Loaded from an optional JSON file; command-line flags override fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// Music library scanned for album directories.
    pub library_root: Option<PathBuf>,
    /// JSON list of `{"id", "image"}` pairs; wins over `library_root`.
    pub manifest: Option<PathBuf>,
    pub map_path: PathBuf,
    pub stylesheet_path: PathBuf,
    pub selector_prefix: String,
    /// Concurrent extractions; 0 means one per available core.
    pub workers: usize,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            library_root: None,
            manifest: None,
            map_path: PathBuf::from("palettes.json"),
            stylesheet_path: PathBuf::from("palettes.css"),
            selector_prefix: DEFAULT_SELECTOR_PREFIX.to_string(),
            workers: 0,
        }
    }
}

impl GenerateConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }

    pub fn worker_count(&self) -> usize {
        if self.workers == 0 {
            default_worker_count()
        } else {
            self.workers
        }
    }

    /// Build the catalog this run covers.
    pub fn catalog(&self) -> Result<Catalog> {
        if let Some(manifest) = &self.manifest {
            return Ok(Catalog::from_manifest(manifest)?);
        }
        if let Some(root) = &self.library_root {
            return Catalog::scan_library(root);
        }
        bail!("No catalog source configured: set a manifest or a library root")
    }
}
