//! Catalog handling around the palette extractor: album discovery, the
//! batch driver that writes the palette map and stylesheet, and the cache the
//! interactive side reads them through.

pub mod batch;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod cover;
pub mod slug;
pub mod store;
pub mod stylesheet;

pub use batch::{generate_palettes, BatchReport};
pub use cache::{FileMapLoader, MapLoader, PaletteCache};
pub use catalog::{Catalog, CatalogEntry, CatalogError};
pub use config::GenerateConfig;
pub use cover::CoverSource;
pub use slug::sanitize_slug;
pub use store::{load_palette_map, save_palette_map, PaletteMap};
pub use stylesheet::{render_stylesheet, rule_block};
