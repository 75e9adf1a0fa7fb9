use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use sleeve_core::{generate_palettes, CoverSource, FileMapLoader, GenerateConfig, PaletteCache};
use sleeve_palette::extract;

/// Album artwork palettes for themed pages.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract a palette for every album and write the map and stylesheet
    Generate(GenerateArgs),
    /// Print the palette of a single image (path or URL)
    Extract {
        image: String,
    },
    /// Look an album up in a generated map, extracting from --image if it is missing
    Lookup {
        id: String,

        #[arg(short, long, default_value = "palettes.json")]
        map: PathBuf,

        #[arg(short, long)]
        image: Option<String>,
    },
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// JSON config file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Music library to scan for album directories
    #[arg(short, long)]
    library: Option<PathBuf>,

    /// JSON list of {"id", "image"} pairs (takes precedence over --library)
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Output palette map
    #[arg(long)]
    map: Option<PathBuf>,

    /// Output stylesheet
    #[arg(long)]
    stylesheet: Option<PathBuf>,

    /// Selector and custom property prefix
    #[arg(short, long)]
    prefix: Option<String>,

    /// Concurrent extractions (0 = one per core)
    #[arg(short, long)]
    workers: Option<usize>,
}

impl GenerateArgs {
    fn into_config(self) -> Result<GenerateConfig> {
        let mut config = match &self.config {
            Some(path) => GenerateConfig::load(path)?,
            None => GenerateConfig::default(),
        };
        if self.library.is_some() {
            config.library_root = self.library;
        }
        if self.manifest.is_some() {
            config.manifest = self.manifest;
        }
        if let Some(map) = self.map {
            config.map_path = map;
        }
        if let Some(stylesheet) = self.stylesheet {
            config.stylesheet_path = stylesheet;
        }
        if let Some(prefix) = self.prefix {
            config.selector_prefix = prefix;
        }
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        Command::Generate(args) => {
            let config = args.into_config()?;
            let catalog = config.catalog()?;
            let report = generate_palettes(catalog, config.worker_count()).await;
            report.write(
                &config.map_path,
                &config.stylesheet_path,
                &config.selector_prefix,
            )?;
            println!(
                "{} palettes ({} fallback) -> {}",
                report.palettes.len(),
                report.fallbacks.len(),
                config.map_path.display()
            );
        }
        Command::Extract { image } => {
            let cover = CoverSource::from_reference(&image, Path::new("."));
            let extraction = tokio::task::spawn_blocking(move || extract(&cover)).await?;
            if extraction.is_fallback() {
                log::warn!("{} produced no usable colors", image);
            }
            println!("{}", serde_json::to_string_pretty(extraction.palette())?);
        }
        Command::Lookup { id, map, image } => {
            let cache = PaletteCache::new(FileMapLoader::new(map));
            let palette = match image {
                Some(image) => {
                    let cover = CoverSource::from_reference(&image, Path::new("."));
                    Some(cache.resolve(&id, cover).await)
                }
                None => cache.lookup(&id).await,
            };
            match palette {
                Some(palette) => println!("{}", serde_json::to_string_pretty(&palette)?),
                None => println!("{id}: not available"),
            }
        }
    }

    Ok(())
}
