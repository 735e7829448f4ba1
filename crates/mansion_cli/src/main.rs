//! Mansion CLI
//!
//! Build-time and diagnostic tooling for the dynamic menu:
//! - `extract`: precompute the dish color table from a photo directory
//! - `inspect`: print the palette derived from one photo
//! - `simulate`: replay a gesture script against the carousel engine
//! - `init`: write a default `mansion.toml`

mod config;
mod script;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mansion_carousel::ThemeResolver;
use mansion_core::Catalog;
use mansion_palette::{
    run_batch, ImageSource, PaletteExtractor, PaletteResolver, PrecomputedTable,
};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::MansionConfig;
use crate::script::{parse_filter, GestureScript, MenuContext, Simulator};

#[derive(Parser)]
#[command(name = "mansion")]
#[command(about = "Dish palette extraction and carousel tooling for the dynamic menu")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file, or a directory containing mansion.toml
    #[arg(short, long, global = true, default_value = ".")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Precompute palettes for every dish photo
    Extract {
        /// Photo directory (overrides [extract].images_dir)
        #[arg(long)]
        images_dir: Option<PathBuf>,

        /// Output JSON file (overrides [extract].output)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the palette of a single image as JSON
    Inspect {
        /// Image file
        image: PathBuf,
    },

    /// Replay a gesture script against the carousel
    Simulate {
        /// Script file with [[step]] entries
        script: PathBuf,

        /// Number of carousel items
        #[arg(short = 'n', long, default_value = "10")]
        items: usize,

        /// Print one JSON object per step instead of a table
        #[arg(long)]
        json: bool,

        /// Menu catalog (TOML); item count then follows the category filter
        #[arg(long)]
        menu: Option<PathBuf>,

        /// Initial category filter: "all", a slug, or a Chinese name
        #[arg(long, default_value = "all", requires = "menu")]
        category: String,

        /// Directory image references resolve against for photos missing
        /// from the color table
        #[arg(long, requires = "menu")]
        image_root: Option<PathBuf>,
    },

    /// Write a default mansion.toml
    Init {
        /// Target directory
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,

        /// Print the effective configuration instead of writing a file
        #[arg(long)]
        show: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Extract { images_dir, output } => cmd_extract(&cli.config, images_dir, output),
        Commands::Inspect { image } => cmd_inspect(&cli.config, image),
        Commands::Simulate {
            script,
            items,
            json,
            menu,
            category,
            image_root,
        } => {
            let menu = menu.map(|path| MenuArgs {
                path,
                category,
                image_root,
            });
            cmd_simulate(&cli.config, script, items, json, menu)
        }
        Commands::Init { dir, force, show } => cmd_init(&cli.config, dir, force, show),
    }
}

fn cmd_extract(
    config_path: &Path,
    images_dir: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<()> {
    let config = MansionConfig::load_from_dir(config_path)?;

    let mut options = config.extract.batch_options();
    if let Some(dir) = images_dir {
        options.images_dir = dir;
    }
    let output = output.unwrap_or(config.extract.output);

    let extractor = PaletteExtractor::new(config.analysis);
    let report = run_batch(&extractor, &options)
        .with_context(|| format!("Failed to scan {}", options.images_dir.display()))?;

    report
        .table
        .save(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!(
        "Extracted {} palettes ({} failed) to {}",
        report.processed,
        report.failed.len(),
        output.display()
    );
    for name in &report.failed {
        tracing::warn!("  {} uses the default palette", name);
    }

    Ok(())
}

fn cmd_inspect(config_path: &Path, image: PathBuf) -> Result<()> {
    let config = MansionConfig::load_from_dir(config_path)?;
    let extractor = PaletteExtractor::new(config.analysis);

    let analysis = extractor
        .analyze(&ImageSource::file(&image))
        .with_context(|| format!("Failed to analyze {}", image.display()))?;

    println!("{}", serde_json::to_string_pretty(&analysis)?);
    Ok(())
}

struct MenuArgs {
    path: PathBuf,
    category: String,
    image_root: Option<PathBuf>,
}

fn cmd_simulate(
    config_path: &Path,
    script_path: PathBuf,
    items: usize,
    json: bool,
    menu: Option<MenuArgs>,
) -> Result<()> {
    let config = MansionConfig::load_from_dir(config_path)?;
    let script = GestureScript::load(&script_path)?;

    let mut simulator = Simulator::new(items, config.carousel);
    if let Some(menu) = menu {
        let catalog = Catalog::load(&menu.path)
            .with_context(|| format!("Failed to load menu {}", menu.path.display()))?;
        let filter = parse_filter(&menu.category)
            .with_context(|| format!("Unknown category '{}'", menu.category))?;

        let table = PrecomputedTable::load_or_empty(&config.extract.output);
        let mut palettes =
            PaletteResolver::new(table).with_extractor(PaletteExtractor::new(config.analysis));
        if let Some(root) = menu.image_root {
            palettes = palettes.with_image_root(root);
        }

        simulator = simulator.with_menu(MenuContext::new(
            catalog,
            filter,
            ThemeResolver::new(palettes),
        ));
    }

    info!(
        "Replaying {} steps over {} items",
        script.steps.len(),
        simulator.engine().item_count()
    );
    for report in simulator.run(&script) {
        if json {
            println!("{}", serde_json::to_string(&report)?);
        } else {
            println!("{}", report);
        }
    }

    tracing::debug!("phase history: {:?}", simulator.engine().phase_history());
    Ok(())
}

fn cmd_init(config_path: &Path, dir: PathBuf, force: bool, show: bool) -> Result<()> {
    if show {
        let config = MansionConfig::load_from_dir(config_path)?;
        print!("{}", config.to_toml()?);
        return Ok(());
    }
    let path = config::write_default(&dir, force)?;
    info!("Created {}", path.display());
    Ok(())
}
