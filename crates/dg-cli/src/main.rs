//! dungen: build a BSP dungeon and print it
//!
//! Usage:
//!   dungen [OPTIONS]
//!   RUST_LOG=dg_core=debug dungen --seed 7 --labels

mod render;

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use dg_core::dungeon::generate_tree;
use dg_core::geometry::Rect;
use dg_core::{DungeonConfig, DungeonRng, Map};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Tile map, one character per cell
    Ascii,
    /// Full map (tiles, rooms, stats) as JSON
    Json,
    /// Partition leaves only
    Partition,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "dungen")]
#[command(version)]
#[command(about = "Generate a BSP dungeon map", long_about = None)]
struct Args {
    /// JSON file with a dungeon configuration; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long)]
    width: Option<i32>,
    #[arg(long)]
    height: Option<i32>,
    #[arg(short, long)]
    seed: Option<u64>,
    /// Smallest partition leaf side
    #[arg(long)]
    min_size: Option<i32>,
    /// Nearest neighbours per room considered for corridors
    #[arg(short = 'k', long)]
    neighbors: Option<usize>,
    /// Probability that each room side is pulled inward
    #[arg(long)]
    shrink_chance: Option<f64>,
    #[arg(short, long, value_enum, default_value = "ascii")]
    format: Format,
    /// Stamp room numbers onto the ASCII map
    #[arg(short, long)]
    labels: bool,
    /// Log generation stages (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn dungeon_config(&self) -> Result<DungeonConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => DungeonConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(min_size) = self.min_size {
            config.min_size = min_size;
        }
        if let Some(k) = self.neighbors {
            config.neighbor_count = k;
        }
        if let Some(chance) = self.shrink_chance {
            config.shrink_chance = chance;
        }
        Ok(config)
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "dg_core=debug,dungen=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = args.dungeon_config()?;
    let map = Map::generate(&config).context("invalid dungeon configuration")?;

    let stats = map.stats();
    tracing::info!(
        seed = config.seed,
        width = config.width,
        height = config.height,
        rooms = stats.rooms,
        connections = stats.connections,
        fully_connected = map.is_fully_connected(),
        "generated dungeon"
    );

    let output = match args.format {
        Format::Ascii => render::render_ascii(&map, args.labels),
        Format::Json => {
            let mut json = serde_json::to_string_pretty(&map)?;
            json.push('\n');
            json
        }
        Format::Partition => {
            // The partition is the first stage, so replaying it with the same
            // seed reproduces the tree the map was built from
            let mut rng = DungeonRng::new(config.seed);
            let root = Rect::new(0, 0, config.width, config.height);
            let tree = generate_tree(root, config.min_size, &mut rng);
            let mut text = render::render_partition(&tree);
            text.push_str(&format!("\n{} leaves\n", tree.leaf_count()));
            text
        }
    };

    io::stdout()
        .lock()
        .write_all(output.as_bytes())
        .context("writing output")?;
    Ok(())
}
