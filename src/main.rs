//! Replays recorded landmark streams through the accessory pose tracker.

use accessory_pose::{
    config::{Config, EXAMPLE_CONFIG},
    filters::FilterKind,
    registry::AccessoryCategory,
    replay::replay,
    tracker::{AccessoryTracker, MeshReference},
};
use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON-lines landmark recording ("-" for stdin)
    #[arg(short, long, default_value = "-")]
    input: String,

    /// Output file for pose records (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Accessory category (glasses, hat)
    #[arg(long)]
    category: Option<AccessoryCategory>,

    /// Bounding-box width of the mesh in its local units
    #[arg(short = 'w', long, default_value = "1.0")]
    mesh_width: f64,

    /// Mesh asset identity
    #[arg(long, default_value = "0")]
    mesh_id: u64,

    /// Pose filter (exponential, none)
    #[arg(short, long)]
    filter: Option<FilterKind>,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<PathBuf>,

    /// Write the example configuration to this path and exit
    #[arg(long)]
    write_example_config: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    if let Some(path) = &args.write_example_config {
        std::fs::write(path, EXAMPLE_CONFIG).with_context(|| format!("writing {}", path.display()))?;
        info!("Example configuration written to {}", path.display());
        return Ok(());
    }

    // Profiles are fixed for the whole run; a bad file stops here, not mid-stream
    let config = match &args.config {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            Config::from_file(path).with_context(|| format!("loading {}", path.display()))?
        }
        None => Config::default(),
    };
    let registry = config.registry()?;

    let category = args.category.unwrap_or(config.tracking.default_category);
    let filter = args.filter.unwrap_or(config.tracking.filter);

    let mut tracker = AccessoryTracker::new(category, &registry, filter)?;
    tracker.attach_mesh(MeshReference::new(args.mesh_id, args.mesh_width)?)?;

    let reader: Box<dyn BufRead> = if args.input == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        let file = File::open(&args.input).with_context(|| format!("opening {}", args.input))?;
        Box::new(BufReader::new(file))
    };

    let writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let stats = replay(reader, writer, &mut tracker)?;
    info!(
        "Processed {} frames: {} visible ({:.1}%), {} acquisitions, {} losses",
        stats.frames,
        stats.visible_frames,
        stats.visibility_ratio() * 100.0,
        stats.acquisitions,
        stats.losses
    );

    Ok(())
}
