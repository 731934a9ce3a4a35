use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use rayon::ThreadPoolBuilder;
use road_connect::{join_with, IndexStrategy, JoinConf};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod layer;

const LAYER_HELP: &str = "\
Feature ids are read from the feature's `id`, else from a numeric `fid`
property, else from the feature's position in its collection. Mixing
explicit ids with position ids can make two features share an id, which
is reported as a duplicate id.

Roads must be LineStrings or single-part MultiLineStrings; multi-part
roads are rejected. Buildings must be Points or single-point MultiPoints.";

/// Draws a line from every building to the closest point of its nearest road.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, after_help = LAYER_HELP)]
struct Args {
    /// Road layer, a GeoJSON FeatureCollection of linestrings (single-part only)
    #[arg(long, value_name = "FILE")]
    roads: PathBuf,

    /// Building layer, a GeoJSON FeatureCollection of points
    #[arg(long, value_name = "FILE")]
    buildings: PathBuf,

    /// Where to write the connector lines
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// JSON file with join settings; flags below override it
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Query buildings in parallel
    #[arg(long)]
    parallel: bool,

    /// Scan every road instead of building an R-tree
    #[arg(long)]
    linear_scan: bool,

    /// Distance slack under which roads count as tied
    #[arg(long)]
    tie_tolerance: Option<f64>,

    /// Worker threads for --parallel (default: number of CPUs)
    #[arg(short, long)]
    threads: Option<usize>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        error!("{e:#}");
        return Err(e);
    }
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    let start_time = Instant::now();

    if let Some(threads) = args.threads {
        ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to build thread pool")?;
    }

    let conf = load_conf(args)?;
    info!("Join settings: {:?}", conf);

    let roads = layer::read_roads(&args.roads)?;
    info!("Loaded {} roads from {:?}", roads.len(), args.roads);
    let buildings = layer::read_buildings(&args.buildings)?;
    info!("Loaded {} buildings from {:?}", buildings.len(), args.buildings);

    let connectors = join_with(&roads, &buildings, &conf).context("nearest road join failed")?;
    if roads.is_empty() {
        info!("Road layer is empty, no connectors produced");
    }

    layer::write_connectors(&args.output, &connectors)?;
    info!("Written {} connectors: {:?}", connectors.len(), args.output);

    info!("Total processing time: {:?}", start_time.elapsed());
    Ok(())
}

fn load_conf(args: &Args) -> Result<JoinConf> {
    let mut conf = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("invalid join settings in {}", path.display()))?
        }
        None => JoinConf::default(),
    };

    if args.parallel {
        conf.parallel = true;
    }
    if args.linear_scan {
        conf.strategy = IndexStrategy::LinearScan;
    }
    if let Some(tolerance) = args.tie_tolerance {
        conf.tie_tolerance = tolerance;
    }
    conf.validate()?;
    Ok(conf)
}
