use std::path::PathBuf;

use clap::Parser;
use formats::dataset::Dataset;
use formats::timestamp::parse_timestamp;
use tools::{Report, RunOptions, build_controller, parse_lat_lng};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Cluster a geotagged dataset for one simulated map viewport"
)]
struct Args {
    /// JSON array of station and/or complaint records
    #[arg(long)]
    data: PathBuf,

    /// Map zoom level
    #[arg(long, default_value_t = 10)]
    zoom: i32,

    /// Viewport center as LAT,LNG
    #[arg(long, default_value = "42.3655,-71.1018", allow_hyphen_values = true)]
    center: String,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 1024)]
    width: u32,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 768)]
    height: u32,

    /// Draw every record individually regardless of zoom
    #[arg(long)]
    individual: bool,

    /// Only show this category ("all" for every category)
    #[arg(long)]
    category: Option<String>,

    /// Only show records reported in the last N days
    #[arg(long)]
    since_days: Option<u32>,

    /// Reference time for --since-days (ISO-8601, default: now)
    #[arg(long)]
    now: Option<String>,

    /// Record to select before reporting
    #[arg(long)]
    select: Option<u64>,

    /// JSON view configuration; missing keys keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let center = parse_lat_lng(&args.center)?;
    let now = match &args.now {
        Some(raw) => Some(parse_timestamp(raw).ok_or_else(|| format!("bad --now {raw:?}"))?),
        None => None,
    };
    let dataset = Dataset::load(&args.data).map_err(|e| e.to_string())?;

    let viewport = [f64::from(args.width), f64::from(args.height)];
    let options = RunOptions {
        individual: args.individual,
        category: args.category,
        since_days: args.since_days,
        now,
        select: args.select,
        config: args.config,
        ..RunOptions::new(center, args.zoom, viewport)
    };
    let controller = build_controller(dataset.records.clone(), &options)?;

    let report = Report::new(&controller, &dataset.content_hash);
    let out = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
    println!("{out}");
    Ok(())
}
