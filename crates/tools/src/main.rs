use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use formats::{Bucket, ExecutionResponses, load_json};
use foundation::LngLat;
use geochart::{
    DataVerdict, GeoConfig, PushpinDataSource, center_changed, extract_geo_data, is_geo_config,
    is_location_missing, validate_data, zoom_changed,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Inspect pushpin geo chart data bindings")]
struct Args {
    /// Geo chart config (JSON). Its buckets and limit override the input's.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print per-role data extracted from an execution
    Extract {
        /// JSON file with `buckets` and `execution`
        input: PathBuf,
    },

    /// Check an execution against the points limit
    Check {
        input: PathBuf,

        /// Points limit (default: config limit, else 25000)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Print the GeoJSON point source
    Source { input: PathBuf },

    /// Print the properties delta persisted after a move
    Center {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        #[arg(long)]
        tooltip_text: Option<String>,
    },

    /// Print the properties delta persisted after a zoom
    Zoom { zoom: f64 },
}

#[derive(Deserialize)]
struct Input {
    #[serde(default)]
    buckets: Vec<Bucket>,
    execution: ExecutionResponses,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = args.config.as_deref().map(load_config).transpose()?;

    let output = match args.command {
        Command::Extract { input } => {
            let (buckets, execution) = load_input(&input, config.as_ref())?;
            serde_json::to_value(extract_geo_data(&buckets, &execution))?
        }
        Command::Check { input, limit } => {
            let (buckets, execution) = load_input(&input, config.as_ref())?;
            if is_location_missing(&buckets) {
                warn!("no location bucket, nothing to render");
            }
            let limit = limit.or_else(|| config.as_ref().map(GeoConfig::limit_or_default));
            let mut on_too_large = || warn!("{} exceeds the points limit", input.display());
            let verdict = validate_data(Some(&execution), &buckets, limit, Some(&mut on_too_large));
            serde_json::json!({ "tooLarge": verdict == DataVerdict::TooLarge })
        }
        Command::Source { input } => {
            let (buckets, execution) = load_input(&input, config.as_ref())?;
            let source = PushpinDataSource::from_geo_data(&extract_geo_data(&buckets, &execution));
            info!(
                "{} features, cluster={}, {} segment items",
                source.feature_count(),
                source.cluster,
                source.segment_items.len()
            );
            source.features
        }
        Command::Center {
            lat,
            lng,
            tooltip_text,
        } => serde_json::to_value(center_changed(LngLat::new(lat, lng), tooltip_text.as_deref()))?,
        Command::Zoom { zoom } => serde_json::to_value(zoom_changed(zoom))?,
    };

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{rendered}");
    Ok(())
}

fn load_config(path: &Path) -> Result<GeoConfig, Box<dyn std::error::Error>> {
    let value: Value = load_json(path)?;
    if !is_geo_config(&value) {
        return Err(format!("{} is not a geo chart config (missing mapboxToken)", path.display()).into());
    }
    Ok(serde_json::from_value(value)?)
}

fn load_input(
    path: &Path,
    config: Option<&GeoConfig>,
) -> Result<(Vec<Bucket>, ExecutionResponses), Box<dyn std::error::Error>> {
    let input: Input = load_json(path)?;
    let buckets = match config {
        Some(config) if config.md_object.is_some() => config.buckets(),
        _ => input.buckets,
    };
    info!("loaded {} ({} buckets)", path.display(), buckets.len());
    Ok((buckets, input.execution))
}
