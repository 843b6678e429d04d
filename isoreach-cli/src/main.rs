//! Batch isochrone runner: loads a road network and a set of source
//! locations, computes service areas for each source at each travel-time
//! threshold, and writes one GeoJSON FeatureCollection.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info, warn};
use rayon::prelude::*;
use serde::Deserialize;

use isoreach_core::prelude::*;

#[derive(Parser, Debug)]
#[command(
    name = "isoreach",
    version,
    about = "Compute road-network isochrones (service areas) for a set of source locations"
)]
struct Cli {
    /// Road network GeoJSON (LineString features)
    #[arg(long, value_name = "*.geojson", required_unless_present = "config")]
    network: Option<PathBuf>,

    /// Source locations GeoJSON (Point features)
    #[arg(long, value_name = "*.geojson", required_unless_present = "config")]
    sources: Option<PathBuf>,

    /// Output GeoJSON path
    #[arg(long, short, value_name = "*.geojson", required_unless_present = "config")]
    output: Option<PathBuf>,

    /// Travel-time thresholds in seconds
    #[arg(long, value_delimiter = ',', default_values_t = [300.0, 600.0, 900.0])]
    thresholds: Vec<f64>,

    /// Assumed average driving speed, miles per hour
    #[arg(long, default_value_t = 25.0)]
    speed_mph: f64,

    /// Add reverse arcs even for one-way roads
    #[arg(long)]
    ignore_oneway: bool,

    /// TOML file describing the whole analysis; other flags are ignored
    #[arg(long, value_name = "*.toml")]
    config: Option<PathBuf>,
}

/// Full analysis description, loadable from TOML
#[derive(Debug, Deserialize)]
struct AnalysisConfig {
    network: PathBuf,
    sources: PathBuf,
    output: PathBuf,
    #[serde(default = "default_thresholds")]
    thresholds: Vec<f64>,
    #[serde(default)]
    network_config: NetworkConfig,
}

fn default_thresholds() -> Vec<f64> {
    vec![300.0, 600.0, 900.0]
}

impl AnalysisConfig {
    fn from_cli(cli: Cli) -> Result<Self, Error> {
        if let Some(path) = cli.config {
            let raw = std::fs::read_to_string(&path)?;
            return toml::from_str(&raw)
                .map_err(|e| Error::InvalidData(format!("bad config file: {e}")));
        }

        // clap enforces presence of these three when --config is absent
        let missing = |flag: &str| Error::InvalidData(format!("--{flag} is required"));
        Ok(Self {
            network: cli.network.ok_or_else(|| missing("network"))?,
            sources: cli.sources.ok_or_else(|| missing("sources"))?,
            output: cli.output.ok_or_else(|| missing("output"))?,
            thresholds: cli.thresholds,
            network_config: NetworkConfig {
                speed_mph: cli.speed_mph,
                respect_oneway: !cli.ignore_oneway,
            },
        })
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    let config = AnalysisConfig::from_cli(cli)?;

    let network = load_road_network(&config.network, &config.network_config)?;
    let sources = load_points(&config.sources)?;
    info!(
        "Computing {} thresholds for {} sources",
        config.thresholds.len(),
        sources.len()
    );

    let snapped = snap_sources(&network, &sources);

    // One task per (source, threshold); order is the output order
    let tasks: Vec<(&NamedPoint, petgraph::graph::NodeIndex, Seconds)> = snapped
        .iter()
        .flat_map(|&(point, node)| {
            config
                .thresholds
                .iter()
                .map(move |&threshold| (point, node, threshold))
        })
        .collect();

    let areas: Vec<(Option<&str>, Option<ServiceArea>)> = tasks
        .par_iter()
        .map(|&(point, node, threshold)| {
            generate_isochrone(&network, node, threshold)
                .map(|area| (point.name.as_deref(), area))
        })
        .collect::<Result<_, _>>()?;

    let collection = service_areas_to_geojson(
        areas
            .iter()
            .filter_map(|(name, area)| area.as_ref().map(|a| (*name, a))),
    )?;

    std::fs::write(&config.output, to_geojson_string(&collection)?)?;
    info!(
        "Wrote {} service areas to {}",
        collection.features.len(),
        config.output.display()
    );

    Ok(())
}

/// Snaps each source to its nearest network node; sources that cannot be
/// snapped (empty network) are reported and skipped.
fn snap_sources<'a>(
    network: &RoadNetwork,
    sources: &'a [NamedPoint],
) -> Vec<(&'a NamedPoint, petgraph::graph::NodeIndex)> {
    sources
        .iter()
        .filter_map(|point| match network.nearest_node(&point.geometry) {
            Some((node, distance)) => {
                info!(
                    "Snapped {} to node {} ({distance:.0} m away)",
                    point.name.as_deref().unwrap_or("unnamed source"),
                    node.index()
                );
                Some((point, node))
            }
            None => {
                warn!(
                    "No network node to snap {} onto - skipping",
                    point.name.as_deref().unwrap_or("unnamed source")
                );
                None
            }
        })
        .collect()
}
