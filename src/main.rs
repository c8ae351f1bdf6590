use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, info};
use osmroute::graph::{BuildConfig, RoadGraph};
use osmroute::route::Router;
use osmroute::utils;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "osmroute")]
#[command(version = "0.1")]
#[command(about = "shortest road routes on OpenStreetMap extracts", long_about = None)]
struct Args {
    /// start: a node id or `lat,lon`
    #[arg(long, allow_hyphen_values = true)]
    from: Endpoint,
    /// destination: a node id or `lat,lon`
    #[arg(long, allow_hyphen_values = true)]
    to: Endpoint,
    /// output format
    #[arg(long, value_enum, default_value_t = Format::Geojson)]
    format: Format,
    /// tag key marking a way as routable
    #[arg(long, default_value = "highway")]
    traversable_key: String,
    /// tag key holding the one-way restriction
    #[arg(long, default_value = "oneway")]
    oneway_key: String,

    /// OSM XML file
    #[arg(value_name = "MAP_FILE")]
    map_file: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Geojson,
    Wkt,
    Ids,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Endpoint {
    Node(i64),
    Coord(f64, f64),
}

impl FromStr for Endpoint {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self> {
        match s.split_once(',') {
            Some((lat, lon)) => {
                let lat: f64 = lat.trim().parse().context("invalid latitude")?;
                let lon: f64 = lon.trim().parse().context("invalid longitude")?;
                Ok(Endpoint::Coord(lat, lon))
            }
            None => Ok(Endpoint::Node(s.trim().parse().context("invalid node id")?)),
        }
    }
}

impl Endpoint {
    fn resolve(&self, graph: &RoadGraph) -> Result<i64> {
        match *self {
            Endpoint::Node(id) => {
                if !graph.contains(id) {
                    bail!("node {} not found in graph", id);
                }
                Ok(id)
            }
            Endpoint::Coord(lat, lon) => {
                let node = graph
                    .nearest_node(lat, lon)
                    .ok_or_else(|| anyhow!("graph has no nodes"))?;
                debug!("snapped ({}, {}) to node {}", lat, lon, node.id);
                Ok(node.id)
            }
        }
    }
}

fn main() -> Result<()> {
    utils::log::log_init();
    let args = Args::parse();
    debug!("{:?}", args);

    let config = BuildConfig {
        traversable_key: args.traversable_key.clone(),
        oneway_key: args.oneway_key.clone(),
    };
    let started = Instant::now();
    let graph = RoadGraph::from_path(&args.map_file, &config)
        .with_context(|| format!("load map {} failed", args.map_file.display()))?;
    info!(
        "loaded {} nodes, {} edges in {:.2?}",
        graph.node_count(),
        graph.edge_count(),
        started.elapsed()
    );

    let from = args.from.resolve(&graph)?;
    let to = args.to.resolve(&graph)?;
    let router = Router::new(&graph);
    let route = router
        .route(from, to)
        .ok_or_else(|| anyhow!("no route found from {} to {}", from, to))?;
    info!("route {} -> {}: {} nodes, {:.1} m", from, to, route.len(), route.distance);

    match args.format {
        Format::Geojson => println!("{}", route.to_geojson()),
        Format::Wkt => println!("{}", route.to_wkt()),
        Format::Ids => {
            let ids: Vec<String> = route.nodes.iter().map(|id| id.to_string()).collect();
            println!("{}", ids.join(" "));
        }
    }
    Ok(())
}
