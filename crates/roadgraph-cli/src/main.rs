use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use roadgraph_cli::output::{render_route, render_stats, render_tour, GraphStats, OutputFormat};
use roadgraph_lib::{
    load_road_map, plan_route, plan_tour, resolve_map_path, GeoPoint, RouteAlgorithm, RouteGraph,
    RouteRequest,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Road map route planning utilities")]
struct Cli {
    /// Road map file to load (falls back to the ROADGRAPH_MAP environment variable).
    #[arg(long, global = true)]
    map: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute a route between two intersections given as `x,y`.
    Route {
        /// Starting intersection.
        #[arg(long = "from", allow_hyphen_values = true)]
        from: GeoPoint,
        /// Destination intersection.
        #[arg(long = "to", allow_hyphen_values = true)]
        to: GeoPoint,
        /// Search algorithm: bfs, dijkstra or a-star.
        #[arg(long, default_value_t = RouteAlgorithm::AStar)]
        algorithm: RouteAlgorithm,
    },
    /// Build a greedy round trip through every intersection.
    Tour {
        /// Intersection where the tour starts and ends.
        #[arg(long, allow_hyphen_values = true)]
        start: GeoPoint,
    },
    /// Report vertex and edge counts for the loaded map.
    Stats,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let graph = load_graph(cli.map.as_deref())?;

    let rendered = match cli.command {
        Command::Route {
            from,
            to,
            algorithm,
        } => {
            let request = RouteRequest::new(from, to, algorithm);
            let plan = plan_route(&graph, &request)
                .with_context(|| format!("failed to plan {algorithm} route"))?;
            render_route(&plan, cli.format)?
        }
        Command::Tour { start } => {
            let plan = plan_tour(&graph, start).context("failed to plan tour")?;
            render_tour(&plan, cli.format)?
        }
        Command::Stats => render_stats(&GraphStats::from_graph(&graph), cli.format)?,
    };

    print!("{rendered}");
    Ok(())
}

fn load_graph(map: Option<&Path>) -> Result<RouteGraph> {
    let path = resolve_map_path(map)?;
    let mut graph = RouteGraph::new();
    load_road_map(&path, &mut graph)
        .with_context(|| format!("failed to load road map from {}", path.display()))?;
    Ok(graph)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
